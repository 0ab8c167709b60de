// Import lists: `importlist`

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sonarr_api::endpoint;
use sonarr_api::models::ImportListHeader;

use crate::generic::{
    FamilyItem, GenericItem, GenericSettings, Identity, ProviderFamily, Settings, UnionBag,
};
use crate::{concrete_settings, field_bag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportLists;

impl ProviderFamily for ImportLists {
    type Header = ImportListHeader;
    type Fields = ImportListFields;

    const ENDPOINT: &'static str = endpoint::IMPORT_LIST;
    const TYPE_NAME: &'static str = "import_list";
    const PLURAL: &'static str = "import_lists";
    const TAGGED: bool = true;
    const SENSITIVE: &'static [&'static str] = &["apiKey", "accessToken", "refreshToken"];
}

field_bag! {
    pub struct ImportListFields {
        base_url: String = "baseUrl",
        api_key: String = "apiKey",
        profile_ids: Vec<i64> = "profileIds",
        language_profile_ids: Vec<i64> = "languageProfileIds",
        tag_ids: Vec<i64> = "tagIds",
        root_folder_paths: Vec<String> = "rootFolderPaths",
        list_id: String = "listId",
        access_token: String = "accessToken",
        refresh_token: String = "refreshToken",
        expires: String = "expires",
        auth_user: String = "authUser",
        username: String = "username",
        listname: String = "listname",
        limit: i64 = "limit",
        trakt_list_type: i64 = "traktListType",
        rating: String = "rating",
        genres: String = "genres",
        years: String = "years",
    }
}

impl UnionBag for ImportListFields {
    type Family = ImportLists;
}

// ── Desired state ────────────────────────────────────────────────────

/// `list_type` is injected by concrete lists and user-supplied for the
/// generic one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportList<S> {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub enable_automatic_add: bool,
    #[serde(default)]
    pub search_for_missing_episodes: bool,
    #[serde(default)]
    pub should_monitor: String,
    #[serde(default)]
    pub monitor_new_items: String,
    #[serde(default)]
    pub root_folder_path: String,
    #[serde(default)]
    pub quality_profile_id: i64,
    #[serde(default)]
    pub series_type: String,
    #[serde(default)]
    pub season_folder: bool,
    #[serde(default)]
    pub list_type: String,
    #[serde(default)]
    pub list_order: i64,
    #[serde(default)]
    pub tags: BTreeSet<i64>,
    #[serde(flatten)]
    pub settings: S,
}

impl<S: Settings<Family = ImportLists>> FamilyItem for ImportList<S> {
    type Family = ImportLists;

    const TYPE_NAME: &'static str = S::TYPE_NAME;
    const SENSITIVE: &'static [&'static str] = S::SENSITIVE;
    const NORMALIZED: &'static [&'static str] = S::NORMALIZED;
    const ALIASES: &'static [(&'static str, &'static str)] = S::ALIASES;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn to_generic(&self) -> GenericItem<ImportLists> {
        let identity = self.settings.identity();
        GenericItem {
            id: self.id,
            name: self.name.clone(),
            fields: self.settings.to_union(&identity.implementation),
            tags: self.tags.clone(),
            header: ImportListHeader {
                enable_automatic_add: self.enable_automatic_add,
                search_for_missing_episodes: self.search_for_missing_episodes,
                should_monitor: self.should_monitor.clone(),
                monitor_new_items: self.monitor_new_items.clone(),
                root_folder_path: self.root_folder_path.clone(),
                quality_profile_id: self.quality_profile_id,
                series_type: self.series_type.clone(),
                season_folder: self.season_folder,
                list_type: identity
                    .discriminator
                    .unwrap_or_else(|| self.list_type.clone()),
                list_order: self.list_order,
            },
            implementation: identity.implementation,
            config_contract: identity.config_contract,
        }
    }

    fn from_generic(item: &GenericItem<ImportLists>) -> Self {
        // listType is a plain attribute here, not the generic `protocol`.
        let identity = Identity::of(item, "");
        Self {
            id: item.id,
            name: item.name.clone(),
            enable_automatic_add: item.header.enable_automatic_add,
            search_for_missing_episodes: item.header.search_for_missing_episodes,
            should_monitor: item.header.should_monitor.clone(),
            monitor_new_items: item.header.monitor_new_items.clone(),
            root_folder_path: item.header.root_folder_path.clone(),
            quality_profile_id: item.header.quality_profile_id,
            series_type: item.header.series_type.clone(),
            season_folder: item.header.season_folder,
            list_type: item.header.list_type.clone(),
            list_order: item.header.list_order,
            tags: item.tags.clone(),
            settings: S::from_union(&identity, &item.fields),
        }
    }
}

// ── Implementations ──────────────────────────────────────────────────

pub type GenericImportList = ImportList<GenericSettings<ImportListFields>>;

field_bag! {
    /// Another Sonarr instance.
    pub struct SonarrListSettings {
        base_url: String = "baseUrl",
        api_key: String = "apiKey",
        profile_ids: Vec<i64> = "profileIds",
        language_profile_ids: Vec<i64> = "languageProfileIds",
        tag_ids: Vec<i64> = "tagIds",
        root_folder_paths: Vec<String> = "rootFolderPaths",
    }
}

concrete_settings! {
    SonarrListSettings for ImportLists {
        type_name: "import_list_sonarr",
        implementation: "SonarrImport",
        config_contract: "SonarrSettings",
        discriminator: Some("program"),
        sensitive: ["apiKey"],
        normalized: ["baseUrl"],
    }
}

pub type SonarrImportList = ImportList<SonarrListSettings>;

field_bag! {
    pub struct ImdbListSettings {
        list_id: String = "listId",
    }
}

concrete_settings! {
    ImdbListSettings for ImportLists {
        type_name: "import_list_imdb",
        implementation: "ImdbListImport",
        config_contract: "ImdbSettings",
        discriminator: Some("other"),
        sensitive: [],
    }
}

pub type ImdbImportList = ImportList<ImdbListSettings>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::field::FieldBag;

    #[test]
    fn concrete_list_type_wins_over_user_value() {
        let list = ImdbImportList {
            name: "imdb".into(),
            list_type: "trakt".into(),
            settings: ImdbListSettings {
                list_id: Some("ls000000000".into()),
            },
            ..Default::default()
        };
        assert_eq!(list.to_generic().header.list_type, "other");
    }

    #[test]
    fn sonarr_list_round_trips() {
        let list = SonarrImportList {
            id: 2,
            name: "upstream".into(),
            enable_automatic_add: true,
            should_monitor: "all".into(),
            monitor_new_items: "all".into(),
            root_folder_path: "/tv".into(),
            quality_profile_id: 1,
            series_type: "standard".into(),
            season_folder: true,
            list_type: "program".into(),
            tags: BTreeSet::from([1]),
            settings: SonarrListSettings {
                base_url: Some("http://other:8989".into()),
                api_key: Some("k".into()),
                profile_ids: Some(vec![1]),
                language_profile_ids: Some(vec![1]),
                tag_ids: Some(vec![]),
                root_folder_paths: Some(vec!["/tv".into()]),
            },
            ..Default::default()
        };
        let back =
            SonarrImportList::from_generic(&GenericItem::decode(list.to_generic().encode()).unwrap());
        assert_eq!(back, list);
    }

    #[test]
    fn concrete_fields_are_contained_in_union() {
        fn contained<B: FieldBag>(implementation: &str) {
            for name in B::wire_names() {
                assert!(
                    ImportListFields::spec(name, implementation).is_some(),
                    "{name} missing from union for {implementation}"
                );
            }
        }
        contained::<SonarrListSettings>("SonarrImport");
        contained::<ImdbListSettings>("ImdbListImport");
    }
}
