// Indexers: `indexer`

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sonarr_api::endpoint;
use sonarr_api::models::IndexerHeader;

use crate::generic::{
    FamilyItem, GenericItem, GenericSettings, Identity, ProviderFamily, Settings, UnionBag,
};
use crate::{concrete_settings, field_bag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Indexers;

impl ProviderFamily for Indexers {
    type Header = IndexerHeader;
    type Fields = IndexerFields;

    const ENDPOINT: &'static str = endpoint::INDEXER;
    const TYPE_NAME: &'static str = "indexer";
    const PLURAL: &'static str = "indexers";
    const TAGGED: bool = true;
    const SENSITIVE: &'static [&'static str] = &["apiKey", "passKey", "password", "cookie"];
}

field_bag! {
    /// Union of every indexer's fields. The seed criteria live under dotted
    /// wire names.
    pub struct IndexerFields {
        base_url: String = "baseUrl",
        api_path: String = "apiPath",
        api_key: String = "apiKey",
        pass_key: String = "passKey",
        username: String = "username",
        password: String = "password",
        cookie: String = "cookie",
        categories: Vec<i64> = "categories",
        anime_categories: Vec<i64> = "animeCategories",
        anime_standard_format_search: bool = "animeStandardFormatSearch",
        additional_parameters: String = "additionalParameters",
        multi_languages: Vec<i64> = "multiLanguages",
        fail_downloads: Vec<i64> = "failDownloads",
        minimum_seeders: i64 = "minimumSeeders",
        ranked_only: bool = "rankedOnly",
        captcha_token: String = "captchaToken",
        seed_ratio: f64 = "seedCriteria.seedRatio",
        seed_time: i64 = "seedCriteria.seedTime",
        season_pack_seed_time: i64 = "seedCriteria.seasonPackSeedTime",
        reject_blocklisted_torrent_hashes_while_grabbing: bool =
            "rejectBlocklistedTorrentHashesWhileGrabbing",
    }
}

impl UnionBag for IndexerFields {
    type Family = Indexers;
}

// ── Desired state ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indexer<S> {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub enable_rss: bool,
    #[serde(default)]
    pub enable_automatic_search: bool,
    #[serde(default)]
    pub enable_interactive_search: bool,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub download_client_id: i64,
    #[serde(default)]
    pub season_search_maximum_single_episode_age: i64,
    #[serde(default)]
    pub tags: BTreeSet<i64>,
    #[serde(flatten)]
    pub settings: S,
}

impl<S: Settings<Family = Indexers>> FamilyItem for Indexer<S> {
    type Family = Indexers;

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

    fn to_generic(&self) -> GenericItem<Indexers> {
        let identity = self.settings.identity();
        GenericItem {
            id: self.id,
            name: self.name.clone(),
            fields: self.settings.to_union(&identity.implementation),
            tags: self.tags.clone(),
            header: IndexerHeader {
                enable_rss: self.enable_rss,
                enable_automatic_search: self.enable_automatic_search,
                enable_interactive_search: self.enable_interactive_search,
                priority: self.priority,
                download_client_id: self.download_client_id,
                season_search_maximum_single_episode_age: self
                    .season_search_maximum_single_episode_age,
                protocol: identity.discriminator.unwrap_or_default(),
            },
            implementation: identity.implementation,
            config_contract: identity.config_contract,
        }
    }

    fn from_generic(item: &GenericItem<Indexers>) -> Self {
        let identity = Identity::of(item, &item.header.protocol);
        Self {
            id: item.id,
            name: item.name.clone(),
            enable_rss: item.header.enable_rss,
            enable_automatic_search: item.header.enable_automatic_search,
            enable_interactive_search: item.header.enable_interactive_search,
            priority: item.header.priority,
            download_client_id: item.header.download_client_id,
            season_search_maximum_single_episode_age: item
                .header
                .season_search_maximum_single_episode_age,
            tags: item.tags.clone(),
            settings: S::from_union(&identity, &item.fields),
        }
    }
}

// ── Implementations ──────────────────────────────────────────────────

pub type GenericIndexer = Indexer<GenericSettings<IndexerFields>>;

field_bag! {
    pub struct NewznabSettings {
        base_url: String = "baseUrl",
        api_path: String = "apiPath",
        api_key: String = "apiKey",
        categories: Vec<i64> = "categories",
        anime_categories: Vec<i64> = "animeCategories",
        anime_standard_format_search: bool = "animeStandardFormatSearch",
        additional_parameters: String = "additionalParameters",
        multi_languages: Vec<i64> = "multiLanguages",
    }
}

concrete_settings! {
    NewznabSettings for Indexers {
        type_name: "indexer_newznab",
        implementation: "Newznab",
        config_contract: "NewznabSettings",
        discriminator: Some("usenet"),
        sensitive: ["apiKey"],
        normalized: ["baseUrl"],
    }
}

pub type NewznabIndexer = Indexer<NewznabSettings>;

field_bag! {
    pub struct TorznabSettings {
        base_url: String = "baseUrl",
        api_path: String = "apiPath",
        api_key: String = "apiKey",
        categories: Vec<i64> = "categories",
        anime_categories: Vec<i64> = "animeCategories",
        anime_standard_format_search: bool = "animeStandardFormatSearch",
        additional_parameters: String = "additionalParameters",
        multi_languages: Vec<i64> = "multiLanguages",
        minimum_seeders: i64 = "minimumSeeders",
        seed_ratio: f64 = "seedCriteria.seedRatio",
        seed_time: i64 = "seedCriteria.seedTime",
        season_pack_seed_time: i64 = "seedCriteria.seasonPackSeedTime",
        reject_blocklisted_torrent_hashes_while_grabbing: bool =
            "rejectBlocklistedTorrentHashesWhileGrabbing",
    }
}

concrete_settings! {
    TorznabSettings for Indexers {
        type_name: "indexer_torznab",
        implementation: "Torznab",
        config_contract: "TorznabSettings",
        discriminator: Some("torrent"),
        sensitive: ["apiKey"],
        normalized: ["baseUrl"],
    }
}

pub type TorznabIndexer = Indexer<TorznabSettings>;
