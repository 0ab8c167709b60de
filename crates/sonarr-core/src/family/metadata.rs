// Metadata consumers: `metadata`

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sonarr_api::endpoint;
use sonarr_api::models::MetadataHeader;

use crate::generic::{
    FamilyItem, GenericItem, GenericSettings, Identity, ProviderFamily, Settings, UnionBag,
};
use crate::{concrete_settings, field_bag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataConsumers;

impl ProviderFamily for MetadataConsumers {
    type Header = MetadataHeader;
    type Fields = MetadataFields;

    const ENDPOINT: &'static str = endpoint::METADATA;
    const TYPE_NAME: &'static str = "metadata";
    const PLURAL: &'static str = "metadata_consumers";
    const TAGGED: bool = true;
    const SENSITIVE: &'static [&'static str] = &[];
}

field_bag! {
    pub struct MetadataFields {
        series_metadata: bool = "seriesMetadata",
        series_metadata_episode_guide: bool = "seriesMetadataEpisodeGuide",
        series_metadata_url: bool = "seriesMetadataUrl",
        episode_metadata: bool = "episodeMetadata",
        episode_image_thumb: bool = "episodeImageThumb",
        series_images: bool = "seriesImages",
        season_images: bool = "seasonImages",
        episode_images: bool = "episodeImages",
    }
}

impl UnionBag for MetadataFields {
    type Family = MetadataConsumers;
}

// ── Desired state ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata<S> {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub tags: BTreeSet<i64>,
    #[serde(flatten)]
    pub settings: S,
}

impl<S: Settings<Family = MetadataConsumers>> FamilyItem for Metadata<S> {
    type Family = MetadataConsumers;

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

    fn to_generic(&self) -> GenericItem<MetadataConsumers> {
        let identity = self.settings.identity();
        GenericItem {
            id: self.id,
            name: self.name.clone(),
            fields: self.settings.to_union(&identity.implementation),
            tags: self.tags.clone(),
            header: MetadataHeader {
                enable: self.enable,
            },
            implementation: identity.implementation,
            config_contract: identity.config_contract,
        }
    }

    fn from_generic(item: &GenericItem<MetadataConsumers>) -> Self {
        let identity = Identity::of(item, "");
        Self {
            id: item.id,
            name: item.name.clone(),
            enable: item.header.enable,
            tags: item.tags.clone(),
            settings: S::from_union(&identity, &item.fields),
        }
    }
}

// ── Implementations ──────────────────────────────────────────────────

pub type GenericMetadata = Metadata<GenericSettings<MetadataFields>>;

field_bag! {
    /// Kodi (server-side `Xbmc`).
    pub struct KodiSettings {
        series_metadata: bool = "seriesMetadata",
        series_metadata_episode_guide: bool = "seriesMetadataEpisodeGuide",
        series_metadata_url: bool = "seriesMetadataUrl",
        episode_metadata: bool = "episodeMetadata",
        episode_image_thumb: bool = "episodeImageThumb",
        series_images: bool = "seriesImages",
        season_images: bool = "seasonImages",
        episode_images: bool = "episodeImages",
    }
}

concrete_settings! {
    KodiSettings for MetadataConsumers {
        type_name: "metadata_kodi",
        implementation: "XbmcMetadata",
        config_contract: "XbmcMetadataSettings",
        discriminator: None,
        sensitive: [],
    }
}

pub type KodiMetadata = Metadata<KodiSettings>;

field_bag! {
    pub struct RoksboxSettings {
        episode_metadata: bool = "episodeMetadata",
        series_images: bool = "seriesImages",
        season_images: bool = "seasonImages",
        episode_images: bool = "episodeImages",
    }
}

concrete_settings! {
    RoksboxSettings for MetadataConsumers {
        type_name: "metadata_roksbox",
        implementation: "RoksboxMetadata",
        config_contract: "RoksboxMetadataSettings",
        discriminator: None,
        sensitive: [],
    }
}

pub type RoksboxMetadata = Metadata<RoksboxSettings>;
