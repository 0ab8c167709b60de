// Polymorphic provider resources
//
// Download clients, indexers, import lists, notifications, metadata consumers
// and custom-format specifications share one wire shape: a fixed header plus
// a `fields` bag of `{name, value}` pairs whose schema is selected by
// `implementation` / `configContract`.

use serde::{Deserialize, Serialize};

// ── Field ────────────────────────────────────────────────────────────

/// One entry of a provider's dynamic `fields` list.
///
/// The server returns label/help/type metadata alongside each value; only
/// `name` and `value` matter for round-tripping, the rest is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// ── Envelope ─────────────────────────────────────────────────────────

/// A provider resource with its family-specific header `H` flattened in.
///
/// `tags` is `None` only for families that carry no tags on the wire
/// (custom-format specifications); tagged families always send a list,
/// empty or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResource<H> {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub implementation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub config_contract: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<i64>>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub header: H,
}

// ── Family headers ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadClientHeader {
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub remove_completed_downloads: bool,
    #[serde(default)]
    pub remove_failed_downloads: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexerHeader {
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
    pub protocol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportListHeader {
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
}

/// Notification triggers. The server's read-only `supportsOnX` flags are
/// not modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationHeader {
    #[serde(default)]
    pub on_grab: bool,
    #[serde(default)]
    pub on_download: bool,
    #[serde(default)]
    pub on_upgrade: bool,
    #[serde(default)]
    pub on_import_complete: bool,
    #[serde(default)]
    pub on_rename: bool,
    #[serde(default)]
    pub on_series_add: bool,
    #[serde(default)]
    pub on_series_delete: bool,
    #[serde(default)]
    pub on_episode_file_delete: bool,
    #[serde(default)]
    pub on_episode_file_delete_for_upgrade: bool,
    #[serde(default)]
    pub on_health_issue: bool,
    #[serde(default)]
    pub on_health_restored: bool,
    #[serde(default)]
    pub on_application_update: bool,
    #[serde(default)]
    pub on_manual_interaction_required: bool,
    #[serde(default)]
    pub include_health_warnings: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataHeader {
    #[serde(default)]
    pub enable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFormatConditionHeader {
    #[serde(default)]
    pub negate: bool,
    #[serde(default)]
    pub required: bool,
}

pub type DownloadClientResource = ProviderResource<DownloadClientHeader>;
pub type IndexerResource = ProviderResource<IndexerHeader>;
pub type ImportListResource = ProviderResource<ImportListHeader>;
pub type NotificationResource = ProviderResource<NotificationHeader>;
pub type MetadataResource = ProviderResource<MetadataHeader>;
pub type CustomFormatSpecificationResource = ProviderResource<CustomFormatConditionHeader>;
