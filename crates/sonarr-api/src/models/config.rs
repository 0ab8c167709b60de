// Singleton configuration resources
//
// Each exists exactly once on the server (id 1), read with `GET config/<x>`
// and written with `PUT config/<x>/1`.

use serde::{Deserialize, Serialize};

// ── Host ─────────────────────────────────────────────────────────────

/// `GET|PUT config/host`
///
/// Secrets (`password`, `proxyPassword`, `sslCertPassword`) come back
/// redacted or empty; callers must not treat them as authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfigResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub bind_address: String,
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub ssl_port: i64,
    #[serde(default)]
    pub enable_ssl: bool,
    #[serde(default)]
    pub launch_browser: bool,
    #[serde(default)]
    pub authentication_method: String,
    #[serde(default)]
    pub authentication_required: String,
    #[serde(default)]
    pub analytics_enabled: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
    #[serde(default)]
    pub log_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_log_level: Option<String>,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub ssl_cert_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_cert_password: Option<String>,
    #[serde(default)]
    pub url_base: String,
    #[serde(default)]
    pub instance_name: String,
    #[serde(default)]
    pub application_url: String,
    #[serde(default)]
    pub update_automatically: bool,
    #[serde(default)]
    pub update_mechanism: String,
    #[serde(default)]
    pub update_script_path: String,
    #[serde(default)]
    pub proxy_enabled: bool,
    #[serde(default)]
    pub proxy_type: String,
    #[serde(default)]
    pub proxy_hostname: String,
    #[serde(default)]
    pub proxy_port: i64,
    #[serde(default)]
    pub proxy_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_password: Option<String>,
    #[serde(default)]
    pub proxy_bypass_filter: String,
    #[serde(default)]
    pub proxy_bypass_local_addresses: bool,
    #[serde(default)]
    pub certificate_validation: String,
    #[serde(default)]
    pub backup_folder: String,
    #[serde(default)]
    pub backup_interval: i64,
    #[serde(default)]
    pub backup_retention: i64,
}

// ── Indexer ──────────────────────────────────────────────────────────

/// `GET|PUT config/indexer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexerConfigResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub minimum_age: i64,
    #[serde(default)]
    pub retention: i64,
    #[serde(default)]
    pub maximum_size: i64,
    #[serde(default)]
    pub rss_sync_interval: i64,
}

// ── Naming ───────────────────────────────────────────────────────────

/// `GET|PUT config/naming`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingConfigResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub rename_episodes: bool,
    #[serde(default)]
    pub replace_illegal_characters: bool,
    #[serde(default)]
    pub colon_replacement_format: i64,
    #[serde(default)]
    pub custom_colon_replacement_format: String,
    #[serde(default)]
    pub multi_episode_style: i64,
    #[serde(default)]
    pub standard_episode_format: String,
    #[serde(default)]
    pub daily_episode_format: String,
    #[serde(default)]
    pub anime_episode_format: String,
    #[serde(default)]
    pub series_folder_format: String,
    #[serde(default)]
    pub season_folder_format: String,
    #[serde(default)]
    pub specials_folder_format: String,
}

// ── Media management ─────────────────────────────────────────────────

/// `GET|PUT config/mediamanagement`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaManagementConfigResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub auto_unmonitor_previously_downloaded_episodes: bool,
    #[serde(default)]
    pub recycle_bin: String,
    #[serde(default)]
    pub recycle_bin_cleanup_days: i64,
    #[serde(default)]
    pub download_propers_and_repacks: String,
    #[serde(default)]
    pub create_empty_series_folders: bool,
    #[serde(default)]
    pub delete_empty_folders: bool,
    #[serde(default)]
    pub file_date: String,
    #[serde(default)]
    pub rescan_after_refresh: String,
    #[serde(default)]
    pub set_permissions_linux: bool,
    #[serde(default)]
    pub chmod_folder: String,
    #[serde(default)]
    pub chown_group: String,
    #[serde(default)]
    pub episode_title_required: String,
    #[serde(default)]
    pub skip_free_space_check_when_importing: bool,
    #[serde(default)]
    pub minimum_free_space_when_importing: i64,
    #[serde(default)]
    pub copy_using_hardlinks: bool,
    #[serde(default)]
    pub use_script_import: bool,
    #[serde(default)]
    pub script_import_path: String,
    #[serde(default)]
    pub import_extra_files: bool,
    #[serde(default)]
    pub extra_file_extensions: String,
    #[serde(default)]
    pub enable_media_info: bool,
}
