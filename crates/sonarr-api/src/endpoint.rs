// Relative endpoint paths under `/api/v3/`.
//
// Collections follow `GET|POST /<path>`, `GET|PUT|DELETE /<path>/{id}`.
// Singleton configs are read with `GET /<path>` and written with
// `PUT /<path>/1`.

pub const DOWNLOAD_CLIENT: &str = "downloadclient";
pub const INDEXER: &str = "indexer";
pub const IMPORT_LIST: &str = "importlist";
pub const NOTIFICATION: &str = "notification";
pub const METADATA: &str = "metadata";

pub const TAG: &str = "tag";
pub const ROOT_FOLDER: &str = "rootfolder";
pub const REMOTE_PATH_MAPPING: &str = "remotepathmapping";
pub const RELEASE_PROFILE: &str = "releaseprofile";
pub const QUALITY_PROFILE: &str = "qualityprofile";
pub const CUSTOM_FORMAT: &str = "customformat";
pub const SERIES: &str = "series";

pub const HOST_CONFIG: &str = "config/host";
pub const INDEXER_CONFIG: &str = "config/indexer";
pub const NAMING_CONFIG: &str = "config/naming";
pub const MEDIA_MANAGEMENT_CONFIG: &str = "config/mediamanagement";
pub const QUALITY_DEFINITION: &str = "qualitydefinition";
pub const QUALITY_DEFINITION_UPDATE: &str = "qualitydefinition/update";

pub const SYSTEM_STATUS: &str = "system/status";

/// Id every singleton config is stored under.
pub const SINGLETON_ID: i64 = 1;
