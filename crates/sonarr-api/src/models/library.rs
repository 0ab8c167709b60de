// Library-level resources: tags, root folders, remote path mappings, series

use serde::{Deserialize, Serialize};

/// `tag`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub label: String,
}

/// `rootfolder`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFolderResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub accessible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_space: Option<i64>,
    #[serde(default)]
    pub unmapped_folders: Vec<UnmappedFolder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmappedFolder {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
}

/// `remotepathmapping`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePathMappingResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub remote_path: String,
    #[serde(default)]
    pub local_path: String,
}

/// `series` -- only the attributes the series lookup exposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_slug: String,
    #[serde(default)]
    pub tvdb_id: i64,
    #[serde(default)]
    pub year: i64,
    #[serde(default)]
    pub monitored: bool,
    #[serde(default)]
    pub season_folder: bool,
    #[serde(default)]
    pub use_scene_numbering: bool,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub root_folder_path: String,
    #[serde(default)]
    pub quality_profile_id: i64,
    #[serde(default)]
    pub series_type: String,
    #[serde(default)]
    pub tags: Vec<i64>,
}

/// `system/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub instance_name: String,
    #[serde(default)]
    pub version: String,
}
