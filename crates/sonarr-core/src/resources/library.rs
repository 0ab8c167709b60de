// Tags, root folders, remote path mappings

use serde::{Deserialize, Serialize};
use sonarr_api::endpoint;
use sonarr_api::models::{self, RemotePathMappingResource, RootFolderResource, TagResource};

use super::keep_path_spelling;
use crate::engine::{Lifecycle, ManagedResource};
use crate::error::CoreError;

// ── Tag ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: i64,
    pub label: String,
}

impl ManagedResource for Tag {
    type State = Self;
    type Wire = TagResource;

    const TYPE_NAME: &'static str = "tag";
    const ENDPOINT: &'static str = endpoint::TAG;
    const IMPORT_KEY: Option<&'static str> = Some("label");

    fn build_wire(state: &Self) -> Result<TagResource, CoreError> {
        Ok(TagResource {
            id: state.id,
            label: state.label.clone(),
        })
    }

    fn apply_wire(wire: TagResource) -> Result<Self, CoreError> {
        Ok(Self {
            id: wire.id,
            label: wire.label,
        })
    }

    fn identifier(state: &Self) -> i64 {
        state.id
    }

    fn set_identifier(state: &mut Self, id: i64) {
        state.id = id;
    }

    /// The server lowercases labels.
    fn reconcile(baseline: &Self, fresh: &mut Self) {
        if fresh.label.eq_ignore_ascii_case(&baseline.label) {
            fresh.label.clone_from(&baseline.label);
        }
    }
}

// ── Root folder ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedFolder {
    pub name: String,
    pub path: String,
}

/// A library root. Only `path` is user-supplied; changing it replaces the
/// folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootFolder {
    #[serde(default)]
    pub id: i64,
    pub path: String,
    #[serde(default)]
    pub accessible: bool,
    #[serde(default)]
    pub unmapped_folders: Vec<UnmappedFolder>,
}

impl ManagedResource for RootFolder {
    type State = Self;
    type Wire = RootFolderResource;

    const TYPE_NAME: &'static str = "root_folder";
    const ENDPOINT: &'static str = endpoint::ROOT_FOLDER;
    const LIFECYCLE: Lifecycle = Lifecycle::Immutable;
    const IMPORT_KEY: Option<&'static str> = Some("path");

    fn build_wire(state: &Self) -> Result<RootFolderResource, CoreError> {
        Ok(RootFolderResource {
            id: state.id,
            path: state.path.clone(),
            ..Default::default()
        })
    }

    fn apply_wire(wire: RootFolderResource) -> Result<Self, CoreError> {
        Ok(Self {
            id: wire.id,
            path: wire.path,
            accessible: wire.accessible,
            unmapped_folders: wire
                .unmapped_folders
                .into_iter()
                .map(|f: models::UnmappedFolder| UnmappedFolder {
                    name: f.name,
                    path: f.path,
                })
                .collect(),
        })
    }

    fn identifier(state: &Self) -> i64 {
        state.id
    }

    fn set_identifier(state: &mut Self, id: i64) {
        state.id = id;
    }

    fn reconcile(baseline: &Self, fresh: &mut Self) {
        keep_path_spelling(&baseline.path, &mut fresh.path);
    }
}

// ── Remote path mapping ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemotePathMapping {
    #[serde(default)]
    pub id: i64,
    pub host: String,
    pub remote_path: String,
    pub local_path: String,
}

impl ManagedResource for RemotePathMapping {
    type State = Self;
    type Wire = RemotePathMappingResource;

    const TYPE_NAME: &'static str = "remote_path_mapping";
    const ENDPOINT: &'static str = endpoint::REMOTE_PATH_MAPPING;

    fn build_wire(state: &Self) -> Result<RemotePathMappingResource, CoreError> {
        Ok(RemotePathMappingResource {
            id: state.id,
            host: state.host.clone(),
            remote_path: state.remote_path.clone(),
            local_path: state.local_path.clone(),
        })
    }

    fn apply_wire(wire: RemotePathMappingResource) -> Result<Self, CoreError> {
        Ok(Self {
            id: wire.id,
            host: wire.host,
            remote_path: wire.remote_path,
            local_path: wire.local_path,
        })
    }

    fn identifier(state: &Self) -> i64 {
        state.id
    }

    fn set_identifier(state: &mut Self, id: i64) {
        state.id = id;
    }

    /// The server appends a trailing separator to both paths.
    fn reconcile(baseline: &Self, fresh: &mut Self) {
        keep_path_spelling(&baseline.remote_path, &mut fresh.remote_path);
        keep_path_spelling(&baseline.local_path, &mut fresh.local_path);
    }
}
