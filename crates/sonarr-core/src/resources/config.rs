// Settings singletons: indexer, naming, media management, quality definitions

use serde::{Deserialize, Serialize};
use sonarr_api::endpoint;
use sonarr_api::models::{
    IndexerConfigResource, MediaManagementConfigResource, NamingConfigResource, Quality,
    QualityDefinitionResource,
};

use crate::engine::{Lifecycle, ManagedResource, SingletonWrite};
use crate::error::CoreError;

const BY_ID: Lifecycle = Lifecycle::Singleton {
    write: SingletonWrite::ById,
};

/// Wire <-> state conversions are plain `From` impls; the trait impl only
/// wires them in.
macro_rules! singleton_resource {
    ($state:ty, $wire:ty, $type_name:literal, $endpoint:expr) => {
        impl ManagedResource for $state {
            type State = Self;
            type Wire = $wire;

            const TYPE_NAME: &'static str = $type_name;
            const ENDPOINT: &'static str = $endpoint;
            const LIFECYCLE: Lifecycle = BY_ID;

            fn build_wire(state: &Self) -> Result<$wire, CoreError> {
                Ok(state.clone().into())
            }

            fn apply_wire(wire: $wire) -> Result<Self, CoreError> {
                Ok(wire.into())
            }

            fn identifier(state: &Self) -> i64 {
                state.id
            }

            fn set_identifier(state: &mut Self, id: i64) {
                state.id = id;
            }
        }
    };
}

// ── Indexer config ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexerConfig {
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

impl From<IndexerConfigResource> for IndexerConfig {
    fn from(w: IndexerConfigResource) -> Self {
        Self {
            id: w.id,
            minimum_age: w.minimum_age,
            retention: w.retention,
            maximum_size: w.maximum_size,
            rss_sync_interval: w.rss_sync_interval,
        }
    }
}

impl From<IndexerConfig> for IndexerConfigResource {
    fn from(s: IndexerConfig) -> Self {
        Self {
            id: s.id,
            minimum_age: s.minimum_age,
            retention: s.retention,
            maximum_size: s.maximum_size,
            rss_sync_interval: s.rss_sync_interval,
        }
    }
}

singleton_resource!(
    IndexerConfig,
    IndexerConfigResource,
    "indexer_config",
    endpoint::INDEXER_CONFIG
);

// ── Naming ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Naming {
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

impl From<NamingConfigResource> for Naming {
    fn from(w: NamingConfigResource) -> Self {
        Self {
            id: w.id,
            rename_episodes: w.rename_episodes,
            replace_illegal_characters: w.replace_illegal_characters,
            colon_replacement_format: w.colon_replacement_format,
            custom_colon_replacement_format: w.custom_colon_replacement_format,
            multi_episode_style: w.multi_episode_style,
            standard_episode_format: w.standard_episode_format,
            daily_episode_format: w.daily_episode_format,
            anime_episode_format: w.anime_episode_format,
            series_folder_format: w.series_folder_format,
            season_folder_format: w.season_folder_format,
            specials_folder_format: w.specials_folder_format,
        }
    }
}

impl From<Naming> for NamingConfigResource {
    fn from(s: Naming) -> Self {
        Self {
            id: s.id,
            rename_episodes: s.rename_episodes,
            replace_illegal_characters: s.replace_illegal_characters,
            colon_replacement_format: s.colon_replacement_format,
            custom_colon_replacement_format: s.custom_colon_replacement_format,
            multi_episode_style: s.multi_episode_style,
            standard_episode_format: s.standard_episode_format,
            daily_episode_format: s.daily_episode_format,
            anime_episode_format: s.anime_episode_format,
            series_folder_format: s.series_folder_format,
            season_folder_format: s.season_folder_format,
            specials_folder_format: s.specials_folder_format,
        }
    }
}

singleton_resource!(Naming, NamingConfigResource, "naming", endpoint::NAMING_CONFIG);

// ── Media management ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaManagement {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub unmonitor_previous_episodes: bool,
    #[serde(default)]
    pub recycle_bin: String,
    #[serde(default)]
    pub recycle_bin_cleanup_days: i64,
    #[serde(default)]
    pub download_propers_repacks: String,
    #[serde(default)]
    pub create_empty_folders: bool,
    #[serde(default)]
    pub delete_empty_folders: bool,
    #[serde(default)]
    pub file_date: String,
    #[serde(default)]
    pub rescan_after_refresh: String,
    #[serde(default)]
    pub set_permissions: bool,
    #[serde(default)]
    pub chmod_folder: String,
    #[serde(default)]
    pub chown_group: String,
    #[serde(default)]
    pub episode_title_required: String,
    #[serde(default)]
    pub skip_free_space_check: bool,
    #[serde(default)]
    pub minimum_free_space: i64,
    #[serde(default)]
    pub hardlinks_copy: bool,
    #[serde(default)]
    pub import_extra_files: bool,
    #[serde(default)]
    pub extra_file_extensions: String,
    #[serde(default)]
    pub enable_media_info: bool,
    #[serde(default)]
    pub use_script_import: bool,
    #[serde(default)]
    pub script_import_path: String,
}

impl From<MediaManagementConfigResource> for MediaManagement {
    fn from(w: MediaManagementConfigResource) -> Self {
        Self {
            id: w.id,
            unmonitor_previous_episodes: w.auto_unmonitor_previously_downloaded_episodes,
            recycle_bin: w.recycle_bin,
            recycle_bin_cleanup_days: w.recycle_bin_cleanup_days,
            download_propers_repacks: w.download_propers_and_repacks,
            create_empty_folders: w.create_empty_series_folders,
            delete_empty_folders: w.delete_empty_folders,
            file_date: w.file_date,
            rescan_after_refresh: w.rescan_after_refresh,
            set_permissions: w.set_permissions_linux,
            chmod_folder: w.chmod_folder,
            chown_group: w.chown_group,
            episode_title_required: w.episode_title_required,
            skip_free_space_check: w.skip_free_space_check_when_importing,
            minimum_free_space: w.minimum_free_space_when_importing,
            hardlinks_copy: w.copy_using_hardlinks,
            import_extra_files: w.import_extra_files,
            extra_file_extensions: w.extra_file_extensions,
            enable_media_info: w.enable_media_info,
            use_script_import: w.use_script_import,
            script_import_path: w.script_import_path,
        }
    }
}

impl From<MediaManagement> for MediaManagementConfigResource {
    fn from(s: MediaManagement) -> Self {
        Self {
            id: s.id,
            auto_unmonitor_previously_downloaded_episodes: s.unmonitor_previous_episodes,
            recycle_bin: s.recycle_bin,
            recycle_bin_cleanup_days: s.recycle_bin_cleanup_days,
            download_propers_and_repacks: s.download_propers_repacks,
            create_empty_series_folders: s.create_empty_folders,
            delete_empty_folders: s.delete_empty_folders,
            file_date: s.file_date,
            rescan_after_refresh: s.rescan_after_refresh,
            set_permissions_linux: s.set_permissions,
            chmod_folder: s.chmod_folder,
            chown_group: s.chown_group,
            episode_title_required: s.episode_title_required,
            skip_free_space_check_when_importing: s.skip_free_space_check,
            minimum_free_space_when_importing: s.minimum_free_space,
            copy_using_hardlinks: s.hardlinks_copy,
            use_script_import: s.use_script_import,
            script_import_path: s.script_import_path,
            import_extra_files: s.import_extra_files,
            extra_file_extensions: s.extra_file_extensions,
            enable_media_info: s.enable_media_info,
        }
    }
}

singleton_resource!(
    MediaManagement,
    MediaManagementConfigResource,
    "media_management",
    endpoint::MEDIA_MANAGEMENT_CONFIG
);

// ── Quality definitions ──────────────────────────────────────────────

/// Size limits for one quality, in MB per minute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityDefinition {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub quality_id: i64,
    #[serde(default)]
    pub quality_name: String,
    #[serde(default)]
    pub min_size: f64,
    #[serde(default)]
    pub max_size: Option<f64>,
    #[serde(default)]
    pub preferred_size: Option<f64>,
}

/// The whole definition table, managed as one singleton. Only definitions
/// the user lists are tracked; the rest stay untouched on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityDefinitions {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub definitions: Vec<QualityDefinition>,
}

impl ManagedResource for QualityDefinitions {
    type State = Self;
    type Wire = Vec<QualityDefinitionResource>;

    const TYPE_NAME: &'static str = "quality_definitions";
    const ENDPOINT: &'static str = endpoint::QUALITY_DEFINITION;
    const LIFECYCLE: Lifecycle = Lifecycle::Singleton {
        write: SingletonWrite::Path(endpoint::QUALITY_DEFINITION_UPDATE),
    };

    fn build_wire(state: &Self) -> Result<Self::Wire, CoreError> {
        Ok(state
            .definitions
            .iter()
            .map(|d| QualityDefinitionResource {
                id: d.id,
                quality: Quality {
                    id: d.quality_id,
                    name: d.quality_name.clone(),
                    ..Default::default()
                },
                title: d.title.clone(),
                min_size: d.min_size,
                max_size: d.max_size,
                preferred_size: d.preferred_size,
                ..Default::default()
            })
            .collect())
    }

    fn apply_wire(wire: Self::Wire) -> Result<Self, CoreError> {
        Ok(Self {
            id: endpoint::SINGLETON_ID,
            definitions: wire
                .into_iter()
                .map(|w| QualityDefinition {
                    id: w.id,
                    title: w.title,
                    quality_id: w.quality.id,
                    quality_name: w.quality.name,
                    min_size: w.min_size,
                    max_size: w.max_size,
                    preferred_size: w.preferred_size,
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

    /// Keep only the definitions the baseline tracks, in its order. An
    /// empty baseline (import) tracks everything.
    fn reconcile(baseline: &Self, fresh: &mut Self) {
        if baseline.definitions.is_empty() {
            return;
        }
        let mut tracked = Vec::with_capacity(baseline.definitions.len());
        for wanted in &baseline.definitions {
            if let Some(found) = fresh.definitions.iter().find(|d| d.id == wanted.id) {
                tracked.push(found.clone());
            }
        }
        fresh.definitions = tracked;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn media_management_renames_round_trip() {
        let state = MediaManagement {
            id: 1,
            unmonitor_previous_episodes: true,
            hardlinks_copy: true,
            minimum_free_space: 100,
            recycle_bin: "/bin".into(),
            ..Default::default()
        };
        let wire = MediaManagement::build_wire(&state).unwrap();
        assert!(wire.auto_unmonitor_previously_downloaded_episodes);
        assert!(wire.copy_using_hardlinks);
        assert_eq!(MediaManagement::apply_wire(wire).unwrap(), state);
    }

    #[test]
    fn quality_definitions_track_declared_subset() {
        let baseline = QualityDefinitions {
            id: 1,
            definitions: vec![QualityDefinition {
                id: 4,
                title: "HDTV-720p".into(),
                max_size: Some(100.0),
                ..Default::default()
            }],
        };
        let wire = vec![
            QualityDefinitionResource {
                id: 1,
                title: "SDTV".into(),
                ..Default::default()
            },
            QualityDefinitionResource {
                id: 4,
                title: "HDTV-720p".into(),
                max_size: Some(100.0),
                ..Default::default()
            },
        ];
        let mut fresh = QualityDefinitions::apply_wire(wire).unwrap();
        QualityDefinitions::reconcile(&baseline, &mut fresh);

        assert_eq!(fresh.id, 1);
        assert_eq!(fresh.definitions.len(), 1);
        assert_eq!(fresh.definitions[0].title, "HDTV-720p");
    }
}
