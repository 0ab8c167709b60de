// Sonarr v3 wire models
//
// Request/response bodies for the endpoints the provider manages. Fields use
// `#[serde(default)]` liberally because the server omits or nulls attributes
// inconsistently across versions; unknown attributes are ignored.

pub mod config;
pub mod library;
pub mod profile;
pub mod provider;

pub use config::{
    HostConfigResource, IndexerConfigResource, MediaManagementConfigResource,
    NamingConfigResource,
};
pub use library::{
    RemotePathMappingResource, RootFolderResource, SeriesResource, SystemStatus, TagResource,
    UnmappedFolder,
};
pub use profile::{
    CustomFormatResource, ProfileFormatItem, Quality, QualityDefinitionResource,
    QualityProfileItem, QualityProfileResource, ReleaseProfileResource,
};
pub use provider::{
    CustomFormatConditionHeader, CustomFormatSpecificationResource, DownloadClientHeader,
    DownloadClientResource, Field, ImportListHeader, ImportListResource, IndexerHeader,
    IndexerResource, MetadataHeader, MetadataResource, NotificationHeader, NotificationResource,
    ProviderResource,
};
