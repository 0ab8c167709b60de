// ── Host protocol surface ──
//
// Object-safe handlers the host runtime drives with JSON state, plus the
// registry mapping `sonarr_*` type names to them. Handlers are configured
// once with a shared `ProviderData` and never mutated afterwards.

use std::any::Any;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sonarr_api::SonarrClient;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{ProviderConfig, ProviderData};
use crate::data_sources::{ConditionSource, List, Lookup, SeriesLookup, SingletonRead};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::engine::{self, Family, Lifecycle, ManagedResource, Outcome};
use crate::error::CoreError;
use crate::family::{download_client, import_list, indexer, metadata, notification};
use crate::generic::{FamilyItem, ProviderFamily};
use crate::resources;

/// Prefix of every host-visible type name.
pub const PROVIDER_NAME: &str = "sonarr";

/// `sonarr_<type>`
pub fn qualified(type_name: &str) -> String {
    format!("{PROVIDER_NAME}_{type_name}")
}

// ── Responses ────────────────────────────────────────────────────────

/// Result of one host call. `state == None` without errors means absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

impl Response {
    pub fn failed(verb: &str, type_name: &str, err: &CoreError) -> Self {
        Self {
            state: None,
            diagnostics: Diagnostic::from_error(verb, type_name, err).into(),
        }
    }

    /// Serialise a typed outcome, keeping diagnostics gathered beforehand.
    pub fn from_outcome<S: Serialize>(
        verb: &str,
        type_name: &str,
        outcome: Outcome<S>,
        mut diagnostics: Diagnostics,
    ) -> Self {
        diagnostics.extend(outcome.diagnostics);
        let state = match outcome.state.map(|s| serde_json::to_value(s)).transpose() {
            Ok(state) => state,
            Err(e) => {
                diagnostics.push(Diagnostic::from_error(verb, type_name, &e.into()));
                None
            }
        };
        Self { state, diagnostics }
    }

    pub fn is_ok(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// What the host needs to know about a type beyond its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub type_name: String,
    pub block: BlockKind,
    pub singleton: bool,
    /// State attribute accepted as a non-numeric import identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_key: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deprecated: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BlockKind {
    Resource,
    DataSource,
}

// ── Handler traits ───────────────────────────────────────────────────

#[async_trait]
pub trait ResourceHandler: Send + Sync {
    fn type_name(&self) -> &str;
    fn schema(&self) -> Schema;
    fn configure(&self, data: Option<Arc<dyn Any + Send + Sync>>) -> Diagnostics;

    async fn create(&self, plan: Value, cancel: &CancellationToken) -> Response;
    async fn read(&self, prior: Value, cancel: &CancellationToken) -> Response;
    async fn update(&self, plan: Value, prior: Value, cancel: &CancellationToken) -> Response;
    async fn delete(&self, prior: Value, cancel: &CancellationToken) -> Response;
    async fn import_state(&self, identifier: &str, cancel: &CancellationToken) -> Response;
}

#[async_trait]
pub trait DataSourceHandler: Send + Sync {
    fn type_name(&self) -> &str;
    fn schema(&self) -> Schema;
    fn configure(&self, data: Option<Arc<dyn Any + Send + Sync>>) -> Diagnostics;

    async fn read(&self, config: Value, cancel: &CancellationToken) -> Response;
}

// ── Shared handler plumbing ──────────────────────────────────────────

/// Provider data slot filled by `configure`.
#[derive(Debug, Default)]
pub(crate) struct Configured(OnceLock<Arc<ProviderData>>);

impl Configured {
    /// `None` is a no-op: the host may configure types before the provider.
    pub(crate) fn configure(
        &self,
        type_name: &str,
        data: Option<Arc<dyn Any + Send + Sync>>,
    ) -> Diagnostics {
        let Some(data) = data else {
            return Diagnostics::default();
        };
        match data.downcast::<ProviderData>() {
            Ok(data) => {
                if self.0.set(data).is_err() {
                    debug!(type_name, "already configured");
                }
                Diagnostics::default()
            }
            Err(_) => {
                let err = CoreError::UnexpectedConfigureType {
                    expected: "ProviderData",
                };
                Diagnostic::from_error("configure", type_name, &err).into()
            }
        }
    }

    pub(crate) fn client(&self) -> Result<&SonarrClient, CoreError> {
        self.0
            .get()
            .map(|data| &data.client)
            .ok_or(CoreError::NotConfigured)
    }
}

/// Rename deprecated attributes in place, warning once per alias used.
pub(crate) fn migrate_aliases(
    type_name: &str,
    aliases: &[(&'static str, &'static str)],
    value: &mut Value,
    diagnostics: &mut Diagnostics,
) {
    let Some(object) = value.as_object_mut() else {
        return;
    };
    for &(old, new) in aliases {
        let Some(aliased) = object.remove(old) else {
            continue;
        };
        warn!(type_name, attribute = old, "deprecated attribute");
        diagnostics.push(
            Diagnostic::warning(
                DiagnosticKind::Deprecated,
                format!("`{old}` is deprecated and will be removed, use `{new}` instead"),
            )
            .with_attribute(old),
        );
        if !object.contains_key(new) {
            object.insert(new.to_owned(), aliased);
        }
    }
}

pub(crate) fn parse<T: DeserializeOwned>(value: Value) -> Result<T, CoreError> {
    serde_json::from_value(value).map_err(|e| CoreError::InvalidState {
        message: e.to_string(),
    })
}

// ── Typed resource handler ───────────────────────────────────────────

/// `ResourceHandler` for any `ManagedResource`.
pub struct ResourceType<R> {
    name: String,
    data: Configured,
    _resource: PhantomData<fn() -> R>,
}

impl<R: ManagedResource> ResourceType<R> {
    pub fn new() -> Self {
        Self {
            name: qualified(R::TYPE_NAME),
            data: Configured::default(),
            _resource: PhantomData,
        }
    }

    /// Host JSON to state, migrating deprecated attribute names first.
    fn decode(&self, mut value: Value, diagnostics: &mut Diagnostics) -> Result<R::State, CoreError> {
        migrate_aliases(&self.name, R::ALIASES, &mut value, diagnostics);
        parse(value)
    }
}

impl<R: ManagedResource> Default for ResourceType<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: ManagedResource> ResourceHandler for ResourceType<R> {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Schema {
        Schema {
            type_name: self.name.clone(),
            block: BlockKind::Resource,
            singleton: matches!(R::LIFECYCLE, Lifecycle::Singleton { .. }),
            import_key: R::IMPORT_KEY,
            deprecated: R::ALIASES.to_vec(),
        }
    }

    fn configure(&self, data: Option<Arc<dyn Any + Send + Sync>>) -> Diagnostics {
        self.data.configure(&self.name, data)
    }

    async fn create(&self, plan: Value, cancel: &CancellationToken) -> Response {
        let mut diagnostics = Diagnostics::default();
        let result = self
            .decode(plan, &mut diagnostics)
            .and_then(|plan| Ok((plan, self.data.client()?)));
        match result {
            Ok((plan, client)) => {
                let outcome = engine::create::<R>(client, &plan, cancel).await;
                Response::from_outcome("create", &self.name, outcome, diagnostics)
            }
            Err(e) => Response::failed("create", &self.name, &e),
        }
    }

    async fn read(&self, prior: Value, cancel: &CancellationToken) -> Response {
        let mut diagnostics = Diagnostics::default();
        let result = self
            .decode(prior, &mut diagnostics)
            .and_then(|prior| Ok((prior, self.data.client()?)));
        match result {
            Ok((prior, client)) => {
                let outcome = engine::read::<R>(client, &prior, cancel).await;
                Response::from_outcome("read", &self.name, outcome, diagnostics)
            }
            Err(e) => Response::failed("read", &self.name, &e),
        }
    }

    async fn update(&self, plan: Value, prior: Value, cancel: &CancellationToken) -> Response {
        let mut diagnostics = Diagnostics::default();
        let result = self.decode(plan, &mut diagnostics).and_then(|plan| {
            let prior = self.decode(prior, &mut Diagnostics::default())?;
            Ok((plan, prior, self.data.client()?))
        });
        match result {
            Ok((plan, prior, client)) => {
                let outcome = engine::update::<R>(client, &plan, &prior, cancel).await;
                Response::from_outcome("update", &self.name, outcome, diagnostics)
            }
            Err(e) => Response::failed("update", &self.name, &e),
        }
    }

    async fn delete(&self, prior: Value, cancel: &CancellationToken) -> Response {
        let result = self
            .decode(prior, &mut Diagnostics::default())
            .and_then(|prior| Ok((prior, self.data.client()?)));
        match result {
            Ok((prior, client)) => {
                let outcome = engine::delete::<R>(client, &prior, cancel).await;
                Response::from_outcome("delete", &self.name, outcome, Diagnostics::default())
            }
            Err(e) => Response::failed("delete", &self.name, &e),
        }
    }

    async fn import_state(&self, identifier: &str, cancel: &CancellationToken) -> Response {
        match self.data.client() {
            Ok(client) => {
                let outcome = engine::import::<R>(client, identifier, cancel).await;
                Response::from_outcome("import", &self.name, outcome, Diagnostics::default())
            }
            Err(e) => Response::failed("import", &self.name, &e),
        }
    }
}

// ── Registry ─────────────────────────────────────────────────────────

/// Every resource and data source type the provider exposes.
pub struct Provider {
    resources: BTreeMap<String, Box<dyn ResourceHandler>>,
    data_sources: BTreeMap<String, Box<dyn DataSourceHandler>>,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider {
    pub fn new() -> Self {
        let mut provider = Self {
            resources: BTreeMap::new(),
            data_sources: BTreeMap::new(),
        };
        provider.register_resources();
        provider.register_data_sources();
        provider
    }

    fn add_resource<R: ManagedResource>(&mut self) {
        let handler = ResourceType::<R>::new();
        self.resources
            .insert(handler.type_name().to_owned(), Box::new(handler));
    }

    fn add_data_source(&mut self, handler: impl DataSourceHandler + 'static) {
        self.data_sources
            .insert(handler.type_name().to_owned(), Box::new(handler));
    }

    fn register_resources(&mut self) {
        // Download clients
        self.add_resource::<Family<download_client::GenericDownloadClient>>();
        self.add_resource::<Family<download_client::QBittorrentDownloadClient>>();
        self.add_resource::<Family<download_client::SabnzbdDownloadClient>>();
        self.add_resource::<Family<download_client::TransmissionDownloadClient>>();
        self.add_resource::<Family<download_client::DelugeDownloadClient>>();
        self.add_resource::<Family<download_client::NzbgetDownloadClient>>();
        self.add_resource::<Family<download_client::UTorrentDownloadClient>>();
        // Indexers
        self.add_resource::<Family<indexer::GenericIndexer>>();
        self.add_resource::<Family<indexer::NewznabIndexer>>();
        self.add_resource::<Family<indexer::TorznabIndexer>>();
        // Import lists
        self.add_resource::<Family<import_list::GenericImportList>>();
        self.add_resource::<Family<import_list::SonarrImportList>>();
        self.add_resource::<Family<import_list::ImdbImportList>>();
        // Notifications
        self.add_resource::<Family<notification::GenericNotification>>();
        self.add_resource::<Family<notification::DiscordNotification>>();
        self.add_resource::<Family<notification::WebhookNotification>>();
        self.add_resource::<Family<notification::EmailNotification>>();
        // Metadata
        self.add_resource::<Family<metadata::GenericMetadata>>();
        self.add_resource::<Family<metadata::KodiMetadata>>();
        self.add_resource::<Family<metadata::RoksboxMetadata>>();
        // Plain resources
        self.add_resource::<resources::Tag>();
        self.add_resource::<resources::RootFolder>();
        self.add_resource::<resources::RemotePathMapping>();
        self.add_resource::<resources::ReleaseProfile>();
        self.add_resource::<resources::QualityProfile>();
        self.add_resource::<resources::CustomFormat>();
        // Singletons
        self.add_resource::<resources::Host>();
        self.add_resource::<resources::IndexerConfig>();
        self.add_resource::<resources::Naming>();
        self.add_resource::<resources::MediaManagement>();
        self.add_resource::<resources::QualityDefinitions>();
    }

    fn register_data_sources(&mut self) {
        self.add_family_sources::<download_client::GenericDownloadClient>();
        self.add_family_sources::<indexer::GenericIndexer>();
        self.add_family_sources::<import_list::GenericImportList>();
        self.add_family_sources::<notification::GenericNotification>();
        self.add_family_sources::<metadata::GenericMetadata>();

        self.add_data_source(Lookup::<resources::Tag>::new("label"));
        self.add_data_source(List::<resources::Tag>::new("tags"));
        self.add_data_source(Lookup::<resources::RootFolder>::new("path"));
        self.add_data_source(List::<resources::RootFolder>::new("root_folders"));
        self.add_data_source(Lookup::<resources::RemotePathMapping>::new("id"));
        self.add_data_source(List::<resources::RemotePathMapping>::new("remote_path_mappings"));
        self.add_data_source(Lookup::<resources::ReleaseProfile>::new("name"));
        self.add_data_source(List::<resources::ReleaseProfile>::new("release_profiles"));
        self.add_data_source(Lookup::<resources::QualityProfile>::new("name"));
        self.add_data_source(List::<resources::QualityProfile>::new("quality_profiles"));
        self.add_data_source(Lookup::<resources::CustomFormat>::new("name"));
        self.add_data_source(List::<resources::CustomFormat>::new("custom_formats"));
        self.add_data_source(SeriesLookup::new());

        self.add_data_source(SingletonRead::<resources::Host>::new());
        self.add_data_source(SingletonRead::<resources::IndexerConfig>::new());
        self.add_data_source(SingletonRead::<resources::Naming>::new());
        self.add_data_source(SingletonRead::<resources::MediaManagement>::new());
        self.add_data_source(SingletonRead::<resources::QualityDefinitions>::new());

        for source in ConditionSource::all() {
            self.add_data_source(source);
        }
    }

    /// Lookup by name and the plural list, both over the generic record.
    fn add_family_sources<T: FamilyItem>(&mut self) {
        self.add_data_source(Lookup::<Family<T>>::new("name"));
        self.add_data_source(List::<Family<T>>::new(
            <T::Family as ProviderFamily>::PLURAL,
        ));
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Build the shared client and hand it to every handler.
    pub fn configure(&self, config: &ProviderConfig) -> Diagnostics {
        if config.api_key.expose_secret().is_empty() {
            let err = CoreError::Config {
                message: "an API key is required".into(),
            };
            return Diagnostic::from_error("configure", PROVIDER_NAME, &err).into();
        }
        match ProviderData::connect(config) {
            Ok(data) => self.configure_with(Arc::new(data)),
            Err(e) => Diagnostic::from_error("configure", PROVIDER_NAME, &e).into(),
        }
    }

    pub fn configure_with(&self, data: Arc<ProviderData>) -> Diagnostics {
        let shared: Arc<dyn Any + Send + Sync> = data;
        let mut diagnostics = Diagnostics::default();
        for handler in self.resources.values() {
            diagnostics.extend(handler.configure(Some(Arc::clone(&shared))));
        }
        for handler in self.data_sources.values() {
            diagnostics.extend(handler.configure(Some(Arc::clone(&shared))));
        }
        debug!(
            resources = self.resources.len(),
            data_sources = self.data_sources.len(),
            "provider configured"
        );
        diagnostics
    }

    // ── Lookup ───────────────────────────────────────────────────────

    pub fn resource(&self, type_name: &str) -> Result<&dyn ResourceHandler, CoreError> {
        self.resources
            .get(type_name)
            .map(AsRef::as_ref)
            .ok_or_else(|| CoreError::UnknownType {
                type_name: type_name.to_owned(),
            })
    }

    pub fn data_source(&self, type_name: &str) -> Result<&dyn DataSourceHandler, CoreError> {
        self.data_sources
            .get(type_name)
            .map(AsRef::as_ref)
            .ok_or_else(|| CoreError::UnknownType {
                type_name: type_name.to_owned(),
            })
    }

    /// Schemas of every type, resources first, each group sorted by name.
    pub fn schemas(&self) -> Vec<Schema> {
        self.resources
            .values()
            .map(|h| h.schema())
            .chain(self.data_sources.values().map(|h| h.schema()))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn registry_names_are_qualified() {
        let provider = Provider::new();
        assert!(provider.resource("sonarr_download_client_qbittorrent").is_ok());
        assert!(provider.resource("sonarr_host").is_ok());
        assert!(provider.data_source("sonarr_download_clients").is_ok());
        assert!(
            provider
                .data_source("sonarr_custom_format_condition_release_title")
                .is_ok()
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        let provider = Provider::new();
        let err = provider.resource("sonarr_nope").err().unwrap();
        assert!(matches!(err, CoreError::UnknownType { .. }));
    }

    #[test]
    fn alias_is_migrated_with_warning() {
        let mut value = json!({"name": "ut", "intial_state": 1});
        let mut diagnostics = Diagnostics::default();
        migrate_aliases(
            "sonarr_download_client",
            &[("intial_state", "initial_state")],
            &mut value,
            &mut diagnostics,
        );

        assert_eq!(value, json!({"name": "ut", "initial_state": 1}));
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn current_name_wins_over_alias() {
        let mut value = json!({"intial_state": 1, "initial_state": 2});
        let mut diagnostics = Diagnostics::default();
        migrate_aliases("t", &[("intial_state", "initial_state")], &mut value, &mut diagnostics);
        assert_eq!(value, json!({"initial_state": 2}));
    }

    #[test]
    fn wrong_provider_data_is_reported() {
        let handler = ResourceType::<resources::Tag>::new();
        let diagnostics = handler.configure(Some(Arc::new(42_u8)));
        assert!(diagnostics.has_errors());
        assert_eq!(
            diagnostics.iter().next().unwrap().kind,
            DiagnosticKind::UnexpectedConfigureType
        );
    }

    #[tokio::test]
    async fn unconfigured_handler_fails_cleanly() {
        let handler = ResourceType::<resources::Tag>::new();
        let response = handler
            .create(json!({"label": "x"}), &CancellationToken::new())
            .await;
        assert!(response.state.is_none());
        assert_eq!(
            response.diagnostics.iter().next().unwrap().kind,
            DiagnosticKind::ConfigurationError
        );
    }

    #[test]
    fn singleton_schema() {
        let schema = ResourceType::<resources::Host>::new().schema();
        assert!(schema.singleton);
        assert_eq!(schema.type_name, "sonarr_host");
    }
}
