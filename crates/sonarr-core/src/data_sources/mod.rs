// ── Data sources ──
//
// Read-only views over server state. Lookups list the collection and pick
// the single item whose attribute matches; lists return everything under a
// plural key; singleton reads fetch id 1. Condition sources never touch the
// server: they validate a typed condition and echo it back shaped like a
// `custom_format` condition entry.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sonarr_api::endpoint;
use sonarr_api::models::SeriesResource;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::engine::{self, ManagedResource, find_by, guarded};
use crate::error::CoreError;
use crate::family::custom_format_condition::{CustomFormatCondition, ID_VALUED};
use crate::generic::{FamilyItem, GenericItem};
use crate::provider::{BlockKind, Configured, DataSourceHandler, Response, Schema, parse, qualified};

fn schema(type_name: &str, singleton: bool) -> Schema {
    Schema {
        type_name: type_name.to_owned(),
        block: BlockKind::DataSource,
        singleton,
        import_key: None,
        deprecated: Vec::new(),
    }
}

fn respond<S: Serialize>(type_name: &str, result: Result<S, CoreError>) -> Response {
    match result.and_then(|state| Ok(serde_json::to_value(state)?)) {
        Ok(state) => Response {
            state: Some(state),
            diagnostics: Diagnostics::default(),
        },
        Err(e) => Response::failed("read", type_name, &e),
    }
}

/// The lookup value from the data source's configuration.
fn required(config: &Value, key: &str) -> Result<Value, CoreError> {
    config
        .get(key)
        .filter(|v| !v.is_null())
        .cloned()
        .ok_or_else(|| CoreError::InvalidState {
            message: format!("`{key}` is required"),
        })
}

// ── Lookup ───────────────────────────────────────────────────────────

/// Single item of `R` whose `key` attribute equals the configured value.
pub struct Lookup<R> {
    name: String,
    key: &'static str,
    data: Configured,
    _resource: PhantomData<fn() -> R>,
}

impl<R: ManagedResource> Lookup<R> {
    pub fn new(key: &'static str) -> Self {
        Self {
            name: qualified(R::TYPE_NAME),
            key,
            data: Configured::default(),
            _resource: PhantomData,
        }
    }

    async fn find(&self, config: &Value, cancel: &CancellationToken) -> Result<R::State, CoreError> {
        let wanted = required(config, self.key)?;
        let client = self.data.client()?;
        debug!(data_source = %self.name, key = self.key, "looking up");
        find_by::<R>(client, self.key, &wanted, cancel).await
    }
}

#[async_trait]
impl<R: ManagedResource> DataSourceHandler for Lookup<R> {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Schema {
        schema(&self.name, false)
    }

    fn configure(&self, data: Option<Arc<dyn Any + Send + Sync>>) -> Diagnostics {
        self.data.configure(&self.name, data)
    }

    async fn read(&self, config: Value, cancel: &CancellationToken) -> Response {
        respond(&self.name, self.find(&config, cancel).await)
    }
}

// ── List ─────────────────────────────────────────────────────────────

/// Every item of `R`, under `{ "<plural>": [...] }`.
pub struct List<R> {
    name: String,
    plural: &'static str,
    data: Configured,
    _resource: PhantomData<fn() -> R>,
}

impl<R: ManagedResource> List<R> {
    pub fn new(plural: &'static str) -> Self {
        Self {
            name: qualified(plural),
            plural,
            data: Configured::default(),
            _resource: PhantomData,
        }
    }

    async fn collect(&self, cancel: &CancellationToken) -> Result<Value, CoreError> {
        let client = self.data.client()?;
        let wires: Vec<R::Wire> = guarded(cancel, client.list(R::ENDPOINT)).await?;
        let items = wires
            .into_iter()
            .map(R::apply_wire)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(data_source = %self.name, count = items.len(), "listed");

        let mut out = Map::new();
        out.insert(self.plural.to_owned(), serde_json::to_value(items)?);
        Ok(Value::Object(out))
    }
}

#[async_trait]
impl<R: ManagedResource> DataSourceHandler for List<R> {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Schema {
        schema(&self.name, false)
    }

    fn configure(&self, data: Option<Arc<dyn Any + Send + Sync>>) -> Diagnostics {
        self.data.configure(&self.name, data)
    }

    async fn read(&self, _config: Value, cancel: &CancellationToken) -> Response {
        respond(&self.name, self.collect(cancel).await)
    }
}

// ── Singleton ────────────────────────────────────────────────────────

/// Current value of a singleton resource.
pub struct SingletonRead<R> {
    name: String,
    data: Configured,
    _resource: PhantomData<fn() -> R>,
}

impl<R: ManagedResource> SingletonRead<R> {
    pub fn new() -> Self {
        Self {
            name: qualified(R::TYPE_NAME),
            data: Configured::default(),
            _resource: PhantomData,
        }
    }
}

impl<R: ManagedResource> Default for SingletonRead<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: ManagedResource> DataSourceHandler for SingletonRead<R> {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Schema {
        schema(&self.name, true)
    }

    fn configure(&self, data: Option<Arc<dyn Any + Send + Sync>>) -> Diagnostics {
        self.data.configure(&self.name, data)
    }

    async fn read(&self, _config: Value, cancel: &CancellationToken) -> Response {
        let client = match self.data.client() {
            Ok(client) => client,
            Err(e) => return Response::failed("read", &self.name, &e),
        };
        let seed = match R::import_seed("") {
            Ok(seed) => seed,
            Err(e) => return Response::failed("read", &self.name, &e),
        };

        let outcome = engine::read::<R>(client, &seed, cancel).await;
        if outcome.state.is_none() && outcome.is_ok() {
            let err = CoreError::NotFound {
                entity_type: R::TYPE_NAME.to_owned(),
                key: "id".into(),
                value: endpoint::SINGLETON_ID.to_string(),
            };
            return Response::failed("read", &self.name, &err);
        }
        Response::from_outcome("read", &self.name, outcome, Diagnostics::default())
    }
}

// ── Series ───────────────────────────────────────────────────────────

/// A series already added to the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: i64,
    pub title: String,
    pub title_slug: String,
    pub tvdb_id: i64,
    pub year: i64,
    pub monitored: bool,
    pub season_folder: bool,
    pub use_scene_numbering: bool,
    pub path: String,
    pub root_folder_path: String,
    pub quality_profile_id: i64,
    pub series_type: String,
    pub tags: Vec<i64>,
}

impl From<SeriesResource> for Series {
    fn from(s: SeriesResource) -> Self {
        Self {
            id: s.id,
            title: s.title,
            title_slug: s.title_slug,
            tvdb_id: s.tvdb_id,
            year: s.year,
            monitored: s.monitored,
            season_folder: s.season_folder,
            use_scene_numbering: s.use_scene_numbering,
            path: s.path,
            root_folder_path: s.root_folder_path,
            quality_profile_id: s.quality_profile_id,
            series_type: s.series_type,
            tags: s.tags,
        }
    }
}

/// Series by TVDB id.
pub struct SeriesLookup {
    name: String,
    data: Configured,
}

impl Default for SeriesLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesLookup {
    pub fn new() -> Self {
        Self {
            name: qualified("series"),
            data: Configured::default(),
        }
    }

    async fn find(&self, config: &Value, cancel: &CancellationToken) -> Result<Series, CoreError> {
        let wanted = required(config, "tvdb_id")?;
        let tvdb_id = wanted.as_i64().ok_or_else(|| CoreError::InvalidState {
            message: format!("`tvdb_id` must be an integer, got {wanted}"),
        })?;
        let client = self.data.client()?;

        let all: Vec<SeriesResource> = guarded(cancel, client.list(endpoint::SERIES)).await?;
        all.into_iter()
            .find(|s| s.tvdb_id == tvdb_id)
            .map(Series::from)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "series".into(),
                key: "tvdb_id".into(),
                value: tvdb_id.to_string(),
            })
    }
}

#[async_trait]
impl DataSourceHandler for SeriesLookup {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Schema {
        schema(&self.name, false)
    }

    fn configure(&self, data: Option<Arc<dyn Any + Send + Sync>>) -> Diagnostics {
        self.data.configure(&self.name, data)
    }

    async fn read(&self, config: Value, cancel: &CancellationToken) -> Response {
        respond(&self.name, self.find(&config, cancel).await)
    }
}

// ── Custom-format conditions ─────────────────────────────────────────

/// `(data source suffix, implementation)`
const CONDITION_KINDS: &[(&str, &str)] = &[
    ("release_title", "ReleaseTitleSpecification"),
    ("release_group", "ReleaseGroupSpecification"),
    ("language", "LanguageSpecification"),
    ("source", "SourceSpecification"),
    ("resolution", "ResolutionSpecification"),
    ("release_type", "ReleaseTypeSpecification"),
    ("indexer_flag", "IndexerFlagSpecification"),
    ("size", "SizeSpecification"),
];

/// One typed condition, validated locally.
#[derive(Debug)]
pub struct ConditionSource {
    name: String,
    implementation: &'static str,
}

impl ConditionSource {
    pub fn all() -> impl Iterator<Item = Self> {
        CONDITION_KINDS.iter().map(|&(kind, implementation)| Self {
            name: qualified(&format!("custom_format_condition_{kind}")),
            implementation,
        })
    }

    /// Inject the implementation and pass the condition through the codec.
    /// A `value` of the wrong kind does not survive the trip.
    fn project(&self, mut config: Value) -> Result<CustomFormatCondition, Diagnostic> {
        let fail = |e: CoreError| Diagnostic::from_error("read", &self.name, &e);
        let Some(object) = config.as_object_mut() else {
            return Err(fail(CoreError::InvalidState {
                message: "condition must be an object".into(),
            }));
        };
        object.insert("implementation".into(), self.implementation.into());

        let condition: CustomFormatCondition = parse(config).map_err(fail)?;
        let item = GenericItem::decode(condition.to_generic().encode())
            .map_err(|e| fail(e.into()))?;
        let projected = CustomFormatCondition::from_generic(&item);

        if projected.fields.value != condition.fields.value {
            let expected = if ID_VALUED.contains(&self.implementation) {
                "an integer id"
            } else {
                "text"
            };
            let err = CoreError::InvalidState {
                message: format!("`value` of a {} must be {expected}", self.implementation),
            };
            return Err(fail(err).with_attribute("value"));
        }
        Ok(projected)
    }
}

#[async_trait]
impl DataSourceHandler for ConditionSource {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Schema {
        schema(&self.name, false)
    }

    /// Local only.
    fn configure(&self, _data: Option<Arc<dyn Any + Send + Sync>>) -> Diagnostics {
        Diagnostics::default()
    }

    async fn read(&self, config: Value, _cancel: &CancellationToken) -> Response {
        match self.project(config) {
            Ok(condition) => respond(&self.name, Ok(condition)),
            Err(diagnostic) => Response {
                state: None,
                diagnostics: diagnostic.into(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::diagnostics::DiagnosticKind;

    fn source(kind: &str) -> ConditionSource {
        ConditionSource::all()
            .find(|s| s.name == format!("sonarr_custom_format_condition_{kind}"))
            .unwrap()
    }

    #[tokio::test]
    async fn condition_gets_implementation() {
        let response = source("release_title")
            .read(
                json!({"name": "x265", "negate": false, "required": true, "value": "x265|HEVC"}),
                &CancellationToken::new(),
            )
            .await;

        assert!(response.is_ok());
        assert_eq!(
            response.state.unwrap(),
            json!({
                "name": "x265",
                "implementation": "ReleaseTitleSpecification",
                "negate": false,
                "required": true,
                "value": "x265|HEVC",
            })
        );
    }

    #[tokio::test]
    async fn enum_condition_rejects_text() {
        let response = source("language")
            .read(json!({"name": "en", "value": "english"}), &CancellationToken::new())
            .await;

        assert!(response.state.is_none());
        let diagnostic = response.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.kind, DiagnosticKind::InvalidInput);
        assert_eq!(diagnostic.attribute.as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn size_condition_keeps_bounds() {
        let response = source("size")
            .read(json!({"name": "small", "min": 0.0, "max": 2.5}), &CancellationToken::new())
            .await;
        let state = response.state.unwrap();
        assert_eq!(state["implementation"], "SizeSpecification");
        assert_eq!(state["max"], 2.5);
    }

    #[test]
    fn every_condition_kind_registers() {
        assert_eq!(ConditionSource::all().count(), CONDITION_KINDS.len());
    }

    #[tokio::test]
    async fn lookup_requires_key() {
        let lookup = Lookup::<crate::resources::Tag>::new("label");
        let response = lookup.read(json!({}), &CancellationToken::new()).await;
        assert!(response.state.is_none());
        assert_eq!(
            response.diagnostics.iter().next().unwrap().kind,
            DiagnosticKind::InvalidInput
        );
    }
}
