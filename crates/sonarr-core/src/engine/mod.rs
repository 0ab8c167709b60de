// ── Resource lifecycle engine ──
//
// One set of create/read/update/delete/import routines shared by every
// resource type. A type plugs in through `ManagedResource`: how to build the
// wire body from desired state, how to read it back, and which lifecycle
// shape (collection, singleton, create-only) the server imposes.
//
// Every server call is raced against the host's cancellation token. State is
// only returned when the operation recorded no error diagnostic.

mod family;
mod lifecycle;

use std::fmt::Debug;
use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sonarr_api::SonarrClient;
use tokio_util::sync::CancellationToken;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::CoreError;
use crate::sensitive::SensitiveRegister;

pub use family::Family;
pub use lifecycle::{create, delete, import, read, update};

// ── Lifecycle shape ──────────────────────────────────────────────────

/// How a singleton is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingletonWrite {
    /// `PUT /<endpoint>/1`
    ById,
    /// `PUT /<path>` with no id segment.
    Path(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// `GET|POST /<endpoint>`, `GET|PUT|DELETE /<endpoint>/{id}`.
    Collection,
    /// Exists exactly once under id 1. Create is an update; delete only
    /// drops host state.
    Singleton { write: SingletonWrite },
    /// Created and deleted but never changed in place; update re-reads.
    Immutable,
}

// ── Resource contract ────────────────────────────────────────────────

/// A host-visible resource type.
pub trait ManagedResource: Send + Sync + 'static {
    /// Desired/current state as the host stores it.
    type State: Debug
        + Clone
        + Default
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
    /// Request/response body on the wire.
    type Wire: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Host type name without the provider prefix.
    const TYPE_NAME: &'static str;
    const ENDPOINT: &'static str;
    const LIFECYCLE: Lifecycle = Lifecycle::Collection;
    /// Deprecated host attribute names, `(old, current)`.
    const ALIASES: &'static [(&'static str, &'static str)] = &[];
    /// State attribute a non-numeric import identifier is matched against.
    const IMPORT_KEY: Option<&'static str> = None;

    fn build_wire(state: &Self::State) -> Result<Self::Wire, CoreError>;
    fn apply_wire(wire: Self::Wire) -> Result<Self::State, CoreError>;

    fn identifier(state: &Self::State) -> i64;
    fn set_identifier(state: &mut Self::State, id: i64);

    /// Snapshot the plaintext of every sensitive attribute.
    fn capture_sensitive(_state: &Self::State) -> SensitiveRegister {
        SensitiveRegister::default()
    }

    /// Overwrite every sensitive attribute from the snapshot.
    fn restore_sensitive(_state: &mut Self::State, _register: &SensitiveRegister) {}

    /// Suppress drift the server introduces on its own (normalised values,
    /// reordered lists) by keeping the baseline's form where equivalent.
    fn reconcile(_baseline: &Self::State, _fresh: &mut Self::State) {}

    /// Advisory warnings about a plan before it is sent.
    fn check(_plan: &Self::State, _diagnostics: &mut Diagnostics) {}

    /// Seed state for an import. Singletons ignore the identifier.
    fn import_seed(identifier: &str) -> Result<Self::State, CoreError> {
        let mut state = Self::State::default();
        if matches!(Self::LIFECYCLE, Lifecycle::Singleton { .. }) {
            Self::set_identifier(&mut state, sonarr_api::endpoint::SINGLETON_ID);
            return Ok(state);
        }

        let id = identifier
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id >= 0)
            .ok_or_else(|| CoreError::UnexpectedImportIdentifier {
                identifier: identifier.to_owned(),
                expected: "a non-negative integer id",
            })?;
        Self::set_identifier(&mut state, id);
        Ok(state)
    }
}

// ── Outcome ──────────────────────────────────────────────────────────

/// Result of one host operation. `state == None` without errors means the
/// resource is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<S> {
    pub state: Option<S>,
    pub diagnostics: Diagnostics,
}

impl<S> Outcome<S> {
    pub fn present(state: S, diagnostics: Diagnostics) -> Self {
        Self {
            state: Some(state),
            diagnostics,
        }
    }

    pub fn absent(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }

    pub fn failed(verb: &str, type_name: &str, err: &CoreError) -> Self {
        Self::absent(Diagnostic::from_error(verb, type_name, err).into())
    }

    pub fn is_ok(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

// ── Shared helpers ───────────────────────────────────────────────────

/// `sonarr_<type>`, as diagnostics name the resource.
fn host_name<R: ManagedResource>() -> String {
    crate::provider::qualified(R::TYPE_NAME)
}

/// Await a server call unless the token fires first.
pub async fn guarded<T, F>(cancel: &CancellationToken, call: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, sonarr_api::Error>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(CoreError::Cancelled),
        result = call => result.map_err(CoreError::from),
    }
}

/// List the collection and return the first item whose serialised state
/// has `key == wanted`.
pub async fn find_by<R: ManagedResource>(
    client: &SonarrClient,
    key: &str,
    wanted: &Value,
    cancel: &CancellationToken,
) -> Result<R::State, CoreError> {
    let wires: Vec<R::Wire> = guarded(cancel, client.list(R::ENDPOINT)).await?;
    for wire in wires {
        let state = R::apply_wire(wire)?;
        if serde_json::to_value(&state)?.get(key) == Some(wanted) {
            return Ok(state);
        }
    }

    Err(CoreError::NotFound {
        entity_type: R::TYPE_NAME.to_owned(),
        key: key.to_owned(),
        value: wanted.to_string(),
    })
}
