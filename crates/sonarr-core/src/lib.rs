//! Resource engine between `sonarr-api` and a declarative host runtime.
//!
//! The host stores desired state per resource and calls back into this
//! crate to reconcile it with a Sonarr server:
//!
//! - **[`Provider`]**: Registry of every `sonarr_*` resource and data
//!   source type. [`Provider::configure`] builds one shared client and hands
//!   it to each handler; the host then drives handlers through the
//!   object-safe [`ResourceHandler`] / [`DataSourceHandler`] traits with
//!   JSON state in and out.
//!
//! - **Lifecycle engine** ([`engine`]): One create/read/update/delete/import
//!   implementation shared by every type through [`ManagedResource`]:
//!   collections, id-1 singletons and create-only resources. Every server
//!   call races the host's cancellation token.
//!
//! - **Field codec** ([`field`]): Typed slots for the server's polymorphic
//!   `fields: [{name, value}]` list, driven by static per-bag registries.
//!
//! - **Provider families** ([`family`], [`generic`]): Download clients,
//!   indexers, import lists, notifications and metadata consumers, each with
//!   a generic resource plus dedicated concrete implementations projected
//!   through a shared generic item.
//!
//! - **Sensitive values** ([`sensitive`]): Secrets the server redacts are
//!   restored from what the user last wrote and scrubbed from diagnostics.

pub mod field;

pub mod config;
pub mod data_sources;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod family;
pub mod generic;
pub mod provider;
pub mod resources;
pub mod sensitive;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ExtraHeader, ProviderConfig, ProviderData};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use engine::{Lifecycle, ManagedResource, Outcome};
pub use error::CoreError;
pub use provider::{BlockKind, DataSourceHandler, Provider, ResourceHandler, Response, Schema};
pub use sensitive::SensitiveRegister;

// Transport types callers need to build a `ProviderConfig`.
pub use sonarr_api::{SonarrClient, TlsMode};
