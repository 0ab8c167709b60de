// sonarr-api: Async Rust client for the Sonarr v3 REST API

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::{Credentials, ExtraHeader};
pub use client::SonarrClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
