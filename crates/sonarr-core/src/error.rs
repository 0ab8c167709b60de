// ── Core error types ──
//
// Domain errors raised by the engine. Transport failures arrive as
// `sonarr_api::Error` and are flattened into `Api` / `ConnectionFailed`
// here; `diagnostics` turns every variant into a host-visible diagnostic.

use thiserror::Error;

use crate::field::FieldError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Server errors ────────────────────────────────────────────────
    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code (if the server answered at all).
        status: Option<u16>,
    },

    #[error("cannot reach server: {reason}")]
    ConnectionFailed { reason: String },

    /// A server field did not have the type the provider expects.
    #[error(transparent)]
    Field(#[from] FieldError),

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("no {entity_type} with {key} {value}")]
    NotFound {
        entity_type: String,
        key: String,
        /// Already rendered for display (strings keep their quotes).
        value: String,
    },

    // ── Host protocol errors ─────────────────────────────────────────
    #[error("operation cancelled")]
    Cancelled,

    #[error("provider has not been configured")]
    NotConfigured,

    #[error("unknown type {type_name:?}")]
    UnknownType { type_name: String },

    #[error("expected provider data of type {expected}")]
    UnexpectedConfigureType { expected: &'static str },

    #[error("invalid import identifier {identifier:?}: expected {expected}")]
    UnexpectedImportIdentifier {
        identifier: String,
        expected: &'static str,
    },

    #[error("invalid state: {message}")]
    InvalidState { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// `true` when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: Some(404), .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sonarr_api::Error> for CoreError {
    fn from(err: sonarr_api::Error) -> Self {
        match err {
            sonarr_api::Error::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                CoreError::ConnectionFailed {
                    reason: e.to_string(),
                }
            }
            sonarr_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            sonarr_api::Error::Authentication { message } => CoreError::Config { message },
            other => CoreError::Api {
                status: other.status(),
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::InvalidState {
            message: err.to_string(),
        }
    }
}
