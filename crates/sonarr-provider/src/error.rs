//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use sonarr_config::ConfigError;
use sonarr_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(sonarr::config),
        help(
            "Pass --url and --api-key, set SONARR_URL and SONARR_API_KEY,\n\
             or write them to the config file. Run: sonarr-provider config"
        )
    )]
    Config(#[from] ConfigError),

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sonarr::usage))]
    Usage { field: &'static str, reason: String },

    // ── Types ────────────────────────────────────────────────────────
    #[error("Unknown type '{type_name}'")]
    #[diagnostic(
        code(sonarr::unknown_type),
        help("Run: sonarr-provider types")
    )]
    UnknownType { type_name: String },

    // ── Operations ───────────────────────────────────────────────────
    #[error("{verb} {type_name} failed with {errors} error diagnostic(s)")]
    #[diagnostic(code(sonarr::operation_failed))]
    Failed {
        verb: &'static str,
        type_name: String,
        errors: usize,
    },

    #[error("Could not reach the server: {reason}")]
    #[diagnostic(
        code(sonarr::connection_failed),
        help("Check that Sonarr is running and the URL is correct. Try --insecure for self-signed certificates.")
    )]
    ConnectionFailed { reason: String },

    #[error("Operation cancelled")]
    #[diagnostic(code(sonarr::cancelled))]
    Cancelled,

    #[error(transparent)]
    #[diagnostic(code(sonarr::core))]
    Core(CoreError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(sonarr::json), help("Check the JSON state and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => exit_code::CONFIG,
            Self::Usage { .. } => exit_code::USAGE,
            Self::UnknownType { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Cancelled => exit_code::CANCELLED,
            Self::Failed { .. } | Self::Core(_) | Self::Io(_) | Self::Json(_) => {
                exit_code::GENERAL
            }
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownType { type_name } => Self::UnknownType { type_name },
            CoreError::ConnectionFailed { reason } => Self::ConnectionFailed { reason },
            CoreError::Cancelled => Self::Cancelled,
            other => Self::Core(other),
        }
    }
}
