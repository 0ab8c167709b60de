//! Provider configuration for the Sonarr provider.
//!
//! Settings are merged from three layers, lowest to highest precedence:
//! `SONARR_*` environment variables, an optional TOML file, then values the
//! host (or the command line) passes explicitly. The merged result is
//! validated and translated into `sonarr_core::ProviderConfig`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sonarr_core::{ExtraHeader, ProviderConfig, TlsMode};

/// Environment prefix for every setting.
pub const ENV_PREFIX: &str = "SONARR_";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting `{field}` (set it explicitly, in the config file, or via {env})")]
    Missing { field: &'static str, env: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to render config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// One layer of provider settings. Unset fields fall through to the layer
/// below.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Server root, e.g. `http://sonarr:8989`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Extra authentication header for servers behind a gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_header_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_header_value: Option<String>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Accept any TLS certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// PEM file with an extra trusted CA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("Settings")
            .field("url", &self.url)
            .field("api_key", &redact(&self.api_key))
            .field("extra_header_name", &self.extra_header_name)
            .field("extra_header_value", &redact(&self.extra_header_value))
            .field("timeout", &self.timeout)
            .field("insecure", &self.insecure)
            .field("ca_cert", &self.ca_cert)
            .finish()
    }
}

impl Settings {
    /// Validate and build the core's connection config.
    pub fn into_provider_config(self) -> Result<ProviderConfig, ConfigError> {
        let raw_url = self.url.filter(|u| !u.trim().is_empty()).ok_or(ConfigError::Missing {
            field: "url",
            env: env_name("url"),
        })?;
        let url: url::Url = raw_url.trim().parse().map_err(|e| ConfigError::Validation {
            field: "url",
            reason: format!("{raw_url:?}: {e}"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "url",
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }

        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::Missing {
                field: "api_key",
                env: env_name("api_key"),
            })?;

        let extra_header = match (self.extra_header_name, self.extra_header_value) {
            (None, None) => None,
            (Some(name), Some(value)) if !name.is_empty() => Some(ExtraHeader {
                name,
                value: SecretString::from(value),
            }),
            _ => {
                return Err(ConfigError::Validation {
                    field: "extra_header",
                    reason: "name and value must be set together".into(),
                });
            }
        };

        let timeout = match self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => {
                return Err(ConfigError::Validation {
                    field: "timeout",
                    reason: "must be at least one second".into(),
                });
            }
            secs => Duration::from_secs(secs),
        };

        let tls = if self.insecure.unwrap_or(false) {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ca) = self.ca_cert {
            TlsMode::CustomCa(ca)
        } else {
            TlsMode::System
        };

        Ok(ProviderConfig {
            extra_header,
            tls,
            timeout,
            ..ProviderConfig::new(url, SecretString::from(api_key))
        })
    }

    /// TOML rendering with secrets masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        let mut shown = self.clone();
        let mask = |v: &mut Option<String>| {
            if v.is_some() {
                *v = Some("***".into());
            }
        };
        mask(&mut shown.api_key);
        mask(&mut shown.extra_header_value);
        Ok(toml::to_string_pretty(&shown)?)
    }
}

fn env_name(field: &str) -> String {
    format!("{ENV_PREFIX}{}", field.to_uppercase())
}

// ── Config file path ────────────────────────────────────────────────

/// Default config file via XDG / platform conventions.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "devopsarr", "sonarr-provider")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

// ── Loading ─────────────────────────────────────────────────────────

/// Merge environment, config file and explicit values.
///
/// An explicitly named `file` must exist; the default file is optional.
pub fn load(explicit: &Settings, file: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = match file {
        Some(path) if !path.exists() => return Err(ConfigError::FileNotFound(path.to_owned())),
        Some(path) => Some(path.to_owned()),
        None => config_path(),
    };

    let mut figment = Figment::new().merge(Env::prefixed(ENV_PREFIX));
    if let Some(ref path) = path {
        figment = figment.merge(Toml::file(path));
    }
    let settings: Settings = figment.merge(Serialized::defaults(explicit)).extract()?;
    Ok(settings)
}

/// [`load`] followed by validation.
pub fn resolve(explicit: &Settings, file: Option<&Path>) -> Result<ProviderConfig, ConfigError> {
    load(explicit, file)?.into_provider_config()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn minimal() -> Settings {
        Settings {
            url: Some("http://sonarr:8989".into()),
            api_key: Some("k".into()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_apply() {
        let config = minimal().into_provider_config().unwrap();
        assert_eq!(config.url.as_str(), "http://sonarr:8989/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(matches!(config.tls, TlsMode::System));
        assert!(config.extra_header.is_none());
    }

    #[test]
    fn missing_key_names_env_var() {
        let settings = Settings {
            api_key: None,
            ..minimal()
        };
        let err = settings.into_provider_config().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { field: "api_key", .. }));
        assert!(err.to_string().contains("SONARR_API_KEY"));
    }

    #[test]
    fn half_an_extra_header_is_rejected() {
        let settings = Settings {
            extra_header_name: Some("X-Gate".into()),
            ..minimal()
        };
        assert!(matches!(
            settings.into_provider_config(),
            Err(ConfigError::Validation { field: "extra_header", .. })
        ));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let settings = Settings {
            url: Some("ftp://sonarr".into()),
            ..minimal()
        };
        assert!(matches!(
            settings.into_provider_config(),
            Err(ConfigError::Validation { field: "url", .. })
        ));
    }

    #[test]
    fn insecure_wins_over_ca() {
        let settings = Settings {
            insecure: Some(true),
            ca_cert: Some("/ca.pem".into()),
            ..minimal()
        };
        let config = settings.into_provider_config().unwrap();
        assert!(matches!(config.tls, TlsMode::DangerAcceptInvalid));
    }

    #[test]
    fn rendering_masks_secrets() {
        let rendered = minimal().to_redacted_toml().unwrap();
        assert!(rendered.contains("url = \"http://sonarr:8989\""));
        assert!(rendered.contains("api_key = \"***\""));
        assert!(!format!("{:?}", minimal()).contains("\"k\""));
    }
}
