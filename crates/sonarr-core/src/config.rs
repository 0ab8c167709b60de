// ── Runtime connection configuration ──
//
// Describes how to reach one Sonarr server. Never touches disk: the
// `sonarr-config` crate resolves files and environment, then hands a
// `ProviderConfig` in.

use std::time::Duration;

use secrecy::SecretString;
use sonarr_api::{Credentials, SonarrClient, TlsMode, TransportConfig};
use tracing::debug;
use url::Url;

use crate::error::CoreError;

/// An extra authentication header for servers behind another gate.
#[derive(Debug, Clone)]
pub struct ExtraHeader {
    pub name: String,
    pub value: SecretString,
}

/// Everything needed to talk to one server.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Server root, e.g. `http://sonarr:8989`.
    pub url: Url,
    pub api_key: SecretString,
    pub extra_header: Option<ExtraHeader>,
    pub tls: TlsMode,
    /// Request timeout applied by the HTTP client.
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(url: Url, api_key: SecretString) -> Self {
        Self {
            url,
            api_key,
            extra_header: None,
            tls: TlsMode::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Shared, immutable state handed to every resource at configure time.
#[derive(Debug, Clone)]
pub struct ProviderData {
    pub client: SonarrClient,
}

impl ProviderData {
    /// Build the HTTP client. No request is made.
    pub fn connect(config: &ProviderConfig) -> Result<Self, CoreError> {
        let mut credentials = Credentials::new(config.api_key.clone());
        if let Some(ref extra) = config.extra_header {
            credentials = credentials.with_extra_header(extra.name.clone(), extra.value.clone());
        }

        let transport = TransportConfig {
            tls: config.tls.clone(),
            timeout: config.timeout,
        };

        let client = SonarrClient::new(config.url.as_str(), &credentials, &transport)?;
        debug!(base_url = %client.base_url(), "provider client ready");
        Ok(Self { client })
    }

    pub fn from_client(client: SonarrClient) -> Self {
        Self { client }
    }
}
