use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Header carrying the Sonarr API key on every request.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// An additional header sent with every request.
///
/// Used when Sonarr sits behind another authentication gate (reverse
/// proxy basic auth, SSO token, ...). The value is treated as a secret.
#[derive(Debug, Clone)]
pub struct ExtraHeader {
    pub name: String,
    pub value: SecretString,
}

/// Credentials for authenticating with a Sonarr server.
///
/// Immutable once built; the client turns them into default headers.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: SecretString,
    pub extra_header: Option<ExtraHeader>,
}

impl Credentials {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            extra_header: None,
        }
    }

    pub fn with_extra_header(mut self, name: impl Into<String>, value: SecretString) -> Self {
        self.extra_header = Some(ExtraHeader {
            name: name.into(),
            value,
        });
        self
    }

    /// Build the default header map, marking every secret value sensitive.
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();

        let mut key_value =
            HeaderValue::from_str(self.api_key.expose_secret()).map_err(|e| {
                Error::Authentication {
                    message: format!("invalid API key header value: {e}"),
                }
            })?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);

        if let Some(ref extra) = self.extra_header {
            let name = HeaderName::from_bytes(extra.name.as_bytes()).map_err(|e| {
                Error::Authentication {
                    message: format!("invalid extra header name '{}': {e}", extra.name),
                }
            })?;
            let mut value = HeaderValue::from_str(extra.value.expose_secret()).map_err(|e| {
                Error::Authentication {
                    message: format!("invalid value for extra header '{}': {e}", extra.name),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        Ok(headers)
    }
}
