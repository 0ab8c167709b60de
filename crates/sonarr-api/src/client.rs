// Hand-crafted async HTTP client for the Sonarr v3 REST API.
//
// Base path: /api/v3/
// Auth: X-Api-Key header (+ optional extra gate header)

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::endpoint;
use crate::error::Error;
use crate::models::SystemStatus;
use crate::transport::TransportConfig;

// ── Error response shapes ────────────────────────────────────────────

/// Validation failures come back as an array of these (HTTP 400).
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationFailure {
    #[serde(default)]
    property_name: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Every other failure is a `{message, description}` object.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Sonarr REST API.
///
/// Holds one `reqwest::Client` with the credentials baked in as default
/// headers. Cheap to share behind an `Arc`; never mutated after construction.
#[derive(Debug, Clone)]
pub struct SonarrClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SonarrClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, credentials, and transport config.
    pub fn new(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(credentials.headers()?)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Normalise to `<scheme>://<host>[/<url base>]/api/v3/`.
    ///
    /// Accepts the server root, a reverse-proxy URL base, or a URL that
    /// already ends in `/api/v3`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api/v3") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/v3/"));
        }

        Ok(url)
    }

    /// The normalised API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"downloadclient/7"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let raw = resp.text().await.unwrap_or_default();
        Error::Api {
            status: status.as_u16(),
            message: summarize_error_body(status, &raw),
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Collections ──────────────────────────────────────────────────

    /// `GET /<path>`
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        self.get(path).await
    }

    /// `GET /<path>/{id}`
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str, id: i64) -> Result<T, Error> {
        self.get(&format!("{path}/{id}")).await
    }

    /// `POST /<path>`
    pub async fn create<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.post(path, body).await
    }

    /// `PUT /<path>/{id}`
    pub async fn update<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        id: i64,
        body: &B,
    ) -> Result<T, Error> {
        self.put(&format!("{path}/{id}"), body).await
    }

    /// `DELETE /<path>/{id}`
    pub async fn remove(&self, path: &str, id: i64) -> Result<(), Error> {
        self.delete(&format!("{path}/{id}")).await
    }

    // ── Singletons ───────────────────────────────────────────────────

    /// `GET /<path>` returning a single object.
    pub async fn fetch_singleton<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.get(path).await
    }

    /// `PUT /<path>` for endpoints whose write path carries no id segment.
    pub async fn replace<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.put(path, body).await
    }

    // ── System ───────────────────────────────────────────────────────

    pub async fn system_status(&self) -> Result<SystemStatus, Error> {
        self.get(endpoint::SYSTEM_STATUS).await
    }
}

/// Reduce a Sonarr error body to one line.
///
/// Validation failures become `Property: message; ...`. Attempted values are
/// deliberately left out so secrets echoed back by the server never surface.
fn summarize_error_body(status: reqwest::StatusCode, raw: &str) -> String {
    if let Ok(failures) = serde_json::from_str::<Vec<ValidationFailure>>(raw) {
        let parts: Vec<String> = failures
            .into_iter()
            .filter_map(|f| match (f.property_name, f.error_message) {
                (Some(prop), Some(msg)) if !prop.is_empty() => Some(format!("{prop}: {msg}")),
                (_, Some(msg)) => Some(msg),
                _ => None,
            })
            .collect();
        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    if let Ok(err) = serde_json::from_str::<ErrorResponse>(raw) {
        match (err.message, err.description) {
            (Some(msg), Some(desc)) if !desc.is_empty() => return format!("{msg}: {desc}"),
            (Some(msg), _) => return msg,
            _ => {}
        }
    }

    if raw.is_empty() {
        status.to_string()
    } else {
        raw.to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_prefix() {
        let url = SonarrClient::normalize_base_url("http://sonarr:8989").unwrap();
        assert_eq!(url.as_str(), "http://sonarr:8989/api/v3/");
    }

    #[test]
    fn base_url_keeps_url_base() {
        let url = SonarrClient::normalize_base_url("https://media.lan/sonarr/").unwrap();
        assert_eq!(url.as_str(), "https://media.lan/sonarr/api/v3/");
    }

    #[test]
    fn base_url_already_versioned() {
        let url = SonarrClient::normalize_base_url("http://sonarr:8989/api/v3").unwrap();
        assert_eq!(url.as_str(), "http://sonarr:8989/api/v3/");
    }

    #[test]
    fn validation_failures_are_joined_without_attempted_values() {
        let raw = r#"[
            {"propertyName":"Port","errorMessage":"Must be greater than 0","attemptedValue":0},
            {"propertyName":"","errorMessage":"Unable to connect","attemptedValue":"hunter2"}
        ]"#;
        let msg = summarize_error_body(reqwest::StatusCode::BAD_REQUEST, raw);
        assert_eq!(msg, "Port: Must be greater than 0; Unable to connect");
        assert!(!msg.contains("hunter2"));
    }

    #[test]
    fn message_and_description_object() {
        let raw = r#"{"message":"NotFound","description":"no such download client"}"#;
        let msg = summarize_error_body(reqwest::StatusCode::NOT_FOUND, raw);
        assert_eq!(msg, "NotFound: no such download client");
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        let msg = summarize_error_body(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(msg, "500 Internal Server Error");
    }
}
