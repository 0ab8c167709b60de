// ── Diagnostics ──
//
// Host-visible messages accumulated per operation. State is only handed
// back when no error-severity entry was recorded; warnings never block it.

use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::error::CoreError;
use crate::sensitive::SensitiveRegister;

const REDACTED: &str = "***";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Diagnostic classification. The summary line shown to users is derived
/// from the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
pub enum DiagnosticKind {
    #[strum(serialize = "Configuration Error")]
    ConfigurationError,
    #[strum(serialize = "Client Error")]
    ClientError,
    #[strum(serialize = "Data Source Error")]
    NotFound,
    #[strum(serialize = "Unexpected Resource Configure Type")]
    UnexpectedConfigureType,
    #[strum(serialize = "Unexpected Import Identifier")]
    UnexpectedImportIdentifier,
    #[strum(serialize = "Operation Cancelled")]
    Cancelled,
    #[strum(serialize = "Invalid Input")]
    InvalidInput,
    #[strum(serialize = "Deprecated Attribute")]
    Deprecated,
    #[strum(serialize = "Behaviour Change")]
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub summary: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            summary: kind.to_string(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, detail)
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// `Unable to <verb> <type_name>, got error: <cause>`.
    pub fn from_error(verb: &str, type_name: &str, err: &CoreError) -> Self {
        let kind = match err {
            CoreError::Api { .. } | CoreError::ConnectionFailed { .. } | CoreError::Field(_) => {
                DiagnosticKind::ClientError
            }
            CoreError::NotFound { .. } => DiagnosticKind::NotFound,
            CoreError::Cancelled => DiagnosticKind::Cancelled,
            CoreError::NotConfigured
            | CoreError::Config { .. }
            | CoreError::UnknownType { .. } => DiagnosticKind::ConfigurationError,
            CoreError::UnexpectedConfigureType { .. } => DiagnosticKind::UnexpectedConfigureType,
            CoreError::UnexpectedImportIdentifier { .. } => {
                DiagnosticKind::UnexpectedImportIdentifier
            }
            CoreError::InvalidState { .. } => DiagnosticKind::InvalidInput,
        };

        let diag = Self::error(kind, format!("Unable to {verb} {type_name}, got error: {err}"));
        match err {
            CoreError::Field(field) => diag.with_attribute(field.name.clone()),
            CoreError::NotFound { key, .. } => diag.with_attribute(key.clone()),
            _ => diag,
        }
    }

    fn scrub(&mut self, secret: &str) {
        if self.detail.contains(secret) {
            self.detail = self.detail.replace(secret, REDACTED);
        }
        if self.summary.contains(secret) {
            self.summary = self.summary.replace(secret, REDACTED);
        }
    }
}

/// Per-operation accumulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Replace every sensitive plaintext with `***` in all messages.
    pub fn scrub(&mut self, register: &SensitiveRegister) {
        for secret in register.secrets() {
            for diag in &mut self.0 {
                diag.scrub(secret);
            }
        }
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldError, FieldKind};

    #[test]
    fn client_error_message_contract() {
        let err = CoreError::Api {
            message: "Sonarr API error (HTTP 400): Host: must not be empty".into(),
            status: Some(400),
        };
        let diag = Diagnostic::from_error("create", "download_client_qbittorrent", &err);

        assert_eq!(diag.kind, DiagnosticKind::ClientError);
        assert_eq!(diag.summary, "Client Error");
        assert_eq!(
            diag.detail,
            "Unable to create download_client_qbittorrent, got error: \
             Sonarr API error (HTTP 400): Host: must not be empty"
        );
    }

    #[test]
    fn field_drift_points_at_attribute() {
        let err = CoreError::Field(FieldError {
            name: "port".into(),
            expected: FieldKind::Int,
            found: "string",
        });
        let diag = Diagnostic::from_error("read", "download_client_sabnzbd", &err);
        assert_eq!(diag.kind, DiagnosticKind::ClientError);
        assert_eq!(diag.attribute.as_deref(), Some("port"));
    }

    #[test]
    fn warnings_do_not_block() {
        let mut diags = Diagnostics::default();
        diags.push(Diagnostic::warning(DiagnosticKind::Deprecated, "old name"));
        assert!(!diags.has_errors());

        diags.push(Diagnostic::error(DiagnosticKind::ClientError, "boom"));
        assert!(diags.has_errors());
    }

    #[test]
    fn scrub_redacts_secrets() {
        let mut register = SensitiveRegister::default();
        register.insert("apiKey", "SECRET");
        let mut diags = Diagnostics::from(Diagnostic::error(
            DiagnosticKind::ClientError,
            "Unable to update x, got error: bad key SECRET",
        ));
        diags.scrub(&register);

        let detail = &diags.iter().next().map(|d| d.detail.clone()).unwrap_or_default();
        assert_eq!(detail, "Unable to update x, got error: bad key ***");
    }
}
