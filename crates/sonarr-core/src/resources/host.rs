// Host configuration singleton: `config/host`
//
// The server's flat host config is regrouped into nested blocks. Its three
// secrets are never read back from the wire; state always carries what the
// user last wrote (or what an import identifier supplied).

use serde::{Deserialize, Serialize};
use sonarr_api::endpoint;
use sonarr_api::models::HostConfigResource;
use tracing::warn;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::engine::{Lifecycle, ManagedResource, SingletonWrite};
use crate::error::CoreError;
use crate::sensitive::SensitiveRegister;

const AUTH_PASSWORD: &str = "authentication.password";
const PROXY_PASSWORD: &str = "proxy.password";
const SSL_PASSWORD: &str = "ssl.certificate_password";

// ── Blocks ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authentication {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub required: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Proxy {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub bypass_filter: String,
    #[serde(default)]
    pub bypass_local_addresses: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ssl {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub cert_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_password: Option<String>,
    #[serde(default)]
    pub certificate_validation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logging {
    #[serde(default)]
    pub analytics_enabled: bool,
    #[serde(default)]
    pub log_level: String,
    /// Independent of `log_level`; omitted from requests when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_log_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub interval: i64,
    #[serde(default)]
    pub retention: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub mechanism: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub script_path: String,
    #[serde(default)]
    pub update_automatically: bool,
}

// ── Host ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Host {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub bind_address: String,
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub url_base: String,
    #[serde(default)]
    pub instance_name: String,
    #[serde(default)]
    pub application_url: String,
    #[serde(default)]
    pub launch_browser: bool,
    #[serde(default)]
    pub authentication: Authentication,
    #[serde(default)]
    pub proxy: Proxy,
    #[serde(default)]
    pub ssl: Ssl,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub backup: Backup,
    #[serde(default)]
    pub update: Update,
}

impl ManagedResource for Host {
    type State = Self;
    type Wire = HostConfigResource;

    const TYPE_NAME: &'static str = "host";
    const ENDPOINT: &'static str = endpoint::HOST_CONFIG;
    const LIFECYCLE: Lifecycle = Lifecycle::Singleton {
        write: SingletonWrite::ById,
    };

    fn build_wire(state: &Self) -> Result<HostConfigResource, CoreError> {
        let auth = &state.authentication;
        Ok(HostConfigResource {
            id: state.id,
            bind_address: state.bind_address.clone(),
            port: state.port,
            url_base: state.url_base.clone(),
            instance_name: state.instance_name.clone(),
            application_url: state.application_url.clone(),
            launch_browser: state.launch_browser,

            authentication_method: auth.method.clone(),
            authentication_required: auth.required.clone(),
            username: auth.username.clone(),
            password: auth.password.clone(),
            password_confirmation: auth.password.clone(),

            proxy_enabled: state.proxy.enabled,
            proxy_type: state.proxy.kind.clone(),
            proxy_hostname: state.proxy.hostname.clone(),
            proxy_port: state.proxy.port,
            proxy_username: state.proxy.username.clone(),
            proxy_password: state.proxy.password.clone(),
            proxy_bypass_filter: state.proxy.bypass_filter.clone(),
            proxy_bypass_local_addresses: state.proxy.bypass_local_addresses,

            enable_ssl: state.ssl.enabled,
            ssl_port: state.ssl.port,
            ssl_cert_path: state.ssl.cert_path.clone(),
            ssl_cert_password: state.ssl.certificate_password.clone(),
            certificate_validation: state.ssl.certificate_validation.clone(),

            analytics_enabled: state.logging.analytics_enabled,
            log_level: state.logging.log_level.clone(),
            console_log_level: state.logging.console_log_level.clone(),

            backup_folder: state.backup.folder.clone(),
            backup_interval: state.backup.interval,
            backup_retention: state.backup.retention,

            update_mechanism: state.update.mechanism.clone(),
            branch: state.update.branch.clone(),
            update_script_path: state.update.script_path.clone(),
            update_automatically: state.update.update_automatically,
        })
    }

    fn apply_wire(wire: HostConfigResource) -> Result<Self, CoreError> {
        Ok(Self {
            id: wire.id,
            bind_address: wire.bind_address,
            port: wire.port,
            url_base: wire.url_base,
            instance_name: wire.instance_name,
            application_url: wire.application_url,
            launch_browser: wire.launch_browser,
            authentication: Authentication {
                method: wire.authentication_method,
                required: wire.authentication_required,
                username: wire.username,
                password: None,
            },
            proxy: Proxy {
                enabled: wire.proxy_enabled,
                kind: wire.proxy_type,
                hostname: wire.proxy_hostname,
                port: wire.proxy_port,
                username: wire.proxy_username,
                password: None,
                bypass_filter: wire.proxy_bypass_filter,
                bypass_local_addresses: wire.proxy_bypass_local_addresses,
            },
            ssl: Ssl {
                enabled: wire.enable_ssl,
                port: wire.ssl_port,
                cert_path: wire.ssl_cert_path,
                certificate_password: None,
                certificate_validation: wire.certificate_validation,
            },
            logging: Logging {
                analytics_enabled: wire.analytics_enabled,
                log_level: wire.log_level,
                console_log_level: wire.console_log_level,
            },
            backup: Backup {
                folder: wire.backup_folder,
                interval: wire.backup_interval,
                retention: wire.backup_retention,
            },
            update: Update {
                mechanism: wire.update_mechanism,
                branch: wire.branch,
                script_path: wire.update_script_path,
                update_automatically: wire.update_automatically,
            },
        })
    }

    fn identifier(state: &Self) -> i64 {
        state.id
    }

    fn set_identifier(state: &mut Self, id: i64) {
        state.id = id;
    }

    fn capture_sensitive(state: &Self) -> SensitiveRegister {
        let mut register = SensitiveRegister::default();
        register.capture(AUTH_PASSWORD, state.authentication.password.as_deref());
        register.capture(PROXY_PASSWORD, state.proxy.password.as_deref());
        register.capture(SSL_PASSWORD, state.ssl.certificate_password.as_deref());
        register
    }

    fn restore_sensitive(state: &mut Self, register: &SensitiveRegister) {
        state.authentication.password = register.restore(AUTH_PASSWORD);
        state.proxy.password = register.restore(PROXY_PASSWORD);
        state.ssl.certificate_password = register.restore(SSL_PASSWORD);
    }

    fn check(plan: &Self, diagnostics: &mut Diagnostics) {
        if plan.logging.console_log_level.is_none() {
            warn!(resource = Self::TYPE_NAME, "console_log_level not set");
            diagnostics.push(
                Diagnostic::warning(
                    DiagnosticKind::Advisory,
                    "logging.console_log_level is no longer copied from logging.log_level; \
                     set it explicitly to manage the console log level",
                )
                .with_attribute("logging.console_log_level"),
            );
        }
    }

    /// The identifier is the current authentication password.
    fn import_seed(identifier: &str) -> Result<Self, CoreError> {
        Ok(Self {
            id: endpoint::SINGLETON_ID,
            authentication: Authentication {
                password: (!identifier.is_empty()).then(|| identifier.to_owned()),
                ..Default::default()
            },
            ..Default::default()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn password_confirmation_mirrors_password() {
        let host = Host {
            id: 1,
            authentication: Authentication {
                method: "forms".into(),
                password: Some("pw".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let wire = Host::build_wire(&host).unwrap();
        assert_eq!(wire.password_confirmation.as_deref(), Some("pw"));
        assert_eq!(wire.console_log_level, None);
    }

    #[test]
    fn console_level_is_its_own_slot() {
        let host = Host {
            logging: Logging {
                log_level: "debug".into(),
                console_log_level: Some("info".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let wire = Host::build_wire(&host).unwrap();
        assert_eq!(wire.log_level, "debug");
        assert_eq!(wire.console_log_level.as_deref(), Some("info"));

        let mut diagnostics = Diagnostics::default();
        Host::check(&host, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_console_level_warns() {
        let mut diagnostics = Diagnostics::default();
        Host::check(&Host::default(), &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn wire_passwords_are_ignored() {
        let wire = HostConfigResource {
            id: 1,
            password: Some("********".into()),
            proxy_password: Some("********".into()),
            ..Default::default()
        };
        let state = Host::apply_wire(wire).unwrap();
        assert_eq!(state.authentication.password, None);
        assert_eq!(state.proxy.password, None);
    }

    #[test]
    fn import_seeds_password() {
        let seed = Host::import_seed("p@ssw0rd").unwrap();
        assert_eq!(seed.id, 1);
        assert_eq!(seed.authentication.password.as_deref(), Some("p@ssw0rd"));

        let register = Host::capture_sensitive(&seed);
        assert_eq!(register.get(AUTH_PASSWORD), Some("p@ssw0rd"));
    }
}
