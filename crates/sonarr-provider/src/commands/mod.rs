//! Command dispatch: CLI args -> provider handlers -> output.

pub mod resource;
pub mod system;

use sonarr_config::Settings;
use sonarr_core::{Provider, ProviderConfig, Severity};
use tokio_util::sync::CancellationToken;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Explicit settings from global flags; unset flags defer to config and env.
pub fn explicit_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let (extra_header_name, extra_header_value) = match global.header {
        None => (None, None),
        Some(ref raw) => {
            let (name, value) = raw.split_once('=').ok_or_else(|| CliError::Usage {
                field: "--header",
                reason: "expected NAME=VALUE".into(),
            })?;
            (Some(name.trim().to_owned()), Some(value.to_owned()))
        }
    };

    Ok(Settings {
        url: global.url.clone(),
        api_key: global.api_key.clone(),
        extra_header_name,
        extra_header_value,
        timeout: global.timeout,
        insecure: global.insecure.then_some(true),
        ca_cert: None,
    })
}

pub fn resolve_config(global: &GlobalOpts) -> Result<ProviderConfig, CliError> {
    let explicit = explicit_settings(global)?;
    Ok(sonarr_config::resolve(&explicit, global.config.as_deref())?)
}

/// Build the registry and hand every handler the shared client.
fn connect(global: &GlobalOpts, color: bool) -> Result<Provider, CliError> {
    let config = resolve_config(global)?;
    let provider = Provider::new();
    let diagnostics = provider.configure(&config);
    output::print_diagnostics(&diagnostics, color);
    if diagnostics.has_errors() {
        return Err(CliError::Failed {
            verb: "configure",
            type_name: "provider".into(),
            errors: diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Error)
                .count(),
        });
    }
    Ok(provider)
}

pub async fn dispatch(
    cmd: Command,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    match cmd {
        // No server connection needed
        Command::Types(args) => system::types(&args),
        Command::Config => system::show_config(global),
        Command::Ping => system::ping(global, cancel).await,

        cmd => {
            let provider = connect(global, color)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            resource::handle(cmd, &provider, cancel, color).await
        }
    }
}
