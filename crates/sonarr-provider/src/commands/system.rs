//! Commands that do not drive a resource: type listing, config, ping.

use sonarr_core::{BlockKind, CoreError, Provider, ProviderData};
use tokio_util::sync::CancellationToken;

use super::{explicit_settings, resolve_config};
use crate::cli::{GlobalOpts, TypesArgs};
use crate::error::CliError;
use crate::output;

pub fn types(args: &TypesArgs) -> Result<(), CliError> {
    let schemas: Vec<_> = Provider::new()
        .schemas()
        .into_iter()
        .filter(|s| match s.block {
            BlockKind::Resource => !args.data_sources,
            BlockKind::DataSource => !args.resources,
        })
        .collect();
    println!("{}", output::render_types(&schemas));
    Ok(())
}

pub fn show_config(global: &GlobalOpts) -> Result<(), CliError> {
    let explicit = explicit_settings(global)?;
    let settings = sonarr_config::load(&explicit, global.config.as_deref())?;
    print!("{}", settings.to_redacted_toml().map_err(CliError::Config)?);
    Ok(())
}

pub async fn ping(global: &GlobalOpts, cancel: &CancellationToken) -> Result<(), CliError> {
    let config = resolve_config(global)?;
    let data = ProviderData::connect(&config)?;

    let status = tokio::select! {
        () = cancel.cancelled() => return Err(CliError::Cancelled),
        status = data.client.system_status() => status.map_err(CoreError::from)?,
    };
    println!(
        "{} {} at {}",
        status.app_name,
        status.version,
        data.client.base_url()
    );
    Ok(())
}
