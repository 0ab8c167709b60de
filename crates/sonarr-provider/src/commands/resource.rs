//! Resource and data source operations with JSON state in and out.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use sonarr_core::{Provider, Response, Severity};
use tokio_util::sync::CancellationToken;

use crate::cli::Command;
use crate::error::CliError;
use crate::output;

/// JSON from a file, or stdin for `-`.
fn read_json(path: &Path) -> Result<Value, CliError> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Diagnostics to stderr, state to stdout, error when any diagnostic is one.
fn finish(
    verb: &'static str,
    type_name: &str,
    response: &Response,
    color: bool,
) -> Result<(), CliError> {
    output::print_diagnostics(&response.diagnostics, color);

    let errors = response
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    if errors > 0 {
        return Err(CliError::Failed {
            verb,
            type_name: type_name.to_owned(),
            errors,
        });
    }

    if verb != "delete" {
        output::print_state(response.state.as_ref())?;
    }
    Ok(())
}

pub async fn handle(
    cmd: Command,
    provider: &Provider,
    cancel: &CancellationToken,
    color: bool,
) -> Result<(), CliError> {
    match cmd {
        Command::Create(args) => {
            let handler = provider.resource(&args.type_name)?;
            let plan = read_json(&args.input)?;
            let response = handler.create(plan, cancel).await;
            finish("create", &args.type_name, &response, color)
        }
        Command::Read(args) => {
            let handler = provider.resource(&args.type_name)?;
            let prior = read_json(&args.input)?;
            let response = handler.read(prior, cancel).await;
            finish("read", &args.type_name, &response, color)
        }
        Command::Update(args) => {
            let handler = provider.resource(&args.type_name)?;
            let plan = read_json(&args.plan)?;
            let prior = read_json(&args.prior)?;
            let response = handler.update(plan, prior, cancel).await;
            finish("update", &args.type_name, &response, color)
        }
        Command::Delete(args) => {
            let handler = provider.resource(&args.type_name)?;
            let prior = read_json(&args.input)?;
            let response = handler.delete(prior, cancel).await;
            finish("delete", &args.type_name, &response, color)
        }
        Command::Import(args) => {
            let handler = provider.resource(&args.type_name)?;
            let response = handler.import_state(&args.identifier, cancel).await;
            finish("import", &args.type_name, &response, color)
        }
        Command::Data(args) => {
            let handler = provider.data_source(&args.type_name)?;
            let config = read_json(&args.input)?;
            let response = handler.read(config, cancel).await;
            finish("read", &args.type_name, &response, color)
        }
        Command::Types(_) | Command::Ping | Command::Config => Err(CliError::Usage {
            field: "command",
            reason: "not a resource operation".into(),
        }),
    }
}
