//! Clap derive structures for the `sonarr-provider` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sonarr-provider -- drive Sonarr provider resources from the shell
#[derive(Debug, Parser)]
#[command(
    name = "sonarr-provider",
    version,
    about = "Drive Sonarr provider resources and data sources from the command line",
    long_about = "Runs one provider operation against a Sonarr server.\n\n\
        State is read as JSON from a file or stdin and the resulting state is\n\
        written to stdout. Diagnostics go to stderr.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server URL, e.g. http://sonarr:8989 (overrides config and SONARR_URL)
    #[arg(long, short = 'u', global = true)]
    pub url: Option<String>,

    /// API key (overrides config and SONARR_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Extra authentication header, NAME=VALUE
    #[arg(long, global = true, value_name = "NAME=VALUE")]
    pub header: Option<String>,

    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if stderr is a terminal)
    Auto,
    Always,
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every resource and data source type
    #[command(alias = "ls")]
    Types(TypesArgs),

    /// Create a resource from a planned state
    Create(StateArgs),

    /// Refresh a resource from its prior state
    Read(StateArgs),

    /// Update a resource: planned state plus prior state
    Update(UpdateArgs),

    /// Delete a resource given its prior state
    Delete(StateArgs),

    /// Import an existing server object by identifier
    Import(ImportArgs),

    /// Read a data source
    Data(StateArgs),

    /// Check connectivity and print the server version
    Ping,

    /// Show the resolved configuration (secrets masked)
    Config,
}

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Only data sources
    #[arg(long, conflicts_with = "resources")]
    pub data_sources: bool,

    /// Only resources
    #[arg(long)]
    pub resources: bool,
}

#[derive(Debug, Args)]
pub struct StateArgs {
    /// Type name, e.g. sonarr_tag
    pub type_name: String,

    /// JSON state file, or - for stdin
    #[arg(long, short = 'i', default_value = "-")]
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Type name, e.g. sonarr_tag
    pub type_name: String,

    /// Planned state, or - for stdin
    #[arg(long, default_value = "-")]
    pub plan: PathBuf,

    /// Prior state
    #[arg(long)]
    pub prior: PathBuf,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Type name, e.g. sonarr_tag
    pub type_name: String,

    /// Numeric id, or the lookup key the type accepts (name, label, path)
    pub identifier: String,
}
