//! Command line interface
//!
//! Argument definitions and command dispatch. Commands return their output
//! lines and exit status; printing is left to the binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use thiserror::Error;

use crate::bundle::BundleError;
use crate::catalog::Catalog;
use crate::config::{
    ConfigError,
    ConfigManager,
};
use crate::locale::LocaleTag;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "nls-bundle", version, about = "Resolve and check NLS message bundles")]
pub struct Cli {
    /// Workspace root containing the bundles and `.nls-bundle.json`
    #[arg(short, long, global = true, default_value = ".")]
    workspace: PathBuf,

    /// Operation to run
    #[command(subcommand)]
    command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the string a key resolves to
    Resolve {
        /// Module id (e.g. `service/prov/azure/nls/messages`)
        module: String,
        /// Message key (e.g. `service:prov:azure:name`)
        key: String,
        /// Requested locale
        #[arg(short, long, default_value = "root")]
        locale: String,
    },
    /// Print the effective dictionary of a locale as JSON
    Dump {
        /// Module id
        module: String,
        /// Requested locale
        #[arg(short, long, default_value = "root")]
        locale: String,
    },
    /// Load every bundle and report validation issues
    Check,
}

/// Exit status of a command.
///
/// - `Success` (0): the command completed, no issues found
/// - `Failure` (1): the command completed and found issues
/// - `Error` (2): the command could not run
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
            ExitStatus::Error => Self::from(2),
        }
    }
}

/// What a command prints and how the process exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    pub status: ExitStatus,
}

impl CommandOutput {
    /// Output of a command that completed without issues
    const fn success(lines: Vec<String>) -> Self {
        Self { lines, status: ExitStatus::Success }
    }
}

/// Errors that prevent a command from running
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error("Failed to serialize bundle: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runs the parsed command against its workspace.
///
/// # Errors
/// - `CliError::Config` if the workspace configuration is invalid
/// - `CliError::Bundle` if loading or resolution fails
pub fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(cli.workspace.as_path()))?;
    let settings = config_manager.get_settings();

    match &cli.command {
        Command::Resolve { module, key, locale } => {
            let catalog = Catalog::load(&cli.workspace, settings)?;
            let value = catalog.resolve(module, &LocaleTag::new(locale), key)?;
            Ok(CommandOutput::success(vec![value.to_string()]))
        }
        Command::Dump { module, locale } => {
            let catalog = Catalog::load(&cli.workspace, settings)?;
            let merged = catalog.require_bundle(module)?.effective_bundle(&LocaleTag::new(locale));
            Ok(CommandOutput::success(vec![serde_json::to_string_pretty(&merged)?]))
        }
        Command::Check => {
            let (catalog, issues) = Catalog::load_unchecked(&cli.workspace, settings)?;
            tracing::info!(bundles = catalog.len(), issues = issues.len(), "Check finished");
            let status = if issues.is_empty() { ExitStatus::Success } else { ExitStatus::Failure };
            Ok(CommandOutput { lines: issues.iter().map(ToString::to_string).collect(), status })
        }
    }
}
