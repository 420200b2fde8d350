//! Command line entry point.

use std::process::ExitCode;

use clap::Parser;
use nls_bundle::cli::{
    self,
    Cli,
    ExitStatus,
};
use tracing_subscriber::EnvFilter;

/// Entry point
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    match cli::run(&args) {
        Ok(output) => {
            for line in &output.lines {
                emit(line);
            }
            output.status.into()
        }
        Err(error) => {
            tracing::error!("{error}");
            ExitStatus::Error.into()
        }
    }
}

/// Writes one line of command output to stdout
#[allow(clippy::print_stdout)]
fn emit(line: &str) {
    println!("{line}");
}
