//! searchio entry point.
//!
//! Logging goes to stderr so stdout carries only presentation output.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use searchio_cli::feedback::Feedback;
use searchio_cli::{Cli, CliError, commands, error::usage_error};
use searchio_core::{AppConfig, ProcessEnv};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            let text = searchio_cli::cli::wants_text(std::env::args());
            return report(&CliError::from(usage_error(&e)), text);
        }
    };

    let text = cli.command.text_output();
    let outcome = match AppConfig::load() {
        Ok(config) => commands::run(&cli.command, &config, &ProcessEnv).await,
        Err(e) => Err(e.into()),
    };

    match outcome {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => report(&e, text),
    }
}

/// Hand a failure to the error presenter and exit non-zero.
fn report(err: &CliError, text: bool) -> Result<ExitCode> {
    tracing::error!("{}", err);

    if text {
        eprintln!("searchio: {err}");
    } else {
        let json = Feedback::error(&err.to_string()).to_json()?;
        println!("{json}");
    }

    Ok(ExitCode::FAILURE)
}
