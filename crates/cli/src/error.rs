//! Structured errors for the searchio CLI.

use searchio_core::Error;

/// Errors surfaced by a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Any pipeline failure.
    #[error(transparent)]
    Core(#[from] Error),

    /// Presentation output could not be serialized.
    #[error("OUTPUT_ERROR: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<searchio_core::config::ConfigError> for CliError {
    fn from(err: searchio_core::config::ConfigError) -> Self {
        CliError::Core(err.into())
    }
}

/// Convert a clap parse failure into a usage error.
///
/// Only the first line of clap's rendered message is kept; the usage block
/// and hints are meant for a terminal, not a single result row.
pub fn usage_error(err: &clap::Error) -> Error {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    let message = line.strip_prefix("error: ").unwrap_or(line).trim();
    Error::Usage(message.to_string())
}
