//! Command implementations.
//!
//! Each command returns the text destined for stdout; failures are handed
//! back to `main` for the error presenter.

pub mod clean;
pub mod list;
pub mod search;

use searchio_client::{FetchConfig, SuggestClient};
use searchio_core::{AppConfig, Environment};

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch `command` against `config`.
pub async fn run(command: &Commands, config: &AppConfig, env: &dyn Environment) -> Result<String, CliError> {
    match command {
        Commands::Search { text, search, query } => {
            let source = SuggestClient::new(FetchConfig::from(config))?;
            search::search_impl(config, search, query, *text, &source, env).await
        }
        Commands::List { text, filter } => list::list_impl(config, filter.as_deref(), *text).await,
        Commands::Clean { all } => clean::clean_impl(config, *all).await,
    }
}
