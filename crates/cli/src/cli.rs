//! Command-line surface.

use clap::{Parser, Subcommand};

/// Search-as-you-type suggestions from configurable suggest endpoints.
#[derive(Debug, Parser)]
#[command(name = "searchio", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch suggestions for QUERY from the search SEARCH.
    Search {
        /// Print a plain-text table instead of Alfred JSON.
        #[arg(short, long)]
        text: bool,

        /// Search identifier (file stem of its configuration document).
        search: String,

        /// Query text, used verbatim.
        #[arg(allow_hyphen_values = true)]
        query: String,
    },

    /// List configured searches.
    List {
        /// Print a plain-text table instead of Alfred JSON.
        #[arg(short, long)]
        text: bool,

        /// Only show searches whose title or id contains this text.
        filter: Option<String>,
    },

    /// Delete expired cache entries.
    Clean {
        /// Delete every cached entry regardless of age.
        #[arg(short, long)]
        all: bool,
    },
}

impl Commands {
    /// True when output should be a text table.
    pub fn text_output(&self) -> bool {
        match self {
            Commands::Search { text, .. } | Commands::List { text, .. } => *text,
            Commands::Clean { .. } => true,
        }
    }
}

/// Whether raw arguments ask for text output.
///
/// Used to pick the error presenter when argument parsing itself failed.
pub fn wants_text<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().any(|arg| matches!(arg.as_ref(), "-t" | "--text"))
}
