//! searchio command-line front end.
//!
//! Wires the core pipeline to the HTTP suggestion source and renders the
//! result as Alfred Script Filter JSON or a text table.

pub mod cli;
pub mod commands;
pub mod error;
pub mod feedback;
pub mod pipeline;

pub use cli::{Cli, Commands};
pub use error::CliError;
pub use pipeline::{SearchOutcome, suggest};
