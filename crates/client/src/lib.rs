//! Client code for searchio.
//!
//! This crate provides the HTTP fetch pipeline for suggest endpoints,
//! response charset normalization, and the suggestion source used by the CLI.

pub mod fetch;
pub mod suggest;

pub use fetch::{FetchClient, FetchConfig, FetchResponse};
pub use suggest::{SuggestClient, SuggestionSource};
