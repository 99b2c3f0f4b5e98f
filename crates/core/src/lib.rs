//! Core types and shared functionality for searchio.
//!
//! This crate provides:
//! - Search configurations and URL templating
//! - A JSON path extractor for suggest endpoint responses
//! - File-backed suggestion cache
//! - Result assembly
//! - Unified error types
//! - Application configuration

pub mod assemble;
pub mod cache;
pub mod config;
pub mod error;
pub mod jsonpath;
pub mod search;

pub use assemble::{Assembly, ResultOptions, Suggestion, assemble};
pub use cache::{CacheEntry, CacheKey, SuggestionCache};
pub use config::AppConfig;
pub use error::{Error, ErrorKind};
pub use jsonpath::JsonPath;
pub use search::{Environment, Escaping, ProcessEnv, SearchConfig};
