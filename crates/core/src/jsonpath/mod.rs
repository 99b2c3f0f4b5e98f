//! JSON path extraction of suggestion strings.
//!
//! Supports a small JSONPath dialect: `$` root, `.name` / `["name"]`
//! children, `*` wildcards, `..` recursive descent, index lists, slices,
//! and a trailing `+` that selects values rather than locations.
//!
//! Search documents usually omit the trailing `+`, so [`JsonPath::compile`]
//! appends it before parsing.

mod eval;
mod parser;

use std::borrow::Cow;

use serde_json::Value;

use crate::Error;
pub use eval::{Match, Step};

/// Marker selecting value output.
pub const VALUE_MARKER: char = '+';

/// What evaluation yields for each match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// The matched JSON values.
    Values,
    /// The matched locations, as arrays of keys and indices.
    Paths,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    Child(Selector),
    Descendant(Selector),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Selector {
    Wildcard,
    Keys(Vec<String>),
    Indices(Vec<i64>),
    Slice { start: Option<i64>, end: Option<i64> },
}

/// Syntax errors in a path expression. Positions are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathSyntaxError {
    #[error("empty expression")]
    Empty,

    #[error("expression must start with '$'")]
    MissingRoot,

    #[error("unexpected {found:?} at {pos}")]
    UnexpectedChar { pos: usize, found: char },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("empty selector at {pos}")]
    EmptySelector { pos: usize },

    #[error("invalid index {text:?} at {pos}")]
    InvalidIndex { pos: usize, text: String },

    #[error("unterminated quote at {pos}")]
    UnterminatedQuote { pos: usize },

    #[error("unexpected input after '+' at {pos}")]
    TrailingInput { pos: usize },
}

/// A parsed path expression.
#[derive(Debug, Clone)]
pub struct JsonPath {
    expr: String,
    segments: Vec<Segment>,
    output: Output,
}

/// Append the value marker unless `expr` already ends with it.
pub fn ensure_value_marker(expr: &str) -> Cow<'_, str> {
    let trimmed = expr.trim_end();
    if trimmed.is_empty() || trimmed.ends_with(VALUE_MARKER) {
        Cow::Borrowed(expr)
    } else {
        Cow::Owned(format!("{trimmed}{VALUE_MARKER}"))
    }
}

impl JsonPath {
    /// Parse `expr` exactly as written.
    pub fn parse(expr: &str) -> Result<Self, Error> {
        let parsed =
            parser::parse(expr).map_err(|source| Error::InvalidPath { path: expr.to_string(), source })?;
        Ok(Self { expr: expr.to_string(), segments: parsed.segments, output: parsed.output })
    }

    /// Parse a configured expression, forcing value output.
    pub fn compile(expr: &str) -> Result<Self, Error> {
        let path = Self::parse(&ensure_value_marker(expr))?;
        tracing::trace!(expr = %path.expr, "compiled path expression");
        Ok(path)
    }

    pub fn as_str(&self) -> &str {
        &self.expr
    }

    pub fn output(&self) -> Output {
        self.output
    }

    /// Matches of this path in `doc`, in evaluation order.
    pub fn matches<'a>(&self, doc: &'a Value) -> Vec<Match<'a>> {
        eval::evaluate(&self.segments, doc)
    }

    /// Raw fragments produced for `doc`: values or locations depending on output mode.
    pub fn fragments(&self, doc: &Value) -> Vec<Value> {
        self.matches(doc)
            .into_iter()
            .map(|m| match self.output {
                Output::Values => m.value.clone(),
                Output::Paths => Value::Array(m.path.iter().map(Value::from).collect()),
            })
            .collect()
    }

    /// Decode `json` and return every match as a string.
    ///
    /// In value mode a matched array contributes its elements, so `$.list`
    /// and `$.list[*]` extract the same words.
    ///
    /// # Errors
    ///
    /// - `Error::Decode` if `json` is not a JSON document.
    /// - `Error::Extraction` on the first fragment that is not a string;
    ///   no partial results are returned.
    pub fn extract(&self, json: &[u8]) -> Result<Vec<String>, Error> {
        let doc: Value = serde_json::from_slice(json).map_err(|e| Error::Decode(format!("JSON parse error: {e}")))?;

        let mut words = Vec::new();
        for (i, fragment) in self.fragments(&doc).into_iter().enumerate() {
            let items = match (self.output, fragment) {
                (Output::Values, Value::Array(items)) => items,
                (_, fragment) => vec![fragment],
            };
            for item in items {
                let word = serde_json::from_value::<String>(item)
                    .map_err(|e| Error::Extraction(format!("match {} of {:?}: {e}", i + 1, self.expr)))?;
                words.push(word);
            }
        }

        Ok(words)
    }
}

/// Compile `expr` and extract its string values from `json`.
pub fn extract(json: &[u8], expr: &str) -> Result<Vec<String>, Error> {
    JsonPath::compile(expr)?.extract(json)
}
