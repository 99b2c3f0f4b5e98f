//! Saved search configurations.
//!
//! Each search lives in `<searches_dir>/<uid>.json`. The uid is the file
//! stem; a `uid` key inside the document is ignored.

pub mod template;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Error;
pub use template::{Environment, Escaping, ProcessEnv, QUERY_PLACEHOLDER, render};

/// One configured suggestion source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Stable identifier, injected from the file stem.
    #[serde(skip)]
    pub uid: String,

    #[serde(default)]
    pub title: String,

    /// Icon path shown next to each suggestion.
    #[serde(default)]
    pub icon: String,

    /// Launcher keyword; display metadata only.
    #[serde(default)]
    pub keyword: String,

    /// Template for the page opened when a suggestion is actioned.
    pub search_url: String,

    /// Template for the suggest endpoint. Empty disables suggestions.
    #[serde(default)]
    pub suggest_url: String,

    /// Path-style escaping when true, query-string escaping otherwise.
    #[serde(rename = "pcencode", default)]
    pub percent_encode: bool,

    /// Path expression locating suggestion strings in the endpoint response.
    #[serde(default)]
    pub jsonpath: String,
}

impl SearchConfig {
    pub fn escaping(&self) -> Escaping {
        Escaping::from_pcencode(self.percent_encode)
    }

    /// URL of the results page for `query`.
    pub fn search_url_for(&self, query: &str, env: &dyn Environment) -> String {
        render(&self.search_url, query, self.escaping(), env)
    }

    /// URL of the suggest endpoint for `query`.
    pub fn suggest_url_for(&self, query: &str, env: &dyn Environment) -> String {
        render(&self.suggest_url, query, self.escaping(), env)
    }

    pub fn supports_suggestions(&self) -> bool {
        !self.suggest_url.trim().is_empty()
    }

    /// Location of the document for `uid` inside `dir`.
    pub fn document_path(dir: &Path, uid: &str) -> PathBuf {
        dir.join(format!("{uid}.json"))
    }

    /// Load the search `uid` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigLoad` if the uid is not a plain file stem, or the
    /// document is missing, unreadable, or malformed.
    pub async fn load(dir: &Path, uid: &str) -> Result<Self, Error> {
        validate_uid(uid)?;

        let path = Self::document_path(dir, uid);
        tracing::debug!(path = %path.display(), "loading search");

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| Error::ConfigLoad(format!("search {uid:?}: cannot read {}: {e}", path.display())))?;

        Self::from_slice(uid, &bytes)
            .map_err(|e| Error::ConfigLoad(format!("search {uid:?}: {}: {e}", path.display())))
    }

    /// Parse a search document, injecting `uid`.
    pub fn from_slice(uid: &str, bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let mut search: SearchConfig = serde_json::from_slice(bytes)?;
        search.uid = uid.to_string();
        Ok(search)
    }

    /// Load every search document in `dir`, sorted by title.
    ///
    /// Unparseable documents are skipped with a warning. A missing
    /// directory yields an empty list.
    pub async fn list(dir: &Path) -> Result<Vec<Self>, Error> {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::ConfigLoad(format!("cannot list {}: {e}", dir.display()))),
        };

        let mut searches = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::ConfigLoad(format!("cannot list {}: {e}", dir.display())))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(uid) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            match Self::load(dir, uid).await {
                Ok(search) => searches.push(search),
                Err(e) => tracing::warn!(path = %path.display(), "skipping search: {}", e),
            }
        }

        searches.sort_by_key(|s| (s.title.to_lowercase(), s.uid.clone()));
        Ok(searches)
    }
}

/// Reject uids that would escape the searches directory.
fn validate_uid(uid: &str) -> Result<(), Error> {
    if uid.is_empty() || uid == "." || uid == ".." || uid.contains(['/', '\\']) {
        return Err(Error::ConfigLoad(format!("invalid search id {uid:?}")));
    }
    Ok(())
}
