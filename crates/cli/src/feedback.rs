//! Presentation of results.
//!
//! Two renderings: Alfred Script Filter JSON (`{"items": [...]}`) for the
//! launcher, and a plain-text table for terminals.

use serde::Serialize;

use searchio_core::{Assembly, SearchConfig};

pub const NO_RESULTS_TITLE: &str = "No Results";
pub const NO_RESULTS_SUBTITLE: &str = "Try a different query?";
pub const ERROR_SUBTITLE: &str = "searchio failed";

/// Script Filter response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub items: Vec<Item>,
}

/// One Script Filter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub path: String,
}

impl Icon {
    fn for_path(path: &str) -> Option<Self> {
        (!path.is_empty()).then(|| Icon { path: path.to_string() })
    }
}

impl Item {
    /// A row that cannot be actioned.
    fn notice(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            arg: None,
            autocomplete: None,
            valid: false,
            icon: None,
            uid: None,
        }
    }
}

impl Feedback {
    /// Items for an assembled suggestion list.
    pub fn from_assembly(search: &SearchConfig, assembly: &Assembly) -> Self {
        let items = match assembly {
            Assembly::NoResults => vec![Item::notice(NO_RESULTS_TITLE, NO_RESULTS_SUBTITLE)],
            Assembly::Suggestions(suggestions) => suggestions
                .iter()
                .map(|s| Item {
                    title: s.text.clone(),
                    subtitle: s.subtitle.clone(),
                    arg: Some(s.action_url.clone()),
                    autocomplete: Some(format!("{} ", s.text)),
                    valid: true,
                    icon: Icon::for_path(&search.icon),
                    uid: s.uid.clone(),
                })
                .collect(),
        };
        Self { items }
    }

    /// Items for the `list` command.
    pub fn from_searches(searches: &[SearchConfig]) -> Self {
        if searches.is_empty() {
            return Self { items: vec![Item::notice("No Searches", "Add a search document to the data directory")] };
        }

        let items = searches
            .iter()
            .map(|search| Item {
                title: display_title(search).to_string(),
                subtitle: if search.keyword.is_empty() {
                    search.uid.clone()
                } else {
                    format!("{} (keyword: {})", search.uid, search.keyword)
                },
                arg: Some(search.uid.clone()),
                autocomplete: Some(search.uid.clone()),
                valid: true,
                icon: Icon::for_path(&search.icon),
                uid: Some(search.uid.clone()),
            })
            .collect();
        Self { items }
    }

    /// A single error row.
    pub fn error(message: &str) -> Self {
        Self { items: vec![Item::notice(message, ERROR_SUBTITLE)] }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn display_title(search: &SearchConfig) -> &str {
    if search.title.is_empty() { &search.uid } else { &search.title }
}

/// Text rendering of an assembled suggestion list.
pub fn suggestions_table(query: &str, assembly: &Assembly) -> String {
    let suggestions = assembly.suggestions();
    let mut out = format!("{} result(s) for \"{}\"\n", suggestions.len(), query);

    if suggestions.is_empty() {
        out.push_str(&format!("{NO_RESULTS_TITLE}. {NO_RESULTS_SUBTITLE}\n"));
        return out;
    }

    let rows: Vec<[&str; 2]> = suggestions.iter().map(|s| [s.text.as_str(), s.action_url.as_str()]).collect();
    out.push_str(&table(["Suggestion", "URL"], &rows));
    out
}

/// Text rendering of configured searches.
pub fn searches_table(searches: &[SearchConfig]) -> String {
    let mut out = format!("{} search(es)\n", searches.len());
    let rows: Vec<[&str; 3]> = searches
        .iter()
        .map(|s| [s.uid.as_str(), display_title(s), s.keyword.as_str()])
        .collect();
    if !rows.is_empty() {
        out.push_str(&table(["ID", "Title", "Keyword"], &rows));
    }
    out
}

/// Left-aligned columns separated by two spaces; the last column is not padded.
fn table<const N: usize>(headers: [&str; N], rows: &[[&str; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&headers).chain(rows) {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == N {
                line.push_str(cell);
            } else {
                let pad = widths[i] - cell.chars().count();
                line.push_str(cell);
                line.push_str(&" ".repeat(pad + 2));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
