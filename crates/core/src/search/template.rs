//! URL template rendering.
//!
//! A template carries one `{query}` placeholder and any number of `$VAR` /
//! `${VAR}` environment placeholders. The query is substituted first, then
//! environment placeholders are expanded. Both are escaped with the same
//! [`Escaping`] policy, so environment values never land in a URL raw.

use std::collections::HashMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Placeholder replaced by the escaped query.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Query-string values keep unreserved characters and `/`; space becomes `+`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~').remove(b'/');

/// Path segments keep unreserved characters and `&+:=@`; `/`, `,`, `;` and `?` are escaped.
///
/// `$` is escaped too, so an escaped query can never introduce an environment
/// placeholder.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Escaping policy for values substituted into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaping {
    /// Path-segment escaping (`pcencode: true`).
    Path,
    /// Query-string escaping (`pcencode: false`).
    Query,
}

impl Escaping {
    pub fn from_pcencode(percent_encode: bool) -> Self {
        if percent_encode { Escaping::Path } else { Escaping::Query }
    }

    /// Escape a single value.
    pub fn escape(self, value: &str) -> String {
        match self {
            Escaping::Path => utf8_percent_encode(value, PATH_SEGMENT).to_string(),
            // '%' itself is encoded as %25, so every %20 here came from a space.
            Escaping::Query => utf8_percent_encode(value, QUERY_VALUE).to_string().replace("%20", "+"),
        }
    }
}

/// Source of environment variables for template expansion.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Render `template` for `query`.
///
/// Unset environment variables expand to the empty string. A template
/// without a `{query}` placeholder is returned with only its variables
/// expanded; malformed `$` sequences are kept literally.
pub fn render(template: &str, query: &str, escaping: Escaping, env: &dyn Environment) -> String {
    let url = template.replace(QUERY_PLACEHOLDER, &escaping.escape(query));
    expand_vars(&url, |name| escaping.escape(&env.var(name).unwrap_or_default()))
}

fn expand_vars(input: &str, mut lookup: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match var_name(after) {
            Some((name, consumed)) => {
                out.push_str(&lookup(name));
                rest = &after[consumed..];
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parse a variable name following `$`, returning it and the bytes consumed.
fn var_name(s: &str) -> Option<(&str, usize)> {
    if let Some(braced) = s.strip_prefix('{') {
        let end = braced.find('}')?;
        let name = &braced[..end];
        return (!name.is_empty()).then_some((name, end + 2));
    }

    let len = s.bytes().take_while(|b| b.is_ascii_alphanumeric() || *b == b'_').count();
    (len > 0).then(|| (&s[..len], len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_space_handling() {
        let empty = env(&[]);
        let template = "https://example.com/s?q={query}";
        assert_eq!(render(template, "a b", Escaping::Query, &empty), "https://example.com/s?q=a+b");
        assert_eq!(render(template, "a b", Escaping::Path, &empty), "https://example.com/s?q=a%20b");
    }

    #[test]
    fn test_slash_handling() {
        assert_eq!(Escaping::Path.escape("AC/DC"), "AC%2FDC");
        assert_eq!(Escaping::Query.escape("AC/DC"), "AC/DC");
    }

    #[test]
    fn test_query_escaping_reserved() {
        assert_eq!(Escaping::Query.escape("c++ & rust?"), "c%2B%2B+%26+rust%3F");
        assert_eq!(Escaping::Query.escape("100%"), "100%25");
        assert_eq!(Escaping::Query.escape("a%20b"), "a%2520b");
        assert_eq!(Escaping::Query.escape("café"), "caf%C3%A9");
    }

    #[test]
    fn test_path_escaping_sub_delims() {
        assert_eq!(Escaping::Path.escape("a+b=c@d"), "a+b=c@d");
        assert_eq!(Escaping::Path.escape("a?b#c"), "a%3Fb%23c");
        assert_eq!(Escaping::Path.escape("a,b;c"), "a%2Cb%3Bc");
    }

    #[test]
    fn test_env_vars_are_escaped() {
        let vars = env(&[("LANG_CODE", "en us"), ("REGION", "a/b")]);
        let template = "https://x/{query}?hl=${LANG_CODE}&r=$REGION";
        assert_eq!(render(template, "q", Escaping::Query, &vars), "https://x/q?hl=en+us&r=a/b");
        assert_eq!(render(template, "q", Escaping::Path, &vars), "https://x/q?hl=en%20us&r=a%2Fb");
    }

    #[test]
    fn test_query_cannot_inject_env_vars() {
        let vars = env(&[("SECRET", "hunter2")]);
        let template = "https://x/{query}";
        assert_eq!(render(template, "$SECRET", Escaping::Path, &vars), "https://x/%24SECRET");
        assert_eq!(render(template, "${SECRET}", Escaping::Query, &vars), "https://x/%24%7BSECRET%7D");
    }

    #[test]
    fn test_missing_env_var_is_empty() {
        let vars = env(&[]);
        assert_eq!(render("https://x/?q={query}&hl=${NOPE}", "q", Escaping::Query, &vars), "https://x/?q=q&hl=");
    }

    #[test]
    fn test_malformed_placeholders_pass_through() {
        let vars = env(&[]);
        assert_eq!(render("https://x/?q=${query", "q", Escaping::Query, &vars), "https://x/?q=${query");
        assert_eq!(render("https://x/?a=$&b=${}", "q", Escaping::Query, &vars), "https://x/?a=$&b=${}");
        assert_eq!(render("https://x/", "q", Escaping::Query, &vars), "https://x/");
    }

    #[test]
    fn test_render_is_stable() {
        let vars = env(&[("HL", "de")]);
        let template = "https://x/?q={query}&hl=$HL";
        let first = render(template, "rust lang", Escaping::Query, &vars);
        let second = render(template, "rust lang", Escaping::Query, &vars);
        assert_eq!(first, second);
        assert_eq!(first, "https://x/?q=rust+lang&hl=de");

        let again = render(&first, "rust lang", Escaping::Query, &vars);
        assert_eq!(again, first);
        let path_first = render("https://x/{query}?hl=${HL}", "a,b/c", Escaping::Path, &vars);
        assert_eq!(path_first, "https://x/a%2Cb%2Fc?hl=de");
        assert_eq!(render(&path_first, "a,b/c", Escaping::Path, &vars), path_first);
    }

    #[test]
    fn test_from_pcencode() {
        assert_eq!(Escaping::from_pcencode(true), Escaping::Path);
        assert_eq!(Escaping::from_pcencode(false), Escaping::Query);
    }
}
