//! History modes and locations
//!
//! A history mode decides which part of a browser URL the router sees as
//! the path, and how a router path is written back into an `href`.
//!
//! - `Web`: the URL path itself, under an optional base (`/app/characters/42`)
//! - `Hash`: the fragment after `#` (`/index.html#/characters/42`)

use std::borrow::Cow;

use crate::path::{join_base, normalize_path, strip_base};

/// Strategy for mapping browser URLs to router paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMode {
    /// Path-based URLs, optionally below `base`
    Web { base: String },
    /// Fragment-based URLs; `base` is the document the fragment hangs off
    Hash { base: String },
}

impl Default for HistoryMode {
    fn default() -> Self {
        HistoryMode::web("/")
    }
}

impl HistoryMode {
    /// Web history below `base` (`"/"` for none)
    pub fn web(base: impl AsRef<str>) -> Self {
        HistoryMode::Web {
            base: normalize_path(base.as_ref()).into_owned(),
        }
    }

    /// Hash history; `base` is usually empty or the document path
    pub fn hash(base: impl Into<String>) -> Self {
        HistoryMode::Hash { base: base.into() }
    }

    /// The configured base
    pub fn base(&self) -> &str {
        match self {
            HistoryMode::Web { base } | HistoryMode::Hash { base } => base,
        }
    }

    /// Extracts the router location from a URL
    ///
    /// Accepts absolute URLs (`https://host/x`) as well as
    /// path-and-query strings (`/x?y=1#z`).
    ///
    /// # Examples
    ///
    /// ```
    /// use character_router::HistoryMode;
    ///
    /// let web = HistoryMode::web("/app");
    /// let location = web.parse_location("https://example.com/app/characters/42?tab=bio#top");
    /// assert_eq!(location.path, "/characters/42");
    /// assert_eq!(location.query_param("tab"), Some("bio"));
    /// assert_eq!(location.hash.as_deref(), Some("top"));
    ///
    /// let hash = HistoryMode::hash("");
    /// assert_eq!(hash.parse_location("/index.html#/characters/7").path, "/characters/7");
    /// assert_eq!(hash.parse_location("/index.html").path, "/");
    /// ```
    pub fn parse_location(&self, url: &str) -> Location {
        let url = strip_origin(url);
        match self {
            HistoryMode::Web { base } => {
                let mut location = Location::parse(url);
                if let Some(stripped) = strip_base(base, &location.path) {
                    location.path = stripped;
                }
                location
            }
            HistoryMode::Hash { .. } => match url.split_once('#') {
                Some((_, fragment)) => Location::parse(fragment),
                None => Location::parse("/"),
            },
        }
    }

    /// Writes a router path (optionally with `?query#hash`) as an href
    ///
    /// ```
    /// use character_router::HistoryMode;
    ///
    /// assert_eq!(HistoryMode::web("/").href("/characters"), "/characters");
    /// assert_eq!(HistoryMode::web("/app").href("/characters?x=1"), "/app/characters?x=1");
    /// assert_eq!(HistoryMode::hash("").href("/characters/42"), "#/characters/42");
    /// ```
    pub fn href(&self, full_path: &str) -> String {
        let split_at = full_path.find(['?', '#']).unwrap_or(full_path.len());
        let (path, rest) = full_path.split_at(split_at);
        match self {
            HistoryMode::Web { base } => format!("{}{}", join_base(base, path), rest),
            HistoryMode::Hash { base } => format!("{}#{}{}", base, normalize_path(path), rest),
        }
    }
}

/// Drops `scheme://authority` from an absolute URL
fn strip_origin(url: &str) -> &str {
    match url.split_once("://") {
        Some((_, after_scheme)) => {
            let start = after_scheme.find(['/', '?', '#']).unwrap_or(after_scheme.len());
            &after_scheme[start..]
        }
        None => url,
    }
}

/// Where the router currently is: path, query and fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Canonical router path
    pub path: String,
    /// Decoded query pairs, in URL order
    pub query: Vec<(String, String)>,
    /// Fragment without the leading `#`
    pub hash: Option<String>,
}

impl Location {
    /// Parses a `path?query#hash` string
    ///
    /// ```
    /// use character_router::Location;
    ///
    /// let location = Location::parse("/characters/?name=Morty%20Smith&page=2#list");
    /// assert_eq!(location.path, "/characters");
    /// assert_eq!(location.query_param("name"), Some("Morty Smith"));
    /// assert_eq!(location.query_param("page"), Some("2"));
    /// assert_eq!(location.hash.as_deref(), Some("list"));
    /// ```
    pub fn parse(input: &str) -> Self {
        let (before_hash, hash) = match input.split_once('#') {
            Some((before, hash)) => (before, Some(hash.to_string())),
            None => (input, None),
        };
        let (path, query) = match before_hash.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (before_hash, Vec::new()),
        };

        Location {
            path: normalize_path(path).into_owned(),
            query,
            hash,
        }
    }

    /// First value for a query key
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path plus re-encoded query and fragment
    ///
    /// ```
    /// use character_router::Location;
    ///
    /// let location = Location::parse("/characters?name=Morty%20Smith#top");
    /// assert_eq!(location.full_path(), "/characters?name=Morty%20Smith#top");
    /// ```
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            full.push('?');
            full.push_str(&query);
        }
        if let Some(hash) = &self.hash {
            full.push('#');
            full.push_str(hash);
        }
        full
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .unwrap_or(Cow::Borrowed(spaced.as_str()))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_origin() {
        assert_eq!(strip_origin("http://localhost:3000/characters"), "/characters");
        assert_eq!(strip_origin("http://localhost:3000"), "");
        assert_eq!(strip_origin("/characters"), "/characters");
    }

    #[test]
    fn test_web_location_outside_base_is_kept() {
        let mode = HistoryMode::web("/app");
        assert_eq!(mode.parse_location("/elsewhere").path, "/elsewhere");
    }

    #[test]
    fn test_hash_location_with_query() {
        let mode = HistoryMode::hash("/index.html");
        let location = mode.parse_location("/index.html#/characters?page=3");
        assert_eq!(location.path, "/characters");
        assert_eq!(location.query_param("page"), Some("3"));
        assert_eq!(mode.href("/characters"), "/index.html#/characters");
    }

    #[test]
    fn test_plus_decodes_to_space() {
        let location = Location::parse("/characters?name=Rick+Sanchez");
        assert_eq!(location.query_param("name"), Some("Rick Sanchez"));
    }

    #[test]
    fn test_key_without_value() {
        let location = Location::parse("/characters?alive");
        assert_eq!(location.query_param("alive"), Some(""));
    }

    #[test]
    fn test_default_mode_is_web_root() {
        assert_eq!(HistoryMode::default(), HistoryMode::web("/"));
        assert_eq!(HistoryMode::default().base(), "/");
    }
}
