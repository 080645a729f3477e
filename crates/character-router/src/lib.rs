//! # Character Router
//!
//! Client-side routing for single-page applications:
//! - Static routes (`/characters`)
//! - Dynamic parameters (`/characters/:id`)
//! - Catch-all fallbacks (`/*pathMatch`, `/:pathMatch(.*)*`)
//! - Redirect routes, with loop detection and a hop limit
//! - Web (`/path`) and hash (`#/path`) history modes
//!
//! ## Matching
//!
//! Routes are tried in the order they were added and the first structural
//! match wins. There is no priority sorting: a catch-all must be added
//! last to act as a fallback.
//!
//! ## Example
//!
//! ```
//! use character_router::{Route, Router};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Page { List, Detail, Missing }
//!
//! let router = Router::new()
//!     .with_route(Route::redirect("/", "/characters"))
//!     .with_route(Route::view("/characters", Page::List))
//!     .with_route(Route::view("/characters/:id", Page::Detail))
//!     .with_route(Route::view("/*pathMatch", Page::Missing));
//!
//! let resolved = router.resolve("/characters/42").unwrap();
//! assert_eq!(resolved.view, Page::Detail);
//! assert_eq!(resolved.params.get("id"), Some(&"42".to_string()));
//!
//! let resolved = router.resolve("/").unwrap();
//! assert_eq!(resolved.view, Page::List);
//! assert_eq!(resolved.redirected_from, vec!["/".to_string()]);
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, warn};

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
pub mod history;
pub mod navigation;
pub mod path;
pub mod route;

pub use error::RouteError;
pub use history::{HistoryMode, Location};
pub use navigation::{HistoryStack, NavigationEvent};
pub use path::{decode_segment, is_valid_path, normalize_path};
pub use route::pattern::{classify_segment, PatternSegmentType};

/// Redirect hops followed before resolution gives up
pub const DEFAULT_MAX_REDIRECTS: usize = 8;

// ============================================================================
// Core Types
// ============================================================================

/// What a matched route produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget<V> {
    /// Render this view
    View(V),
    /// Resolve this path instead; `:param` placeholders are substituted
    Redirect(String),
}

/// A single entry of the route table
#[derive(Debug, Clone)]
pub struct Route<V> {
    /// Canonical URL pattern like "/characters/:id"
    pub pattern: String,
    /// Names of the parameters the pattern binds
    pub params: Vec<String>,
    /// Whether the pattern ends in a catch-all
    pub has_catch_all: bool,
    /// View to render or path to redirect to
    pub target: RouteTarget<V>,
    /// Optional name for URL generation
    pub name: Option<String>,
    segments: Vec<PatternSegmentType>,
}

/// Result of matching a single route against a path
#[derive(Debug, Clone)]
pub struct RouteMatch<'r, V> {
    /// The matched route
    pub route: &'r Route<V>,
    /// Parameters bound from the path
    pub params: HashMap<String, String>,
}

impl<V> RouteMatch<'_, V> {
    /// Checks if this match is a redirect route
    pub fn is_redirect(&self) -> bool {
        matches!(self.route.target, RouteTarget::Redirect(_))
    }

    /// Gets the redirect target with parameters substituted
    ///
    /// Returns None if this is not a redirect route.
    pub fn redirect_target(&self) -> Option<String> {
        self.route.redirect_target(&self.params)
    }
}

/// Final outcome of resolving a path, after redirects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<V> {
    /// View to render
    pub view: V,
    /// Parameters bound by the route that produced `view`
    pub params: HashMap<String, String>,
    /// Canonical path that produced `view`
    pub path: String,
    /// Paths that redirected, in the order they were visited
    pub redirected_from: Vec<String>,
}

impl<V> Resolution<V> {
    /// Whether at least one redirect was followed
    pub fn was_redirected(&self) -> bool {
        !self.redirected_from.is_empty()
    }

    /// Convenience lookup of a bound parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

// ============================================================================
// Route Implementation
// ============================================================================

impl<V> Route<V> {
    fn new(pattern: &str, target: RouteTarget<V>) -> Self {
        let parsed = route::parse_pattern(pattern);
        Route {
            pattern: parsed.pattern,
            params: parsed.params,
            has_catch_all: parsed.has_catch_all,
            target,
            name: None,
            segments: parsed.segments,
        }
    }

    /// Creates a route rendering `view`
    ///
    /// # Examples
    ///
    /// ```
    /// use character_router::Route;
    ///
    /// let route = Route::view("/characters/:id", "detail");
    /// assert_eq!(route.pattern, "/characters/:id");
    /// assert_eq!(route.params, vec!["id"]);
    /// ```
    pub fn view(pattern: impl AsRef<str>, view: V) -> Self {
        Self::new(pattern.as_ref(), RouteTarget::View(view))
    }

    /// Creates a redirect route
    ///
    /// # Examples
    ///
    /// ```
    /// use character_router::{Route, RouteTarget};
    ///
    /// let route: Route<()> = Route::redirect("/", "/characters");
    /// assert_eq!(route.target, RouteTarget::Redirect("/characters".to_string()));
    /// ```
    pub fn redirect(pattern: impl AsRef<str>, to: impl Into<String>) -> Self {
        Self::new(pattern.as_ref(), RouteTarget::Redirect(to.into()))
    }

    /// Names this route for `Router::href_for`
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Typed pattern segments, in order
    pub fn segments(&self) -> &[PatternSegmentType] {
        &self.segments
    }

    /// Matches this route against a path (case-sensitive)
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        self.matches_with_options(path, false)
    }

    /// Matches this route against a path with options
    ///
    /// Path segments are percent-decoded one by one before matching, so
    /// bound values and literal comparisons see decoded text.
    ///
    /// Walks pattern and path segments together: literals must be equal
    /// (ASCII case folded when `case_insensitive`), a parameter takes one
    /// segment, a catch-all takes whatever is left, including nothing.
    pub fn matches_with_options(
        &self,
        path: &str,
        case_insensitive: bool,
    ) -> Option<HashMap<String, String>> {
        let path = normalize_path(path);
        let path_segments: Vec<Cow<'_, str>> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect();

        fn match_segments(
            pattern: &[PatternSegmentType],
            path: &[Cow<'_, str>],
            mut params: HashMap<String, String>,
            case_insensitive: bool,
        ) -> Option<HashMap<String, String>> {
            match (pattern.split_first(), path.split_first()) {
                (None, None) => Some(params),
                (None, Some(_)) => None,
                (Some((PatternSegmentType::CatchAll(name), _)), _) => {
                    if let Some(name) = name {
                        params.insert(name.clone(), path.join("/"));
                    }
                    Some(params)
                }
                (Some((PatternSegmentType::Param(name), pattern_rest)), Some((segment, path_rest))) => {
                    params.insert(name.clone(), segment.to_string());
                    match_segments(pattern_rest, path_rest, params, case_insensitive)
                }
                (Some((PatternSegmentType::Static(text), pattern_rest)), Some((segment, path_rest))) => {
                    let equal = if case_insensitive {
                        text.eq_ignore_ascii_case(segment)
                    } else {
                        text == segment.as_ref()
                    };
                    if !equal {
                        return None;
                    }
                    match_segments(pattern_rest, path_rest, params, case_insensitive)
                }
                (Some(_), None) => None,
            }
        }

        match_segments(&self.segments, &path_segments, HashMap::new(), case_insensitive)
    }

    /// Generates a URL for this route by substituting parameters
    ///
    /// Returns None when a parameter the pattern needs is missing. An
    /// unnamed or empty catch-all contributes nothing. Values are
    /// percent-encoded; a catch-all keeps its `/` separators.
    ///
    /// # Examples
    ///
    /// ```
    /// use character_router::Route;
    /// use std::collections::HashMap;
    ///
    /// let route = Route::view("/characters/:id", ());
    /// let params = HashMap::from([("id".to_string(), "42".to_string())]);
    /// assert_eq!(route.generate_url(&params).unwrap(), "/characters/42");
    /// assert!(route.generate_url(&HashMap::new()).is_none());
    ///
    /// let params = HashMap::from([("id".to_string(), "Rick Sanchez".to_string())]);
    /// assert_eq!(route.generate_url(&params).unwrap(), "/characters/Rick%20Sanchez");
    /// ```
    pub fn generate_url(&self, params: &HashMap<String, String>) -> Option<String> {
        let segments = self
            .segments
            .iter()
            .map(|segment| match segment {
                PatternSegmentType::Static(text) => Some(text.clone()),
                PatternSegmentType::Param(name) => params
                    .get(name)
                    .map(|value| urlencoding::encode(value).into_owned()),
                PatternSegmentType::CatchAll(Some(name)) => Some(
                    params
                        .get(name)
                        .map(|value| encode_catch_all(value))
                        .unwrap_or_default(),
                ),
                PatternSegmentType::CatchAll(None) => Some(String::new()),
            })
            .collect::<Option<Vec<String>>>()?;

        Some(normalize_path(&segments.join("/")).into_owned())
    }

    /// Generates the redirect target with parameter substitution
    ///
    /// `:name` and `*name` segments of the target are replaced by bound
    /// values; placeholders with no binding are left as written.
    ///
    /// # Examples
    ///
    /// ```
    /// use character_router::Route;
    /// use std::collections::HashMap;
    ///
    /// let route: Route<()> = Route::redirect("/people/:id", "/characters/:id");
    /// let params = HashMap::from([("id".to_string(), "7".to_string())]);
    /// assert_eq!(route.redirect_target(&params).unwrap(), "/characters/7");
    /// ```
    pub fn redirect_target(&self, params: &HashMap<String, String>) -> Option<String> {
        let RouteTarget::Redirect(target) = &self.target else {
            return None;
        };

        let substituted = target
            .split('/')
            .map(|segment| {
                let bound = if let Some(name) = segment.strip_prefix(':') {
                    params
                        .get(name)
                        .map(|value| urlencoding::encode(value).into_owned())
                } else if let Some(name) = segment.strip_prefix('*') {
                    params.get(name).map(|value| encode_catch_all(value))
                } else {
                    None
                };
                bound.unwrap_or_else(|| segment.to_string())
            })
            .collect::<Vec<_>>()
            .join("/");

        Some(normalize_path(&substituted).into_owned())
    }
}

/// Percent-encodes a catch-all value part by part, keeping its separators
fn encode_catch_all(value: &str) -> String {
    value
        .split('/')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// Router Implementation
// ============================================================================

/// Ordered route table plus matching options
///
/// Built once, then only read: wrap it in an `Arc` to share it.
#[derive(Debug, Clone)]
pub struct Router<V> {
    routes: Vec<Route<V>>,
    named_routes: HashMap<String, usize>,
    case_insensitive: bool,
    max_redirects: usize,
}

impl<V> Default for Router<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Router<V> {
    /// Creates an empty, case-sensitive router
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            named_routes: HashMap::new(),
            case_insensitive: false,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Configures case sensitivity of literal segments
    pub fn with_case_sensitivity(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Configures how many redirect hops `resolve` follows
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Appends a route; declaration order is matching order
    pub fn with_route(mut self, route: Route<V>) -> Self {
        if let Some(name) = &route.name {
            self.named_routes.insert(name.clone(), self.routes.len());
        }
        self.routes.push(route);
        self
    }

    /// Appends several routes, keeping their order
    pub fn with_routes<I>(self, routes: I) -> Self
    where
        I: IntoIterator<Item = Route<V>>,
    {
        routes.into_iter().fold(self, Router::with_route)
    }

    /// Routes in declaration order
    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }

    /// Whether literal segments compare case-insensitively
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Hop limit used by `resolve`
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// Finds the first route matching `path`, without following redirects
    ///
    /// # Examples
    ///
    /// ```
    /// use character_router::{Route, Router};
    ///
    /// let router = Router::new()
    ///     .with_route(Route::redirect("/", "/characters"))
    ///     .with_route(Route::view("/characters", "list"));
    ///
    /// let matched = router.match_route("/").unwrap();
    /// assert!(matched.is_redirect());
    /// assert_eq!(matched.redirect_target().unwrap(), "/characters");
    /// ```
    pub fn match_route(&self, path: &str) -> Option<RouteMatch<'_, V>> {
        self.routes.iter().find_map(|route| {
            route
                .matches_with_options(path, self.case_insensitive)
                .map(|params| RouteMatch { route, params })
        })
    }

    /// Looks up a named route
    pub fn named(&self, name: &str) -> Option<&Route<V>> {
        self.named_routes.get(name).map(|&index| &self.routes[index])
    }

    /// Generates the path of a named route
    ///
    /// ```
    /// use character_router::{Route, Router};
    /// use std::collections::HashMap;
    ///
    /// let router = Router::new()
    ///     .with_route(Route::view("/characters/:id", ()).with_name("character"));
    /// let params = HashMap::from([("id".to_string(), "42".to_string())]);
    /// assert_eq!(router.href_for("character", &params).unwrap(), "/characters/42");
    /// ```
    pub fn href_for(&self, name: &str, params: &HashMap<String, String>) -> Option<String> {
        self.named(name)?.generate_url(params)
    }
}

impl<V: Clone> Router<V> {
    /// Resolves `path` to a view, following redirects
    ///
    /// A redirect restarts resolution at its target. Revisiting a path
    /// already seen in the chain fails with `RedirectLoop`; following more
    /// than `max_redirects` hops fails with `TooManyRedirects`.
    pub fn resolve(&self, path: &str) -> Result<Resolution<V>, RouteError> {
        let origin = normalize_path(path).into_owned();
        let mut current = origin.clone();
        let mut chain: Vec<String> = Vec::new();

        loop {
            let matched = self.match_route(&current).ok_or_else(|| {
                warn!(path = %current, "no route matched");
                RouteError::NoMatch { path: current.clone() }
            })?;

            let next = match &matched.route.target {
                RouteTarget::View(view) => {
                    debug!(
                        path = %current,
                        pattern = %matched.route.pattern,
                        redirects = chain.len(),
                        "route resolved"
                    );
                    return Ok(Resolution {
                        view: view.clone(),
                        params: matched.params,
                        path: current,
                        redirected_from: chain,
                    });
                }
                RouteTarget::Redirect(_) => matched
                    .redirect_target()
                    .unwrap_or_else(|| "/".to_string()),
            };

            debug!(from = %current, to = %next, "following redirect");
            chain.push(current);

            if chain.contains(&next) {
                chain.push(next);
                warn!(chain = ?chain, "redirect loop detected");
                return Err(RouteError::RedirectLoop { chain });
            }
            if chain.len() > self.max_redirects {
                warn!(path = %origin, limit = self.max_redirects, "too many redirects");
                return Err(RouteError::TooManyRedirects {
                    path: origin,
                    limit: self.max_redirects,
                });
            }

            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unnamed_catch_all_matches_root() {
        let route = Route::view("/*", ());
        assert_eq!(route.matches("/"), Some(HashMap::new()));
    }

    #[test]
    fn test_named_catch_all_binds_empty_suffix() {
        let route = Route::view("/*rest", ());
        let params = route.matches("/").unwrap();
        assert_eq!(params.get("rest"), Some(&String::new()));
    }

    #[test]
    fn test_param_needs_a_segment() {
        let route = Route::view("/characters/:id", ());
        assert!(route.matches("/characters").is_none());
        assert!(route.matches("/characters/").is_none());
    }

    #[test]
    fn test_case_insensitive_literals_keep_param_case() {
        let route = Route::view("/characters/:id", ());
        let params = route.matches_with_options("/CHARACTERS/Rick", true).unwrap();
        assert_eq!(params.get("id"), Some(&"Rick".to_string()));
        assert!(route.matches("/CHARACTERS/Rick").is_none());
    }

    #[test]
    fn test_segments_are_percent_decoded() {
        let route = Route::view("/characters/:id", ());
        let params = route.matches("/charact%65rs/Rick%20Sanchez").unwrap();
        assert_eq!(params.get("id"), Some(&"Rick Sanchez".to_string()));

        let params = route.matches("/characters/a%2Fb").unwrap();
        assert_eq!(params.get("id"), Some(&"a/b".to_string()));
    }

    #[test]
    fn test_catch_all_binds_decoded_segments() {
        let route = Route::view("/*rest", ());
        let params = route.matches("/a%20b/c").unwrap();
        assert_eq!(params.get("rest"), Some(&"a b/c".to_string()));
    }

    #[test]
    fn test_redirect_target_reencodes_values() {
        let route: Route<()> = Route::redirect("/people/:id", "/characters/:id");
        let params = route.matches("/people/Rick%20Sanchez").unwrap();
        assert_eq!(
            route.redirect_target(&params).unwrap(),
            "/characters/Rick%20Sanchez"
        );
    }

    #[test]
    fn test_redirect_target_on_view_route_is_none() {
        let route = Route::view("/characters", ());
        assert!(route.redirect_target(&HashMap::new()).is_none());
    }
}
