use thiserror::Error;

/// Why a path could not be resolved to a view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No route matched; the table has no catch-all
    #[error("no route matches '{path}'")]
    NoMatch { path: String },

    /// A redirect pointed back at a path already visited in this resolution
    #[error("redirect loop: {}", chain.join(" -> "))]
    RedirectLoop { chain: Vec<String> },

    /// The redirect chain starting at `path` was longer than `limit` hops
    #[error("redirect chain from '{path}' exceeded {limit} hops")]
    TooManyRedirects { path: String, limit: usize },
}
