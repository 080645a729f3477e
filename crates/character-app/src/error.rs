use character_router::RouteError;
use thiserror::Error;

/// Why an app could not be mounted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    /// Only `#id` selectors identify a mount point
    #[error("invalid mount selector '{0}', expected '#id'")]
    InvalidSelector(String),

    /// The document has no element with that id
    #[error("no element matches mount selector '#{0}'")]
    ElementNotFound(String),

    /// `mount` was called before a router plugin was installed
    #[error("cannot mount without a router; install RouterPlugin first")]
    RouterNotInstalled,

    /// The document's initial location did not resolve
    #[error("initial navigation failed: {0}")]
    InitialNavigation(#[from] RouteError),
}
