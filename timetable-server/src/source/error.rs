//! Page acquisition error types.

/// Errors fetching an upstream page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("upstream returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// No such page (fixture sources)
    #[error("no page for {0}")]
    NotFound(String),

    /// Client could not be configured
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Errors building a page locator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocatorError {
    /// Base URL did not parse
    #[error("invalid base URL {url:?}: {message}")]
    InvalidBase { url: String, message: String },

    /// An identifier that goes into the URL path is unusable
    #[error("invalid {field} {value:?}: must be non-empty and contain no '/', '?' or '#'")]
    InvalidSegment { field: &'static str, value: String },
}
