//! Extraction plan errors.

/// Errors building an extraction plan.
///
/// Parsing a page never fails; only a malformed selector does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    /// A CSS selector did not parse
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
}
