//! Page acquisition.
//!
//! The upstream transit site has no API, so timetables come from its HTML
//! pages. [`PageSource`] is the seam between fetching a page and parsing
//! it: [`HttpPageSource`] fetches over HTTP, [`FixturePageSource`] serves
//! canned pages for tests and offline runs.

mod client;
mod error;
mod fixture;
mod locator;

use reqwest::Url;

pub use client::{HttpPageSource, HttpSourceConfig};
pub use error::{FetchError, LocatorError};
pub use fixture::{FixturePage, FixturePageSource};
pub use locator::SourceLocator;

/// Something that can fetch a page's markup.
pub trait PageSource: Send + Sync {
    /// Fetch the document at `url` and return its body.
    fn fetch_page(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}
