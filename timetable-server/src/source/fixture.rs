//! In-memory page source.
//!
//! Serves canned pages keyed by URL, as if they came from the upstream
//! site. Used by tests and for running the service without network access.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use reqwest::Url;

use super::PageSource;
use super::error::FetchError;

/// A canned response.
#[derive(Debug, Clone)]
pub enum FixturePage {
    /// Respond with this body
    Html(String),
    /// Respond with this HTTP status
    Status(u16),
}

/// Page source that serves fixtures and records what was asked for.
#[derive(Debug, Clone, Default)]
pub struct FixturePageSource {
    pages: Arc<HashMap<String, FixturePage>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixturePageSource {
    /// Create an empty source; every fetch fails with `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` at `url`.
    pub fn with_page(self, url: impl AsRef<str>, html: impl Into<String>) -> Self {
        self.with(url, FixturePage::Html(html.into()))
    }

    /// Answer `url` with an error status.
    pub fn with_status(self, url: impl AsRef<str>, status: u16) -> Self {
        self.with(url, FixturePage::Status(status))
    }

    fn with(mut self, url: impl AsRef<str>, page: FixturePage) -> Self {
        Arc::make_mut(&mut self.pages).insert(url.as_ref().to_string(), page);
        self
    }

    /// Load pages from a JSON map of URL to HTML.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| FetchError::Config(format!("failed to read {}: {e}", path.display())))?;
        let pages: HashMap<String, String> = serde_json::from_str(&json)
            .map_err(|e| FetchError::Config(format!("failed to parse {}: {e}", path.display())))?;

        Ok(pages
            .into_iter()
            .fold(Self::new(), |source, (url, html)| source.with_page(url, html)))
    }

    /// URLs fetched so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl PageSource for FixturePageSource {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.pages.get(url.as_str()) {
            Some(FixturePage::Html(html)) => Ok(html.clone()),
            Some(FixturePage::Status(status)) => Err(FetchError::Status {
                status: *status,
                url: url.to_string(),
            }),
            None => Err(FetchError::NotFound(url.to_string())),
        }
    }
}
