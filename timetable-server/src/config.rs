//! Application configuration.
//!
//! Read from environment variables at startup. Every setting has a
//! default, so the server runs with no configuration at all.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::domain::{StationConfig, default_stations};

/// Default base URL of the upstream timetable site.
pub const DEFAULT_TRANSIT_BASE_URL: &str = "https://transit.yahoo.co.jp";

/// Default base URL of the upstream route-search site.
pub const DEFAULT_ROUTE_SEARCH_BASE_URL: &str = "https://transit.yahoo.co.jp";

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable has an unusable value
    #[error("invalid {name}: {message}")]
    InvalidVar { name: &'static str, message: String },

    /// The station table file could not be read
    #[error("failed to read station table {}: {source}", path.display())]
    StationsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The station table file is not valid JSON
    #[error("failed to parse station table {}: {message}", path.display())]
    StationsParse { path: PathBuf, message: String },
}

/// Settings for the whole application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path of the persisted store
    pub store_path: PathBuf,
    /// Optional JSON file with the station table
    pub stations_path: Option<PathBuf>,
    /// Base URL of the timetable site
    pub transit_base_url: String,
    /// Base URL of the route-search site
    pub route_search_base_url: String,
    /// User-Agent override for upstream requests
    pub user_agent: Option<String>,
    /// Upstream request timeout in seconds
    pub timeout_secs: u64,
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Serve upstream pages from this JSON file instead of the network
    pub fixtures_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data/timetables.json"),
            stations_path: None,
            transit_base_url: DEFAULT_TRANSIT_BASE_URL.to_string(),
            route_search_base_url: DEFAULT_ROUTE_SEARCH_BASE_URL.to_string(),
            user_agent: None,
            timeout_secs: 30,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            fixtures_path: None,
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(path) = var("TIMETABLE_STORE_PATH") {
            config.store_path = PathBuf::from(path);
        }
        config.stations_path = var("TIMETABLE_STATIONS_PATH").map(PathBuf::from);
        if let Some(url) = var("TRANSIT_BASE_URL") {
            config.transit_base_url = url;
        }
        if let Some(url) = var("ROUTE_SEARCH_BASE_URL") {
            config.route_search_base_url = url;
        }
        config.user_agent = var("SCRAPER_USER_AGENT");
        if let Some(secs) = var("HTTP_TIMEOUT_SECS") {
            config.timeout_secs = secs.trim().parse().map_err(|e| ConfigError::InvalidVar {
                name: "HTTP_TIMEOUT_SECS",
                message: format!("{secs:?}: {e}"),
            })?;
        }
        if let Some(addr) = var("BIND_ADDR") {
            config.bind_addr = addr.trim().parse().map_err(|e| ConfigError::InvalidVar {
                name: "BIND_ADDR",
                message: format!("{addr:?}: {e}"),
            })?;
        }

        config.fixtures_path = var("TIMETABLE_FIXTURES_PATH").map(PathBuf::from);

        Ok(config)
    }

    /// The configured station table, or the built-in one.
    pub fn load_stations(&self) -> Result<Vec<StationConfig>, ConfigError> {
        match &self.stations_path {
            Some(path) => load_stations_file(path),
            None => Ok(default_stations()),
        }
    }
}

/// Read a JSON array of station configs.
pub fn load_stations_file(path: &Path) -> Result<Vec<StationConfig>, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|e| ConfigError::StationsRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&json).map_err(|e| ConfigError::StationsParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
