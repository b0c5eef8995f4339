//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::feed::FeedEntry;
use crate::routes::RouteComparison;
use crate::update::UpdateSummary;

/// Result of the update trigger.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub success: bool,
    pub message: String,
    pub updated_station_count: usize,
}

impl From<UpdateSummary> for UpdateResponse {
    fn from(summary: UpdateSummary) -> Self {
        Self {
            success: true,
            message: summary.message(),
            updated_station_count: summary.updated,
        }
    }
}

/// Query for the merged feed.
#[derive(Debug, Default, Deserialize)]
pub struct FeedRequest {
    /// "weekday" or "holiday" (defaults to today's)
    pub day: Option<String>,

    /// Earliest departure in HH:MM (defaults to now)
    pub after: Option<String>,

    /// Maximum entries (default 20, max 200)
    pub limit: Option<usize>,
}

/// Merged feed response.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub day: String,
    pub after: String,
    pub entries: Vec<FeedEntry>,
}

/// Query for route comparison.
#[derive(Debug, Deserialize)]
pub struct RouteCompareRequest {
    /// Destination station name
    pub destination: String,
}

/// Route comparison response.
#[derive(Debug, Serialize)]
pub struct RouteCompareResponse {
    pub destination: String,
    pub routes: Vec<RouteComparison>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
