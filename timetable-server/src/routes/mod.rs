//! Route comparison.
//!
//! For a destination, look up the route from each configured station on
//! the upstream route-search site and compare total times. This sits next
//! to the timetable extractor and follows the same rules: pages are
//! fetched one at a time, and a failed fetch or unreadable page gives an
//! empty summary rather than an error.

mod link;

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::RouteCache;
use crate::domain::StationConfig;
use crate::scrape::{RouteSummary, parse_route_summary};
use crate::source::{LocatorError, PageSource};

pub use link::route_search_url;

/// One station's route to the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteComparison {
    pub station_id: String,
    pub station_name: String,
    pub search_url: String,
    pub summary: RouteSummary,
}

/// Fetches and compares routes.
pub struct RouteLookup<S> {
    source: S,
    base_url: String,
    cache: RouteCache,
}

impl<S: PageSource> RouteLookup<S> {
    pub fn new(source: S, base_url: impl Into<String>, cache: RouteCache) -> Self {
        Self {
            source,
            base_url: base_url.into(),
            cache,
        }
    }

    /// Summary of the route from `from` to `to`.
    ///
    /// Cached per pair. Only a bad base URL is an error.
    pub async fn lookup(&self, from: &str, to: &str) -> Result<Arc<RouteSummary>, LocatorError> {
        let key = (from.to_string(), to.to_string());
        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let url = route_search_url(&self.base_url, from, to)?;
        let summary = match self.source.fetch_page(&url).await {
            Ok(html) => parse_route_summary(&html),
            Err(e) => {
                warn!(from, to, error = %e, "route fetch failed");
                RouteSummary::default()
            }
        };
        debug!(from, to, complete = summary.is_complete(), "route looked up");

        let summary = Arc::new(summary);
        // Failures are not cached so the next request retries
        if summary.is_complete() {
            self.cache.insert(key, summary.clone()).await;
        }
        Ok(summary)
    }

    /// Routes from every station to `destination`, fastest first.
    ///
    /// Stations with an unknown total time sort last, in config order.
    pub async fn compare(
        &self,
        stations: &[StationConfig],
        destination: &str,
    ) -> Result<Vec<RouteComparison>, LocatorError> {
        let mut comparisons = Vec::with_capacity(stations.len());
        for station in stations {
            let summary = self.lookup(&station.name, destination).await?;
            comparisons.push(RouteComparison {
                station_id: station.id.clone(),
                station_name: station.name.clone(),
                search_url: route_search_url(&self.base_url, &station.name, destination)?
                    .to_string(),
                summary: (*summary).clone(),
            });
        }

        comparisons.sort_by(|a, b| by_total_time(&a.summary, &b.summary));
        Ok(comparisons)
    }
}

fn by_total_time(a: &RouteSummary, b: &RouteSummary) -> Ordering {
    match (a.total_minutes, b.total_minutes) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::source::FixturePageSource;

    const BASE: &str = "https://routes.test";

    fn result_page(minutes: u32, fare: u32) -> String {
        format!(
            r#"<html><body><div class="route-summary">
                <span class="total-time">{minutes}分</span>
                <span class="fare">{fare}円</span>
                <span class="transfer">乗換：0回</span>
            </div></body></html>"#
        )
    }

    fn station(id: &str) -> StationConfig {
        StationConfig::new(id, "1", vec![]).with_display(id.to_uppercase(), "", "")
    }

    fn lookup(source: FixturePageSource) -> RouteLookup<FixturePageSource> {
        RouteLookup::new(source, BASE, RouteCache::new(&CacheConfig::default()))
    }

    fn url(from: &str, to: &str) -> String {
        route_search_url(BASE, from, to).unwrap().to_string()
    }

    #[tokio::test]
    async fn compare_sorts_by_total_time() {
        let source = FixturePageSource::new()
            .with_page(url("A", "X"), result_page(40, 300))
            .with_page(url("B", "X"), result_page(25, 500))
            .with_status(url("C", "X"), 500);
        let lookup = lookup(source);

        let results = lookup
            .compare(&[station("a"), station("b"), station("c")], "X")
            .await
            .unwrap();

        let order: Vec<_> = results.iter().map(|r| r.station_id.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
        assert_eq!(results[0].summary.fare_yen, Some(500));
        assert_eq!(results[0].search_url, url("B", "X"));
        assert_eq!(results[2].summary, RouteSummary::default());
    }

    #[tokio::test]
    async fn successful_lookups_are_cached() {
        let source = FixturePageSource::new().with_page(url("A", "X"), result_page(10, 100));
        let lookup = lookup(source);

        let first = lookup.lookup("A", "X").await.unwrap();
        let second = lookup.lookup("A", "X").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(lookup.source.requests().len(), 1);
    }

    #[tokio::test]
    async fn failed_lookups_are_retried() {
        let lookup = lookup(FixturePageSource::new());

        lookup.lookup("A", "X").await.unwrap();
        lookup.lookup("A", "X").await.unwrap();
        assert_eq!(lookup.source.requests().len(), 2);
    }

    #[test]
    fn unknown_times_sort_last() {
        let known = RouteSummary {
            total_minutes: Some(90),
            ..RouteSummary::default()
        };
        let unknown = RouteSummary::default();
        assert_eq!(by_total_time(&known, &unknown), Ordering::Less);
        assert_eq!(by_total_time(&unknown, &unknown), Ordering::Equal);
    }
}
