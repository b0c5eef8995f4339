//! Update cycle orchestration.
//!
//! One cycle reads the store, rebuilds every configured station's
//! timetables in turn, and writes the store back once. A station only
//! replaces its stored timetables when both day types came back non-empty;
//! otherwise its previous data stays as it was.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::StationConfig;
use crate::extractor::TimetableExtractor;
use crate::source::{LocatorError, PageSource};
use crate::store::{JsonStore, StoreDocument, StoreError};

/// Errors that abort a whole update cycle.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors confined to one station. Logged, never propagated.
#[derive(Debug, thiserror::Error)]
pub enum StationUpdateError {
    #[error("cannot build page locator: {0}")]
    Locator(#[from] LocatorError),
}

/// Outcome of one station's update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationOutcome {
    /// New timetables were committed
    Updated,
    /// Scraping came back incomplete; stored data left untouched
    Kept,
}

/// Result of a full update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    /// Stations whose timetables were replaced
    pub updated: usize,
    /// Stations attempted
    pub total: usize,
}

impl UpdateSummary {
    pub fn message(&self) -> String {
        format!("Updated {} of {} stations", self.updated, self.total)
    }
}

/// Rebuild one station's timetables into `document`.
pub async fn update_station<S: PageSource>(
    extractor: &TimetableExtractor<S>,
    station: &StationConfig,
    document: &mut StoreDocument,
) -> Result<StationOutcome, StationUpdateError> {
    let timetables = extractor.build_station_timetables(station).await?;

    if !timetables.is_committable() {
        warn!(
            station = %station.id,
            weekdays = timetables.weekdays.len(),
            holidays = timetables.holidays.len(),
            "incomplete timetables, keeping stored data"
        );
        return Ok(StationOutcome::Kept);
    }

    document.station_mut_or_insert(station).timetables = timetables;
    Ok(StationOutcome::Updated)
}

/// Run a full update cycle over `stations`.
///
/// Stations are processed one at a time. A station that fails is logged and
/// skipped; only store I/O failures abort the cycle, and in that case
/// nothing is written.
pub async fn update_all<S: PageSource>(
    extractor: &TimetableExtractor<S>,
    stations: &[StationConfig],
    store: &JsonStore,
) -> Result<UpdateSummary, UpdateError> {
    let mut document = store.load_async().await?;
    let mut summary = UpdateSummary {
        updated: 0,
        total: stations.len(),
    };

    for station in stations {
        match update_station(extractor, station, &mut document).await {
            Ok(StationOutcome::Updated) => {
                info!(station = %station.id, "station updated");
                summary.updated += 1;
            }
            Ok(StationOutcome::Kept) => {}
            Err(e) => warn!(station = %station.id, error = %e, "station update failed"),
        }
    }

    store.save_async(document).await?;
    info!(updated = summary.updated, total = summary.total, "update cycle complete");
    Ok(summary)
}
