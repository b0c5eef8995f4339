//! Merged departure feed across stations.

use serde::Serialize;

use crate::domain::{DayType, Departure};
use crate::store::StationRecord;

/// One departure in the merged feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub station_id: String,
    pub station_name: String,
    pub line_name: String,
    pub color: String,
    pub direction: String,
    pub hour: u32,
    pub minute: u32,
}

/// Upcoming departures from every station, soonest first.
///
/// Departures at or after `after` are included, up to `limit` entries.
/// Entries at the same time keep station order, then direction order.
pub fn merged_feed(
    stations: &[StationRecord],
    day: DayType,
    after: Option<Departure>,
    limit: usize,
) -> Vec<FeedEntry> {
    let threshold = after.map(|a| a.minutes_since_midnight()).unwrap_or(0);

    let mut entries: Vec<(u32, FeedEntry)> = stations
        .iter()
        .flat_map(|station| {
            station.timetables.for_day(day).iter().flat_map(move |timetable| {
                timetable
                    .departures
                    .iter()
                    .filter(move |d| d.minutes_since_midnight() >= threshold)
                    .map(move |d| {
                        let entry = FeedEntry {
                            station_id: station.id.clone(),
                            station_name: station.name.clone(),
                            line_name: station.line_name.clone(),
                            color: station.color.clone(),
                            direction: timetable.direction.clone(),
                            hour: d.hour(),
                            minute: d.minute(),
                        };
                        (d.minutes_since_midnight(), entry)
                    })
            })
        })
        .collect();

    entries.sort_by_key(|(key, _)| *key);
    entries.into_iter().take(limit).map(|(_, e)| e).collect()
}
