//! Timetable extraction.
//!
//! Turns a station configuration into a [`StationTimetables`] by fetching
//! one upstream page per direction and day type and parsing departures out
//! of it. Fetches run one at a time, never in parallel, to keep the load on
//! the upstream site small.

use tracing::{debug, info, warn};

use crate::domain::{DayType, Departure, Direction, StationConfig, StationTimetables, Timetable};
use crate::scrape::TimetablePlan;
use crate::source::{LocatorError, PageSource, SourceLocator};

/// Fetches and parses upstream timetables.
#[derive(Debug, Clone)]
pub struct TimetableExtractor<S> {
    source: S,
    locator: SourceLocator,
    plan: TimetablePlan,
}

impl<S: PageSource> TimetableExtractor<S> {
    /// Create an extractor using the standard parsing plan.
    pub fn new(source: S, locator: SourceLocator) -> Self {
        Self::with_plan(source, locator, TimetablePlan::standard().clone())
    }

    /// Create an extractor with a custom parsing plan.
    pub fn with_plan(source: S, locator: SourceLocator, plan: TimetablePlan) -> Self {
        Self {
            source,
            locator,
            plan,
        }
    }

    /// Departures for one direction and day type, sorted chronologically.
    ///
    /// A failed fetch is logged and yields an empty list. Only an
    /// unbuildable locator (bad configuration) is an error.
    pub async fn fetch_departures(
        &self,
        station: &StationConfig,
        direction: &Direction,
        day: DayType,
    ) -> Result<Vec<Departure>, LocatorError> {
        let url = self.locator.timetable_url(
            &station.external_station_id,
            &direction.external_direction_id,
            day,
        )?;

        let html = match self.source.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(
                    station = %station.id,
                    direction = %direction.label,
                    %day,
                    error = %e,
                    "timetable fetch failed"
                );
                return Ok(Vec::new());
            }
        };

        let departures = self.plan.parse(&html);
        debug!(
            station = %station.id,
            direction = %direction.label,
            %day,
            count = departures.len(),
            "parsed departures"
        );
        Ok(departures)
    }

    /// Full schedule for a station.
    ///
    /// Directions with no departures for a day type are left out of that
    /// day type's set.
    pub async fn build_station_timetables(
        &self,
        station: &StationConfig,
    ) -> Result<StationTimetables, LocatorError> {
        let mut timetables = StationTimetables::default();

        for direction in &station.directions {
            for day in DayType::ALL {
                let departures = self.fetch_departures(station, direction, day).await?;
                if let Some(timetable) = Timetable::non_empty(direction.label.clone(), departures)
                {
                    timetables.for_day_mut(day).push(timetable);
                }
            }
        }

        info!(
            station = %station.id,
            weekdays = timetables.weekdays.len(),
            holidays = timetables.holidays.len(),
            departures = timetables.departure_count(),
            "built station timetables"
        );
        Ok(timetables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixturePageSource;
    use crate::testing::page;

    const BASE: &str = "https://transit.test";

    fn url(station: &str, direction: &str, kind: u8) -> String {
        format!("{BASE}/timetable/{station}/{direction}?kind={kind}")
    }

    fn station() -> StationConfig {
        StationConfig::new(
            "test",
            "100",
            vec![Direction::new("A", "1"), Direction::new("B", "2")],
        )
    }

    fn extractor(source: FixturePageSource) -> TimetableExtractor<FixturePageSource> {
        TimetableExtractor::new(source, SourceLocator::new(BASE).unwrap())
    }

    fn times(deps: &[Departure]) -> Vec<(u32, u32)> {
        deps.iter().map(|d| (d.hour(), d.minute())).collect()
    }

    #[tokio::test]
    async fn fetch_departures_parses_page() {
        let source = FixturePageSource::new().with_page(url("100", "1", 1), page(&[(7, "05 23")]));
        let ex = extractor(source);
        let station = station();

        let deps = ex
            .fetch_departures(&station, &station.directions[0], DayType::Weekday)
            .await
            .unwrap();
        assert_eq!(times(&deps), [(7, 5), (7, 23)]);
    }

    #[tokio::test]
    async fn fetch_failure_is_empty() {
        let source = FixturePageSource::new().with_status(url("100", "1", 1), 500);
        let ex = extractor(source);
        let station = station();

        let deps = ex
            .fetch_departures(&station, &station.directions[0], DayType::Weekday)
            .await
            .unwrap();
        assert!(deps.is_empty());

        // Missing page behaves the same as an error status
        let deps = ex
            .fetch_departures(&station, &station.directions[1], DayType::Holiday)
            .await
            .unwrap();
        assert!(deps.is_empty());
    }

    #[tokio::test]
    async fn bad_locator_is_error() {
        let source = FixturePageSource::new();
        let ex = extractor(source.clone());
        let mut station = station();
        station.external_station_id = String::new();

        let result = ex
            .fetch_departures(&station, &station.directions[0], DayType::Weekday)
            .await;
        assert!(matches!(result, Err(LocatorError::InvalidSegment { .. })));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn repeated_extraction_is_identical() {
        let source = FixturePageSource::new()
            .with_page(url("100", "1", 1), page(&[(6, "50 10"), (5, "30")]));
        let ex = extractor(source);
        let station = station();
        let dir = &station.directions[0];

        let first = ex.fetch_departures(&station, dir, DayType::Weekday).await.unwrap();
        let second = ex.fetch_departures(&station, dir, DayType::Weekday).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(times(&first), [(5, 30), (6, 10), (6, 50)]);
    }

    #[tokio::test]
    async fn build_skips_empty_directions() {
        // A: 3 weekday, 0 holiday. B: 2 weekday, 4 holiday.
        let source = FixturePageSource::new()
            .with_page(url("100", "1", 1), page(&[(7, "00 20 40")]))
            .with_page(url("100", "1", 4), page(&[]))
            .with_page(url("100", "2", 1), page(&[(8, "15 45")]))
            .with_page(url("100", "2", 4), page(&[(9, "00 15 30 45")]));
        let ex = extractor(source);

        let tt = ex.build_station_timetables(&station()).await.unwrap();

        assert_eq!(tt.weekdays.len(), 2);
        assert_eq!(tt.weekdays[0].direction, "A");
        assert_eq!(tt.weekdays[0].departures.len(), 3);
        assert_eq!(tt.weekdays[1].direction, "B");
        assert_eq!(tt.weekdays[1].departures.len(), 2);

        assert_eq!(tt.holidays.len(), 1);
        assert_eq!(tt.holidays[0].direction, "B");
        assert_eq!(tt.holidays[0].departures.len(), 4);

        assert!(tt.is_committable());
    }

    #[tokio::test]
    async fn build_fetches_sequentially_in_order() {
        let source = FixturePageSource::new();
        let ex = extractor(source.clone());
        let tt = ex.build_station_timetables(&station()).await.unwrap();
        assert_eq!(tt, StationTimetables::default());

        assert_eq!(
            source.requests(),
            [
                url("100", "1", 1),
                url("100", "1", 4),
                url("100", "2", 1),
                url("100", "2", 4),
            ]
        );
    }
}
