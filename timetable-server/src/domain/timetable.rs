//! Timetables and per-station schedules.

use serde::{Deserialize, Serialize};

use super::day_type::DayType;
use super::departure::Departure;

/// Departures for one direction, sorted chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    pub direction: String,
    pub departures: Vec<Departure>,
}

impl Timetable {
    /// Build a timetable, returning `None` when there are no departures.
    pub fn non_empty(direction: impl Into<String>, departures: Vec<Departure>) -> Option<Self> {
        if departures.is_empty() {
            return None;
        }
        Some(Self {
            direction: direction.into(),
            departures,
        })
    }
}

/// A station's full schedule, split by day type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationTimetables {
    #[serde(default)]
    pub weekdays: Vec<Timetable>,
    #[serde(default)]
    pub holidays: Vec<Timetable>,
}

impl StationTimetables {
    /// Timetables for one day type.
    pub fn for_day(&self, day: DayType) -> &[Timetable] {
        match day {
            DayType::Weekday => &self.weekdays,
            DayType::Holiday => &self.holidays,
        }
    }

    /// Mutable timetables for one day type.
    pub fn for_day_mut(&mut self, day: DayType) -> &mut Vec<Timetable> {
        match day {
            DayType::Weekday => &mut self.weekdays,
            DayType::Holiday => &mut self.holidays,
        }
    }

    /// Whether this schedule may replace a stored one.
    ///
    /// Both day types must have at least one timetable.
    pub fn is_committable(&self) -> bool {
        !self.weekdays.is_empty() && !self.holidays.is_empty()
    }

    /// Total number of departures across both day types.
    pub fn departure_count(&self) -> usize {
        self.weekdays
            .iter()
            .chain(&self.holidays)
            .map(|t| t.departures.len())
            .sum()
    }
}
