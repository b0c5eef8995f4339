//! Domain types for the timetable service.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod day_type;
mod departure;
mod error;
mod station;
mod timetable;

pub use day_type::DayType;
pub use departure::{Departure, MAX_HOUR, sort_departures};
pub use error::DomainError;
pub use station::{Direction, StationConfig, default_stations};
pub use timetable::{StationTimetables, Timetable};
