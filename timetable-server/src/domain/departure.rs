//! Departure times.
//!
//! Upstream timetables describe a service day that runs past midnight, so
//! late trains are written as 24:05, 25:10 and so on. A `Departure` keeps
//! that encoding rather than folding it back onto 0-23.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Largest hour a service day can run to.
pub const MAX_HOUR: u32 = 29;

/// A recurring daily departure at (hour, minute).
///
/// Valid by construction: `hour` is 0-29 and `minute` is 0-59. Ordering is
/// chronological within the service day.
///
/// # Examples
///
/// ```
/// use timetable_server::domain::Departure;
///
/// let dep = Departure::new(7, 5).unwrap();
/// assert_eq!(dep.to_string(), "07:05");
///
/// // Past-midnight service is allowed
/// assert!(Departure::new(25, 10).is_ok());
///
/// // Out of range is rejected
/// assert!(Departure::new(30, 0).is_err());
/// assert!(Departure::new(7, 60).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawDeparture")]
pub struct Departure {
    hour: u8,
    minute: u8,
}

/// Unvalidated wire shape, checked on the way in.
#[derive(Deserialize)]
struct RawDeparture {
    hour: u32,
    minute: u32,
}

impl TryFrom<RawDeparture> for Departure {
    type Error = DomainError;

    fn try_from(raw: RawDeparture) -> Result<Self, Self::Error> {
        Departure::new(raw.hour, raw.minute)
    }
}

impl Departure {
    /// Create a departure, validating both components.
    pub fn new(hour: u32, minute: u32) -> Result<Self, DomainError> {
        if hour > MAX_HOUR {
            return Err(DomainError::InvalidHour(hour));
        }
        if minute > 59 {
            return Err(DomainError::InvalidMinute(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Parse an "HH:MM" (or "H:MM") string.
    pub fn parse_hhmm(s: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidTimeFormat(s.to_string());

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour = h.parse().map_err(|_| invalid())?;
        let minute = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }

    /// Returns the hour (0-29).
    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// Minutes from the start of the service day.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Stable-sort departures chronologically.
///
/// Equal times keep the order they were encountered in.
pub fn sort_departures(departures: &mut [Departure]) {
    departures.sort_by_key(|d| d.minutes_since_midnight());
}
