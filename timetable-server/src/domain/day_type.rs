//! Schedule day types.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Which schedule variant a timetable describes.
///
/// The upstream site keys timetables by a numeric `kind` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Holiday,
}

impl DayType {
    /// Both day types, in the order they are scraped.
    pub const ALL: [DayType; 2] = [DayType::Weekday, DayType::Holiday];

    /// Upstream `kind` query value.
    pub fn kind_code(self) -> u8 {
        match self {
            DayType::Weekday => 1,
            DayType::Holiday => 4,
        }
    }

    /// Day type for a calendar date.
    ///
    /// Saturdays and Sundays run the holiday schedule. Public holidays are
    /// not known here and get the weekday schedule.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayType::Holiday,
            _ => DayType::Weekday,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Holiday => "holiday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekday" | "weekdays" => Ok(DayType::Weekday),
            "holiday" | "holidays" => Ok(DayType::Holiday),
            _ => Err(DomainError::UnknownDayType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes() {
        assert_eq!(DayType::Weekday.kind_code(), 1);
        assert_eq!(DayType::Holiday.kind_code(), 4);
    }

    #[test]
    fn weekend_is_holiday() {
        // 2026-10-17 is a Saturday
        let sat = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let sun = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let mon = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(DayType::for_date(sat), DayType::Holiday);
        assert_eq!(DayType::for_date(sun), DayType::Holiday);
        assert_eq!(DayType::for_date(mon), DayType::Weekday);
    }

    #[test]
    fn parse_names() {
        assert_eq!("weekday".parse::<DayType>().unwrap(), DayType::Weekday);
        assert_eq!("Holidays".parse::<DayType>().unwrap(), DayType::Holiday);
        assert!("sunday".parse::<DayType>().is_err());
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&DayType::Holiday).unwrap(), "\"holiday\"");
    }
}
