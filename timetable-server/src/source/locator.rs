//! Page locators for upstream timetables.

use reqwest::Url;

use crate::domain::DayType;

use super::error::LocatorError;

/// Builds the URL of a timetable page.
///
/// Locators have the form
/// `<base>/timetable/<external station id>/<external direction id>?kind=<code>`.
#[derive(Debug, Clone)]
pub struct SourceLocator {
    base: String,
}

impl SourceLocator {
    /// Create a locator rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, LocatorError> {
        let base = base_url.trim_end_matches('/').to_string();
        Url::parse(&base).map_err(|e| LocatorError::InvalidBase {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { base })
    }

    /// URL of one station/direction/day-type timetable.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_server::domain::DayType;
    /// use timetable_server::source::SourceLocator;
    ///
    /// let locator = SourceLocator::new("https://transit.example.jp/").unwrap();
    /// let url = locator.timetable_url("22449", "1", DayType::Holiday).unwrap();
    /// assert_eq!(url.as_str(), "https://transit.example.jp/timetable/22449/1?kind=4");
    /// ```
    pub fn timetable_url(
        &self,
        external_station_id: &str,
        external_direction_id: &str,
        day: DayType,
    ) -> Result<Url, LocatorError> {
        let station = checked_segment("external station id", external_station_id)?;
        let direction = checked_segment("external direction id", external_direction_id)?;

        let mut url = Url::parse(&format!("{}/timetable/{}/{}", self.base, station, direction))
            .map_err(|e| LocatorError::InvalidBase {
                url: self.base.clone(),
                message: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("kind", &day.kind_code().to_string());
        Ok(url)
    }
}

fn checked_segment<'a>(field: &'static str, value: &'a str) -> Result<&'a str, LocatorError> {
    let value_trimmed = value.trim();
    if value_trimmed.is_empty() || value_trimmed.contains(['/', '?', '#']) {
        return Err(LocatorError::InvalidSegment {
            field,
            value: value.to_string(),
        });
    }
    Ok(value_trimmed)
}
