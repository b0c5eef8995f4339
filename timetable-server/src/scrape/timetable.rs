//! Timetable page parsing.
//!
//! A timetable page is a table with one row per hour. Each row carries the
//! hour somewhere (ideally a dedicated cell) and a list of minute entries,
//! often decorated with train-type marks: `<li><span class="time">05</span>快</li>`.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::domain::{Departure, sort_departures};

use super::error::ScrapeError;
use super::selectors::{HourStrategy, SelectorChain, is_within, outermost};
use super::text::{element_text, parse_leading_int};

/// Row selectors, most specific first.
const ROW_PATTERNS: [&str; 2] = ["table.tblDiaDetail tr", "tr"];

/// Cell marked as the hour column.
const HOUR_CELL_PATTERN: &str = "td.col-hour, td.hour, th.hour";

/// Fallback hour cell: the first cell of the row.
const FIRST_CELL_PATTERN: &str = "td, th";

/// Minute entry selectors, most specific first.
const MINUTE_PATTERNS: [&str; 3] = ["td.col-min li", "td li", "td span"];

/// Nested element holding just the minute digits.
const MINUTE_TEXT_PATTERN: &str = ".time";

static STANDARD_PLAN: LazyLock<TimetablePlan> = LazyLock::new(|| {
    let hours = vec![
        HourStrategy::dedicated_cell(HOUR_CELL_PATTERN).expect("valid hour selector"),
        HourStrategy::first_cell(FIRST_CELL_PATTERN).expect("valid hour selector"),
    ];
    TimetablePlan::new(ROW_PATTERNS, hours, MINUTE_PATTERNS, MINUTE_TEXT_PATTERN)
        .expect("built-in timetable selectors are valid")
});

/// How to read departures out of a timetable page.
#[derive(Debug, Clone)]
pub struct TimetablePlan {
    rows: SelectorChain,
    hours: Vec<HourStrategy>,
    minutes: SelectorChain,
    minute_text: Selector,
}

impl TimetablePlan {
    /// Build a plan.
    ///
    /// `hours` are tried in order; the first strategy that reads an hour
    /// wins for that row.
    pub fn new<'p>(
        rows: impl IntoIterator<Item = &'p str>,
        hours: Vec<HourStrategy>,
        minutes: impl IntoIterator<Item = &'p str>,
        minute_text: &str,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            rows: SelectorChain::parse(rows)?,
            hours,
            minutes: SelectorChain::parse(minutes)?,
            minute_text: Selector::parse(minute_text).map_err(|e| {
                ScrapeError::InvalidSelector {
                    selector: minute_text.to_string(),
                    message: e.to_string(),
                }
            })?,
        })
    }

    /// The plan used for live pages.
    pub fn standard() -> &'static TimetablePlan {
        &STANDARD_PLAN
    }

    /// Extract every departure on the page, sorted chronologically.
    ///
    /// Rows without a readable hour and entries without a readable minute
    /// are skipped. A page with no timetable yields an empty list.
    pub fn parse(&self, html: &str) -> Vec<Departure> {
        let document = Html::parse_document(html);

        let Some((row_pattern, rows)) = self.rows.select_first(document.root_element(), |_| true)
        else {
            debug!("no table rows found");
            return Vec::new();
        };
        debug!(pattern = row_pattern, rows = rows.len(), "selected timetable rows");

        let mut departures = Vec::new();
        for row in rows {
            departures.extend(self.parse_row(row));
        }

        sort_departures(&mut departures);
        departures
    }

    /// Departures in one row, in page order.
    fn parse_row(&self, row: ElementRef<'_>) -> Vec<Departure> {
        let Some((hour, hour_cell)) = self.hours.iter().find_map(|s| s.extract(row)) else {
            return Vec::new();
        };

        let Some((_, candidates)) = self
            .minutes
            .select_first(row, |el| !is_within(el, &hour_cell))
        else {
            return Vec::new();
        };

        // A minute entry may itself contain elements the pattern matches
        outermost(candidates)
            .into_iter()
            .filter_map(|el| self.minute_of(el))
            .filter_map(|minute| Departure::new(hour, minute).ok())
            .collect()
    }

    fn minute_of(&self, entry: ElementRef<'_>) -> Option<u32> {
        let text = entry
            .select(&self.minute_text)
            .next()
            .map(element_text)
            .unwrap_or_else(|| element_text(entry));
        parse_leading_int(&text)
    }
}

/// Extract departures from a timetable page using the standard plan.
///
/// # Examples
///
/// ```
/// use timetable_server::scrape::parse_departures;
///
/// let html = r#"<table>
///   <tr><td class="col-hour">7</td><td><ul>
///     <li><span class="time">05</span></li>
///     <li><span class="time">23</span></li>
///   </ul></td></tr>
/// </table>"#;
///
/// let deps = parse_departures(html);
/// let times: Vec<String> = deps.iter().map(|d| d.to_string()).collect();
/// assert_eq!(times, ["07:05", "07:23"]);
/// ```
pub fn parse_departures(html: &str) -> Vec<Departure> {
    TimetablePlan::standard().parse(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(deps: &[Departure]) -> Vec<(u32, u32)> {
        deps.iter().map(|d| (d.hour(), d.minute())).collect()
    }

    /// A page in the primary layout.
    const PRIMARY: &str = r#"<html><body>
        <table class="tblDiaDetail">
          <tr><th>時</th><th>平日</th></tr>
          <tr>
            <td class="hour">5</td>
            <td class="col-min"><ul>
              <li><span class="time">12</span><span class="mark">快</span></li>
              <li><span class="time">48</span></li>
            </ul></td>
          </tr>
          <tr>
            <td class="hour">6</td>
            <td class="col-min"><ul>
              <li><span class="time">03</span></li>
              <li><span class="time">30</span></li>
              <li><span class="time">55</span></li>
            </ul></td>
          </tr>
        </table>
        <table class="legend"><tr><td>快 = rapid</td></tr></table>
    </body></html>"#;

    /// The same times in a bare table with no marker classes.
    const FALLBACK: &str = r#"<html><body>
        <table>
          <tr><th>Hour</th><th>Minutes</th></tr>
          <tr><td>5</td><td><span>12</span> <span>48</span></td></tr>
          <tr><td>6</td><td><span>03</span> <span>30</span> <span>55</span></td></tr>
        </table>
    </body></html>"#;

    #[test]
    fn end_to_end_fixture() {
        let html = r#"<table><tr><td class="col-hour">7</td><td><ul><li><span class="time">05</span></li><li><span class="time">23</span></li></ul></td></tr></table>"#;
        assert_eq!(times(&parse_departures(html)), [(7, 5), (7, 23)]);
    }

    #[test]
    fn primary_layout() {
        let deps = parse_departures(PRIMARY);
        assert_eq!(times(&deps), [(5, 12), (5, 48), (6, 3), (6, 30), (6, 55)]);
    }

    #[test]
    fn fallback_layout_matches_primary() {
        assert_eq!(parse_departures(FALLBACK), parse_departures(PRIMARY));
    }

    #[test]
    fn primary_rows_ignore_other_tables() {
        // The legend row would parse as nothing anyway, but the primary
        // selector should not even look at it.
        let html = PRIMARY.replace("快 = rapid", "9 <ul><li>15</li></ul>");
        assert_eq!(parse_departures(&html), parse_departures(PRIMARY));
    }

    #[test]
    fn non_numeric_first_cell_is_skipped() {
        let html = r#"<table>
            <tr><td>Notes</td><td><ul><li>10</li><li>20</li></ul></td></tr>
            <tr><td>8</td><td><ul><li>15</li></ul></td></tr>
        </table>"#;
        assert_eq!(times(&parse_departures(html)), [(8, 15)]);
    }

    #[test]
    fn unparsable_dedicated_cell_falls_back_to_first_cell() {
        let html = r#"<table>
            <tr><th>9時</th><td class="col-hour">--</td><td><ul><li>05</li></ul></td></tr>
        </table>"#;
        assert_eq!(times(&parse_departures(html)), [(9, 5)]);
    }

    #[test]
    fn minute_text_without_time_span() {
        let html = r#"<table>
            <tr><td class="col-hour">10</td><td><ul><li>07b</li><li>x</li><li> 41 </li></ul></td></tr>
        </table>"#;
        assert_eq!(times(&parse_departures(html)), [(10, 7), (10, 41)]);
    }

    #[test]
    fn out_of_range_minutes_are_dropped() {
        let html = r#"<table>
            <tr><td class="col-hour">10</td><td><ul><li>75</li><li>59</li></ul></td></tr>
        </table>"#;
        assert_eq!(times(&parse_departures(html)), [(10, 59)]);
    }

    #[test]
    fn past_midnight_hours_are_kept() {
        let html = r#"<table>
            <tr><td class="col-hour">23</td><td><ul><li>50</li></ul></td></tr>
            <tr><td class="col-hour">24</td><td><ul><li>10</li></ul></td></tr>
            <tr><td class="col-hour">30</td><td><ul><li>00</li></ul></td></tr>
        </table>"#;
        assert_eq!(times(&parse_departures(html)), [(23, 50), (24, 10)]);
    }

    #[test]
    fn output_is_sorted_even_when_rows_are_not() {
        let html = r#"<table>
            <tr><td class="col-hour">8</td><td><ul><li>40</li><li>10</li></ul></td></tr>
            <tr><td class="col-hour">7</td><td><ul><li>59</li></ul></td></tr>
        </table>"#;
        assert_eq!(times(&parse_departures(html)), [(7, 59), (8, 10), (8, 40)]);
    }

    #[test]
    fn hour_cell_spans_are_not_minutes() {
        let html = r#"<table>
            <tr><td class="col-hour"><span>6</span></td><td><span>20</span></td></tr>
        </table>"#;
        assert_eq!(times(&parse_departures(html)), [(6, 20)]);
    }

    #[test]
    fn list_items_preferred_over_spans() {
        let html = r#"<table>
            <tr><td class="col-hour">6</td><td><ul><li><span>20</span></li></ul><span>99</span></td></tr>
        </table>"#;
        assert_eq!(times(&parse_departures(html)), [(6, 20)]);
    }

    #[test]
    fn nested_spans_give_one_departure() {
        let html = r#"<table>
            <tr><td>7</td><td><span><span class="time">05</span>快</span> <span>40</span></td></tr>
        </table>"#;
        assert_eq!(times(&parse_departures(html)), [(7, 5), (7, 40)]);
    }

    #[test]
    fn nested_list_items_give_one_departure() {
        let html = r#"<table>
            <tr><td class="col-hour">8</td><td><ul>
              <li><span class="time">12</span><ul><li>区間快速</li></ul></li>
            </ul></td></tr>
        </table>"#;
        assert_eq!(times(&parse_departures(html)), [(8, 12)]);
    }

    #[test]
    fn hour_strategies_are_tried_in_order() {
        let html = r#"<table>
            <tr><th>9</th><td class="h">10</td><td class="m"><b>15</b></td></tr>
        </table>"#;
        let first_cell_first = vec![
            HourStrategy::first_cell("td, th").unwrap(),
            HourStrategy::dedicated_cell("td.h").unwrap(),
        ];
        let plan = TimetablePlan::new(["tr"], first_cell_first, ["td.m b"], ".t").unwrap();
        assert_eq!(times(&plan.parse(html)), [(9, 15)]);

        let dedicated_first = vec![
            HourStrategy::dedicated_cell("td.h").unwrap(),
            HourStrategy::first_cell("td, th").unwrap(),
        ];
        let plan = TimetablePlan::new(["tr"], dedicated_first, ["td.m b"], ".t").unwrap();
        assert_eq!(times(&plan.parse(html)), [(10, 15)]);
    }

    #[test]
    fn page_without_table_is_empty() {
        assert!(parse_departures("<html><body><p>Service suspended</p></body></html>").is_empty());
        assert!(parse_departures("").is_empty());
    }

    #[test]
    fn parsing_is_deterministic() {
        assert_eq!(parse_departures(PRIMARY), parse_departures(PRIMARY));
    }

    #[test]
    fn custom_plan() {
        let hours = vec![HourStrategy::dedicated_cell("td.h").unwrap()];
        let plan = TimetablePlan::new(["tr.row"], hours, ["td.m b"], ".t").unwrap();
        let html = r#"<table>
            <tr class="row"><td class="h">11</td><td class="m"><b>02</b><b>32</b></td></tr>
            <tr><td class="h">12</td><td class="m"><b>02</b></td></tr>
        </table>"#;
        assert_eq!(times(&plan.parse(html)), [(11, 2), (11, 32)]);
    }
}
