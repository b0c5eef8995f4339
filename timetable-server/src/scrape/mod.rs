//! HTML extraction for upstream transit pages.
//!
//! Everything here is pure: it takes markup and returns values, with no
//! network or storage access, so it can be tested against saved pages.
//!
//! Upstream markup is not under our control and drifts. Each extraction is
//! an ordered chain of strategies (primary selector first, broader
//! fallbacks after) and the first one that produces something wins.

mod error;
mod route;
mod selectors;
mod text;
mod timetable;

pub use error::ScrapeError;
pub use route::{RoutePlan, RouteSummary, parse_route_summary};
pub use selectors::{HourStrategy, SelectorChain};
pub use text::{element_text, parse_leading_int};
pub use timetable::{TimetablePlan, parse_departures};
