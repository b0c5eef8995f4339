//! Route-search result page parsing.
//!
//! Each summary field is read from its own primary selector, then from
//! broad class-substring selectors, then by regex over the whole page text.
//! Whatever cannot be found stays `None`.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use super::error::ScrapeError;
use super::selectors::SelectorChain;
use super::text::{element_text, parse_leading_int};

static DURATION_HM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*時間\s*(\d+)\s*分").expect("valid regex"));
static DURATION_H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*時間").expect("valid regex"));
static DURATION_M: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:分|min\b|mins\b|minutes?\b)").expect("valid regex"));
static FARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:([\d,]+)\s*円)|(?:[¥￥]\s*([\d,]+))").expect("valid regex"));
static TRANSFERS_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:乗換[：:]?\s*(\d+)\s*回)|(?:(\d+)\s*transfers?\b)").expect("valid regex")
});
static TRANSFERS_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*回").expect("valid regex"));

static STANDARD_PLAN: LazyLock<RoutePlan> = LazyLock::new(|| {
    RoutePlan::new(
        [".route-summary .total-time", ".time-total", "[class*=time]"],
        [".route-summary .fare", ".fare-total", "[class*=fare]"],
        [".route-summary .transfer", "[class*=transfer]"],
        [".route-detail li", ".route-steps li", "ol li"],
    )
    .expect("built-in route selectors are valid")
});

/// What a route search found.
///
/// All fields are optional: the page may not say, or may have changed
/// beyond recognition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub total_minutes: Option<u32>,
    pub fare_yen: Option<u32>,
    pub transfers: Option<u32>,
    pub steps: Vec<String>,
}

impl RouteSummary {
    /// Whether the headline figure (total time) was found.
    pub fn is_complete(&self) -> bool {
        self.total_minutes.is_some()
    }
}

/// Selector chains for each route summary field.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    total_time: SelectorChain,
    fare: SelectorChain,
    transfers: SelectorChain,
    steps: SelectorChain,
}

impl RoutePlan {
    pub fn new<'p>(
        total_time: impl IntoIterator<Item = &'p str>,
        fare: impl IntoIterator<Item = &'p str>,
        transfers: impl IntoIterator<Item = &'p str>,
        steps: impl IntoIterator<Item = &'p str>,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            total_time: SelectorChain::parse(total_time)?,
            fare: SelectorChain::parse(fare)?,
            transfers: SelectorChain::parse(transfers)?,
            steps: SelectorChain::parse(steps)?,
        })
    }

    /// The plan used for live pages.
    pub fn standard() -> &'static RoutePlan {
        &STANDARD_PLAN
    }

    pub fn parse(&self, html: &str) -> RouteSummary {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let page_text = element_text(root);

        let total_minutes = self
            .total_time
            .find_map(root, |el| parse_duration(&element_text(el)))
            .or_else(|| parse_duration(&page_text));

        let fare_yen = self
            .fare
            .find_map(root, |el| parse_fare(&element_text(el)))
            .or_else(|| parse_fare(&page_text));

        let transfers = self
            .transfers
            .find_map(root, |el| parse_transfer_cell(&element_text(el)))
            .or_else(|| parse_transfers(&page_text));

        let steps = self
            .steps
            .select_first(root, |el| !element_text(*el).is_empty())
            .map(|(_, items)| step_texts(items))
            .unwrap_or_default();

        RouteSummary {
            total_minutes,
            fare_yen,
            transfers,
            steps,
        }
    }
}

/// Parse a route-search result page using the standard plan.
pub fn parse_route_summary(html: &str) -> RouteSummary {
    RoutePlan::standard().parse(html)
}

fn capture_u32(caps: &regex::Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().replace(',', "").parse().ok()
}

/// Total minutes from "1時間5分", "45分" or "45 min".
///
/// Totals that don't fit in a `u32` are unparsable.
fn parse_duration(text: &str) -> Option<u32> {
    if let Some(caps) = DURATION_HM.captures(text) {
        return capture_u32(&caps, 1)?
            .checked_mul(60)?
            .checked_add(capture_u32(&caps, 2)?);
    }
    if let Some(caps) = DURATION_H.captures(text) {
        return capture_u32(&caps, 1)?.checked_mul(60);
    }
    DURATION_M
        .captures(text)
        .and_then(|caps| capture_u32(&caps, 1))
}

/// Fare from "1,234円" or "¥1,234".
fn parse_fare(text: &str) -> Option<u32> {
    let caps = FARE.captures(text)?;
    capture_u32(&caps, 1).or_else(|| capture_u32(&caps, 2))
}

/// Transfer count from page text, which needs a label to be trusted.
fn parse_transfers(text: &str) -> Option<u32> {
    let caps = TRANSFERS_LABELLED.captures(text)?;
    capture_u32(&caps, 1).or_else(|| capture_u32(&caps, 2))
}

/// Transfer count from a cell already known to be about transfers.
fn parse_transfer_cell(text: &str) -> Option<u32> {
    parse_transfers(text)
        .or_else(|| {
            TRANSFERS_BARE
                .captures(text)
                .and_then(|caps| capture_u32(&caps, 1))
        })
        .or_else(|| parse_leading_int(text))
}

/// Non-blank texts of step list entries.
fn step_texts<'a>(items: impl IntoIterator<Item = ElementRef<'a>>) -> Vec<String> {
    items
        .into_iter()
        .map(element_text)
        .filter(|s| !s.is_empty())
        .collect()
}
