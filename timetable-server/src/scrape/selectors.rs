//! Ordered selector fallbacks.

use scraper::{ElementRef, Selector};

use crate::domain::MAX_HOUR;

use super::error::ScrapeError;
use super::text::{element_text, parse_leading_int};

fn parse_selector(pattern: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(pattern).map_err(|e| ScrapeError::InvalidSelector {
        selector: pattern.to_string(),
        message: e.to_string(),
    })
}

/// An ordered list of CSS selectors tried one after another.
///
/// Only the first selector that yields elements is used; later selectors
/// are never mixed in.
#[derive(Debug, Clone)]
pub struct SelectorChain {
    patterns: Vec<String>,
    selectors: Vec<Selector>,
}

impl SelectorChain {
    /// Parse every pattern, in priority order.
    pub fn parse<'p>(patterns: impl IntoIterator<Item = &'p str>) -> Result<Self, ScrapeError> {
        let mut chain = Self {
            patterns: Vec::new(),
            selectors: Vec::new(),
        };
        for pattern in patterns {
            chain.selectors.push(parse_selector(pattern)?);
            chain.patterns.push(pattern.to_string());
        }
        Ok(chain)
    }

    /// Elements matched by the first selector that matches anything under
    /// `scope` and passes `keep`.
    ///
    /// Returns the selector's pattern alongside the elements, or `None` when
    /// every selector comes up empty.
    pub fn select_first<'a>(
        &self,
        scope: ElementRef<'a>,
        keep: impl Fn(&ElementRef<'a>) -> bool,
    ) -> Option<(&str, Vec<ElementRef<'a>>)> {
        self.patterns
            .iter()
            .zip(&self.selectors)
            .find_map(|(pattern, selector)| {
                let found: Vec<_> = scope.select(selector).filter(|el| keep(el)).collect();
                (!found.is_empty()).then_some((pattern.as_str(), found))
            })
    }

    /// First value `f` produces, trying each selector's matches in order.
    ///
    /// Unlike [`select_first`](Self::select_first), a selector that matches
    /// but yields nothing through `f` falls through to the next one.
    pub fn find_map<'a, T>(
        &self,
        scope: ElementRef<'a>,
        mut f: impl FnMut(ElementRef<'a>) -> Option<T>,
    ) -> Option<T> {
        self.selectors
            .iter()
            .find_map(|selector| scope.select(selector).find_map(&mut f))
    }
}

/// One way of reading a row's hour.
#[derive(Debug, Clone)]
pub enum HourStrategy {
    /// A cell marked as the hour column
    DedicatedCell(Selector),
    /// Whatever cell comes first in the row
    FirstCell(Selector),
}

impl HourStrategy {
    pub fn dedicated_cell(pattern: &str) -> Result<Self, ScrapeError> {
        parse_selector(pattern).map(HourStrategy::DedicatedCell)
    }

    pub fn first_cell(pattern: &str) -> Result<Self, ScrapeError> {
        parse_selector(pattern).map(HourStrategy::FirstCell)
    }

    /// The hour and the cell it was read from, if this strategy applies.
    ///
    /// Hours past the end of the service day count as unparsable.
    pub fn extract<'a>(&self, row: ElementRef<'a>) -> Option<(u32, ElementRef<'a>)> {
        let selector = match self {
            HourStrategy::DedicatedCell(s) | HourStrategy::FirstCell(s) => s,
        };
        let cell = row.select(selector).next()?;
        let hour = parse_leading_int(&element_text(cell)).filter(|h| *h <= MAX_HOUR)?;
        Some((hour, cell))
    }
}

/// Whether `element` is `container` or sits somewhere inside it.
pub(crate) fn is_within(element: &ElementRef<'_>, container: &ElementRef<'_>) -> bool {
    element.id() == container.id() || element.ancestors().any(|a| a.id() == container.id())
}

/// Drop every element that sits inside another element of `elements`.
///
/// Order of the remaining elements is preserved.
pub(crate) fn outermost<'a>(elements: Vec<ElementRef<'a>>) -> Vec<ElementRef<'a>> {
    elements
        .iter()
        .filter(|el| {
            !elements
                .iter()
                .any(|other| other.id() != el.id() && is_within(el, other))
        })
        .copied()
        .collect()
}
