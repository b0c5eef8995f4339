//! Text helpers shared by the page parsers.

use scraper::ElementRef;

/// Parse the leading run of ASCII digits in `text`.
///
/// Leading whitespace is ignored; anything after the digits is ignored.
/// Returns `None` when the text does not start with a digit or the number
/// does not fit.
///
/// # Examples
///
/// ```
/// use timetable_server::scrape::parse_leading_int;
///
/// assert_eq!(parse_leading_int("05"), Some(5));
/// assert_eq!(parse_leading_int(" 7時"), Some(7));
/// assert_eq!(parse_leading_int("23快"), Some(23));
/// assert_eq!(parse_leading_int("時"), None);
/// assert_eq!(parse_leading_int(""), None);
/// ```
pub fn parse_leading_int(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    trimmed[..end].parse().ok()
}

/// All text under an element, with whitespace runs collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
