//! Route-search URL generation.

use reqwest::Url;

use crate::source::LocatorError;

/// Generate the route-search URL for a trip from `from` to `to`.
///
/// Station names go into the query string and are percent-encoded.
///
/// # Example
///
/// ```
/// use timetable_server::routes::route_search_url;
///
/// let url = route_search_url("https://transit.example.jp", "吉祥寺", "東京").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://transit.example.jp/search?from=%E5%90%89%E7%A5%A5%E5%AF%BA&to=%E6%9D%B1%E4%BA%AC"
/// );
/// ```
pub fn route_search_url(base_url: &str, from: &str, to: &str) -> Result<Url, LocatorError> {
    let base = base_url.trim_end_matches('/');
    let mut url = Url::parse(&format!("{base}/search")).map_err(|e| LocatorError::InvalidBase {
        url: base_url.to_string(),
        message: e.to_string(),
    })?;
    url.query_pairs_mut()
        .append_pair("from", from)
        .append_pair("to", to);
    Ok(url)
}
