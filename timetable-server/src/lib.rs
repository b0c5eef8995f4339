//! Train timetable publishing server.
//!
//! Scrapes departure timetables for a handful of stations from an upstream
//! transit site, publishes them as a JSON store, and serves a merged
//! departure feed and route comparisons over HTTP.

pub mod cache;
pub mod config;
pub mod domain;
pub mod extractor;
pub mod feed;
pub mod routes;
pub mod scrape;
pub mod source;
pub mod store;
pub mod update;
pub mod web;

#[cfg(test)]
mod testing;
