//! Web layer for the timetable service.
//!
//! Provides the update trigger plus read endpoints over the published
//! timetables and the route comparison lookup.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
