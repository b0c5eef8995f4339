//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, Timelike};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{DayType, Departure, DomainError};
use crate::feed::merged_feed;
use crate::source::{LocatorError, PageSource};
use crate::store::{StationRecord, StoreDocument, StoreError};
use crate::update::{UpdateError, update_all};

use super::dto::*;
use super::state::AppState;

/// Default number of feed entries.
const DEFAULT_FEED_LIMIT: usize = 20;

/// Upper bound on feed entries per request.
const MAX_FEED_LIMIT: usize = 200;

/// Create the application router.
pub fn create_router<S: PageSource + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/timetables/update", post(update_timetables::<S>))
        .route("/api/stations", get(list_stations::<S>))
        .route("/api/stations/:id", get(get_station::<S>))
        .route("/api/feed", get(feed::<S>))
        .route("/api/routes/compare", get(compare_routes::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Run one full update cycle.
///
/// Concurrent triggers queue behind the running cycle.
async fn update_timetables<S: PageSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<UpdateResponse>, AppError> {
    let _guard = state.update_lock.lock().await;
    let summary = update_all(&state.extractor, &state.stations, &state.store).await?;
    Ok(Json(summary.into()))
}

/// The whole published store.
async fn list_stations<S: PageSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<StoreDocument>, AppError> {
    Ok(Json(state.store.load_async().await?))
}

/// One station's published record.
async fn get_station<S: PageSource>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<StationRecord>, AppError> {
    let document = state.store.load_async().await?;
    let record = document
        .stations
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {id}"),
        })?;
    Ok(Json(record))
}

/// Upcoming departures across all stations.
async fn feed<S: PageSource>(
    State(state): State<AppState<S>>,
    Query(req): Query<FeedRequest>,
) -> Result<Json<FeedResponse>, AppError> {
    let now = Local::now();

    let day = match req.day.as_deref() {
        Some(day) => day.parse::<DayType>()?,
        None => DayType::for_date(now.date_naive()),
    };
    let after = match req.after.as_deref() {
        Some(after) => Departure::parse_hhmm(after)?,
        None => Departure::new(now.hour(), now.minute())?,
    };
    let limit = req.limit.unwrap_or(DEFAULT_FEED_LIMIT).min(MAX_FEED_LIMIT);

    let document = state.store.load_async().await?;
    let entries = merged_feed(&document.stations, day, Some(after), limit);

    Ok(Json(FeedResponse {
        day: day.to_string(),
        after: after.to_string(),
        entries,
    }))
}

/// Compare routes from every station to a destination.
async fn compare_routes<S: PageSource>(
    State(state): State<AppState<S>>,
    Query(req): Query<RouteCompareRequest>,
) -> Result<Json<RouteCompareResponse>, AppError> {
    let destination = req.destination.trim();
    if destination.is_empty() {
        return Err(AppError::BadRequest {
            message: "destination must not be empty".to_string(),
        });
    }

    let routes = state.routes.compare(&state.stations, destination).await?;
    Ok(Json(RouteCompareResponse {
        destination: destination.to_string(),
        routes,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<UpdateError> for AppError {
    fn from(e: UpdateError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<LocatorError> for AppError {
    fn from(e: LocatorError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            success: false,
            error: message,
        });
        (status, body).into_response()
    }
}
