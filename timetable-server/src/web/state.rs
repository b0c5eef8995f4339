//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::StationConfig;
use crate::extractor::TimetableExtractor;
use crate::routes::RouteLookup;
use crate::store::JsonStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<S> {
    /// Timetable extractor
    pub extractor: Arc<TimetableExtractor<S>>,

    /// Route comparison lookup
    pub routes: Arc<RouteLookup<S>>,

    /// Station table
    pub stations: Arc<Vec<StationConfig>>,

    /// Published timetables
    pub store: Arc<JsonStore>,

    /// Held for the duration of an update cycle; the store has one writer
    pub update_lock: Arc<Mutex<()>>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(
        extractor: TimetableExtractor<S>,
        routes: RouteLookup<S>,
        stations: Vec<StationConfig>,
        store: JsonStore,
    ) -> Self {
        Self {
            extractor: Arc::new(extractor),
            routes: Arc::new(routes),
            stations: Arc::new(stations),
            store: Arc::new(store),
            update_lock: Arc::new(Mutex::new(())),
        }
    }
}

// Manual impl: cloning the state must not require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            extractor: self.extractor.clone(),
            routes: self.routes.clone(),
            stations: self.stations.clone(),
            store: self.store.clone(),
            update_lock: self.update_lock.clone(),
        }
    }
}
