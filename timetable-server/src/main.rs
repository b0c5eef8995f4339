use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use timetable_server::cache::{CacheConfig, RouteCache};
use timetable_server::config::AppConfig;
use timetable_server::extractor::TimetableExtractor;
use timetable_server::routes::RouteLookup;
use timetable_server::domain::StationConfig;
use timetable_server::source::{
    FixturePageSource, HttpPageSource, HttpSourceConfig, PageSource, SourceLocator,
};
use timetable_server::store::{JsonStore, StoreDocument};
use timetable_server::update::update_all;
use timetable_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let update_once = std::env::args().skip(1).any(|a| a == "--update-once");

    let config = AppConfig::from_env()?;
    let stations = config.load_stations()?;
    info!(count = stations.len(), "loaded station table");

    // First deployment: start from empty records so the first cycle can fill them
    let store = JsonStore::new(&config.store_path);
    if store.ensure_exists(&StoreDocument::seeded(&stations))? {
        warn!(path = %store.path().display(), "store not found, created an empty one");
    }

    if let Some(path) = &config.fixtures_path {
        warn!(path = %path.display(), "serving upstream pages from fixtures");
        let source = FixturePageSource::from_json_file(path)?;
        return start(&config, stations, store, source, update_once).await;
    }

    let mut source_config = HttpSourceConfig::new().with_timeout(config.timeout_secs);
    if let Some(agent) = &config.user_agent {
        source_config = source_config.with_user_agent(agent);
    }
    let source = HttpPageSource::new(source_config)?;
    start(&config, stations, store, source, update_once).await
}

/// Run one update cycle, or serve until shut down.
async fn start<S: PageSource + Clone + 'static>(
    config: &AppConfig,
    stations: Vec<StationConfig>,
    store: JsonStore,
    source: S,
    update_once: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let locator = SourceLocator::new(&config.transit_base_url)?;
    let extractor = TimetableExtractor::new(source.clone(), locator);

    if update_once {
        let summary = update_all(&extractor, &stations, &store).await?;
        info!("{}", summary.message());
        return Ok(());
    }

    let routes = RouteLookup::new(
        source,
        config.route_search_base_url.clone(),
        RouteCache::new(&CacheConfig::default()),
    );
    let state = AppState::new(extractor, routes, stations, store);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Timetable server listening on http://{}", config.bind_addr);
    info!("  GET  /health                 - Health check");
    info!("  POST /api/timetables/update  - Scrape and publish timetables");
    info!("  GET  /api/stations           - Published timetables");
    info!("  GET  /api/feed               - Merged upcoming departures");
    info!("  GET  /api/routes/compare     - Compare routes to a destination");

    axum::serve(listener, app).await?;
    Ok(())
}
