use std::error::Error;

use chrono::Utc;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use flight_search::store::{CityRegistry, load_flights_file};
use flight_search::web::{AppState, ServerConfig, create_router};

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter = EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logger();

    let config = ServerConfig::from_env()?;
    let settings = config.search_settings()?;

    let mut cities = CityRegistry::new();
    let flights = load_flights_file(&config.flights_path, Utc::now(), &mut cities)?;

    let state = AppState::new(flights, cities, settings, config.search_timeout);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "flight search listening");
    info!("  GET  /health       - Health check");
    info!("  POST /trip/search  - Search round trips");

    axum::serve(listener, app).await?;
    Ok(())
}
