//! Web layer for the itinerary planner.
//!
//! Provides HTTP endpoints for searching round trips over the loaded flights.

mod config;
mod dto;
mod routes;
mod state;

pub use config::{
    ConfigError, DEFAULT_BIND_ADDR, DEFAULT_SEARCH_TIMEOUT_SECS, ServerConfig, load_search_settings,
};
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
