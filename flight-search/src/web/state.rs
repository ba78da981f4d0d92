//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::planner::TravelSearchSettings;
use crate::store::{CityRegistry, FlightIndex};

/// Shared application state.
///
/// The flight data is loaded once at startup and read by every request.
#[derive(Clone)]
pub struct AppState {
    /// Sorted flights available for search
    pub flights: Arc<FlightIndex>,

    /// Airport codes of the loaded flights
    pub cities: Arc<CityRegistry>,

    /// Search configuration
    pub settings: Arc<TravelSearchSettings>,

    /// Time allowed for one search
    pub search_timeout: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        flights: FlightIndex,
        cities: CityRegistry,
        settings: TravelSearchSettings,
        search_timeout: Duration,
    ) -> Self {
        Self {
            flights: Arc::new(flights),
            cities: Arc::new(cities),
            settings: Arc::new(settings),
            search_timeout,
        }
    }
}
