//! Data transfer objects for web requests and responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CityId, FlightTravel};
use crate::planner::Itinerary;
use crate::store::CityRegistry;

/// Request to search for round trips.
///
/// Times are in days since the flight data was loaded.
#[derive(Debug, Deserialize)]
pub struct TripSearchRequest {
    /// Home airport code
    pub origin: String,

    /// Airport codes the trip may visit
    pub destinations: Vec<String>,

    /// Earliest arrival of a flight considered (defaults to `start_time`)
    pub window_start: Option<f64>,

    /// Latest arrival of a flight considered (defaults to no limit)
    pub window_end: Option<f64>,

    /// Earliest departure from home (defaults to 0)
    pub start_time: Option<f64>,

    /// Extra cost of ending the outbound leg at an airport
    #[serde(default)]
    pub city_costs: HashMap<String, f64>,
}

/// One node of the itinerary graph.
#[derive(Debug, Serialize)]
pub struct TravelResult {
    /// Position in the graph
    pub id: usize,

    /// Predecessor, absent for the first flight
    pub last_travel: Option<usize>,

    /// Flight taken to reach this node
    pub flight: u64,

    pub flights_count: usize,
    pub end_time: f64,
    pub day_end_time: f64,
    pub cost: f64,

    /// Airport code where the travel ends
    pub end_city: String,
}

/// A complete itinerary.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub cost: f64,
    pub arrival_time: f64,

    /// Airport code of the final arrival
    pub end_city: String,

    /// Flight ids, in travel order
    pub flights: Vec<u64>,

    /// Whether the itinerary returns home
    pub round_trip: bool,
}

/// Response from a trip search.
#[derive(Debug, Serialize)]
pub struct TripSearchResponse {
    /// Number of flights searched
    pub flights_considered: usize,

    /// The itinerary graph, predecessors first
    pub travels: Vec<TravelResult>,

    /// Every itinerary in the graph, best first
    pub itineraries: Vec<ItineraryResult>,

    /// Cheapest itinerary back home, if any
    pub best_round_trip: Option<ItineraryResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

fn city_code(cities: &CityRegistry, id: CityId) -> String {
    cities
        .code(id)
        .map(str::to_string)
        .unwrap_or_else(|| id.to_string())
}

impl TravelResult {
    /// Create from a search travel.
    pub fn from_travel(travel: &FlightTravel, cities: &CityRegistry) -> Self {
        Self {
            id: travel.id.0,
            last_travel: travel.last_travel.map(|t| t.0),
            flight: travel.last_flight.0,
            flights_count: travel.flights_count,
            end_time: travel.end_time,
            day_end_time: travel.day_end_time,
            cost: travel.cost,
            end_city: city_code(cities, travel.end_vertex),
        }
    }
}

impl ItineraryResult {
    /// Create from a reconstructed itinerary.
    pub fn from_itinerary(itinerary: &Itinerary, cities: &CityRegistry, origin: CityId) -> Self {
        Self {
            cost: itinerary.cost(),
            arrival_time: itinerary.arrival_time(),
            end_city: itinerary
                .end_city()
                .map(|c| city_code(cities, c))
                .unwrap_or_default(),
            flights: itinerary.flights().iter().map(|f| f.0).collect(),
            round_trip: itinerary.is_round_trip(origin),
        }
    }
}
