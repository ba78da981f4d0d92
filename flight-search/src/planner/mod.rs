//! Itinerary planner.
//!
//! This module implements the search that answers: "leaving this city at
//! this time, which round trips are worth taking?"
//!
//! Partial itineraries ("travels") are extended flight by flight in arrival
//! order. Each city keeps a frontier of travels where none is both later
//! and sufficiently costlier than another, which keeps the search close to
//! linear in the number of flights.

mod config;
mod control;
mod extend;
mod frontier;
mod itinerary;
mod search;
mod sweep;


pub use config::{MIN_CHECK_TRAVELS, TravelCoverSettings, TravelExtendSettings, TravelSearchSettings};
pub use control::SearchControl;
pub use extend::{
    ExtendScoring, FEASIBLE_COST_LIMIT, INFEASIBLE_COST, extend_best_travel, extend_travel,
    start_travel,
};
pub use frontier::{TravelFrontier, push_travel};
pub use itinerary::{Itinerary, best_round_trip, collect_itineraries, rank_itineraries};
pub use search::{
    SearchError, find_best_single_trip, find_best_single_trip_with_control, normalize_travel_ids,
    select_used_travels,
};
pub use sweep::{Frontiers, Sweep, SweepOutput, extend_travels, sort_by_arrival};
