//! Round-trip flight itinerary search.
//!
//! Given a home airport, a set of destinations and a list of scheduled
//! flights, finds the cheapest itineraries out and back under a tunable
//! cost model, and serves the search over HTTP.

pub mod cost;
pub mod domain;
pub mod planner;
pub mod store;
pub mod web;
