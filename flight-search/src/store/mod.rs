//! Flight storage and lookup.
//!
//! The search itself only consumes materialized flight lists. This module
//! holds the sorted containers that produce them and the loader that fills
//! them from scraped records.

mod cities;
mod error;
mod graph;
mod index;
mod load;

pub use cities::CityRegistry;
pub use error::StoreError;
pub use graph::FlightGraph;
pub use index::FlightIndex;
pub use load::{FlightLoader, FlightRecord, flight_number_id, load_flights_file};
