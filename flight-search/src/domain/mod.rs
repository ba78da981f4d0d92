//! Domain types for the flight itinerary search.
//!
//! Flights are the immutable input of a search; travels are the nodes of
//! the itinerary graph it produces. Identifiers are newtypes so that the
//! three integer spaces cannot be mixed up.

mod error;
mod flight;
mod ids;
mod travel;

pub use error::DomainError;
pub use flight::Flight;
pub use ids::{CityId, FlightId, TravelId};
pub use travel::FlightTravel;
