//! Partial itineraries.
//!
//! A `FlightTravel` is one node of the itinerary graph built by the search:
//! the last flight taken, the accumulated cost, and a back-reference to the
//! travel it extends. Following `last_travel` repeatedly walks the chain
//! back to the flight that left the origin.

use serde::{Deserialize, Serialize};

use super::{CityId, FlightId, TravelId};

/// A chain of flights ending at `end_vertex` at `end_time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightTravel {
    pub id: TravelId,
    pub last_flight: FlightId,
    /// Predecessor in the chain; `None` for the first flight of a trip.
    pub last_travel: Option<TravelId>,
    pub flights_count: usize,
    pub end_time: f64,
    pub day_end_time: f64,
    pub cost: f64,
    pub end_vertex: CityId,
}

impl FlightTravel {
    /// Returns true if this travel starts a chain.
    pub fn is_root(&self) -> bool {
        self.last_travel.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn travel(last_travel: Option<TravelId>) -> FlightTravel {
        FlightTravel {
            id: TravelId(4),
            last_flight: FlightId(10),
            last_travel,
            flights_count: 1,
            end_time: 1.5,
            day_end_time: 0.5,
            cost: 12.0,
            end_vertex: CityId(2),
        }
    }

    #[test]
    fn root_has_no_predecessor() {
        assert!(travel(None).is_root());
        assert!(!travel(Some(TravelId(1))).is_root());
    }

    #[test]
    fn root_serializes_predecessor_as_null() {
        let json = serde_json::to_value(travel(None)).unwrap();
        assert!(json["last_travel"].is_null());

        let json = serde_json::to_value(travel(Some(TravelId(1)))).unwrap();
        assert_eq!(json["last_travel"], 1);
    }
}
