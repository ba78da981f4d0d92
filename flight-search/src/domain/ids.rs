//! Identifier newtypes.
//!
//! Cities, flights and travels are all addressed by integers inside the
//! search. Wrapping them keeps a city index from being passed where a
//! travel index is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense identifier of a city (graph vertex).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(pub u32);

/// Identifier of a scheduled flight, as assigned by the loader.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(pub u64);

/// Index of a travel node in one search's arena.
///
/// Ids are handed out in creation order and never reused within a search,
/// so a predecessor always has a smaller id than its successors.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelId(pub usize);

impl TravelId {
    /// Returns the following id.
    pub fn next(self) -> Self {
        TravelId(self.0 + 1)
    }
}

impl fmt::Debug for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CityId({})", self.0)
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightId({})", self.0)
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TravelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TravelId({})", self.0)
    }
}

impl fmt::Display for TravelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_id_next() {
        assert_eq!(TravelId(0).next(), TravelId(1));
        assert_eq!(TravelId(41).next(), TravelId(42));
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(CityId(3).to_string(), "3");
        assert_eq!(format!("{:?}", CityId(3)), "CityId(3)");
        assert_eq!(FlightId(7).to_string(), "7");
        assert_eq!(format!("{:?}", FlightId(7)), "FlightId(7)");
        assert_eq!(TravelId(2).to_string(), "#2");
        assert_eq!(format!("{:?}", TravelId(2)), "TravelId(2)");
    }

    #[test]
    fn serde_is_transparent() {
        assert_eq!(serde_json::to_string(&CityId(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&TravelId(9)).unwrap(), "9");
        let id: FlightId = serde_json::from_str("123").unwrap();
        assert_eq!(id, FlightId(123));
    }

    #[test]
    fn ordering_follows_inner_value() {
        assert!(TravelId(1) < TravelId(2));
        assert!(CityId(0) < CityId(10));
    }
}
