//! Positional flight graph.
//!
//! Flights are stored as edges sorted by `(src, dst)`, keeping insertion
//! order within a city pair. Every flight leaving a city, or every flight
//! between two cities, is then a contiguous range of positions.

use std::ops::Range;

use crate::domain::{CityId, Flight};

/// Flights addressable by position, grouped by endpoints.
#[derive(Debug, Clone, Default)]
pub struct FlightGraph {
    edges: Vec<Flight>,
}

impl FlightGraph {
    /// Build a graph from flights in any order.
    pub fn from_flights(mut flights: Vec<Flight>) -> Self {
        // stable: insertion order survives within a city pair
        flights.sort_by_key(|f| (f.src, f.dst));
        Self { edges: flights }
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph holds no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The flight at `pos`, if in bounds.
    pub fn edge(&self, pos: usize) -> Option<&Flight> {
        self.edges.get(pos)
    }

    /// Flights in a position range returned by one of the lookups.
    pub fn edges(&self, range: Range<usize>) -> &[Flight] {
        &self.edges[range]
    }

    /// Positions of every flight departing `vertex`, or `None` if there are none.
    pub fn vertex_edges(&self, vertex: CityId) -> Option<Range<usize>> {
        let begin = self.edges.partition_point(|f| f.src < vertex);
        let end = self.edges.partition_point(|f| f.src <= vertex);
        (begin < end).then_some(begin..end)
    }

    /// Positions of every flight from `src` to `dst`, or `None` if there are none.
    pub fn edges_between(&self, src: CityId, dst: CityId) -> Option<Range<usize>> {
        let begin = self.edges.partition_point(|f| (f.src, f.dst) < (src, dst));
        let end = self.edges.partition_point(|f| (f.src, f.dst) <= (src, dst));
        (begin < end).then_some(begin..end)
    }
}
