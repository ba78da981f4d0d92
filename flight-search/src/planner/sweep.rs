//! One generation of travel extension.
//!
//! A sweep visits flights in arrival order. Each flight may start a new
//! chain (when it leaves a start city), extend a travel from the previous
//! generation, or extend a travel created earlier in the same sweep. Every
//! extension that survives the destination's frontier gets the next id.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::domain::{CityId, Flight, FlightTravel, TravelId};

use super::config::TravelExtendSettings;
use super::control::SearchControl;
use super::extend::{extend_best_travel, start_travel};
use super::frontier::TravelFrontier;
use super::search::SearchError;

/// Frontiers keyed by the city their travels end at.
pub type Frontiers = BTreeMap<CityId, TravelFrontier>;

/// Result of a completed sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepOutput {
    /// Surviving travels per city.
    pub frontiers: Frontiers,
    /// Every travel accepted during the sweep, in creation order. Includes
    /// travels later evicted from a frontier, so chains through them can
    /// still be followed.
    pub created_travels: Vec<FlightTravel>,
}

/// Sort flights by arrival, then departure, then id.
pub fn sort_by_arrival(flights: &mut [Flight]) {
    flights.sort_by(|a, b| {
        a.arrival_time()
            .total_cmp(&b.arrival_time())
            .then(a.start_time.total_cmp(&b.start_time))
            .then(a.id.cmp(&b.id))
    });
}

/// An in-progress sweep, advanced one flight at a time.
///
/// Flights must be stepped in the order produced by [`sort_by_arrival`].
pub struct Sweep<'a> {
    incoming: &'a Frontiers,
    settings: &'a TravelExtendSettings,
    start_cities: &'a BTreeSet<CityId>,
    next_id: TravelId,
    frontiers: Frontiers,
    created: Vec<FlightTravel>,
}

impl<'a> Sweep<'a> {
    /// Start a sweep whose first accepted travel gets `first_id`.
    pub fn new(
        incoming: &'a Frontiers,
        settings: &'a TravelExtendSettings,
        start_cities: &'a BTreeSet<CityId>,
        first_id: TravelId,
    ) -> Self {
        Self {
            incoming,
            settings,
            start_cities,
            next_id: first_id,
            frontiers: Frontiers::new(),
            created: Vec::new(),
        }
    }

    /// Id the next accepted travel will get.
    pub fn next_id(&self) -> TravelId {
        self.next_id
    }

    /// Frontiers built so far.
    pub fn frontiers(&self) -> &Frontiers {
        &self.frontiers
    }

    /// Process one flight. Returns the number of travels accepted.
    pub fn step(&mut self, flight: &Flight) -> Result<usize, SearchError> {
        let settings = self.settings;
        let incoming = self.incoming;
        let mut accepted = 0;

        if self.start_cities.contains(&flight.src) {
            let travel = start_travel(
                flight,
                &settings.flight_start_day_time,
                &settings.flight_duration,
            );
            accepted += usize::from(self.offer(travel)?);
        }

        if let Some(frontier) = incoming.get(&flight.src) {
            let scoring = settings.first_flight_scoring();
            let extended = extend_best_travel(
                frontier.as_slice(),
                flight,
                settings.search_interval,
                settings.min_check_travels,
                &scoring,
            );
            if let Some(travel) = extended {
                accepted += usize::from(self.offer(travel)?);
            }
        }

        let scoring = settings.mid_trip_scoring();
        let extended = self.frontiers.get(&flight.src).and_then(|frontier| {
            extend_best_travel(
                frontier.as_slice(),
                flight,
                settings.search_interval,
                settings.min_check_travels,
                &scoring,
            )
        });
        if let Some(travel) = extended {
            accepted += usize::from(self.offer(travel)?);
        }

        Ok(accepted)
    }

    fn offer(&mut self, mut travel: FlightTravel) -> Result<bool, SearchError> {
        travel.id = self.next_id;
        let frontier = self.frontiers.entry(travel.end_vertex).or_default();
        if !frontier.push(travel, &self.settings.cover_settings)? {
            return Ok(false);
        }
        trace!(
            travel = %travel.id,
            city = %travel.end_vertex,
            flights = travel.flights_count,
            cost = travel.cost,
            "travel accepted"
        );
        self.created.push(travel);
        self.next_id = self.next_id.next();
        Ok(true)
    }

    /// Finish the sweep.
    pub fn finish(self) -> SweepOutput {
        SweepOutput {
            frontiers: self.frontiers,
            created_travels: self.created,
        }
    }
}

/// Run a full sweep over `flights`.
///
/// Chains start at `start_cities` and continue from `incoming`. Ids are
/// taken from `next_id`, which is left pointing past the last one used.
/// `control` is polled before every flight.
pub fn extend_travels(
    incoming: &Frontiers,
    flights: &[Flight],
    settings: &TravelExtendSettings,
    next_id: &mut TravelId,
    start_cities: &BTreeSet<CityId>,
    control: &SearchControl<'_>,
) -> Result<SweepOutput, SearchError> {
    let mut by_arrival = flights.to_vec();
    sort_by_arrival(&mut by_arrival);

    let mut sweep = Sweep::new(incoming, settings, start_cities, *next_id);
    for flight in &by_arrival {
        control.check()?;
        sweep.step(flight)?;
    }
    *next_id = sweep.next_id();

    let output = sweep.finish();
    debug!(
        flights = by_arrival.len(),
        created = output.created_travels.len(),
        cities = output.frontiers.len(),
        "sweep complete"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::DiffCostSettings;
    use crate::domain::FlightId;
    use crate::planner::TravelSearchSettings;
    use std::sync::atomic::AtomicBool;

    const A: CityId = CityId(0);
    const B: CityId = CityId(1);
    const C: CityId = CityId(2);

    fn flight(id: u64, src: CityId, dst: CityId, start: f64, cost: f64) -> Flight {
        Flight::new(FlightId(id), src, dst, start, 0.5, cost)
    }

    fn settings() -> TravelExtendSettings {
        TravelSearchSettings::fare_only().outbound_extend_settings()
    }

    fn run(
        incoming: &Frontiers,
        flights: &[Flight],
        starts: &[CityId],
        next_id: &mut TravelId,
    ) -> SweepOutput {
        let starts: BTreeSet<CityId> = starts.iter().copied().collect();
        extend_travels(
            incoming,
            flights,
            &settings(),
            next_id,
            &starts,
            &SearchControl::new(),
        )
        .unwrap()
    }

    #[test]
    fn start_city_flight_starts_chain() {
        let mut next_id = TravelId(0);
        let out = run(&Frontiers::new(), &[flight(1, A, B, 1.0, 10.0)], &[A], &mut next_id);

        assert_eq!(out.created_travels.len(), 1);
        let travel = out.created_travels[0];
        assert!(travel.is_root());
        assert_eq!(travel.end_vertex, B);
        assert_eq!(travel.cost, 10.0);
        assert_eq!(next_id, TravelId(1));
        assert_eq!(out.frontiers[&B].len(), 1);
    }

    #[test]
    fn chains_within_one_sweep() {
        let mut next_id = TravelId(0);
        // given out of order; the sweep sorts by arrival
        let flights = [flight(2, B, C, 2.0, 5.0), flight(1, A, B, 1.0, 10.0)];
        let out = run(&Frontiers::new(), &flights, &[A], &mut next_id);

        let at_c = out.frontiers[&C].as_slice();
        assert_eq!(at_c.len(), 1);
        assert_eq!(at_c[0].flights_count, 2);
        assert_eq!(at_c[0].last_travel, Some(TravelId(0)));
        assert_eq!(at_c[0].cost, 15.0);
        assert_eq!(next_id, TravelId(2));
    }

    #[test]
    fn extends_incoming_frontier() {
        let mut next_id = TravelId(0);
        let outbound = run(&Frontiers::new(), &[flight(1, A, B, 1.0, 10.0)], &[A], &mut next_id);

        let back = run(&outbound.frontiers, &[flight(2, B, A, 4.0, 20.0)], &[], &mut next_id);
        let home = back.frontiers[&A].as_slice();
        assert_eq!(home.len(), 1);
        assert_eq!(home[0].id, TravelId(1));
        assert_eq!(home[0].last_travel, Some(TravelId(0)));
        assert_eq!(home[0].cost, 30.0);
    }

    #[test]
    fn first_flight_scoring_prices_the_stay() {
        let mut settings = settings();
        settings.first_flight_wait_time = DiffCostSettings::new(2.0, 10.0, 10.0);
        let mut next_id = TravelId(0);
        let outbound = run(&Frontiers::new(), &[flight(1, A, B, 1.0, 10.0)], &[A], &mut next_id);

        // lands at 1.5, leaves at 4.5: one day longer than desired
        let back = extend_travels(
            &outbound.frontiers,
            &[flight(2, B, A, 4.5, 20.0)],
            &settings,
            &mut next_id,
            &BTreeSet::new(),
            &SearchControl::new(),
        )
        .unwrap();
        assert_eq!(back.frontiers[&A].as_slice()[0].cost, 40.0);
    }

    #[test]
    fn unreachable_flight_creates_nothing() {
        let mut next_id = TravelId(5);
        let out = run(&Frontiers::new(), &[flight(1, B, C, 1.0, 10.0)], &[A], &mut next_id);
        assert!(out.created_travels.is_empty());
        assert!(out.frontiers.is_empty());
        assert_eq!(next_id, TravelId(5));
    }

    #[test]
    fn ids_continue_from_counter() {
        let mut next_id = TravelId(10);
        let flights = [flight(1, A, B, 1.0, 10.0), flight(2, A, C, 2.0, 10.0)];
        let out = run(&Frontiers::new(), &flights, &[A], &mut next_id);

        let ids: Vec<TravelId> = out.created_travels.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TravelId(10), TravelId(11)]);
        assert_eq!(next_id, TravelId(12));
    }

    #[test]
    fn step_reports_accepted_count() {
        let settings = settings();
        let incoming = Frontiers::new();
        let starts: BTreeSet<CityId> = [A].into();
        let mut sweep = Sweep::new(&incoming, &settings, &starts, TravelId(0));

        assert_eq!(sweep.step(&flight(1, A, B, 1.0, 10.0)).unwrap(), 1);
        assert_eq!(sweep.step(&flight(2, C, B, 1.0, 10.0)).unwrap(), 0);
        assert_eq!(sweep.frontiers().len(), 1);
        assert_eq!(sweep.next_id(), TravelId(1));
    }

    #[test]
    fn stop_flag_aborts_sweep() {
        let flag = AtomicBool::new(true);
        let control = SearchControl::new().with_stop_flag(&flag);
        let mut next_id = TravelId(0);
        let result = extend_travels(
            &Frontiers::new(),
            &[flight(1, A, B, 1.0, 10.0)],
            &settings(),
            &mut next_id,
            &[A].into(),
            &control,
        );
        assert!(matches!(result, Err(SearchError::Interrupted)));
    }

    #[test]
    fn arrival_order_breaks_ties_by_departure_then_id() {
        let mut flights = vec![
            Flight::new(FlightId(3), A, B, 1.0, 1.0, 1.0),
            Flight::new(FlightId(2), A, B, 1.5, 0.5, 1.0),
            Flight::new(FlightId(1), A, B, 1.0, 1.0, 1.0),
            Flight::new(FlightId(4), A, B, 0.0, 0.5, 1.0),
        ];
        sort_by_arrival(&mut flights);
        let ids: Vec<u64> = flights.iter().map(|f| f.id.0).collect();
        assert_eq!(ids, vec![4, 1, 3, 2]);
    }
}
