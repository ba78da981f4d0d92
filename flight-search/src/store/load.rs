//! Loading scraped flight records.
//!
//! Records carry wall-clock timestamps. The search works in days relative
//! to a base instant, plus the local time-of-day of departure and arrival
//! for preference scoring, so each record is converted on load.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Flight, FlightId};

use super::{CityRegistry, FlightIndex, StoreError};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Flight numbers occupy the low four decimal digits of an id.
const FLIGHT_NUMBER_LIMIT: u64 = 10_000;

/// Repeated departures of one flight number occupy the low two digits.
const OCCURRENCE_LIMIT: u64 = 100;

/// One scraped flight offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Airline designator, e.g. "W6"
    pub carrier_code: String,
    /// Flight number without the designator, e.g. "1234"
    pub flight_number: String,
    /// Origin airport code
    pub origin: String,
    /// Destination airport code
    pub destination: String,
    pub departure_utc: DateTime<Utc>,
    pub arrival_utc: DateTime<Utc>,
    /// Departure wall-clock time at the origin
    pub departure_local: NaiveDateTime,
    /// Arrival wall-clock time at the destination
    pub arrival_local: NaiveDateTime,
    /// Basic fare; offers without one are skipped
    pub price: Option<f64>,
}

/// Numeric flight id from a designator plus number, e.g. "W6 1234".
///
/// The two-character designator is read in base 36 and the number appended
/// in the low four decimal digits. Numbers of five or more digits are
/// rejected, since they would collide with another designator's ids.
pub fn flight_number_id(code: &str) -> Result<u64, StoreError> {
    let clean: String = code
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    let invalid = || StoreError::InvalidFlightNumber(code.to_string());

    if clean.len() < 3 || !clean.is_ascii() {
        return Err(invalid());
    }
    let (designator, number) = clean.split_at(2);
    let designator = u64::from_str_radix(designator, 36).map_err(|_| invalid())?;
    let number: u64 = number.parse().map_err(|_| invalid())?;
    if number >= FLIGHT_NUMBER_LIMIT {
        return Err(invalid());
    }
    designator
        .checked_mul(FLIGHT_NUMBER_LIMIT)
        .and_then(|id| id.checked_add(number))
        .ok_or_else(invalid)
}

fn days_since(base: DateTime<Utc>, time: DateTime<Utc>) -> f64 {
    (time - base).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
}

fn day_fraction(time: NaiveDateTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / SECONDS_PER_DAY
}

/// Converts records into flights against a fixed base instant.
pub struct FlightLoader<'a> {
    base: DateTime<Utc>,
    cities: &'a mut CityRegistry,
    /// Times each flight number was seen, to keep repeated departures distinct.
    occurrences: HashMap<u64, u64>,
}

impl<'a> FlightLoader<'a> {
    /// Create a loader registering airports in `cities`.
    pub fn new(base: DateTime<Utc>, cities: &'a mut CityRegistry) -> Self {
        Self {
            base,
            cities,
            occurrences: HashMap::new(),
        }
    }

    /// Convert one record. Returns `Ok(None)` for offers without a price.
    pub fn convert(&mut self, record: &FlightRecord) -> Result<Option<Flight>, StoreError> {
        let Some(price) = record.price else {
            return Ok(None);
        };

        let number = flight_number_id(&format!(
            "{}{}",
            record.carrier_code, record.flight_number
        ))?;
        let occurrence = self.occurrences.entry(number).or_default();
        *occurrence += 1;
        if *occurrence >= OCCURRENCE_LIMIT {
            return Err(StoreError::TooManyDepartures {
                number,
                limit: OCCURRENCE_LIMIT - 1,
            });
        }
        let id = number
            .checked_mul(OCCURRENCE_LIMIT)
            .and_then(|id| id.checked_add(*occurrence))
            .map(FlightId)
            .ok_or_else(|| StoreError::InvalidFlightNumber(record.flight_number.clone()))?;

        let src = self.cities.intern(&record.origin);
        let dst = self.cities.intern(&record.destination);
        let start_time = days_since(self.base, record.departure_utc);
        let end_time = days_since(self.base, record.arrival_utc);

        let flight = Flight::new(id, src, dst, start_time, end_time - start_time, price)
            .with_day_times(
                day_fraction(record.departure_local),
                day_fraction(record.arrival_local),
            );
        flight.validate()?;
        Ok(Some(flight))
    }

    /// Convert all records into a sorted index.
    pub fn load_records(&mut self, records: &[FlightRecord]) -> Result<FlightIndex, StoreError> {
        let mut index = FlightIndex::new();
        let mut skipped = 0usize;
        for record in records {
            match self.convert(record)? {
                Some(flight) => index.push_flight(flight),
                None => skipped += 1,
            }
        }
        index.sort_flights();
        debug!(flights = index.len(), skipped, "converted flight records");
        Ok(index)
    }
}

/// Read a JSON array of [`FlightRecord`]s into a sorted index.
pub fn load_flights_file(
    path: &Path,
    base: DateTime<Utc>,
    cities: &mut CityRegistry,
) -> Result<FlightIndex, StoreError> {
    let data = std::fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<FlightRecord> = serde_json::from_slice(&data)?;
    let index = FlightLoader::new(base, cities).load_records(&records)?;
    info!(
        path = %path.display(),
        flights = index.len(),
        cities = cities.len(),
        "loaded flights"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CityId;
    use chrono::TimeZone;
    use std::io::Write;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
    }

    fn record(number: &str, price: Option<f64>) -> FlightRecord {
        FlightRecord {
            carrier_code: "W6".to_string(),
            flight_number: number.to_string(),
            origin: "WAW".to_string(),
            destination: "ALC".to_string(),
            departure_utc: Utc.with_ymd_and_hms(2024, 3, 16, 6, 0, 0).unwrap(),
            arrival_utc: Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap(),
            departure_local: NaiveDateTime::parse_from_str("2024-03-16 07:00", "%Y-%m-%d %H:%M")
                .unwrap(),
            arrival_local: NaiveDateTime::parse_from_str("2024-03-16 13:00", "%Y-%m-%d %H:%M")
                .unwrap(),
            price,
        }
    }

    #[test]
    fn flight_number_parsing() {
        // "W6" in base 36 is 32 * 36 + 6
        assert_eq!(flight_number_id("W6 1234").unwrap(), 1158 * 10_000 + 1234);
        assert_eq!(flight_number_id("fr12").unwrap(), flight_number_id("FR 12").unwrap());
        assert!(flight_number_id("W6").is_err());
        assert!(flight_number_id("W6 12A").is_err());
        assert!(flight_number_id("").is_err());
    }

    #[test]
    fn oversized_flight_numbers_are_rejected() {
        assert!(matches!(
            flight_number_id("W6 18446744073709551615"),
            Err(StoreError::InvalidFlightNumber(_))
        ));
        assert!(matches!(
            flight_number_id("W6 99999999999999999999999"),
            Err(StoreError::InvalidFlightNumber(_))
        ));
        // five digits would alias "W7 2345"
        assert!(flight_number_id("W6 12345").is_err());
        assert_eq!(flight_number_id("ZZ 9999").unwrap(), 1295 * 10_000 + 9999);
    }

    #[test]
    fn oversized_record_fails_load() {
        let mut cities = CityRegistry::new();
        let mut loader = FlightLoader::new(base(), &mut cities);
        let result = loader.load_records(&[record("18446744073709551615", Some(1.0))]);
        assert!(matches!(result, Err(StoreError::InvalidFlightNumber(_))));
    }

    #[test]
    fn too_many_departures_is_an_error() {
        let mut cities = CityRegistry::new();
        let mut loader = FlightLoader::new(base(), &mut cities);
        for _ in 0..99 {
            loader.convert(&record("1234", Some(1.0))).unwrap().unwrap();
        }
        assert!(matches!(
            loader.convert(&record("1234", Some(1.0))),
            Err(StoreError::TooManyDepartures { limit: 99, .. })
        ));
    }

    #[test]
    fn converts_times_to_days() {
        let mut cities = CityRegistry::new();
        let mut loader = FlightLoader::new(base(), &mut cities);
        let flight = loader.convert(&record("1234", Some(49.0))).unwrap().unwrap();

        assert_eq!(flight.src, CityId(0));
        assert_eq!(flight.dst, CityId(1));
        assert_eq!(flight.start_time, 1.25);
        assert_eq!(flight.duration, 0.25);
        assert_eq!(flight.cost, 49.0);
        assert!((flight.day_start_time - 7.0 / 24.0).abs() < 1e-12);
        assert!((flight.day_end_time - 13.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn repeated_numbers_get_distinct_ids() {
        let mut cities = CityRegistry::new();
        let mut loader = FlightLoader::new(base(), &mut cities);
        let a = loader.convert(&record("1234", Some(1.0))).unwrap().unwrap();
        let b = loader.convert(&record("1234", Some(1.0))).unwrap().unwrap();
        assert_eq!(a.id.0 + 1, b.id.0);
        assert_eq!(a.id.0 % 100, 1);
    }

    #[test]
    fn skips_records_without_price() {
        let mut cities = CityRegistry::new();
        let mut loader = FlightLoader::new(base(), &mut cities);
        assert!(loader.convert(&record("1", None)).unwrap().is_none());

        let index = loader
            .load_records(&[record("1", None), record("2", Some(5.0))])
            .unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.is_sorted());
    }

    #[test]
    fn rejects_arrival_before_departure() {
        let mut bad = record("1", Some(1.0));
        bad.arrival_utc = Utc.with_ymd_and_hms(2024, 3, 16, 5, 0, 0).unwrap();
        let mut cities = CityRegistry::new();
        let mut loader = FlightLoader::new(base(), &mut cities);
        assert!(matches!(
            loader.convert(&bad),
            Err(StoreError::InvalidFlight(_))
        ));
    }

    #[test]
    fn loads_json_file() {
        let records = vec![record("1234", Some(49.0)), record("99", Some(10.0))];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&serde_json::to_vec(&records).unwrap())
            .unwrap();

        let mut cities = CityRegistry::new();
        let index = load_flights_file(file.path(), base(), &mut cities).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(cities.get("WAW"), Some(CityId(0)));
        assert_eq!(cities.get("ALC"), Some(CityId(1)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut cities = CityRegistry::new();
        let result = load_flights_file(Path::new("/nonexistent/flights.json"), base(), &mut cities);
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let mut cities = CityRegistry::new();
        let result = load_flights_file(file.path(), base(), &mut cities);
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}
