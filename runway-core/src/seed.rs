use chrono::NaiveDateTime;

use crate::flight::{Flight, FlightCode, Price};
use crate::{LedgerError, LedgerResult};

/// Timestamp layout used by the published schedule, e.g. `2023-05-25 09:00 AM`.
pub const SCHEDULE_TIME_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// One row of the published schedule.
#[derive(Debug, Clone, Copy)]
pub struct FlightSeed {
    pub code: &'static str,
    pub origin: &'static str,
    pub destination: &'static str,
    pub departure: &'static str,
    pub arrival: &'static str,
    pub seats: u32,
    pub price: u32,
}

pub const DEFAULT_CURRENCY: &str = "USD";

pub const DEFAULT_SCHEDULE: &[FlightSeed] = &[
    FlightSeed {
        code: "ABC123",
        origin: "New York",
        destination: "Los Angeles",
        departure: "2023-05-25 09:00 AM",
        arrival: "2023-05-25 12:00 PM",
        seats: 100,
        price: 200,
    },
    FlightSeed {
        code: "DEF456",
        origin: "Chicago",
        destination: "Miami",
        departure: "2023-05-26 08:30 AM",
        arrival: "2023-05-26 11:30 AM",
        seats: 150,
        price: 150,
    },
    FlightSeed {
        code: "GHI789",
        origin: "San Francisco",
        destination: "Seattle",
        departure: "2023-05-27 10:00 AM",
        arrival: "2023-05-27 12:30 PM",
        seats: 120,
        price: 180,
    },
];

impl FlightSeed {
    pub fn to_flight(&self) -> LedgerResult<Flight> {
        let departure = parse_schedule_time(self.code, self.departure)?;
        let arrival = parse_schedule_time(self.code, self.arrival)?;

        Ok(Flight::new(
            FlightCode::new(self.code),
            self.origin,
            self.destination,
            departure,
            arrival,
            self.seats,
            Price::new(self.price, DEFAULT_CURRENCY),
        )?)
    }
}

fn parse_schedule_time(code: &str, raw: &str) -> LedgerResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, SCHEDULE_TIME_FORMAT).map_err(|e| {
        LedgerError::InvalidSchedule(format!("flight {code}: cannot parse '{raw}': {e}"))
    })
}

/// Builds the flights every ledger starts with.
pub fn default_flights() -> LedgerResult<Vec<Flight>> {
    DEFAULT_SCHEDULE.iter().map(FlightSeed::to_flight).collect()
}
