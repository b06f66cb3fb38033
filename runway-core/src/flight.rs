use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flight number as printed on the ticket, e.g. `ABC123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightCode(String);

impl FlightCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: u32,
    pub currency: String,
}

impl Price {
    pub fn new(amount: u32, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount)
    }
}

/// A scheduled flight together with its live seat inventory.
/// Only built through `Flight::new`, which keeps `available_seats <= capacity`.
#[derive(Debug, Clone, Serialize)]
pub struct Flight {
    code: FlightCode,
    pub origin: String,
    pub destination: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    capacity: u32,
    available_seats: u32,
    pub price: Price,
}

impl Flight {
    pub fn new(
        code: FlightCode,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure: NaiveDateTime,
        arrival: NaiveDateTime,
        capacity: u32,
        price: Price,
    ) -> Result<Self, FlightError> {
        if arrival < departure {
            return Err(FlightError::InvalidSchedule {
                code: code.to_string(),
            });
        }

        Ok(Self {
            code,
            origin: origin.into(),
            destination: destination.into(),
            departure,
            arrival,
            capacity,
            available_seats: capacity,
            price,
        })
    }

    pub fn code(&self) -> &FlightCode {
        &self.code
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn available_seats(&self) -> u32 {
        self.available_seats
    }

    pub fn booked_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.available_seats)
    }

    /// Take `seats` out of the remaining pool.
    pub fn reserve_seats(&mut self, seats: u32) -> Result<(), FlightError> {
        if seats > self.available_seats {
            return Err(FlightError::InsufficientSeats {
                requested: seats,
                available: self.available_seats,
            });
        }

        self.available_seats -= seats;
        Ok(())
    }

    /// Return `seats` to the remaining pool.
    pub fn release_seats(&mut self, seats: u32) -> Result<(), FlightError> {
        let restored = self
            .available_seats
            .checked_add(seats)
            .filter(|total| *total <= self.capacity)
            .ok_or(FlightError::CapacityExceeded {
                released: seats,
                booked: self.booked_seats(),
            })?;

        self.available_seats = restored;
        Ok(())
    }

    /// Share of capacity currently booked, 0.0 to 1.0.
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.booked_seats() as f64 / self.capacity as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlightError {
    #[error("Arrival precedes departure for flight {code}")]
    InvalidSchedule { code: String },

    #[error("Insufficient seats: requested {requested}, available {available}")]
    InsufficientSeats { requested: u32, available: u32 },

    #[error("Cannot release {released} seats: only {booked} booked")]
    CapacityExceeded { released: u32, booked: u32 },
}
