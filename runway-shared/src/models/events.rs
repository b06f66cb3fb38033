use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pii::Masked;

/// A journal entry for one successful ledger mutation.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LedgerEvent {
    pub event_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub kind: LedgerEventKind,
}

impl LedgerEvent {
    pub fn new(kind: LedgerEventKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            kind,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEventKind {
    UserRegistered {
        user_id: String,
        name: Masked<String>,
    },
    SeatsBooked {
        flight_code: String,
        ticket_code: String,
        user_id: String,
        seats: u32,
        seats_remaining: u32,
    },
    BookingCancelled {
        flight_code: String,
        ticket_code: String,
        seats_released: u32,
        seats_remaining: u32,
    },
}

impl LedgerEventKind {
    pub fn label(&self) -> &'static str {
        match self {
            LedgerEventKind::UserRegistered { .. } => "USER_REGISTERED",
            LedgerEventKind::SeatsBooked { .. } => "SEATS_BOOKED",
            LedgerEventKind::BookingCancelled { .. } => "BOOKING_CANCELLED",
        }
    }
}
