pub mod booking;
pub mod flight;
pub mod identity;
pub mod ledger;
pub mod seed;
pub mod user;

pub use booking::{Booking, TicketCode, TicketSummary};
pub use flight::{Flight, FlightCode, FlightError, Price};
pub use identity::{RandomUserIds, SequentialUserIds, UserIdGenerator};
pub use ledger::ReservationLedger;
pub use user::{User, UserDigest, UserId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Flight not found: {0}")]
    FlightNotFound(String),

    #[error("User not registered: {0}")]
    UserNotFound(String),

    #[error("No booking {ticket} on flight {flight}")]
    BookingNotFound { flight: String, ticket: String },

    #[error("Seat count must be at least 1")]
    InvalidSeatCount,

    #[error("All {0} user IDs are in use")]
    UserIdSpaceExhausted(u64),

    #[error("No free user ID found after {0} draws")]
    UserIdDrawsExhausted(usize),

    #[error("Invalid user ID range {min}..={max}")]
    InvalidIdRange { min: u32, max: u32 },

    #[error("Flight {0} is scheduled more than once")]
    DuplicateFlight(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error(transparent)]
    Flight(#[from] FlightError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
