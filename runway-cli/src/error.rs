use runway_core::{FlightError, LedgerError};
use runway_store::ExportError;
use serde_json::json;

/// Everything that can go wrong while handling one prompt line.
///
/// The ledger reports plain error values; this type owns the wording the
/// user actually sees.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("registration failed: {0}")]
    Registration(#[source] LedgerError),

    #[error("booking failed: {0}")]
    Booking(#[source] LedgerError),

    #[error("cancellation failed: {0}")]
    Cancellation(#[source] LedgerError),

    #[error("flight not found: {0}")]
    FlightNotFound(String),

    #[error("ticket not found: {0}")]
    TicketNotFound(String),

    #[error("no ticket booked in this session")]
    NoCurrentTicket,

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    pub fn title(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "Invalid Input",
            CliError::Registration(_) => "Registration Failed",
            CliError::Booking(_) => "Booking Failed",
            CliError::Cancellation(_) => "Cancellation Failed",
            CliError::FlightNotFound(_) => "Flight Not Found",
            CliError::TicketNotFound(_) | CliError::NoCurrentTicket => "Ticket Information",
            CliError::Export(_) => "Save Failed",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            CliError::Usage(msg) => msg.trim_end().to_string(),
            CliError::Registration(LedgerError::UserIdSpaceExhausted(_)) => {
                "No user IDs are left. Please contact the front desk.".to_string()
            }
            CliError::Registration(err) => err.to_string(),
            CliError::Booking(LedgerError::UserNotFound(_)) => {
                "Invalid User ID. Please register first.".to_string()
            }
            CliError::Booking(LedgerError::InvalidSeatCount) => {
                "Please enter a valid Flight Number, User ID, and No. of Seats.".to_string()
            }
            CliError::Booking(LedgerError::Flight(FlightError::InsufficientSeats {
                requested,
                available,
            })) => format!(
                "Booking failed. Only {available} seats left, {requested} requested."
            ),
            CliError::Booking(_) => {
                "Booking failed. Please check the flight number or available seats.".to_string()
            }
            CliError::Cancellation(_) => {
                "Invalid Flight Number or Ticket Number. Please check and try again.".to_string()
            }
            CliError::FlightNotFound(code) => format!("No flight with number {code}."),
            CliError::TicketNotFound(_) => {
                "Invalid Ticket Number. Please check and try again.".to_string()
            }
            CliError::NoCurrentTicket => {
                "No ticket booked yet. Book a ticket or pass a ticket number.".to_string()
            }
            CliError::Export(err) => err.to_string(),
        }
    }

    pub fn render(&self, as_json: bool) -> String {
        match self {
            CliError::Export(err) => tracing::warn!("Export failed: {}", err),
            other => tracing::debug!("Request rejected: {}", other),
        }

        if as_json {
            json!({
                "error": self.title(),
                "message": self.user_message(),
            })
            .to_string()
        } else {
            format!("{}: {}", self.title(), self.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_messages() {
        let unknown_user = CliError::Booking(LedgerError::UserNotFound("12".into()));
        assert_eq!(
            unknown_user.render(false),
            "Booking Failed: Invalid User ID. Please register first."
        );

        let full = CliError::Booking(LedgerError::Flight(FlightError::InsufficientSeats {
            requested: 5,
            available: 2,
        }));
        assert!(full.user_message().contains("Only 2 seats left"));
    }

    #[test]
    fn test_json_rendering() {
        let err = CliError::TicketNotFound("XYZ-1".into());
        let value: serde_json::Value = serde_json::from_str(&err.render(true)).unwrap();
        assert_eq!(value["error"], "Ticket Information");
        assert_eq!(
            value["message"],
            "Invalid Ticket Number. Please check and try again."
        );
    }
}
