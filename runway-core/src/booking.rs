use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::flight::{FlightCode, Price};
use crate::user::UserId;

/// Ticket number of the form `<flight>-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketCode(String);

impl TicketCode {
    pub fn issue(flight: &FlightCode, sequence: u64) -> Self {
        Self(format!("{}-{}", flight, sequence))
    }

    /// Wraps user input without validating it; unknown codes simply fail to resolve.
    pub fn parse(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sequence number part, if the code is well formed.
    pub fn sequence(&self) -> Option<u64> {
        self.0.rsplit_once('-').and_then(|(_, n)| n.parse().ok())
    }
}

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub ticket: TicketCode,
    pub flight: FlightCode,
    pub user_id: UserId,
    pub seats: u32,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(ticket: TicketCode, flight: FlightCode, user_id: UserId, seats: u32) -> Self {
        Self {
            ticket,
            flight,
            user_id,
            seats,
            booked_at: Utc::now(),
        }
    }
}

/// Everything needed to show or export a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub user_name: String,
    pub ticket_number: TicketCode,
    pub flight_number: FlightCode,
    pub source: String,
    pub destination: String,
    pub price: Price,
}

impl TicketSummary {
    /// Labeled `(field, value)` pairs in export order.
    pub fn fields(&self) -> [(&'static str, String); 6] {
        [
            ("User Name", self.user_name.clone()),
            ("Ticket Number", self.ticket_number.to_string()),
            ("Flight Number", self.flight_number.to_string()),
            ("Source", self.source.clone()),
            ("Destination", self.destination.clone()),
            ("Price", self.price.to_string()),
        ]
    }

    /// Plain-text form: one `Label: value` line per field, newline terminated.
    pub fn render(&self) -> String {
        self.fields()
            .iter()
            .map(|(label, value)| format!("{label}: {value}\n"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_code_format() {
        let code = TicketCode::issue(&FlightCode::new("DEF456"), 3);
        assert_eq!(code.as_str(), "DEF456-3");
        assert_eq!(code.sequence(), Some(3));
        assert_eq!(TicketCode::parse("garbage").sequence(), None);
    }

    #[test]
    fn test_summary_render_order() {
        let summary = TicketSummary {
            user_name: "Alan".to_string(),
            ticket_number: TicketCode::parse("ABC123-1"),
            flight_number: FlightCode::new("ABC123"),
            source: "New York".to_string(),
            destination: "Los Angeles".to_string(),
            price: Price::new(200, "USD"),
        };

        assert_eq!(
            summary.render(),
            "User Name: Alan\n\
             Ticket Number: ABC123-1\n\
             Flight Number: ABC123\n\
             Source: New York\n\
             Destination: Los Angeles\n\
             Price: 200\n"
        );
    }
}
