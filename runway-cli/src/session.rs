use std::fmt::Write as _;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use runway_core::seed::SCHEDULE_TIME_FORMAT;
use runway_core::{Flight, FlightCode, ReservationLedger, TicketCode, TicketSummary, UserId};
use runway_shared::LedgerEventKind;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::commands::{split_words, ReplCommand, ReplLine};
use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub export_path: PathBuf,
    pub json: bool,
}

/// Result of handling one prompt line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// The desk a single clerk works at: one ledger plus the ticket most
/// recently booked from this prompt.
pub struct Session {
    ledger: ReservationLedger,
    current_ticket: Option<TicketCode>,
    options: SessionOptions,
}

impl Session {
    pub fn new(ledger: ReservationLedger, options: SessionOptions) -> Self {
        Self {
            ledger,
            current_ticket: None,
            options,
        }
    }

    pub fn ledger(&self) -> &ReservationLedger {
        &self.ledger
    }

    pub fn json(&self) -> bool {
        self.options.json
    }

    pub fn current_ticket(&self) -> Option<&TicketCode> {
        self.current_ticket.as_ref()
    }

    pub fn execute(&mut self, line: &str) -> Outcome {
        let words = match split_words(line) {
            Ok(words) => words,
            Err(err) => return Outcome::Continue(err.render(self.options.json)),
        };
        if words.is_empty() {
            return Outcome::Continue(String::new());
        }

        let command = match ReplLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                return Outcome::Continue(err.to_string().trim_end().to_string());
            }
            Err(err) => {
                return Outcome::Continue(CliError::Usage(err.to_string()).render(self.options.json));
            }
        };

        if matches!(command, ReplCommand::Quit) {
            return Outcome::Quit;
        }

        match self.dispatch(command) {
            Ok(reply) => Outcome::Continue(reply),
            Err(err) => Outcome::Continue(err.render(self.options.json)),
        }
    }

    fn dispatch(&mut self, command: ReplCommand) -> Result<String, CliError> {
        match command {
            ReplCommand::Register { age, name } => self.register(age, name),
            ReplCommand::Search { flight } => self.search(&flight),
            ReplCommand::Flights => Ok(self.list_flights()),
            ReplCommand::Book { flight, user, seats } => self.book(&flight, &user, seats),
            ReplCommand::Cancel { flight, ticket } => self.cancel(&flight, &ticket),
            ReplCommand::Show { ticket } => self.show(ticket),
            ReplCommand::Save { append, path } => self.save(append, path),
            ReplCommand::MyTickets { user } => Ok(self.user_tickets(&user)),
            ReplCommand::History => Ok(self.history()),
            ReplCommand::Quit => Ok(String::new()),
        }
    }

    fn render<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> String {
        if self.options.json {
            serde_json::to_string_pretty(value).unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
        } else {
            text()
        }
    }

    fn register(&mut self, age: u32, name: Vec<String>) -> Result<String, CliError> {
        let name = name.join(" ");
        let name = name.trim();
        if name.is_empty() {
            return Err(CliError::Usage("Please enter a valid Name and Age.".to_string()));
        }

        let user_id = self
            .ledger
            .register_user(name, age)
            .map_err(CliError::Registration)?;

        Ok(self.render(&json!({ "user_id": user_id }), || {
            format!("Registration Successful: User Registered!\nUser ID: {user_id}")
        }))
    }

    fn search(&self, raw: &str) -> Result<String, CliError> {
        let code = FlightCode::new(raw.trim());
        let flight = self
            .ledger
            .lookup_flight(&code)
            .ok_or_else(|| CliError::FlightNotFound(code.to_string()))?;

        Ok(self.render(flight, || describe_flight(flight)))
    }

    fn list_flights(&self) -> String {
        let flights: Vec<&Flight> = self.ledger.flights().collect();
        self.render(&flights, || {
            let mut out = String::new();
            for f in &flights {
                let _ = writeln!(
                    out,
                    "{:<8} {:<14} -> {:<14} {}  ${:<5} {:>4}/{} seats left ({:.0}% booked)",
                    f.code(),
                    f.origin,
                    f.destination,
                    f.departure.format(SCHEDULE_TIME_FORMAT),
                    f.price.amount,
                    f.available_seats(),
                    f.capacity(),
                    f.utilization() * 100.0,
                );
            }
            out.trim_end().to_string()
        })
    }

    fn book(&mut self, flight: &str, user: &str, seats: u32) -> Result<String, CliError> {
        let flight = flight.trim();
        let user = user.trim();
        if flight.is_empty() || user.is_empty() {
            return Err(CliError::Usage(
                "Please enter a valid Flight Number, User ID, and No. of Seats.".to_string(),
            ));
        }

        let code = FlightCode::new(flight);
        let ticket = self
            .ledger
            .book_flight(&code, &UserId::new(user), seats)
            .map_err(CliError::Booking)?;
        self.current_ticket = Some(ticket.clone());

        let seats_remaining = self
            .ledger
            .lookup_flight(&code)
            .map(Flight::available_seats)
            .unwrap_or_default();

        Ok(self.render(
            &json!({ "ticket_number": ticket, "seats_remaining": seats_remaining }),
            || format!("Booking Successful: Ticket booked successfully!\nTicket Number: {ticket}"),
        ))
    }

    fn cancel(&mut self, flight: &str, ticket: &str) -> Result<String, CliError> {
        let ticket = TicketCode::parse(ticket.trim());
        let booking = self
            .ledger
            .cancel_booking(&FlightCode::new(flight.trim()), &ticket)
            .map_err(CliError::Cancellation)?;

        if self.current_ticket.as_ref() == Some(&ticket) {
            self.current_ticket = None;
        }

        Ok(self.render(
            &json!({ "cancelled": ticket, "seats_released": booking.seats }),
            || "Cancellation Successful: Ticket canceled successfully!".to_string(),
        ))
    }

    fn resolve(&self, ticket: Option<String>) -> Result<TicketSummary, CliError> {
        let ticket = match ticket {
            Some(raw) => TicketCode::parse(raw.trim()),
            None => self.current_ticket.clone().ok_or(CliError::NoCurrentTicket)?,
        };

        self.ledger
            .resolve_ticket(&ticket)
            .ok_or_else(|| CliError::TicketNotFound(ticket.to_string()))
    }

    fn show(&self, ticket: Option<String>) -> Result<String, CliError> {
        let summary = self.resolve(ticket)?;
        Ok(self.render(&summary, || summary.render().trim_end().to_string()))
    }

    fn save(&self, append: bool, path: Option<PathBuf>) -> Result<String, CliError> {
        let summary = self.resolve(None)?;
        let path = path.unwrap_or_else(|| self.options.export_path.clone());

        if append {
            runway_store::append_summary(&path, &summary)?;
        } else {
            runway_store::write_summary(&path, &summary)?;
        }
        info!(ticket = %summary.ticket_number, append, "Ticket exported");

        Ok(self.render(
            &json!({ "saved": summary.ticket_number, "path": path }),
            || format!("Saved ticket {} to {}", summary.ticket_number, path.display()),
        ))
    }

    fn user_tickets(&self, user: &str) -> String {
        let bookings = self.ledger.bookings_for_user(&UserId::new(user.trim()));
        self.render(&bookings, || {
            if bookings.is_empty() {
                return format!("No active tickets for user {}", user.trim());
            }
            bookings
                .iter()
                .map(|b| format!("{}  {}  {} seat(s)", b.ticket, b.flight, b.seats))
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    fn history(&self) -> String {
        let events = self.ledger.history();
        self.render(&events, || {
            if events.is_empty() {
                return "No changes yet.".to_string();
            }
            events
                .iter()
                .map(|event| {
                    let detail = match &event.kind {
                        LedgerEventKind::UserRegistered { user_id, .. } => format!("user {user_id}"),
                        LedgerEventKind::SeatsBooked { ticket_code, seats, seats_remaining, .. } => {
                            format!("{ticket_code} +{seats} seats ({seats_remaining} left)")
                        }
                        LedgerEventKind::BookingCancelled {
                            ticket_code,
                            seats_released,
                            seats_remaining,
                            ..
                        } => format!("{ticket_code} -{seats_released} seats ({seats_remaining} left)"),
                    };
                    format!(
                        "{}  {:<18} {}",
                        event.recorded_at.format("%H:%M:%S"),
                        event.kind.label(),
                        detail
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}

fn describe_flight(flight: &Flight) -> String {
    format!(
        "Flight Found:\nFlight Number: {}\nSource: {}\nDestination: {}\nDeparture Time: {}\nArrival Time: {}\nPrice: ${}",
        flight.code(),
        flight.origin,
        flight.destination,
        flight.departure.format(SCHEDULE_TIME_FORMAT),
        flight.arrival.format(SCHEDULE_TIME_FORMAT),
        flight.price,
    )
}
