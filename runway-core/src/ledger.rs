use std::collections::{BTreeMap, HashMap};

use runway_shared::{LedgerEvent, LedgerEventKind};
use tracing::{debug, info};

use crate::booking::{Booking, TicketCode, TicketSummary};
use crate::flight::{Flight, FlightCode};
use crate::identity::UserIdGenerator;
use crate::seed;
use crate::user::{User, UserDigest, UserId};
use crate::{LedgerError, LedgerResult};

/// Upper bound on generator draws for a single registration.
const MAX_ID_DRAWS: usize = 10_000;

/// In-memory book of users, flights and bookings for one session.
///
/// Every mutating operation either succeeds completely or leaves the ledger
/// untouched.
pub struct ReservationLedger {
    users: HashMap<UserId, User>,
    user_index: HashMap<UserDigest, UserId>,
    flights: BTreeMap<FlightCode, Flight>,
    bookings: HashMap<FlightCode, HashMap<TicketCode, Booking>>,
    ticket_index: HashMap<TicketCode, FlightCode>,
    // Last sequence issued per flight; never decremented, so codes are never reissued.
    ticket_sequences: HashMap<FlightCode, u64>,
    id_generator: Box<dyn UserIdGenerator>,
    history: Vec<LedgerEvent>,
}

impl ReservationLedger {
    pub fn new(flights: Vec<Flight>, id_generator: Box<dyn UserIdGenerator>) -> LedgerResult<Self> {
        let mut by_code = BTreeMap::new();
        for flight in flights {
            let code = flight.code().clone();
            if by_code.insert(code.clone(), flight).is_some() {
                return Err(LedgerError::DuplicateFlight(code.to_string()));
            }
        }

        Ok(Self {
            users: HashMap::new(),
            user_index: HashMap::new(),
            flights: by_code,
            bookings: HashMap::new(),
            ticket_index: HashMap::new(),
            ticket_sequences: HashMap::new(),
            id_generator,
            history: Vec::new(),
        })
    }

    /// Ledger seeded with the published schedule.
    pub fn with_default_schedule(id_generator: Box<dyn UserIdGenerator>) -> LedgerResult<Self> {
        Self::new(seed::default_flights()?, id_generator)
    }

    /// Store a new passenger under a fresh ID, retrying the generator on collisions.
    pub fn register_user(&mut self, name: impl Into<String>, age: u32) -> LedgerResult<UserId> {
        let space = self.id_generator.id_space();
        if self.users.len() as u64 >= space {
            return Err(LedgerError::UserIdSpaceExhausted(space));
        }

        let user_id = (0..MAX_ID_DRAWS)
            .map(|_| self.id_generator.generate())
            .find(|candidate| !self.users.contains_key(candidate))
            .ok_or(LedgerError::UserIdDrawsExhausted(MAX_ID_DRAWS))?;

        let user = User::new(user_id.clone(), name, age);
        self.user_index.insert(user.digest.clone(), user_id.clone());

        info!(user_id = %user_id, name = %user.name, "User registered");
        self.record(LedgerEventKind::UserRegistered {
            user_id: user_id.to_string(),
            name: user.name.clone(),
        });

        self.users.insert(user_id.clone(), user);
        Ok(user_id)
    }

    pub fn lookup_user(&self, user_id: &UserId) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn find_user_by_digest(&self, digest: &UserDigest) -> Option<&User> {
        self.user_index
            .get(digest)
            .and_then(|id| self.users.get(id))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Get a flight by its number
    pub fn lookup_flight(&self, code: &FlightCode) -> Option<&Flight> {
        self.flights.get(code)
    }

    /// All flights, ordered by flight code.
    pub fn flights(&self) -> impl Iterator<Item = &Flight> {
        self.flights.values()
    }

    /// Reserve seats for a registered user and issue the flight's next ticket code.
    pub fn book_flight(
        &mut self,
        flight_code: &FlightCode,
        user_id: &UserId,
        seats: u32,
    ) -> LedgerResult<TicketCode> {
        let flight = self.flights.get_mut(flight_code).ok_or_else(|| {
            debug!(flight = %flight_code, "Booking rejected: unknown flight");
            LedgerError::FlightNotFound(flight_code.to_string())
        })?;

        if !self.users.contains_key(user_id) {
            debug!(flight = %flight_code, user_id = %user_id, "Booking rejected: unknown user");
            return Err(LedgerError::UserNotFound(user_id.to_string()));
        }

        if seats == 0 {
            return Err(LedgerError::InvalidSeatCount);
        }

        flight.reserve_seats(seats).map_err(|e| {
            debug!(flight = %flight_code, seats, error = %e, "Booking rejected");
            e
        })?;
        let seats_remaining = flight.available_seats();

        let sequence = self.ticket_sequences.entry(flight_code.clone()).or_insert(0);
        *sequence += 1;
        let ticket = TicketCode::issue(flight_code, *sequence);

        let booking = Booking::new(ticket.clone(), flight_code.clone(), user_id.clone(), seats);
        self.bookings
            .entry(flight_code.clone())
            .or_default()
            .insert(ticket.clone(), booking);
        self.ticket_index.insert(ticket.clone(), flight_code.clone());

        info!(
            flight = %flight_code,
            ticket = %ticket,
            user_id = %user_id,
            seats,
            seats_remaining,
            "Seats booked"
        );
        self.record(LedgerEventKind::SeatsBooked {
            flight_code: flight_code.to_string(),
            ticket_code: ticket.to_string(),
            user_id: user_id.to_string(),
            seats,
            seats_remaining,
        });

        Ok(ticket)
    }

    /// Removes the booking and puts its seats back on sale. Returns the removed booking.
    pub fn cancel_booking(
        &mut self,
        flight_code: &FlightCode,
        ticket: &TicketCode,
    ) -> LedgerResult<Booking> {
        let not_found = || LedgerError::BookingNotFound {
            flight: flight_code.to_string(),
            ticket: ticket.to_string(),
        };

        let seats = self
            .bookings
            .get(flight_code)
            .and_then(|tickets| tickets.get(ticket))
            .map(|booking| booking.seats)
            .ok_or_else(not_found)?;

        let flight = self.flights.get_mut(flight_code).ok_or_else(not_found)?;
        flight.release_seats(seats)?;
        let seats_remaining = flight.available_seats();

        let booking = self
            .bookings
            .get_mut(flight_code)
            .and_then(|tickets| tickets.remove(ticket))
            .ok_or_else(not_found)?;
        self.ticket_index.remove(ticket);

        info!(flight = %flight_code, ticket = %ticket, seats, seats_remaining, "Booking cancelled");
        self.record(LedgerEventKind::BookingCancelled {
            flight_code: flight_code.to_string(),
            ticket_code: ticket.to_string(),
            seats_released: seats,
            seats_remaining,
        });

        Ok(booking)
    }

    pub fn lookup_booking(&self, ticket: &TicketCode) -> Option<&Booking> {
        let flight_code = self.ticket_index.get(ticket)?;
        self.bookings.get(flight_code)?.get(ticket)
    }

    /// Joins a ticket with its flight and passenger. `None` once cancelled.
    pub fn resolve_ticket(&self, ticket: &TicketCode) -> Option<TicketSummary> {
        let booking = self.lookup_booking(ticket)?;
        let flight = self.flights.get(&booking.flight)?;
        let user = self.users.get(&booking.user_id)?;

        Some(TicketSummary {
            user_name: user.name().to_string(),
            ticket_number: booking.ticket.clone(),
            flight_number: booking.flight.clone(),
            source: flight.origin.clone(),
            destination: flight.destination.clone(),
            price: flight.price.clone(),
        })
    }

    /// Active bookings of a user, ordered by flight then ticket sequence.
    pub fn bookings_for_user(&self, user_id: &UserId) -> Vec<&Booking> {
        let mut found: Vec<&Booking> = self
            .bookings
            .values()
            .flat_map(|tickets| tickets.values())
            .filter(|booking| &booking.user_id == user_id)
            .collect();
        found.sort_by_key(|b| (b.flight.clone(), b.ticket.sequence()));
        found
    }

    pub fn active_booking_count(&self) -> usize {
        self.ticket_index.len()
    }

    /// Successful mutations, oldest first.
    pub fn history(&self) -> &[LedgerEvent] {
        &self.history
    }

    fn record(&mut self, kind: LedgerEventKind) {
        self.history.push(LedgerEvent::new(kind));
    }
}
