use std::collections::HashSet;

use runway_core::{
    FlightCode, LedgerError, RandomUserIds, ReservationLedger, SequentialUserIds, TicketCode,
};

fn random_ledger() -> ReservationLedger {
    ReservationLedger::with_default_schedule(Box::new(RandomUserIds::default())).unwrap()
}

#[test]
fn test_registered_ids_are_unique_and_retrievable() {
    let mut ledger = random_ledger();
    let mut seen = HashSet::new();

    // Fill the whole two-digit space so the collision retry path is exercised.
    for n in 0..90u32 {
        let name = format!("Passenger {n}");
        let id = ledger.register_user(name.clone(), 20 + n).unwrap();
        assert!(seen.insert(id.clone()), "duplicate id {id}");

        let user = ledger.lookup_user(&id).unwrap();
        assert_eq!(user.name(), name);
        assert_eq!(user.age, 20 + n);
    }

    assert!(matches!(
        ledger.register_user("One too many", 40),
        Err(LedgerError::UserIdSpaceExhausted(90))
    ));
}

#[test]
fn test_capacity_accounting_across_flights() {
    let mut ledger = random_ledger();
    let user = ledger.register_user("Hana", 29).unwrap();

    for flight in ["ABC123", "DEF456", "GHI789"] {
        let code = FlightCode::new(flight);
        let capacity = ledger.lookup_flight(&code).unwrap().available_seats();

        // Over capacity fails and leaves the count alone.
        assert!(ledger.book_flight(&code, &user, capacity + 1).is_err());
        assert_eq!(ledger.lookup_flight(&code).unwrap().available_seats(), capacity);

        let ticket = ledger.book_flight(&code, &user, 7).unwrap();
        assert_eq!(
            ledger.lookup_flight(&code).unwrap().available_seats(),
            capacity - 7
        );

        ledger.cancel_booking(&code, &ticket).unwrap();
        assert_eq!(ledger.lookup_flight(&code).unwrap().available_seats(), capacity);
    }
}

#[test]
fn test_book_resolve_cancel_resolve() {
    let ids = SequentialUserIds::new(10, 99).unwrap();
    let mut ledger = ReservationLedger::with_default_schedule(Box::new(ids)).unwrap();
    let user = ledger.register_user("Ines Ortega", 45).unwrap();
    let flight = FlightCode::new("DEF456");

    let ticket = ledger.book_flight(&flight, &user, 3).unwrap();
    let summary = ledger.resolve_ticket(&ticket).unwrap();
    assert_eq!(summary.user_name, "Ines Ortega");
    assert_eq!(summary.ticket_number, ticket);
    assert_eq!(summary.flight_number, flight);
    assert_eq!(summary.source, "Chicago");
    assert_eq!(summary.destination, "Miami");
    assert_eq!(summary.price.amount, 150);

    ledger.cancel_booking(&flight, &ticket).unwrap();
    assert!(ledger.resolve_ticket(&ticket).is_none());
    assert!(ledger.lookup_booking(&ticket).is_none());
}

#[test]
fn test_unknown_tickets_do_not_resolve() {
    let ledger = random_ledger();
    for raw in ["ABC123-1", "", "-", "ABC123-", "not a ticket", "ABC123-18446744073709551616"] {
        assert!(ledger.resolve_ticket(&TicketCode::parse(raw)).is_none());
    }
}

#[test]
fn test_bookings_for_user() {
    let ids = SequentialUserIds::new(10, 99).unwrap();
    let mut ledger = ReservationLedger::with_default_schedule(Box::new(ids)).unwrap();
    let jo = ledger.register_user("Jo", 22).unwrap();
    let kim = ledger.register_user("Kim", 23).unwrap();
    let abc = FlightCode::new("ABC123");
    let ghi = FlightCode::new("GHI789");

    let jo_ghi = ledger.book_flight(&ghi, &jo, 1).unwrap();
    let _kim_abc = ledger.book_flight(&abc, &kim, 1).unwrap();
    let jo_abc = ledger.book_flight(&abc, &jo, 2).unwrap();

    let tickets: Vec<&TicketCode> = ledger
        .bookings_for_user(&jo)
        .into_iter()
        .map(|b| &b.ticket)
        .collect();
    assert_eq!(tickets, vec![&jo_abc, &jo_ghi]);
    assert_eq!(ledger.active_booking_count(), 3);
}
