// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{ScratchDir, create_test_state, create_test_venue};
use crate::{CollectionKind, PersistenceError, Store};
use grand_prix::{BookingState, FormatCheckedPayment, PurchaseReceipt, PurchaseRequest};
use grand_prix_domain::{
    PaymentDetails, PaymentMethod, PaymentRecord, SeatId, Ticket, TicketVariantTag, Venue,
};

#[test]
fn test_empty_store_loads_default_venue_with_no_holds() {
    let store: Store = Store::in_memory();

    let state: BookingState = store.load_state(create_test_venue()).unwrap();

    assert_eq!(state.venue, create_test_venue());
    assert!(state.users.is_empty());
    assert!(state.tickets.is_empty());
    assert_eq!(state.venue.reserved_count(), 0);
}

#[test]
fn test_state_survives_file_round_trip() {
    let scratch: ScratchDir = ScratchDir::create();
    let original: BookingState = create_test_state();

    let mut store: Store = Store::open(&scratch.0).unwrap();
    store.save_state(&original).unwrap();
    for kind in CollectionKind::ALL {
        assert!(scratch.0.join(kind.file_name()).is_file(), "{kind} missing");
    }

    let reopened: Store = Store::open(&scratch.0).unwrap();
    let loaded: BookingState = reopened.load_state(create_test_venue()).unwrap();

    assert_eq!(loaded, original);
    assert_eq!(loaded.venue.is_reserved(SeatId::new(1, 2)), Ok(true));
    assert_eq!(loaded.venue.is_reserved(SeatId::new(2, 3)), Ok(true));
}

#[test]
fn test_seat_holds_come_from_tickets() {
    let mut store: Store = Store::in_memory();
    let mut state: BookingState = create_test_state();
    // Held in the stored venue, but no ticket owns it.
    state.venue.reserve(SeatId::new(1, 1)).unwrap();
    store.save_state(&state).unwrap();

    let loaded: BookingState = store.load_state(create_test_venue()).unwrap();

    assert_eq!(loaded.venue.is_reserved(SeatId::new(1, 1)), Ok(false));
    assert_eq!(loaded.venue.reserved_count(), 2);
}

#[test]
fn test_no_tickets_means_no_holds() {
    let mut store: Store = Store::in_memory();
    let mut venue: Venue = create_test_venue();
    venue.reserve(SeatId::new(2, 2)).unwrap();
    store.save_all(CollectionKind::Venues, &[venue]).unwrap();

    let loaded: BookingState = store.load_state(create_test_venue()).unwrap();

    assert_eq!(loaded.venue.reserved_count(), 0);
}

#[test]
fn test_ticket_outside_grid_is_inconsistent() {
    let mut store: Store = Store::in_memory();
    let state: BookingState = create_test_state();
    store.save_state(&state).unwrap();

    let smaller: Venue = Venue::new(1, "Silverstone Circuit", 1, 1, 1).unwrap();
    store.save_all(CollectionKind::Venues, &[smaller]).unwrap();
    let tickets: Vec<Ticket> = store.load_all(CollectionKind::Tickets).unwrap();
    assert_eq!(tickets.len(), 2);

    assert!(matches!(
        store.load_state(create_test_venue()),
        Err(PersistenceError::InconsistentState(_))
    ));
}

fn buy_one(state: &mut BookingState, seat: SeatId) -> PurchaseReceipt {
    let mut payment: FormatCheckedPayment = FormatCheckedPayment::new(PaymentDetails {
        method: PaymentMethod::DigitalWallet,
        holder_name: String::from("Ada"),
        card_number: None,
        expiry: None,
    });
    grand_prix::purchase(
        state,
        PurchaseRequest {
            seats: vec![seat],
            variant: TicketVariantTag::Weekend,
            group_size: None,
            event_id: 1,
            user_id: 1,
            discount_id: None,
        },
        &mut payment,
    )
    .unwrap()
}

#[test]
fn test_cancelled_ids_stay_retired_after_reload() {
    let mut store: Store = Store::in_memory();
    let mut state: BookingState = create_test_state();
    let old_tickets: Vec<u64> = state.tickets.iter().map(Ticket::ticket_id).collect();
    let old_reservation: u64 = state.reservations[0].reservation_id;
    grand_prix::cancel_reservation(&mut state, 1, old_reservation).unwrap();
    store.save_state(&state).unwrap();

    let mut loaded: BookingState = store.load_state(create_test_venue()).unwrap();
    assert!(loaded.reservations.is_empty());
    assert_eq!(loaded.payments[0].ticket_ids, old_tickets);

    let receipt: PurchaseReceipt = buy_one(&mut loaded, SeatId::new(1, 1));

    assert!(receipt.reservation.reservation_id > old_reservation);
    assert!(old_tickets.iter().all(|id| *id < receipt.tickets[0].ticket_id()));
}

#[test]
fn test_payments_without_ticket_ids_still_load() {
    let scratch: ScratchDir = ScratchDir::create();
    let mut store: Store = Store::open(&scratch.0).unwrap();
    store.save_state(&create_test_state()).unwrap();

    let path: std::path::PathBuf = scratch.0.join(CollectionKind::Payments.file_name());
    let mut document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    for payment in document.as_array_mut().unwrap() {
        payment.as_object_mut().unwrap().remove("ticket_ids");
    }
    std::fs::write(&path, document.to_string()).unwrap();

    let payments: Vec<PaymentRecord> = store.load_all(CollectionKind::Payments).unwrap();

    assert_eq!(payments.len(), 1);
    assert!(payments[0].ticket_ids.is_empty());
}
