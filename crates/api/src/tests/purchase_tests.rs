// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for buying tickets through the API.

use grand_prix::FormatCheckedPayment;
use grand_prix_domain::SeatId;

use crate::tests::helpers::{
    DecliningPayment, assert_price, card_payment, create_purchase_request,
    create_stocked_session, wallet_payment,
};
use crate::{
    ApiError, ApiErrorKind, PurchaseHistoryResponse, PurchaseResponse, PurchaseTicketsRequest,
    Session, purchase_history, purchase_tickets, seat_map,
};

fn seat_is_held(session: &Session, seat: &str) -> bool {
    let seat_id: SeatId = seat.parse().unwrap();
    session.state().venue.is_reserved(seat_id).unwrap()
}

#[test]
fn test_weekend_purchase_prices_each_ticket() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["1-1", "1-2", "2-1"], "Weekend");

    let response: PurchaseResponse =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap();

    assert_eq!(response.tickets.len(), 3);
    for ticket in &response.tickets {
        assert_price(ticket.price, 170.0);
        assert_price(ticket.base_price, 200.0);
        assert_eq!(ticket.variant, "Weekend");
        assert_eq!(ticket.event_id, Some(1));
    }
    assert_price(response.total, 510.0);
    assert_eq!(seat_map(&session).available, vec![String::from("2-2")]);
}

#[test]
fn test_tickets_follow_request_order() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["2-2", "1-1"], "SingleRace");

    let response: PurchaseResponse =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap();

    let seats: Vec<Option<String>> = response.tickets.iter().map(|t| t.seat.clone()).collect();
    assert_eq!(
        seats,
        vec![Some(String::from("2-2")), Some(String::from("1-1"))]
    );
    assert!(response.tickets[0].ticket_id < response.tickets[1].ticket_id);
}

#[test]
fn test_purchase_records_reservation_and_payment() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["1-1", "1-2"], "SingleRace");

    let response: PurchaseResponse =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap();

    let state = session.state();
    assert_eq!(state.reservations.len(), 1);
    assert_eq!(state.reservations[0].reservation_id, response.reservation_id);
    assert_eq!(state.reservations[0].user_id, customer.user_id);
    assert_eq!(state.payments.len(), 1);
    assert_eq!(state.payments[0].payment_id, response.payment_id);
    assert_price(state.payments[0].amount, 380.0);
}

#[test]
fn test_purchase_history_lists_tickets_in_order() {
    let (mut session, _admin, customer) = create_stocked_session();
    purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["1-1"], "Season"),
        &mut wallet_payment(),
    )
    .unwrap();
    purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["2-1"], "SingleRace"),
        &mut wallet_payment(),
    )
    .unwrap();

    let history: PurchaseHistoryResponse = purchase_history(&session, &customer).unwrap();

    assert_eq!(history.user_id, customer.user_id);
    let variants: Vec<&str> = history.tickets.iter().map(|t| t.variant.as_str()).collect();
    assert_eq!(variants, vec!["Season", "SingleRace"]);
    assert_price(history.tickets[0].price, 150.0);
}

#[test]
fn test_group_purchase_uses_tier() {
    let (mut session, _admin, customer) = create_stocked_session();
    let mut request: PurchaseTicketsRequest = create_purchase_request(&["1-1", "1-2"], "Group");
    request.group_size = Some(5);

    let response: PurchaseResponse =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap();

    assert_price(response.tickets[0].price, 160.0);
    assert_eq!(response.tickets[0].variant, "Group (5 people)");
}

#[test]
fn test_group_without_size_rejected() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["1-1"], "Group");

    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "group_size"));
    assert!(!seat_is_held(&session, "1-1"));
}

#[test]
fn test_group_of_one_rejected() {
    let (mut session, _admin, customer) = create_stocked_session();
    let mut request: PurchaseTicketsRequest = create_purchase_request(&["1-1"], "Group");
    request.group_size = Some(1);

    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::ValidationError);
    assert!(session.state().tickets.is_empty());
}

#[test]
fn test_discount_applies_to_every_ticket() {
    let (mut session, _admin, customer) = create_stocked_session();
    let mut request: PurchaseTicketsRequest = create_purchase_request(&["1-1", "1-2"], "Weekend");
    request.discount_id = Some(1);

    let response: PurchaseResponse =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap();

    for ticket in &response.tickets {
        assert_price(ticket.price, 153.0);
        assert_eq!(ticket.discount_id, Some(1));
    }
    assert_price(response.total, 306.0);
}

#[test]
fn test_held_seat_rolls_back_whole_batch() {
    let (mut session, _admin, customer) = create_stocked_session();
    purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["1-2"], "SingleRace"),
        &mut wallet_payment(),
    )
    .unwrap();

    let request: PurchaseTicketsRequest = create_purchase_request(&["1-1", "1-2"], "SingleRace");
    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap_err();

    assert!(matches!(err, ApiError::SeatUnavailable { ref seat, .. } if seat == "1-2"));
    assert!(!seat_is_held(&session, "1-1"));
    assert!(seat_is_held(&session, "1-2"));
    assert_eq!(session.state().tickets.len(), 1);
}

#[test]
fn test_seat_outside_grid_rejected() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["1-1", "3-1"], "SingleRace");

    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::SeatUnavailable);
    assert!(!seat_is_held(&session, "1-1"));
}

#[test]
fn test_malformed_seat_reference_rejected() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["A1"], "SingleRace");

    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "seats"));
}

#[test]
fn test_unknown_variant_rejected() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["1-1"], "VIP");

    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "variant"));
}

#[test]
fn test_empty_request_rejected() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&[], "SingleRace");

    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::ValidationError);
}

#[test]
fn test_unknown_event_rejected() {
    let (mut session, _admin, customer) = create_stocked_session();
    let mut request: PurchaseTicketsRequest = create_purchase_request(&["1-1"], "SingleRace");
    request.event_id = 99;

    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap_err();

    assert!(
        matches!(err, ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Event")
    );
    assert!(!seat_is_held(&session, "1-1"));
}

#[test]
fn test_declined_payment_releases_seats() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["1-1", "2-2"], "Weekend");

    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut DecliningPayment).unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::PaymentFailed);
    assert_eq!(seat_map(&session).available.len(), 4);
    assert!(session.state().tickets.is_empty());
    assert!(session.state().payments.is_empty());
}

#[test]
fn test_malformed_card_releases_seats() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["1-1"], "SingleRace");
    let mut payment: FormatCheckedPayment = card_payment("1234", "12/27");

    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut payment).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "card_number"));
    assert!(!seat_is_held(&session, "1-1"));
}

#[test]
fn test_bad_expiry_month_rejected() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["1-1"], "SingleRace");
    let mut payment: FormatCheckedPayment = card_payment("4111111111111111", "13/27");

    let err: ApiError =
        purchase_tickets(&mut session, &customer, &request, &mut payment).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "expiry"));
}

#[test]
fn test_valid_card_accepted() {
    let (mut session, _admin, customer) = create_stocked_session();
    let request: PurchaseTicketsRequest = create_purchase_request(&["1-1"], "SingleRace");
    let mut payment: FormatCheckedPayment = card_payment("4111111111111111", "09/28");

    purchase_tickets(&mut session, &customer, &request, &mut payment).unwrap();

    assert!(seat_is_held(&session, "1-1"));
}

#[test]
fn test_capacity_limits_batch() {
    let (mut session, _admin, customer) = create_stocked_session();
    purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["1-1", "1-2", "2-1"], "SingleRace"),
        &mut wallet_payment(),
    )
    .unwrap();

    let err: ApiError = purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["2-2", "1-1"], "SingleRace"),
        &mut wallet_payment(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ApiError::InsufficientCapacity {
            requested: 2,
            remaining: 1
        }
    ));
    assert!(!seat_is_held(&session, "2-2"));
}
