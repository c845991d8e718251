// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for event, discount and reporting administration.

use crate::tests::helpers::{
    assert_price, create_purchase_request, create_stocked_session, wallet_payment,
};
use crate::{
    ApiError, ApiErrorKind, CorrectTicketPriceRequest, CreateDiscountRequest, CreateEventRequest,
    DiscountInfo, EventInfo, PurchaseResponse, SALES_CSV_HEADER, SalesSummaryResponse, TicketInfo,
    UpdateDiscountRequest, UpdateEventRequest, VenueStatusResponse, correct_ticket_price,
    create_discount, create_event, delete_discount, delete_event, export_sales_csv,
    list_discounts, list_events, purchase_tickets, sales_summary, update_discount_percentage,
    update_event, venue_status,
};

fn create_monaco_request() -> CreateEventRequest {
    CreateEventRequest {
        name: String::from("Monaco Grand Prix"),
        date: String::from("2026-05-24"),
        base_price: 400.0,
    }
}

#[test]
fn test_admin_creates_event() {
    let (mut session, admin, _customer) = create_stocked_session();

    let event: EventInfo = create_event(&mut session, &admin, &create_monaco_request()).unwrap();

    assert_eq!(event.event_id, 2);
    assert_eq!(event.details, "Monaco Grand Prix on 2026-05-24");
    assert_eq!(list_events(&session).len(), 2);
}

#[test]
fn test_customer_cannot_manage_events() {
    let (mut session, _admin, customer) = create_stocked_session();

    let err: ApiError =
        create_event(&mut session, &customer, &create_monaco_request()).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Unauthorized { ref action, ref required_role }
            if action == "manage_events" && required_role == "Admin"
    ));

    assert!(delete_event(&mut session, &customer, 1).is_err());
    assert_eq!(list_events(&session).len(), 1);
}

#[test]
fn test_event_with_bad_date_rejected() {
    let (mut session, admin, _customer) = create_stocked_session();
    let mut request: CreateEventRequest = create_monaco_request();
    request.date = String::from("24/05/2026");

    let err: ApiError = create_event(&mut session, &admin, &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "date"));
}

#[test]
fn test_event_with_negative_price_rejected() {
    let (mut session, admin, _customer) = create_stocked_session();
    let mut request: CreateEventRequest = create_monaco_request();
    request.base_price = -1.0;

    let err: ApiError = create_event(&mut session, &admin, &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "base_price"));
}

#[test]
fn test_update_event_keeps_sold_ticket_prices() {
    let (mut session, admin, customer) = create_stocked_session();
    purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["1-1"], "Weekend"),
        &mut wallet_payment(),
    )
    .unwrap();

    let event: EventInfo = update_event(
        &mut session,
        &admin,
        &UpdateEventRequest {
            event_id: 1,
            name: String::from("British Grand Prix"),
            date: String::from("2026-07-06"),
            base_price: 300.0,
        },
    )
    .unwrap();

    assert_price(event.base_price, 300.0);
    assert_price(session.state().tickets[0].price(), 170.0);
}

#[test]
fn test_delete_event_with_sales_rejected() {
    let (mut session, admin, customer) = create_stocked_session();
    purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["1-1"], "Weekend"),
        &mut wallet_payment(),
    )
    .unwrap();

    let err: ApiError = delete_event(&mut session, &admin, 1).unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::RuleViolation);
    assert_eq!(list_events(&session).len(), 1);
}

#[test]
fn test_delete_event_without_sales() {
    let (mut session, admin, _customer) = create_stocked_session();

    let deleted: EventInfo = delete_event(&mut session, &admin, 1).unwrap();

    assert_eq!(deleted.name, "British Grand Prix");
    assert!(list_events(&session).is_empty());
    assert_eq!(
        delete_event(&mut session, &admin, 1).unwrap_err().kind(),
        ApiErrorKind::NotFound
    );
}

#[test]
fn test_discount_lifecycle() {
    let (mut session, admin, _customer) = create_stocked_session();

    let created: DiscountInfo = create_discount(
        &mut session,
        &admin,
        &CreateDiscountRequest {
            description: String::from("Student"),
            percentage: 0.25,
        },
    )
    .unwrap();
    assert_eq!(created.discount_id, 2);

    let updated: DiscountInfo = update_discount_percentage(
        &mut session,
        &admin,
        &UpdateDiscountRequest {
            discount_id: 2,
            percentage: 0.3,
        },
    )
    .unwrap();
    assert_price(updated.percentage, 0.3);

    delete_discount(&mut session, &admin, 2).unwrap();
    let remaining: Vec<DiscountInfo> = list_discounts(&session);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].description, "Early bird");
}

#[test]
fn test_discount_out_of_range_leaves_discount_unchanged() {
    let (mut session, admin, _customer) = create_stocked_session();

    let err: ApiError = update_discount_percentage(
        &mut session,
        &admin,
        &UpdateDiscountRequest {
            discount_id: 1,
            percentage: 1.5,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "percentage"));
    assert_price(list_discounts(&session)[0].percentage, 0.1);
}

#[test]
fn test_customer_cannot_manage_discounts() {
    let (mut session, _admin, customer) = create_stocked_session();

    let err: ApiError = delete_discount(&mut session, &customer, 1).unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Unauthorized);
    assert_eq!(list_discounts(&session).len(), 1);
}

#[test]
fn test_discount_edit_does_not_reprice_sold_tickets() {
    let (mut session, admin, customer) = create_stocked_session();
    let mut request = create_purchase_request(&["1-1"], "Weekend");
    request.discount_id = Some(1);
    purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap();

    update_discount_percentage(
        &mut session,
        &admin,
        &UpdateDiscountRequest {
            discount_id: 1,
            percentage: 0.5,
        },
    )
    .unwrap();

    assert_price(session.state().tickets[0].price(), 153.0);
}

#[test]
fn test_correct_ticket_price() {
    let (mut session, admin, customer) = create_stocked_session();
    let mut request = create_purchase_request(&["1-1"], "Weekend");
    request.discount_id = Some(1);
    let purchase: PurchaseResponse =
        purchase_tickets(&mut session, &customer, &request, &mut wallet_payment()).unwrap();

    let corrected: TicketInfo = correct_ticket_price(
        &mut session,
        &admin,
        &CorrectTicketPriceRequest {
            ticket_id: purchase.tickets[0].ticket_id,
            base_price: 100.0,
        },
    )
    .unwrap();

    assert_price(corrected.base_price, 100.0);
    assert_price(corrected.price, 76.5);
}

#[test]
fn test_customer_cannot_correct_ticket_price() {
    let (mut session, _admin, customer) = create_stocked_session();
    let purchase: PurchaseResponse = purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["1-1"], "Weekend"),
        &mut wallet_payment(),
    )
    .unwrap();

    let err: ApiError = correct_ticket_price(
        &mut session,
        &customer,
        &CorrectTicketPriceRequest {
            ticket_id: purchase.tickets[0].ticket_id,
            base_price: 0.0,
        },
    )
    .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Unauthorized);
    assert_price(session.state().tickets[0].price(), 170.0);
}

#[test]
fn test_sales_summary_per_event() {
    let (mut session, admin, customer) = create_stocked_session();
    create_event(&mut session, &admin, &create_monaco_request()).unwrap();
    purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["1-1", "1-2"], "Weekend"),
        &mut wallet_payment(),
    )
    .unwrap();

    let summary: SalesSummaryResponse = sales_summary(&session, &admin).unwrap();

    assert_eq!(summary.events.len(), 2);
    assert_eq!(summary.events[0].event_id, 1);
    assert_eq!(summary.events[0].tickets_sold, 2);
    assert_price(summary.events[0].revenue, 340.0);
    assert_eq!(summary.events[1].tickets_sold, 0);
    assert_eq!(summary.total_tickets, 2);
    assert_price(summary.total_revenue, 340.0);
}

#[test]
fn test_customer_cannot_view_sales() {
    let (session, _admin, customer) = create_stocked_session();

    assert_eq!(
        sales_summary(&session, &customer).unwrap_err().kind(),
        ApiErrorKind::Unauthorized
    );
    assert!(export_sales_csv(&session, &customer).is_err());
    assert!(venue_status(&session, &customer).is_err());
}

#[test]
fn test_export_sales_csv() {
    let (mut session, admin, customer) = create_stocked_session();
    purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["1-1", "1-2"], "Weekend"),
        &mut wallet_payment(),
    )
    .unwrap();

    let csv: String = export_sales_csv(&session, &admin).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], SALES_CSV_HEADER.join(","));
    assert_eq!(lines[1], "1,British Grand Prix,2,340.00");
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_venue_status() {
    let (mut session, admin, customer) = create_stocked_session();
    purchase_tickets(
        &mut session,
        &customer,
        &create_purchase_request(&["2-2"], "SingleRace"),
        &mut wallet_payment(),
    )
    .unwrap();

    let status: VenueStatusResponse = venue_status(&session, &admin).unwrap();

    assert_eq!(status.location, "Test Circuit");
    assert_eq!(status.capacity, 4);
    assert_eq!(status.seat_count, 4);
    assert_eq!(status.reserved, 1);
    assert_eq!(status.available, 3);
    assert_eq!(status.remaining_capacity, 3);
}
