// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler that changes state checks authorization first, then
//! applies the change through `Session::apply`, which flushes the store
//! and restores the previous state if the flush fails.

use num_traits::cast::ToPrimitive;
use std::str::FromStr;
use time::Date;

use grand_prix::{
    BookingState, EventSales, PaymentConfirmation, PurchaseReceipt, PurchaseRequest,
};
use grand_prix_domain::{
    Discount, Event, Role, SeatId, Ticket, TicketVariantTag, User, VenueStatus, parse_event_date,
};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::capabilities::compute_capabilities;
use crate::error::ApiError;
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    CancelResponse, CorrectTicketPriceRequest, CreateDiscountRequest, CreateEventRequest,
    DiscountInfo, EventInfo, EventSalesInfo, LoginRequest, LoginResponse,
    PurchaseHistoryResponse, PurchaseResponse, PurchaseTicketsRequest, RegisterUserRequest,
    RegisterUserResponse, SalesSummaryResponse, SeatMapResponse, TicketInfo,
    UpdateDiscountRequest, UpdateEventRequest, VenueStatusResponse,
};
use crate::session::Session;

/// Header row of the sales export.
pub const SALES_CSV_HEADER: [&str; 4] = ["event_id", "event_name", "tickets_sold", "revenue"];

fn ticket_info(ticket: &Ticket) -> TicketInfo {
    TicketInfo {
        ticket_id: ticket.ticket_id(),
        seat: ticket.seat().map(|seat| seat.to_string()),
        event_id: ticket.event_id(),
        variant: ticket.variant().to_string(),
        base_price: ticket.base_price(),
        price: ticket.price(),
        discount_id: ticket.discount().map(Discount::discount_id),
        issued_at: ticket.issued_at(),
    }
}

fn event_info(event: &Event) -> EventInfo {
    EventInfo {
        event_id: event.event_id(),
        name: event.name().to_string(),
        date: event.date(),
        base_price: event.base_price(),
        details: event.details(),
    }
}

fn discount_info(discount: &Discount) -> DiscountInfo {
    DiscountInfo {
        discount_id: discount.discount_id(),
        description: discount.description().to_string(),
        percentage: discount.percentage(),
    }
}

fn to_count(value: usize) -> u32 {
    value.to_u32().unwrap_or(u32::MAX)
}

/// Registers a new account.
///
/// A matching admin code grants the Admin role; any other code is ignored
/// and the account is a customer.
///
/// # Arguments
///
/// * `session` - The open session
/// * `request` - The registration request
///
/// # Errors
///
/// Returns an error if:
/// - The password fails the password policy
/// - The name is blank or the email is malformed
/// - The email is already registered
/// - The store cannot be written
pub fn register_user(
    session: &mut Session,
    request: &RegisterUserRequest,
) -> Result<RegisterUserResponse, ApiError> {
    PasswordPolicy::default().validate(&request.password, &request.email)?;

    let role: Role = match request.admin_code.as_deref() {
        Some(code) if code == session.config().admin_code => Role::Admin,
        _ => Role::Customer,
    };
    let password_hash: String = AuthenticationService::hash_password(
        &request.password,
        session.config().password_hash_cost,
    )?;

    let user: User = session.apply(|state| {
        grand_prix::register_user(state, &request.name, &request.email, password_hash, role)
    })?;

    tracing::info!(user_id = user.user_id(), role = %user.role(), "Registered user");

    Ok(RegisterUserResponse {
        user_id: user.user_id(),
        name: user.name().to_string(),
        email: user.email().to_string(),
        role: user.role().to_string(),
        message: format!("Registered {} as {}", user.email(), user.role()),
    })
}

/// Verifies credentials and starts a login.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the email is unknown or the
/// password does not match. The two cases are indistinguishable.
pub fn login(session: &mut Session, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    let actor: AuthenticatedActor = AuthenticationService::verify_credentials(
        session.state(),
        &request.email,
        &request.password,
    )
    .inspect_err(|_| tracing::debug!("Login rejected"))?;

    let user: &User = session.state().user(actor.user_id)?;
    let name: String = user.name().to_string();
    let session_token: String = session.issue_token(actor.user_id);

    tracing::info!(user_id = actor.user_id, role = %actor.role, "User logged in");

    Ok(LoginResponse {
        session_token,
        user_id: actor.user_id,
        name,
        role: actor.role.to_string(),
        capabilities: compute_capabilities(&actor),
    })
}

/// Ends a login.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the token is not active.
pub fn logout(session: &mut Session, session_token: &str) -> Result<(), ApiError> {
    if session.revoke_token(session_token) {
        tracing::info!("User logged out");
        Ok(())
    } else {
        Err(ApiError::AuthenticationFailed {
            reason: String::from("Invalid session token"),
        })
    }
}

/// Returns the free seats of the venue in row-major order.
#[must_use]
pub fn seat_map(session: &Session) -> SeatMapResponse {
    let state: &BookingState = session.state();
    SeatMapResponse {
        rows: state.venue.rows(),
        seats_per_row: state.venue.seats_per_row(),
        available: state
            .venue
            .available_seats()
            .into_iter()
            .map(|seat| seat.id().to_string())
            .collect(),
    }
}

/// Lists the scheduled events.
#[must_use]
pub fn list_events(session: &Session) -> Vec<EventInfo> {
    session.state().events.iter().map(event_info).collect()
}

/// Lists the discounts a buyer can choose from.
#[must_use]
pub fn list_discounts(session: &Session) -> Vec<DiscountInfo> {
    session.state().discounts.iter().map(discount_info).collect()
}

/// Buys tickets for the authenticated actor.
///
/// Seats are held in request order. If any seat cannot be held, pricing
/// fails, or the payment step refuses the total, every seat this call held
/// is released and nothing is recorded.
///
/// # Arguments
///
/// * `session` - The open session
/// * `actor` - The buyer
/// * `request` - Seats, variant, event and optional discount
/// * `confirmation` - The payment step
///
/// # Errors
///
/// Returns an error if:
/// - A seat reference or the variant cannot be parsed
/// - A seat is held or outside the grid
/// - The venue's remaining capacity is below the seat count
/// - The group size is missing or below the minimum
/// - The event or discount does not exist
/// - Payment is declined, abandoned, or its details are malformed
/// - The store cannot be written
pub fn purchase_tickets<P: PaymentConfirmation + ?Sized>(
    session: &mut Session,
    actor: &AuthenticatedActor,
    request: &PurchaseTicketsRequest,
    confirmation: &mut P,
) -> Result<PurchaseResponse, ApiError> {
    AuthorizationService::authorize_purchase(actor)?;

    let seats: Vec<SeatId> = request
        .seats
        .iter()
        .map(String::as_str)
        .map(SeatId::from_str)
        .collect::<Result<_, _>>()?;
    let variant: TicketVariantTag = TicketVariantTag::from_str(&request.variant)?;

    let purchase_request: PurchaseRequest = PurchaseRequest {
        seats,
        variant,
        group_size: request.group_size,
        event_id: request.event_id,
        user_id: actor.user_id,
        discount_id: request.discount_id,
    };

    let receipt: PurchaseReceipt = session
        .apply(|state| grand_prix::purchase(state, purchase_request, confirmation))
        .inspect_err(|e| tracing::warn!(user_id = actor.user_id, error = %e, "Purchase failed"))?;

    tracing::info!(
        user_id = actor.user_id,
        event_id = request.event_id,
        reservation_id = receipt.reservation.reservation_id,
        tickets = receipt.tickets.len(),
        total = receipt.total,
        "Purchase committed"
    );

    Ok(PurchaseResponse {
        reservation_id: receipt.reservation.reservation_id,
        payment_id: receipt.payment.payment_id,
        tickets: receipt.tickets.iter().map(ticket_info).collect(),
        total: receipt.total,
        message: format!(
            "Purchased {} ticket(s) for {:.2}",
            receipt.tickets.len(),
            receipt.total
        ),
    })
}

fn cancel_response(cancelled: &[Ticket]) -> CancelResponse {
    CancelResponse {
        cancelled: cancelled.iter().map(ticket_info).collect(),
        released_seats: cancelled
            .iter()
            .filter_map(Ticket::seat)
            .map(|seat| seat.to_string())
            .collect(),
        message: format!("Cancelled {} ticket(s)", cancelled.len()),
    }
}

/// Cancels one of the actor's tickets and frees its seat.
///
/// # Errors
///
/// Returns an error if the ticket is not in the actor's history or the
/// store cannot be written.
pub fn cancel_ticket(
    session: &mut Session,
    actor: &AuthenticatedActor,
    ticket_id: u64,
) -> Result<CancelResponse, ApiError> {
    AuthorizationService::authorize_purchase(actor)?;

    let ticket: Ticket =
        session.apply(|state| grand_prix::cancel_ticket(state, actor.user_id, ticket_id))?;

    tracing::info!(user_id = actor.user_id, ticket_id, "Ticket cancelled");

    Ok(cancel_response(std::slice::from_ref(&ticket)))
}

/// Cancels every ticket still held by one of the actor's reservations.
///
/// # Errors
///
/// Returns an error if the reservation does not belong to the actor or the
/// store cannot be written.
pub fn cancel_reservation(
    session: &mut Session,
    actor: &AuthenticatedActor,
    reservation_id: u64,
) -> Result<CancelResponse, ApiError> {
    AuthorizationService::authorize_purchase(actor)?;

    let cancelled: Vec<Ticket> = session
        .apply(|state| grand_prix::cancel_reservation(state, actor.user_id, reservation_id))?;

    tracing::info!(
        user_id = actor.user_id,
        reservation_id,
        tickets = cancelled.len(),
        "Reservation cancelled"
    );

    Ok(cancel_response(&cancelled))
}

/// Returns the actor's live tickets in purchase order.
///
/// # Errors
///
/// Returns an error if the actor's account no longer exists.
pub fn purchase_history(
    session: &Session,
    actor: &AuthenticatedActor,
) -> Result<PurchaseHistoryResponse, ApiError> {
    let tickets: Vec<&Ticket> = session.state().purchase_history(actor.user_id)?;
    Ok(PurchaseHistoryResponse {
        user_id: actor.user_id,
        tickets: tickets.into_iter().map(ticket_info).collect(),
    })
}

/// Schedules a new event.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a field is invalid, or
/// the store cannot be written.
pub fn create_event(
    session: &mut Session,
    actor: &AuthenticatedActor,
    request: &CreateEventRequest,
) -> Result<EventInfo, ApiError> {
    AuthorizationService::authorize_manage_events(actor)?;

    let date: Date = parse_event_date(&request.date)?;
    let event: Event = session.apply(|state| {
        grand_prix::create_event(state, &request.name, date, request.base_price)
    })?;

    tracing::info!(
        user_id = actor.user_id,
        event_id = event.event_id(),
        name = event.name(),
        "Event created"
    );

    Ok(event_info(&event))
}

/// Replaces an event's name, date and base price.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the event does not exist,
/// a field is invalid, or the store cannot be written.
pub fn update_event(
    session: &mut Session,
    actor: &AuthenticatedActor,
    request: &UpdateEventRequest,
) -> Result<EventInfo, ApiError> {
    AuthorizationService::authorize_manage_events(actor)?;

    let date: Date = parse_event_date(&request.date)?;
    let event: Event = session.apply(|state| {
        grand_prix::update_event(
            state,
            request.event_id,
            &request.name,
            date,
            request.base_price,
        )
    })?;

    tracing::info!(user_id = actor.user_id, event_id = event.event_id(), "Event updated");

    Ok(event_info(&event))
}

/// Removes an event with no live tickets.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the event does not exist
/// or has sold tickets, or the store cannot be written.
pub fn delete_event(
    session: &mut Session,
    actor: &AuthenticatedActor,
    event_id: u32,
) -> Result<EventInfo, ApiError> {
    AuthorizationService::authorize_manage_events(actor)?;

    let event: Event = session.apply(|state| grand_prix::delete_event(state, event_id))?;

    tracing::info!(user_id = actor.user_id, event_id, "Event deleted");

    Ok(event_info(&event))
}

/// Adds a discount.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the percentage is outside
/// `[0, 1]`, or the store cannot be written.
pub fn create_discount(
    session: &mut Session,
    actor: &AuthenticatedActor,
    request: &CreateDiscountRequest,
) -> Result<DiscountInfo, ApiError> {
    AuthorizationService::authorize_manage_discounts(actor)?;

    let discount: Discount = session.apply(|state| {
        grand_prix::create_discount(state, &request.description, request.percentage)
    })?;

    tracing::info!(
        user_id = actor.user_id,
        discount_id = discount.discount_id(),
        percentage = discount.percentage(),
        "Discount created"
    );

    Ok(discount_info(&discount))
}

/// Changes a discount's percentage.
///
/// Tickets already sold keep the discount they were issued with.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the discount does not
/// exist, the percentage is outside `[0, 1]`, or the store cannot be
/// written. The discount is unchanged on error.
pub fn update_discount_percentage(
    session: &mut Session,
    actor: &AuthenticatedActor,
    request: &UpdateDiscountRequest,
) -> Result<DiscountInfo, ApiError> {
    AuthorizationService::authorize_manage_discounts(actor)?;

    let discount: Discount = session.apply(|state| {
        grand_prix::update_discount_percentage(state, request.discount_id, request.percentage)
    })?;

    tracing::info!(
        user_id = actor.user_id,
        discount_id = discount.discount_id(),
        percentage = discount.percentage(),
        "Discount updated"
    );

    Ok(discount_info(&discount))
}

/// Removes a discount.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the discount does not
/// exist, or the store cannot be written.
pub fn delete_discount(
    session: &mut Session,
    actor: &AuthenticatedActor,
    discount_id: u32,
) -> Result<DiscountInfo, ApiError> {
    AuthorizationService::authorize_manage_discounts(actor)?;

    let discount: Discount =
        session.apply(|state| grand_prix::delete_discount(state, discount_id))?;

    tracing::info!(user_id = actor.user_id, discount_id, "Discount deleted");

    Ok(discount_info(&discount))
}

/// Re-prices a sold ticket from a corrected base price.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the ticket does not
/// exist, the price is invalid, or the store cannot be written.
pub fn correct_ticket_price(
    session: &mut Session,
    actor: &AuthenticatedActor,
    request: &CorrectTicketPriceRequest,
) -> Result<TicketInfo, ApiError> {
    AuthorizationService::authorize_correct_ticket(actor)?;

    let ticket: Ticket = session.apply(|state| {
        grand_prix::correct_ticket_price(state, request.ticket_id, request.base_price)
    })?;

    tracing::info!(
        user_id = actor.user_id,
        ticket_id = request.ticket_id,
        price = ticket.price(),
        "Ticket price corrected"
    );

    Ok(ticket_info(&ticket))
}

/// Summarises ticket sales per event.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn sales_summary(
    session: &Session,
    actor: &AuthenticatedActor,
) -> Result<SalesSummaryResponse, ApiError> {
    AuthorizationService::authorize_view_sales(actor)?;

    let events: Vec<EventSalesInfo> = grand_prix::sales_summary(session.state())
        .into_iter()
        .map(|sales: EventSales| EventSalesInfo {
            event_id: sales.event_id,
            event_name: sales.event_name,
            tickets_sold: to_count(sales.tickets_sold),
            revenue: sales.revenue,
        })
        .collect();
    let total_tickets: u32 = events
        .iter()
        .fold(0_u32, |total, sales| total.saturating_add(sales.tickets_sold));
    let total_revenue: f64 = events.iter().map(|sales| sales.revenue).sum();

    Ok(SalesSummaryResponse {
        events,
        total_tickets,
        total_revenue,
    })
}

/// Exports the sales summary as CSV.
///
/// The first row is [`SALES_CSV_HEADER`]; revenue is written with two
/// decimals.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the CSV cannot be
/// written.
pub fn export_sales_csv(session: &Session, actor: &AuthenticatedActor) -> Result<String, ApiError> {
    let summary: SalesSummaryResponse = sales_summary(session, actor)?;
    let csv_error = |e: csv::Error| ApiError::Internal {
        message: format!("Failed to write sales CSV: {e}"),
    };

    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());
    writer.write_record(SALES_CSV_HEADER).map_err(csv_error)?;
    for sales in &summary.events {
        writer
            .write_record([
                sales.event_id.to_string(),
                sales.event_name.clone(),
                sales.tickets_sold.to_string(),
                format!("{:.2}", sales.revenue),
            ])
            .map_err(csv_error)?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to flush sales CSV: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("Sales CSV is not UTF-8: {e}"),
    })
}

/// Reports current venue occupancy.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn venue_status(
    session: &Session,
    actor: &AuthenticatedActor,
) -> Result<VenueStatusResponse, ApiError> {
    AuthorizationService::authorize_view_sales(actor)?;

    let state: &BookingState = session.state();
    let status: VenueStatus = state.venue.status();
    Ok(VenueStatusResponse {
        venue_id: state.venue.venue_id(),
        location: state.venue.location().to_string(),
        capacity: state.venue.capacity(),
        seat_count: to_count(status.seat_count),
        reserved: to_count(status.reserved),
        available: to_count(status.available),
        remaining_capacity: status.remaining_capacity,
    })
}
