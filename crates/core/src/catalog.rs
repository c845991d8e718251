// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account, event and discount bookkeeping plus sales aggregation.
//!
//! These operations do not check authorization; callers are expected to
//! have done so.

use crate::error::CoreError;
use crate::state::BookingState;
use grand_prix_domain::{
    Discount, Event, Role, Ticket, User, validate_email, validate_email_unique, validate_name,
};
use time::Date;

/// Ticket count and revenue for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSales {
    /// The event identifier.
    pub event_id: u32,
    /// The event name.
    pub event_name: String,
    /// Number of live tickets.
    pub tickets_sold: usize,
    /// Sum of the live tickets' final prices.
    pub revenue: f64,
}

/// Adds a user account.
///
/// # Arguments
///
/// * `state` - The booking state
/// * `name` - The display name
/// * `email` - The login email
/// * `password_hash` - The already-hashed password
/// * `role` - The account role
///
/// # Errors
///
/// Returns an error if the name is blank, or the email is malformed or
/// already registered.
pub fn register_user(
    state: &mut BookingState,
    name: &str,
    email: &str,
    password_hash: String,
    role: Role,
) -> Result<User, CoreError> {
    validate_name(name)?;
    validate_email(email)?;
    validate_email_unique(&state.users, email)?;

    let user: User = User::new(state.next_user_id(), name, email, password_hash, role);
    state.users.push(user.clone());
    Ok(user)
}

/// Schedules a new event.
///
/// # Errors
///
/// Returns an error if the name is blank or the base price is invalid.
pub fn create_event(
    state: &mut BookingState,
    name: &str,
    date: Date,
    base_price: f64,
) -> Result<Event, CoreError> {
    let event: Event = Event::new(state.next_event_id(), name, date, base_price)?;
    state.events.push(event.clone());
    Ok(event)
}

/// Replaces an event's name, date and base price.
///
/// Tickets already sold keep the price they were issued at.
///
/// # Errors
///
/// Returns an error if the event does not exist or a field is invalid.
pub fn update_event(
    state: &mut BookingState,
    event_id: u32,
    name: &str,
    date: Date,
    base_price: f64,
) -> Result<Event, CoreError> {
    let event: &mut Event = state
        .events
        .iter_mut()
        .find(|event| event.event_id() == event_id)
        .ok_or(CoreError::EventNotFound(event_id))?;
    event.update(name, date, base_price)?;
    Ok(event.clone())
}

/// Removes an event that has no live tickets.
///
/// # Errors
///
/// Returns an error if the event does not exist or tickets for it are still
/// live.
pub fn delete_event(state: &mut BookingState, event_id: u32) -> Result<Event, CoreError> {
    let index: usize = state
        .events
        .iter()
        .position(|event| event.event_id() == event_id)
        .ok_or(CoreError::EventNotFound(event_id))?;
    let tickets_sold: usize = state.tickets_sold(event_id);
    if tickets_sold > 0 {
        return Err(CoreError::EventHasSales {
            event_id,
            tickets_sold,
        });
    }
    Ok(state.events.remove(index))
}

/// Adds a discount.
///
/// # Errors
///
/// Returns an error if the percentage is outside `[0, 1]`.
pub fn create_discount(
    state: &mut BookingState,
    description: &str,
    percentage: f64,
) -> Result<Discount, CoreError> {
    let discount: Discount = Discount::new(state.next_discount_id(), description, percentage)?;
    state.discounts.push(discount.clone());
    Ok(discount)
}

/// Changes a discount's percentage.
///
/// Sold tickets keep the discount they were issued with.
///
/// # Errors
///
/// Returns an error if the discount does not exist or the percentage is
/// outside `[0, 1]`; the discount is unchanged on error.
pub fn update_discount_percentage(
    state: &mut BookingState,
    discount_id: u32,
    percentage: f64,
) -> Result<Discount, CoreError> {
    let discount: &mut Discount = state
        .discounts
        .iter_mut()
        .find(|discount| discount.discount_id() == discount_id)
        .ok_or(CoreError::DiscountNotFound(discount_id))?;
    discount.set_percentage(percentage)?;
    Ok(discount.clone())
}

/// Removes a discount.
///
/// # Errors
///
/// Returns `CoreError::DiscountNotFound` if the discount does not exist.
pub fn delete_discount(state: &mut BookingState, discount_id: u32) -> Result<Discount, CoreError> {
    let index: usize = state
        .discounts
        .iter()
        .position(|discount| discount.discount_id() == discount_id)
        .ok_or(CoreError::DiscountNotFound(discount_id))?;
    Ok(state.discounts.remove(index))
}

/// Re-prices a committed ticket from a corrected base price.
///
/// # Errors
///
/// Returns an error if the ticket does not exist or the price is invalid.
pub fn correct_ticket_price(
    state: &mut BookingState,
    ticket_id: u64,
    base_price: f64,
) -> Result<Ticket, CoreError> {
    let ticket: &mut Ticket = state
        .tickets
        .iter_mut()
        .find(|ticket| ticket.ticket_id() == ticket_id)
        .ok_or(CoreError::TicketNotFound(ticket_id))?;
    ticket.correct_base_price(base_price)?;
    Ok(ticket.clone())
}

/// Aggregates live tickets per event, ordered by event id.
///
/// Every scheduled event appears, including those with no sales.
#[must_use]
pub fn sales_summary(state: &BookingState) -> Vec<EventSales> {
    let mut summary: Vec<EventSales> = state
        .events
        .iter()
        .map(|event| {
            let sold = state
                .tickets
                .iter()
                .filter(|ticket| ticket.event_id() == Some(event.event_id()));
            let (tickets_sold, revenue) = sold.fold((0_usize, 0.0_f64), |(count, sum), t| {
                (count + 1, sum + t.price())
            });
            EventSales {
                event_id: event.event_id(),
                event_name: event.name().to_string(),
                tickets_sold,
                revenue,
            }
        })
        .collect();
    summary.sort_by_key(|sales| sales.event_id);
    summary
}
