// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::BookingState;
use grand_prix_domain::{Reservation, Ticket};

/// Cancels one of a user's tickets.
///
/// The bound seat is released and the ticket is removed from the global
/// ticket collection, the user's history and the reservation that issued
/// it. A reservation left with no tickets is dropped; its payment record is
/// kept.
///
/// # Arguments
///
/// * `state` - The booking state
/// * `user_id` - The ticket holder
/// * `ticket_id` - The ticket to cancel
///
/// # Returns
///
/// The cancelled ticket.
///
/// # Errors
///
/// Returns an error if the user does not exist or does not hold the ticket.
/// Nothing is changed on error.
pub fn cancel_ticket(
    state: &mut BookingState,
    user_id: u32,
    ticket_id: u64,
) -> Result<Ticket, CoreError> {
    if !state.user(user_id)?.history().contains(&ticket_id) {
        return Err(CoreError::TicketNotFound(ticket_id));
    }
    let index: usize = state
        .tickets
        .iter()
        .position(|ticket| ticket.ticket_id() == ticket_id)
        .ok_or(CoreError::TicketNotFound(ticket_id))?;

    if let Some(seat) = state.tickets[index].seat() {
        state.venue.release(seat)?;
    }

    let ticket: Ticket = state.tickets.remove(index);
    state.user_mut(user_id)?.remove_from_history(ticket_id);
    for reservation in &mut state.reservations {
        reservation.remove_ticket(ticket_id, ticket.seat());
    }
    state.reservations.retain(|reservation| !reservation.is_empty());

    tracing::debug!(user_id, ticket_id, seat = ?ticket.seat(), "Ticket cancelled");
    Ok(ticket)
}

/// Cancels every ticket a reservation still holds.
///
/// # Errors
///
/// Returns `CoreError::ReservationNotFound` if the reservation does not
/// exist or belongs to another user.
pub fn cancel_reservation(
    state: &mut BookingState,
    user_id: u32,
    reservation_id: u64,
) -> Result<Vec<Ticket>, CoreError> {
    let reservation: &Reservation = state
        .reservations
        .iter()
        .find(|r| r.reservation_id == reservation_id && r.user_id == user_id)
        .ok_or(CoreError::ReservationNotFound(reservation_id))?;
    let ticket_ids: Vec<u64> = reservation.ticket_ids.clone();

    ticket_ids
        .into_iter()
        .map(|ticket_id| cancel_ticket(state, user_id, ticket_id))
        .collect()
}
