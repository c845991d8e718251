// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use grand_prix_domain::{Discount, Event, PaymentRecord, Reservation, Ticket, User, Venue};

/// Everything a booking session owns.
///
/// The venue's seat flags are authoritative for availability. Every other
/// collection is a flat list keyed by numeric id; ids are allocated as
/// `max + 1` of the collection. Ticket and reservation ids also count the
/// payment records, which outlive cancellation, so a cancelled id is never
/// handed out again.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingState {
    /// The venue and its seat grid.
    pub venue: Venue,
    /// Scheduled events.
    pub events: Vec<Event>,
    /// Registered accounts.
    pub users: Vec<User>,
    /// Live tickets across all users.
    pub tickets: Vec<Ticket>,
    /// Discounts that can be applied at purchase.
    pub discounts: Vec<Discount>,
    /// Committed purchase records.
    pub reservations: Vec<Reservation>,
    /// Confirmed payments.
    pub payments: Vec<PaymentRecord>,
}

impl BookingState {
    /// Creates an empty state around a venue.
    #[must_use]
    pub const fn new(venue: Venue) -> Self {
        Self {
            venue,
            events: Vec::new(),
            users: Vec::new(),
            tickets: Vec::new(),
            discounts: Vec::new(),
            reservations: Vec::new(),
            payments: Vec::new(),
        }
    }

    /// Re-derives the venue's seat holds from the live tickets.
    ///
    /// Every seat is released, then every seat bound to a ticket is held
    /// again. A state with no tickets therefore has no held seats.
    ///
    /// # Errors
    ///
    /// Returns an error if a ticket names a seat outside the grid or two
    /// tickets name the same seat.
    pub fn rebuild_seat_holds(&mut self) -> Result<(), CoreError> {
        self.venue.release_all();
        for seat in self.tickets.iter().filter_map(Ticket::seat) {
            self.venue.reserve(seat)?;
        }
        Ok(())
    }

    /// Looks up an event.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EventNotFound` if no event has this id.
    pub fn event(&self, event_id: u32) -> Result<&Event, CoreError> {
        self.events
            .iter()
            .find(|event| event.event_id() == event_id)
            .ok_or(CoreError::EventNotFound(event_id))
    }

    /// Looks up a user.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UserNotFound` if no user has this id.
    pub fn user(&self, user_id: u32) -> Result<&User, CoreError> {
        self.users
            .iter()
            .find(|user| user.user_id() == user_id)
            .ok_or(CoreError::UserNotFound(user_id))
    }

    pub(crate) fn user_mut(&mut self, user_id: u32) -> Result<&mut User, CoreError> {
        self.users
            .iter_mut()
            .find(|user| user.user_id() == user_id)
            .ok_or(CoreError::UserNotFound(user_id))
    }

    /// Looks up a user by email, ignoring case.
    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        let normalized: String = email.trim().to_lowercase();
        self.users.iter().find(|user| user.email() == normalized)
    }

    /// Looks up a discount.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DiscountNotFound` if no discount has this id.
    pub fn discount(&self, discount_id: u32) -> Result<&Discount, CoreError> {
        self.discounts
            .iter()
            .find(|discount| discount.discount_id() == discount_id)
            .ok_or(CoreError::DiscountNotFound(discount_id))
    }

    /// Looks up a ticket.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::TicketNotFound` if no live ticket has this id.
    pub fn ticket(&self, ticket_id: u64) -> Result<&Ticket, CoreError> {
        self.tickets
            .iter()
            .find(|ticket| ticket.ticket_id() == ticket_id)
            .ok_or(CoreError::TicketNotFound(ticket_id))
    }

    /// Returns a user's live tickets in purchase order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UserNotFound` if the user does not exist.
    pub fn purchase_history(&self, user_id: u32) -> Result<Vec<&Ticket>, CoreError> {
        let user: &User = self.user(user_id)?;
        Ok(user
            .history()
            .iter()
            .filter_map(|id| self.tickets.iter().find(|t| t.ticket_id() == *id))
            .collect())
    }

    /// Counts live tickets admitting to an event.
    #[must_use]
    pub fn tickets_sold(&self, event_id: u32) -> usize {
        self.tickets
            .iter()
            .filter(|ticket| ticket.event_id() == Some(event_id))
            .count()
    }

    #[must_use]
    pub(crate) fn next_user_id(&self) -> u32 {
        self.users.iter().map(User::user_id).max().unwrap_or(0) + 1
    }

    #[must_use]
    pub(crate) fn next_event_id(&self) -> u32 {
        self.events.iter().map(Event::event_id).max().unwrap_or(0) + 1
    }

    #[must_use]
    pub(crate) fn next_discount_id(&self) -> u32 {
        self.discounts
            .iter()
            .map(Discount::discount_id)
            .max()
            .unwrap_or(0)
            + 1
    }

    #[must_use]
    pub(crate) fn next_ticket_id(&self) -> u64 {
        self.tickets
            .iter()
            .map(Ticket::ticket_id)
            .chain(self.payments.iter().flat_map(|p| p.ticket_ids.iter().copied()))
            .max()
            .unwrap_or(0)
            + 1
    }

    #[must_use]
    pub(crate) fn next_reservation_id(&self) -> u64 {
        self.reservations
            .iter()
            .map(|r| r.reservation_id)
            .chain(self.payments.iter().map(|p| p.reservation_id))
            .max()
            .unwrap_or(0)
            + 1
    }

    #[must_use]
    pub(crate) fn next_payment_id(&self) -> u64 {
        self.payments
            .iter()
            .map(|p| p.payment_id)
            .max()
            .unwrap_or(0)
            + 1
    }
}
