// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::discount::Discount;
use crate::error::DomainError;
use crate::pricing::{TicketVariant, calculate_price};
use crate::seat::SeatId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A priced ticket, bound to at most one seat and one event.
///
/// The final price is computed once at issue time from the base price, the
/// variant and the optional discount. The discount is stored as it was at
/// issue time so later edits to the discount do not change sold tickets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    ticket_id: u64,
    base_price: f64,
    price: f64,
    issued_at: OffsetDateTime,
    variant: TicketVariant,
    seat: Option<SeatId>,
    event_id: Option<u32>,
    discount: Option<Discount>,
}

impl Ticket {
    /// Issues a new ticket, computing its final price.
    ///
    /// # Arguments
    ///
    /// * `ticket_id` - The ticket identifier
    /// * `base_price` - The base price before any discount
    /// * `variant` - The variant that selects the pricing rule
    /// * `seat` - The seat this ticket holds, if any
    /// * `event_id` - The event this ticket admits to, if any
    /// * `discount` - An optional discount entity
    /// * `issued_at` - The issue timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be computed.
    pub fn issue(
        ticket_id: u64,
        base_price: f64,
        variant: TicketVariant,
        seat: Option<SeatId>,
        event_id: Option<u32>,
        discount: Option<&Discount>,
        issued_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let price: f64 = calculate_price(base_price, variant, discount)?;
        Ok(Self {
            ticket_id,
            base_price,
            price,
            issued_at,
            variant,
            seat,
            event_id,
            discount: discount.cloned(),
        })
    }

    /// Returns the ticket identifier.
    #[must_use]
    pub const fn ticket_id(&self) -> u64 {
        self.ticket_id
    }

    /// Returns the base price before any discount.
    #[must_use]
    pub const fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Returns the final price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Returns the issue timestamp.
    #[must_use]
    pub const fn issued_at(&self) -> OffsetDateTime {
        self.issued_at
    }

    /// Returns the variant.
    #[must_use]
    pub const fn variant(&self) -> TicketVariant {
        self.variant
    }

    /// Returns the bound seat, if any.
    #[must_use]
    pub const fn seat(&self) -> Option<SeatId> {
        self.seat
    }

    /// Returns the event reference, if any.
    #[must_use]
    pub const fn event_id(&self) -> Option<u32> {
        self.event_id
    }

    /// Returns the discount applied at issue time, if any.
    #[must_use]
    pub const fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    /// Re-prices the ticket from a corrected base price.
    ///
    /// The variant and the stored discount are kept. Only administrative
    /// correction should call this.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be computed; the ticket is
    /// unchanged on error.
    pub fn correct_base_price(&mut self, base_price: f64) -> Result<(), DomainError> {
        self.price = calculate_price(base_price, self.variant, self.discount.as_ref())?;
        self.base_price = base_price;
        Ok(())
    }
}
