// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::payment::PaymentConfirmation;
use crate::state::BookingState;
use grand_prix_domain::{
    Discount, DomainError, PaymentMethod, PaymentRecord, Reservation, SeatId, Ticket,
    TicketVariant, TicketVariantTag, User,
};
use std::collections::HashSet;
use time::OffsetDateTime;

/// What the purchaser asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    /// Seats to hold, reserved in this order.
    pub seats: Vec<SeatId>,
    /// The ticket variant for every seat.
    pub variant: TicketVariantTag,
    /// Party size; required for group tickets, ignored otherwise.
    pub group_size: Option<u32>,
    /// The event the tickets admit to.
    pub event_id: u32,
    /// The purchasing user.
    pub user_id: u32,
    /// A discount to layer on every ticket.
    pub discount_id: Option<u32>,
}

/// Lifecycle of a purchase transaction.
///
/// `Committed` and `RolledBack` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionPhase {
    /// The request has been validated; nothing is held yet.
    Collecting,
    /// Seats are being held.
    Reserving,
    /// Tickets are being priced.
    Pricing,
    /// Tickets are priced and waiting for payment confirmation.
    AwaitingPayment,
    /// Tickets are recorded against the purchaser.
    Committed,
    /// Every hold taken by the transaction was released.
    RolledBack,
}

impl TransactionPhase {
    /// Converts this phase to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Collecting => "Collecting",
            Self::Reserving => "Reserving",
            Self::Pricing => "Pricing",
            Self::AwaitingPayment => "AwaitingPayment",
            Self::Committed => "Committed",
            Self::RolledBack => "RolledBack",
        }
    }

    /// Returns whether no further step can run.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::RolledBack)
    }
}

impl std::fmt::Display for TransactionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of a committed purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseReceipt {
    /// The issued tickets, in seat request order.
    pub tickets: Vec<Ticket>,
    /// Sum of the ticket prices.
    pub total: f64,
    /// The purchase record.
    pub reservation: Reservation,
    /// The payment record.
    pub payment: PaymentRecord,
}

/// An in-flight multi-seat purchase.
///
/// The transaction borrows the booking state mutably for its whole life, so
/// nothing else can touch the seat grid until it finishes. Steps run in
/// order: [`reserve`](Self::reserve), [`price`](Self::price), then
/// [`pay`](Self::pay). A failing step releases every seat this transaction
/// held and leaves it `RolledBack`. Dropping an unfinished transaction does
/// the same.
#[derive(Debug)]
pub struct PurchaseTransaction<'a> {
    state: &'a mut BookingState,
    request: PurchaseRequest,
    variant: TicketVariant,
    base_price: f64,
    discount: Option<Discount>,
    phase: TransactionPhase,
    held: Vec<SeatId>,
    tickets: Vec<Ticket>,
}

impl<'a> PurchaseTransaction<'a> {
    /// Validates a request and opens a transaction for it.
    ///
    /// # Arguments
    ///
    /// * `state` - The booking state the purchase runs against
    /// * `request` - The purchase request
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request names no seats or repeats a seat
    /// - A group request has no party size or one below the minimum
    /// - The user, event or discount does not exist
    pub fn begin(state: &'a mut BookingState, request: PurchaseRequest) -> Result<Self, CoreError> {
        if request.seats.is_empty() {
            return Err(CoreError::EmptyRequest);
        }
        let mut seen: HashSet<SeatId> = HashSet::with_capacity(request.seats.len());
        for seat in &request.seats {
            if !seen.insert(*seat) {
                return Err(CoreError::DuplicateSeat(*seat));
            }
        }

        let variant: TicketVariant = TicketVariant::from_tag(request.variant, request.group_size)?;
        variant.multiplier()?;

        state.user(request.user_id)?;
        let base_price: f64 = state.event(request.event_id)?.base_price();
        let discount: Option<Discount> = request
            .discount_id
            .map(|id| state.discount(id).cloned())
            .transpose()?;

        Ok(Self {
            state,
            request,
            variant,
            base_price,
            discount,
            phase: TransactionPhase::Collecting,
            held: Vec::new(),
            tickets: Vec::new(),
        })
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> TransactionPhase {
        self.phase
    }

    /// Returns the request this transaction serves.
    #[must_use]
    pub const fn request(&self) -> &PurchaseRequest {
        &self.request
    }

    /// Returns the seats currently held by this transaction.
    #[must_use]
    pub fn held_seats(&self) -> &[SeatId] {
        &self.held
    }

    /// Returns the tickets priced so far.
    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Returns the sum of the priced tickets.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.tickets.iter().map(Ticket::price).sum()
    }

    /// Holds every requested seat, or none of them.
    ///
    /// The venue's remaining capacity is checked before any seat is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction is not `Collecting`
    /// - Remaining capacity is below the number of requested seats
    /// - Any seat is missing from the grid or already held
    pub fn reserve(&mut self) -> Result<(), CoreError> {
        self.expect_phase(TransactionPhase::Collecting)?;
        self.phase = TransactionPhase::Reserving;

        let requested: usize = self.request.seats.len();
        let remaining: u32 = self.state.venue.remaining_capacity();
        if usize::try_from(remaining).is_ok_and(|r| r < requested) {
            self.rollback();
            return Err(CoreError::InsufficientCapacity {
                requested,
                remaining,
            });
        }

        let seats: Vec<SeatId> = self.request.seats.clone();
        for seat in seats {
            if let Err(err) = self.state.venue.reserve(seat) {
                self.rollback();
                return Err(err.into());
            }
            self.held.push(seat);
        }
        Ok(())
    }

    /// Issues one ticket per held seat and returns the total.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not `Reserving` or a ticket
    /// cannot be priced.
    pub fn price(&mut self) -> Result<f64, CoreError> {
        self.expect_phase(TransactionPhase::Reserving)?;
        self.phase = TransactionPhase::Pricing;

        let first_id: u64 = self.state.next_ticket_id();
        let issued_at: OffsetDateTime = OffsetDateTime::now_utc();
        let issued: Result<Vec<Ticket>, DomainError> = self
            .held
            .iter()
            .zip(first_id..)
            .map(|(seat, ticket_id)| {
                Ticket::issue(
                    ticket_id,
                    self.base_price,
                    self.variant,
                    Some(*seat),
                    Some(self.request.event_id),
                    self.discount.as_ref(),
                    issued_at,
                )
            })
            .collect();

        match issued {
            Ok(tickets) => {
                self.tickets = tickets;
                self.phase = TransactionPhase::AwaitingPayment;
                Ok(self.total())
            }
            Err(err) => {
                self.rollback();
                Err(err.into())
            }
        }
    }

    /// Asks for payment of the total and commits on confirmation.
    ///
    /// # Arguments
    ///
    /// * `confirmation` - The external payment step
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not `AwaitingPayment` or the
    /// payment is declined, malformed or abandoned. The transaction is rolled
    /// back in every error case.
    pub fn pay<P: PaymentConfirmation + ?Sized>(
        mut self,
        confirmation: &mut P,
    ) -> Result<PurchaseReceipt, CoreError> {
        self.expect_phase(TransactionPhase::AwaitingPayment)?;

        let total: f64 = self.total();
        let method: PaymentMethod = match confirmation.confirm(total) {
            Ok(method) => method,
            Err(failure) => {
                tracing::warn!(
                    user_id = self.request.user_id,
                    total,
                    %failure,
                    "Payment not confirmed"
                );
                self.rollback();
                return Err(failure.into());
            }
        };

        match self.commit(method, total) {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                self.rollback();
                Err(err)
            }
        }
    }

    /// Releases every held seat and discards priced tickets.
    pub fn abandon(mut self) {
        self.rollback();
    }

    fn commit(&mut self, method: PaymentMethod, total: f64) -> Result<PurchaseReceipt, CoreError> {
        let user_id: u32 = self.request.user_id;
        let ticket_ids: Vec<u64> = self.tickets.iter().map(Ticket::ticket_id).collect();
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        let reservation: Reservation = Reservation {
            reservation_id: self.state.next_reservation_id(),
            user_id,
            event_id: self.request.event_id,
            ticket_ids: ticket_ids.clone(),
            seats: self.held.clone(),
            created_at: now,
        };
        let payment: PaymentRecord = PaymentRecord {
            payment_id: self.state.next_payment_id(),
            reservation_id: reservation.reservation_id,
            ticket_ids: ticket_ids.clone(),
            user_id,
            amount: total,
            method,
            paid_at: now,
        };

        let user: &mut User = self.state.user_mut(user_id)?;
        for ticket_id in &ticket_ids {
            user.record_purchase(*ticket_id);
        }

        let tickets: Vec<Ticket> = std::mem::take(&mut self.tickets);
        self.state.tickets.extend(tickets.iter().cloned());
        self.state.reservations.push(reservation.clone());
        self.state.payments.push(payment.clone());

        // The seats now belong to the committed tickets.
        self.held.clear();
        self.phase = TransactionPhase::Committed;

        tracing::debug!(
            user_id,
            reservation_id = reservation.reservation_id,
            tickets = ticket_ids.len(),
            total,
            "Purchase committed"
        );

        Ok(PurchaseReceipt {
            tickets,
            total,
            reservation,
            payment,
        })
    }

    fn rollback(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        let from: TransactionPhase = self.phase;
        let released: usize = self.held.len();
        for seat in self.held.drain(..) {
            if let Err(err) = self.state.venue.release(seat) {
                tracing::warn!(%seat, %err, "Failed to release seat during rollback");
            }
        }
        self.tickets.clear();
        self.phase = TransactionPhase::RolledBack;

        tracing::warn!(
            user_id = self.request.user_id,
            event_id = self.request.event_id,
            %from,
            released,
            "Purchase rolled back"
        );
    }

    fn expect_phase(&self, expected: TransactionPhase) -> Result<(), CoreError> {
        if self.phase != expected {
            return Err(CoreError::InvalidPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }
}

impl Drop for PurchaseTransaction<'_> {
    fn drop(&mut self) {
        if !self.phase.is_terminal() {
            tracing::debug!(phase = %self.phase, "Unfinished purchase dropped");
            self.rollback();
        }
    }
}

/// Runs a purchase end to end: reserve, price, pay and commit.
///
/// # Arguments
///
/// * `state` - The booking state
/// * `request` - The purchase request
/// * `confirmation` - The external payment step
///
/// # Errors
///
/// Returns the first failing step's error. No seat taken by this purchase
/// stays held on failure.
pub fn purchase<P: PaymentConfirmation + ?Sized>(
    state: &mut BookingState,
    request: PurchaseRequest,
    confirmation: &mut P,
) -> Result<PurchaseReceipt, CoreError> {
    let mut transaction: PurchaseTransaction<'_> = PurchaseTransaction::begin(state, request)?;
    transaction.reserve()?;
    transaction.price()?;
    transaction.pay(confirmation)
}
