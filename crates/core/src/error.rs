// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::transaction::TransactionPhase;
use grand_prix_domain::{DomainError, SeatId};

/// Errors that can occur while mutating booking state.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A purchase request named no seats.
    EmptyRequest,
    /// A purchase request named the same seat more than once.
    DuplicateSeat(SeatId),
    /// The venue's advisory capacity cannot cover the request.
    InsufficientCapacity {
        /// Seats requested by the purchase.
        requested: usize,
        /// Capacity left before the purchase.
        remaining: u32,
    },
    /// The payment confirmation declined the charge.
    PaymentDeclined(String),
    /// The purchaser abandoned the payment step.
    PaymentAbandoned,
    /// A transaction step was called out of order.
    InvalidPhase {
        /// The phase the step requires.
        expected: TransactionPhase,
        /// The phase the transaction was in.
        actual: TransactionPhase,
    },
    /// The event does not exist.
    EventNotFound(u32),
    /// The user does not exist.
    UserNotFound(u32),
    /// The discount does not exist.
    DiscountNotFound(u32),
    /// The ticket does not exist or does not belong to the user.
    TicketNotFound(u64),
    /// The reservation does not exist or does not belong to the user.
    ReservationNotFound(u64),
    /// The event still has sold tickets.
    EventHasSales {
        /// The event identifier.
        event_id: u32,
        /// Number of live tickets for the event.
        tickets_sold: usize,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::EmptyRequest => write!(f, "A purchase must include at least one seat"),
            Self::DuplicateSeat(seat) => {
                write!(f, "Seat {seat} appears more than once in the request")
            }
            Self::InsufficientCapacity {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "Insufficient capacity: {requested} seats requested, {remaining} remaining"
                )
            }
            Self::PaymentDeclined(reason) => write!(f, "Payment declined: {reason}"),
            Self::PaymentAbandoned => write!(f, "Payment was abandoned before confirmation"),
            Self::InvalidPhase { expected, actual } => {
                write!(
                    f,
                    "Transaction step requires phase {expected}, but the transaction is {actual}"
                )
            }
            Self::EventNotFound(id) => write!(f, "Event {id} not found"),
            Self::UserNotFound(id) => write!(f, "User {id} not found"),
            Self::DiscountNotFound(id) => write!(f, "Discount {id} not found"),
            Self::TicketNotFound(id) => write!(f, "Ticket {id} not found"),
            Self::ReservationNotFound(id) => write!(f, "Reservation {id} not found"),
            Self::EventHasSales {
                event_id,
                tickets_sold,
            } => {
                write!(
                    f,
                    "Event {event_id} cannot be deleted: {tickets_sold} tickets have been sold"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
