// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::seat::SeatId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The record of one committed purchase.
///
/// A reservation lists the tickets it issued that are still live. When the
/// last ticket is cancelled the reservation is empty and can be dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// The reservation identifier.
    pub reservation_id: u64,
    /// The purchasing user.
    pub user_id: u32,
    /// The event the tickets admit to.
    pub event_id: u32,
    /// Live tickets issued by this purchase.
    pub ticket_ids: Vec<u64>,
    /// Seats held by those tickets.
    pub seats: Vec<SeatId>,
    /// When the purchase committed.
    pub created_at: OffsetDateTime,
}

impl Reservation {
    /// Drops a ticket and its seat from this record.
    ///
    /// Returns `true` if the ticket belonged to this reservation.
    pub fn remove_ticket(&mut self, ticket_id: u64, seat: Option<SeatId>) -> bool {
        let before: usize = self.ticket_ids.len();
        self.ticket_ids.retain(|id| *id != ticket_id);
        if let Some(seat) = seat {
            self.seats.retain(|held| *held != seat);
        }
        self.ticket_ids.len() != before
    }

    /// Returns whether every ticket of this reservation has been cancelled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticket_ids.is_empty()
    }
}
