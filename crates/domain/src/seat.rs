// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifies a seat by its 1-based row and position within the row.
///
/// The display form is `row-number` (e.g. `3-12`), which is also the form
/// accepted by [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatId {
    row: u16,
    number: u16,
}

impl SeatId {
    /// Creates a new `SeatId`.
    ///
    /// # Arguments
    ///
    /// * `row` - The 1-based row
    /// * `number` - The 1-based position within the row
    #[must_use]
    pub const fn new(row: u16, number: u16) -> Self {
        Self { row, number }
    }

    /// Returns the 1-based row.
    #[must_use]
    pub const fn row(&self) -> u16 {
        self.row
    }

    /// Returns the 1-based position within the row.
    #[must_use]
    pub const fn number(&self) -> u16 {
        self.number
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.row, self.number)
    }
}

impl FromStr for SeatId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidSeatId(s.to_string());

        let (row, number) = s.trim().split_once('-').ok_or_else(invalid)?;
        let row: u16 = row.trim().parse().map_err(|_| invalid())?;
        let number: u16 = number.trim().parse().map_err(|_| invalid())?;

        if row == 0 || number == 0 {
            return Err(invalid());
        }

        Ok(Self::new(row, number))
    }
}

/// A single seat and its reservation flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    id: SeatId,
    reserved: bool,
}

impl Seat {
    /// Creates a new, free seat.
    #[must_use]
    pub const fn new(id: SeatId) -> Self {
        Self {
            id,
            reserved: false,
        }
    }

    /// Returns the seat identity.
    #[must_use]
    pub const fn id(&self) -> SeatId {
        self.id
    }

    /// Returns whether the seat is currently held.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        self.reserved
    }

    /// Marks the seat as held.
    ///
    /// Returns `true` if the seat was free and is now held, `false` if it
    /// was already held (in which case nothing changes).
    pub const fn reserve(&mut self) -> bool {
        if self.reserved {
            return false;
        }
        self.reserved = true;
        true
    }

    /// Marks the seat as free, whatever its previous state.
    pub const fn release(&mut self) {
        self.reserved = false;
    }
}
