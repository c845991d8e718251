// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::seat::{Seat, SeatId};
use serde::{Deserialize, Serialize};

/// A racing venue and the seat grid it owns.
///
/// The grid always holds exactly `rows * seats_per_row` seats. The declared
/// `capacity` is advisory: it is set independently of the grid and is only
/// used for the remaining-capacity gate. Seat flags are authoritative for
/// availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VenueRecord", into = "VenueRecord")]
pub struct Venue {
    venue_id: u32,
    location: String,
    capacity: u32,
    rows: u16,
    seats_per_row: u16,
    seats: Vec<Vec<Seat>>,
}

/// Point-in-time occupancy figures for a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueStatus {
    /// Number of seats in the grid.
    pub seat_count: usize,
    /// Number of seats currently held.
    pub reserved: usize,
    /// Number of seats currently free.
    pub available: usize,
    /// Declared capacity minus held seats.
    pub remaining_capacity: u32,
}

impl Venue {
    /// Creates a venue with a fully free seat grid.
    ///
    /// # Arguments
    ///
    /// * `venue_id` - The venue identifier
    /// * `location` - A human-readable location label
    /// * `capacity` - The advisory capacity
    /// * `rows` - Number of seat rows
    /// * `seats_per_row` - Number of seats in each row
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidVenueLayout` if either grid dimension is 0.
    pub fn new(
        venue_id: u32,
        location: &str,
        capacity: u32,
        rows: u16,
        seats_per_row: u16,
    ) -> Result<Self, DomainError> {
        if rows == 0 || seats_per_row == 0 {
            return Err(DomainError::InvalidVenueLayout {
                rows,
                seats_per_row,
            });
        }

        let seats: Vec<Vec<Seat>> = (1..=rows)
            .map(|row| {
                (1..=seats_per_row)
                    .map(|number| Seat::new(SeatId::new(row, number)))
                    .collect()
            })
            .collect();

        Ok(Self {
            venue_id,
            location: location.to_string(),
            capacity,
            rows,
            seats_per_row,
            seats,
        })
    }

    /// Returns the venue identifier.
    #[must_use]
    pub const fn venue_id(&self) -> u32 {
        self.venue_id
    }

    /// Returns the location label.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the advisory capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Returns the number of seats in each row.
    #[must_use]
    pub const fn seats_per_row(&self) -> u16 {
        self.seats_per_row
    }

    /// Iterates every seat in row-major order.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().flatten()
    }

    /// Looks up a seat by identity.
    #[must_use]
    pub fn seat(&self, seat_id: SeatId) -> Option<&Seat> {
        let (row, number) = Self::grid_index(seat_id)?;
        self.seats.get(row)?.get(number)
    }

    fn seat_mut(&mut self, seat_id: SeatId) -> Result<&mut Seat, DomainError> {
        Self::grid_index(seat_id)
            .and_then(|(row, number)| self.seats.get_mut(row)?.get_mut(number))
            .ok_or(DomainError::SeatNotFound(seat_id))
    }

    fn grid_index(seat_id: SeatId) -> Option<(usize, usize)> {
        let row: usize = usize::from(seat_id.row().checked_sub(1)?);
        let number: usize = usize::from(seat_id.number().checked_sub(1)?);
        Some((row, number))
    }

    /// Returns every free seat in row-major order.
    #[must_use]
    pub fn available_seats(&self) -> Vec<&Seat> {
        self.seats().filter(|seat| !seat.is_reserved()).collect()
    }

    /// Returns whether a seat is currently held.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SeatNotFound` if the seat is outside the grid.
    pub fn is_reserved(&self, seat_id: SeatId) -> Result<bool, DomainError> {
        self.seat(seat_id)
            .map(Seat::is_reserved)
            .ok_or(DomainError::SeatNotFound(seat_id))
    }

    /// Holds a free seat.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The seat is outside the grid
    /// - The seat is already held (nothing changes)
    pub fn reserve(&mut self, seat_id: SeatId) -> Result<(), DomainError> {
        if self.seat_mut(seat_id)?.reserve() {
            Ok(())
        } else {
            Err(DomainError::SeatAlreadyReserved(seat_id))
        }
    }

    /// Frees a seat regardless of its previous state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SeatNotFound` if the seat is outside the grid.
    pub fn release(&mut self, seat_id: SeatId) -> Result<(), DomainError> {
        self.seat_mut(seat_id)?.release();
        Ok(())
    }

    /// Frees every seat in the grid.
    pub fn release_all(&mut self) {
        self.seats
            .iter_mut()
            .flatten()
            .for_each(Seat::release);
    }

    /// Returns the number of seats in the grid.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        usize::from(self.rows) * usize::from(self.seats_per_row)
    }

    /// Returns the number of held seats.
    #[must_use]
    pub fn reserved_count(&self) -> usize {
        self.seats().filter(|seat| seat.is_reserved()).count()
    }

    /// Returns the number of free seats.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.seat_count() - self.reserved_count()
    }

    /// Returns the declared capacity minus the number of held seats.
    ///
    /// Saturates at 0 when more seats are held than the declared capacity.
    #[must_use]
    pub fn remaining_capacity(&self) -> u32 {
        let reserved: u32 = u32::try_from(self.reserved_count()).unwrap_or(u32::MAX);
        self.capacity.saturating_sub(reserved)
    }

    /// Summarises current occupancy.
    #[must_use]
    pub fn status(&self) -> VenueStatus {
        let reserved: usize = self.reserved_count();
        VenueStatus {
            seat_count: self.seat_count(),
            reserved,
            available: self.seat_count() - reserved,
            remaining_capacity: self.remaining_capacity(),
        }
    }
}

/// Serialized form of a venue: the layout plus the held seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VenueRecord {
    venue_id: u32,
    location: String,
    capacity: u32,
    rows: u16,
    seats_per_row: u16,
    reserved: Vec<SeatId>,
}

impl From<Venue> for VenueRecord {
    fn from(venue: Venue) -> Self {
        let reserved: Vec<SeatId> = venue
            .seats()
            .filter(|seat| seat.is_reserved())
            .map(Seat::id)
            .collect();
        Self {
            venue_id: venue.venue_id,
            location: venue.location,
            capacity: venue.capacity,
            rows: venue.rows,
            seats_per_row: venue.seats_per_row,
            reserved,
        }
    }
}

impl TryFrom<VenueRecord> for Venue {
    type Error = DomainError;

    fn try_from(record: VenueRecord) -> Result<Self, Self::Error> {
        let mut venue: Self = Self::new(
            record.venue_id,
            &record.location,
            record.capacity,
            record.rows,
            record.seats_per_row,
        )?;
        for seat_id in record.reserved {
            venue.reserve(seat_id)?;
        }
        Ok(venue)
    }
}
