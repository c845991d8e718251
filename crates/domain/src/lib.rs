// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod discount;
mod error;
mod event;
mod payment;
mod pricing;
mod reservation;
mod seat;
mod ticket;
mod user;
mod validation;
mod venue;

#[cfg(test)]
mod tests;

// Re-export public types
pub use discount::Discount;
pub use error::DomainError;
pub use event::{Event, parse_event_date};
pub use payment::{PaymentDetails, PaymentMethod, PaymentRecord};
pub use pricing::{
    MIN_GROUP_SIZE, SEASON_MULTIPLIER, SINGLE_RACE_MULTIPLIER, TicketVariant, TicketVariantTag,
    WEEKEND_MULTIPLIER, calculate_price, group_multiplier, validate_base_price,
};
pub use reservation::Reservation;
pub use seat::{Seat, SeatId};
pub use ticket::Ticket;
pub use user::{Role, User};
pub use validation::{validate_email, validate_email_unique, validate_name};
pub use venue::{Venue, VenueStatus};
