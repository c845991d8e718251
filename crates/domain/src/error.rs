// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::seat::SeatId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A venue was declared with an empty seat grid.
    InvalidVenueLayout {
        /// The declared row count.
        rows: u16,
        /// The declared seats-per-row count.
        seats_per_row: u16,
    },
    /// A seat reference could not be parsed.
    InvalidSeatId(String),
    /// The seat does not exist in the venue grid.
    SeatNotFound(SeatId),
    /// The seat is already held by another purchase.
    SeatAlreadyReserved(SeatId),
    /// A ticket variant name could not be parsed.
    InvalidTicketVariant(String),
    /// A group ticket was requested without a party size.
    MissingGroupSize,
    /// The group party size is outside the policy bounds.
    InvalidGroupSize {
        /// The requested party size.
        size: u32,
        /// The smallest accepted party size.
        minimum: u32,
    },
    /// A discount percentage outside `[0, 1]`.
    InvalidDiscountPercentage(f64),
    /// A base price that is negative or not finite.
    InvalidPrice(f64),
    /// Payment details failed the format check.
    InvalidPaymentDetails {
        /// The offending field.
        field: &'static str,
        /// Why the field was rejected.
        reason: String,
    },
    /// A payment method name could not be parsed.
    InvalidPaymentMethod(String),
    /// Email address is malformed.
    InvalidEmail(String),
    /// Email address is already registered.
    DuplicateEmail(String),
    /// User name is empty or invalid.
    InvalidName(String),
    /// A role name could not be parsed.
    InvalidRole(String),
    /// Event name is empty or invalid.
    InvalidEventName(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidVenueLayout {
                rows,
                seats_per_row,
            } => {
                write!(
                    f,
                    "Invalid venue layout: {rows} rows of {seats_per_row} seats. Both must be greater than 0"
                )
            }
            Self::InvalidSeatId(raw) => {
                write!(f, "Invalid seat reference '{raw}': expected 'row-number'")
            }
            Self::SeatNotFound(seat) => write!(f, "Seat {seat} does not exist in this venue"),
            Self::SeatAlreadyReserved(seat) => write!(f, "Seat {seat} is already reserved"),
            Self::InvalidTicketVariant(raw) => write!(f, "Unknown ticket variant '{raw}'"),
            Self::MissingGroupSize => write!(f, "Group tickets require a party size"),
            Self::InvalidGroupSize { size, minimum } => {
                write!(
                    f,
                    "Invalid group size: {size}. Groups must have at least {minimum} people"
                )
            }
            Self::InvalidDiscountPercentage(percentage) => {
                write!(
                    f,
                    "Invalid discount percentage: {percentage}. Must be between 0 and 1"
                )
            }
            Self::InvalidPrice(price) => {
                write!(f, "Invalid price: {price}. Must be a finite, non-negative amount")
            }
            Self::InvalidPaymentDetails { field, reason } => {
                write!(f, "Invalid payment details ({field}): {reason}")
            }
            Self::InvalidPaymentMethod(raw) => write!(f, "Unknown payment method '{raw}'"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::DuplicateEmail(email) => write!(f, "Email '{email}' is already registered"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidRole(raw) => write!(f, "Unknown role '{raw}'"),
            Self::InvalidEventName(msg) => write!(f, "Invalid event name: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
