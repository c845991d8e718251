// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use time::{Date, OffsetDateTime};

/// API request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    /// The display name.
    pub name: String,
    /// The login email.
    pub email: String,
    /// The plain-text password; only its hash is stored.
    pub password: String,
    /// The admin registration code, if the account should be an admin.
    pub admin_code: Option<String>,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// The login email.
    pub email: String,
    /// The plain-text password.
    pub password: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterUserResponse {
    /// The new user identifier.
    pub user_id: u32,
    /// The display name.
    pub name: String,
    /// The normalized email.
    pub email: String,
    /// The granted role (`Customer` or `Admin`).
    pub role: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// Token identifying this login for later calls.
    pub session_token: String,
    /// The user identifier.
    pub user_id: u32,
    /// The display name.
    pub name: String,
    /// The account role.
    pub role: String,
    /// What the user may do.
    pub capabilities: Capabilities,
}

/// API request to buy tickets for one event.
///
/// The purchaser is the authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseTicketsRequest {
    /// Seat references in `row-number` form, e.g. `3-12`.
    pub seats: Vec<String>,
    /// The ticket variant (`SingleRace`, `Weekend`, `Season`, `Group`).
    pub variant: String,
    /// Party size; required for `Group`.
    pub group_size: Option<u32>,
    /// The event to attend.
    pub event_id: u32,
    /// A discount to apply to every ticket.
    pub discount_id: Option<u32>,
}

/// A ticket as shown to the presentation layer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TicketInfo {
    /// The ticket identifier.
    pub ticket_id: u64,
    /// The seat reference, if the ticket holds a seat.
    pub seat: Option<String>,
    /// The event the ticket admits to.
    pub event_id: Option<u32>,
    /// Human-readable variant, e.g. `Weekend` or `Group (5 people)`.
    pub variant: String,
    /// The base price before any discount.
    pub base_price: f64,
    /// The final price paid.
    pub price: f64,
    /// The discount applied, if any.
    pub discount_id: Option<u32>,
    /// When the ticket was issued.
    pub issued_at: OffsetDateTime,
}

/// API response for a committed purchase.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PurchaseResponse {
    /// The purchase record identifier.
    pub reservation_id: u64,
    /// The payment record identifier.
    pub payment_id: u64,
    /// The issued tickets.
    pub tickets: Vec<TicketInfo>,
    /// Sum of the ticket prices.
    pub total: f64,
    /// A success message.
    pub message: String,
}

/// API response for a cancellation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CancelResponse {
    /// The cancelled tickets.
    pub cancelled: Vec<TicketInfo>,
    /// Seats released by the cancellation.
    pub released_seats: Vec<String>,
    /// A success message.
    pub message: String,
}

/// API response listing a user's tickets in purchase order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PurchaseHistoryResponse {
    /// The user identifier.
    pub user_id: u32,
    /// The user's live tickets.
    pub tickets: Vec<TicketInfo>,
}

/// Free seats of the venue.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeatMapResponse {
    /// Number of rows.
    pub rows: u16,
    /// Seats in each row.
    pub seats_per_row: u16,
    /// Free seat references in row-major order.
    pub available: Vec<String>,
}

/// An event as shown to the presentation layer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EventInfo {
    /// The event identifier.
    pub event_id: u32,
    /// The event name.
    pub name: String,
    /// The race date.
    pub date: Date,
    /// The base ticket price.
    pub base_price: f64,
    /// One-line description.
    pub details: String,
}

/// API request to create an event.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEventRequest {
    /// The event name.
    pub name: String,
    /// The race date as `YYYY-MM-DD`.
    pub date: String,
    /// The base ticket price.
    pub base_price: f64,
}

/// API request to replace an event's details.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEventRequest {
    /// The event to update.
    pub event_id: u32,
    /// The new name.
    pub name: String,
    /// The new race date as `YYYY-MM-DD`.
    pub date: String,
    /// The new base ticket price.
    pub base_price: f64,
}

/// A discount as shown to the presentation layer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DiscountInfo {
    /// The discount identifier.
    pub discount_id: u32,
    /// The description.
    pub description: String,
    /// Fraction taken off, in `[0, 1]`.
    pub percentage: f64,
}

/// API request to create a discount.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDiscountRequest {
    /// The description.
    pub description: String,
    /// Fraction taken off, in `[0, 1]`.
    pub percentage: f64,
}

/// API request to change a discount's percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateDiscountRequest {
    /// The discount to change.
    pub discount_id: u32,
    /// The new fraction taken off, in `[0, 1]`.
    pub percentage: f64,
}

/// API request to re-price a sold ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectTicketPriceRequest {
    /// The ticket to correct.
    pub ticket_id: u64,
    /// The corrected base price.
    pub base_price: f64,
}

/// Sales figures for one event.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EventSalesInfo {
    /// The event identifier.
    pub event_id: u32,
    /// The event name.
    pub event_name: String,
    /// Live tickets sold.
    pub tickets_sold: u32,
    /// Revenue from live tickets.
    pub revenue: f64,
}

/// API response for the sales summary.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SalesSummaryResponse {
    /// Per-event figures ordered by event id.
    pub events: Vec<EventSalesInfo>,
    /// Tickets sold across all events.
    pub total_tickets: u32,
    /// Revenue across all events.
    pub total_revenue: f64,
}

/// API response for the venue status view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VenueStatusResponse {
    /// The venue identifier.
    pub venue_id: u32,
    /// The location label.
    pub location: String,
    /// The advisory capacity.
    pub capacity: u32,
    /// Seats in the grid.
    pub seat_count: u32,
    /// Seats currently held.
    pub reserved: u32,
    /// Seats currently free.
    pub available: u32,
    /// Capacity minus held seats.
    pub remaining_capacity: u32,
}

/// Represents whether a specific action is permitted.
///
/// This enum provides better type safety than raw booleans and serializes
/// to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// What an authenticated user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Capabilities {
    /// Whether the user can buy and cancel their own tickets.
    pub can_purchase: Capability,
    /// Whether the user can create, edit and delete events.
    pub can_manage_events: Capability,
    /// Whether the user can view sales and venue status.
    pub can_view_sales: Capability,
    /// Whether the user can create, edit and delete discounts.
    pub can_manage_discounts: Capability,
}
