// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process API for the Grand Prix ticketing system.
//!
//! A presentation layer opens a [`Session`], logs users in, and calls the
//! handler functions with the resulting [`AuthenticatedActor`]. Domain and
//! core errors never cross this boundary directly; they are translated into
//! [`ApiError`] values with a stable [`ApiErrorKind`].

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

mod auth;
mod capabilities;
mod config;
mod error;
mod handlers;
mod password_policy;
mod request_response;
mod session;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use capabilities::compute_capabilities;
pub use config::{SessionConfig, VenueConfig};
pub use error::{ApiError, ApiErrorKind, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    SALES_CSV_HEADER, cancel_reservation, cancel_ticket, correct_ticket_price, create_discount,
    create_event, delete_discount, delete_event, export_sales_csv, list_discounts, list_events,
    login, logout, purchase_history, purchase_tickets, register_user, sales_summary, seat_map,
    update_discount_percentage, update_event, venue_status,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    CancelResponse, Capabilities, Capability, CorrectTicketPriceRequest, CreateDiscountRequest,
    CreateEventRequest, DiscountInfo, EventInfo, EventSalesInfo, LoginRequest, LoginResponse,
    PurchaseHistoryResponse, PurchaseResponse, PurchaseTicketsRequest, RegisterUserRequest,
    RegisterUserResponse, SalesSummaryResponse, SeatMapResponse, TicketInfo,
    UpdateDiscountRequest, UpdateEventRequest, VenueStatusResponse,
};
pub use session::Session;

pub use grand_prix::{FormatCheckedPayment, PaymentConfirmation, PaymentFailure};
pub use grand_prix_domain::{PaymentDetails, PaymentMethod, Role};
