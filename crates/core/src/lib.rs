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

mod cancel;
mod catalog;
mod error;
mod payment;
mod state;
mod transaction;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use cancel::{cancel_reservation, cancel_ticket};
pub use catalog::{
    EventSales, correct_ticket_price, create_discount, create_event, delete_discount,
    delete_event, register_user, sales_summary, update_discount_percentage, update_event,
};
pub use error::CoreError;
pub use payment::{FormatCheckedPayment, PaymentConfirmation, PaymentFailure};
pub use state::BookingState;
pub use transaction::{
    PurchaseReceipt, PurchaseRequest, PurchaseTransaction, TransactionPhase, purchase,
};
