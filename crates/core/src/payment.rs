// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use grand_prix_domain::{DomainError, PaymentDetails, PaymentMethod};

/// Why a payment confirmation did not go through.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentFailure {
    /// The supplied payment details failed the format check.
    Invalid(DomainError),
    /// The payer or a provider refused the charge.
    Declined(String),
    /// The payer walked away before confirming.
    Abandoned,
}

impl std::fmt::Display for PaymentFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Declined(reason) => write!(f, "Payment declined: {reason}"),
            Self::Abandoned => write!(f, "Payment abandoned"),
        }
    }
}

impl std::error::Error for PaymentFailure {}

impl From<PaymentFailure> for CoreError {
    fn from(failure: PaymentFailure) -> Self {
        match failure {
            PaymentFailure::Invalid(err) => Self::DomainViolation(err),
            PaymentFailure::Declined(reason) => Self::PaymentDeclined(reason),
            PaymentFailure::Abandoned => Self::PaymentAbandoned,
        }
    }
}

/// The external step that accepts or refuses a purchase total.
///
/// A purchase transaction calls `confirm` exactly once, with the aggregate
/// price of every ticket it priced. Any failure rolls the transaction back.
pub trait PaymentConfirmation {
    /// Confirms a charge of `amount`.
    ///
    /// # Errors
    ///
    /// Returns a `PaymentFailure` if the charge is not confirmed.
    fn confirm(&mut self, amount: f64) -> Result<PaymentMethod, PaymentFailure>;
}

/// Confirms a payment by checking the format of the supplied details.
///
/// No money moves: a well-formed card or wallet is accepted as paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCheckedPayment {
    details: PaymentDetails,
}

impl FormatCheckedPayment {
    /// Creates a confirmation step for the given details.
    #[must_use]
    pub const fn new(details: PaymentDetails) -> Self {
        Self { details }
    }
}

impl PaymentConfirmation for FormatCheckedPayment {
    fn confirm(&mut self, amount: f64) -> Result<PaymentMethod, PaymentFailure> {
        self.details.validate().map_err(PaymentFailure::Invalid)?;
        tracing::debug!(amount, method = %self.details.method, "Payment details accepted");
        Ok(self.details.method)
    }
}
