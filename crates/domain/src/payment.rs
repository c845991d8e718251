// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Supported payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Credit or debit card; card number and expiry are format checked.
    CreditDebit,
    /// A digital wallet identified by account name.
    DigitalWallet,
}

impl PaymentMethod {
    /// Converts this method to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreditDebit => "CreditDebit",
            Self::DigitalWallet => "DigitalWallet",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CreditDebit" | "Credit/Debit" => Ok(Self::CreditDebit),
            "DigitalWallet" | "Digital Wallet" => Ok(Self::DigitalWallet),
            _ => Err(DomainError::InvalidPaymentMethod(s.to_string())),
        }
    }
}

/// Payment details as entered by the buyer.
///
/// Validation is a format check only; nothing is charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    /// The payment method.
    pub method: PaymentMethod,
    /// Card holder or wallet account name.
    pub holder_name: String,
    /// 16-digit card number (card payments only).
    pub card_number: Option<String>,
    /// Expiry as `MM/YY` (card payments only).
    pub expiry: Option<String>,
}

impl PaymentDetails {
    /// Checks the details against the format rules for their method.
    ///
    /// - Every method needs a non-blank holder name
    /// - `CreditDebit` needs a 16-digit card number and an `MM/YY` expiry
    ///   with a month from 01 to 12
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPaymentDetails` naming the first field
    /// that fails.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.holder_name.trim().is_empty() {
            return Err(DomainError::InvalidPaymentDetails {
                field: "holder_name",
                reason: String::from("Name cannot be empty"),
            });
        }

        if self.method == PaymentMethod::CreditDebit {
            let card_number: &str = self.card_number.as_deref().unwrap_or_default();
            if card_number.len() != 16 || !card_number.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DomainError::InvalidPaymentDetails {
                    field: "card_number",
                    reason: String::from("Card number must be exactly 16 digits"),
                });
            }

            let expiry: &str = self.expiry.as_deref().unwrap_or_default();
            if !is_valid_expiry(expiry) {
                return Err(DomainError::InvalidPaymentDetails {
                    field: "expiry",
                    reason: String::from("Expiry must be MM/YY"),
                });
            }
        }

        Ok(())
    }
}

fn is_valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    let all_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(month) || !all_digits(year) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

/// A completed payment for one committed purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// The payment identifier.
    pub payment_id: u64,
    /// The reservation this payment settled.
    pub reservation_id: u64,
    /// Tickets issued by the settled purchase, cancelled or not.
    #[serde(default)]
    pub ticket_ids: Vec<u64>,
    /// The paying user.
    pub user_id: u32,
    /// The amount charged.
    pub amount: f64,
    /// The method used.
    pub method: PaymentMethod,
    /// When the payment was confirmed.
    pub paid_at: OffsetDateTime,
}
