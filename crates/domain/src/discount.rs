// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// An administrator-defined discount layered on top of the variant price.
///
/// The percentage is a fraction in `[0, 1]` and is validated on every
/// assignment; values outside the range are rejected, never clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DiscountRecord")]
pub struct Discount {
    discount_id: u32,
    description: String,
    percentage: f64,
}

impl Discount {
    /// Creates a new `Discount`.
    ///
    /// # Arguments
    ///
    /// * `discount_id` - The discount identifier
    /// * `description` - A human-readable description
    /// * `percentage` - The fraction taken off, in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDiscountPercentage` if `percentage` is
    /// outside `[0, 1]` or not a number.
    pub fn new(discount_id: u32, description: &str, percentage: f64) -> Result<Self, DomainError> {
        validate_percentage(percentage)?;
        Ok(Self {
            discount_id,
            description: description.to_string(),
            percentage,
        })
    }

    /// Returns the discount identifier.
    #[must_use]
    pub const fn discount_id(&self) -> u32 {
        self.discount_id
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    /// Returns the fraction taken off.
    #[must_use]
    pub const fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Replaces the percentage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDiscountPercentage` if `percentage` is
    /// outside `[0, 1]`. The discount is unchanged on error.
    pub fn set_percentage(&mut self, percentage: f64) -> Result<(), DomainError> {
        validate_percentage(percentage)?;
        self.percentage = percentage;
        Ok(())
    }

    /// Takes the discount off an amount: `amount - amount * percentage`.
    #[must_use]
    pub fn apply(&self, amount: f64) -> f64 {
        amount - amount * self.percentage
    }
}

fn validate_percentage(percentage: f64) -> Result<(), DomainError> {
    if !(0.0..=1.0).contains(&percentage) {
        return Err(DomainError::InvalidDiscountPercentage(percentage));
    }
    Ok(())
}

#[derive(Deserialize)]
struct DiscountRecord {
    discount_id: u32,
    description: String,
    percentage: f64,
}

impl TryFrom<DiscountRecord> for Discount {
    type Error = DomainError;

    fn try_from(record: DiscountRecord) -> Result<Self, Self::Error> {
        Self::new(record.discount_id, &record.description, record.percentage)
    }
}
