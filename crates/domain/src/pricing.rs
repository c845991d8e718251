// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket variants and the pricing rules attached to them.
//!
//! Every function here is pure: the same inputs always produce the same
//! price and nothing is mutated.

use crate::discount::Discount;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Multiplier for a single race pass (5% off).
pub const SINGLE_RACE_MULTIPLIER: f64 = 0.95;
/// Multiplier for a weekend package (15% off).
pub const WEEKEND_MULTIPLIER: f64 = 0.85;
/// Multiplier for a season membership (25% off).
pub const SEASON_MULTIPLIER: f64 = 0.75;
/// Smallest party size accepted for group pricing.
pub const MIN_GROUP_SIZE: u32 = 2;

/// Group tiers as `(minimum party size, multiplier)`, largest first.
const GROUP_TIERS: [(u32, f64); 3] = [(10, 0.70), (5, 0.80), (MIN_GROUP_SIZE, 0.90)];

/// The four ticket categories, without per-variant data.
///
/// This is the tag a caller selects before a party size is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketVariantTag {
    /// A pass for one race.
    SingleRace,
    /// A race weekend package.
    Weekend,
    /// A full season membership.
    Season,
    /// Group pricing, tiered by party size.
    Group,
}

impl TicketVariantTag {
    /// Converts this tag to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SingleRace => "SingleRace",
            Self::Weekend => "Weekend",
            Self::Season => "Season",
            Self::Group => "Group",
        }
    }
}

impl std::fmt::Display for TicketVariantTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketVariantTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SingleRace" => Ok(Self::SingleRace),
            "Weekend" => Ok(Self::Weekend),
            "Season" => Ok(Self::Season),
            "Group" => Ok(Self::Group),
            _ => Err(DomainError::InvalidTicketVariant(s.to_string())),
        }
    }
}

/// A ticket variant together with the data its pricing rule needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketVariant {
    /// A pass for one race.
    SingleRace,
    /// A race weekend package.
    Weekend,
    /// A full season membership.
    Season,
    /// Group pricing for a party of `size` people.
    Group {
        /// The party size the tier is chosen from.
        size: u32,
    },
}

impl TicketVariant {
    /// Builds a variant from a tag and an optional party size.
    ///
    /// The party size is only consulted for `Group`; it is ignored for the
    /// other tags.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tag is `Group` and no party size was given
    /// - The party size is below [`MIN_GROUP_SIZE`]
    pub fn from_tag(tag: TicketVariantTag, group_size: Option<u32>) -> Result<Self, DomainError> {
        match tag {
            TicketVariantTag::SingleRace => Ok(Self::SingleRace),
            TicketVariantTag::Weekend => Ok(Self::Weekend),
            TicketVariantTag::Season => Ok(Self::Season),
            TicketVariantTag::Group => {
                let size: u32 = group_size.ok_or(DomainError::MissingGroupSize)?;
                Self::group(size)
            }
        }
    }

    /// Builds a validated `Group` variant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGroupSize` if `size` is below [`MIN_GROUP_SIZE`].
    pub fn group(size: u32) -> Result<Self, DomainError> {
        group_multiplier(size)?;
        Ok(Self::Group { size })
    }

    /// Returns the tag of this variant.
    #[must_use]
    pub const fn tag(&self) -> TicketVariantTag {
        match self {
            Self::SingleRace => TicketVariantTag::SingleRace,
            Self::Weekend => TicketVariantTag::Weekend,
            Self::Season => TicketVariantTag::Season,
            Self::Group { .. } => TicketVariantTag::Group,
        }
    }

    /// Returns the price multiplier for this variant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGroupSize` for a `Group` whose size is
    /// below [`MIN_GROUP_SIZE`].
    pub fn multiplier(&self) -> Result<f64, DomainError> {
        match self {
            Self::SingleRace => Ok(SINGLE_RACE_MULTIPLIER),
            Self::Weekend => Ok(WEEKEND_MULTIPLIER),
            Self::Season => Ok(SEASON_MULTIPLIER),
            Self::Group { size } => group_multiplier(*size),
        }
    }

    /// Applies this variant's multiplier to a base price.
    ///
    /// # Errors
    ///
    /// Returns an error if the base price is invalid or the group size is
    /// out of bounds.
    pub fn price(&self, base_price: f64) -> Result<f64, DomainError> {
        validate_base_price(base_price)?;
        Ok(base_price * self.multiplier()?)
    }
}

impl std::fmt::Display for TicketVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Group { size } => write!(f, "Group ({size} people)"),
            other => write!(f, "{}", other.tag()),
        }
    }
}

/// Returns the group tier multiplier for a party size.
///
/// | Party size | Multiplier |
/// |------------|------------|
/// | 10+        | 0.70       |
/// | 5 to 9     | 0.80       |
/// | 2 to 4     | 0.90       |
///
/// # Errors
///
/// Returns `DomainError::InvalidGroupSize` if `size` is below [`MIN_GROUP_SIZE`].
pub fn group_multiplier(size: u32) -> Result<f64, DomainError> {
    GROUP_TIERS
        .iter()
        .find(|(minimum, _)| size >= *minimum)
        .map(|(_, multiplier)| *multiplier)
        .ok_or(DomainError::InvalidGroupSize {
            size,
            minimum: MIN_GROUP_SIZE,
        })
}

/// Checks that a base price is finite and non-negative.
///
/// # Errors
///
/// Returns `DomainError::InvalidPrice` otherwise.
pub fn validate_base_price(base_price: f64) -> Result<(), DomainError> {
    if !base_price.is_finite() || base_price < 0.0 {
        return Err(DomainError::InvalidPrice(base_price));
    }
    Ok(())
}

/// Computes the final price of one ticket.
///
/// The variant multiplier is applied first; an attached discount is then
/// taken off the variant price.
///
/// # Arguments
///
/// * `base_price` - The event's base ticket price
/// * `variant` - The ticket variant
/// * `discount` - An optional discount entity
///
/// # Errors
///
/// Returns an error if the base price or the group size is invalid.
pub fn calculate_price(
    base_price: f64,
    variant: TicketVariant,
    discount: Option<&Discount>,
) -> Result<f64, DomainError> {
    let variant_price: f64 = variant.price(base_price)?;
    Ok(discount.map_or(variant_price, |discount| discount.apply(variant_price)))
}
