// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::pricing::validate_base_price;
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

/// A race event tickets can be sold for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    event_id: u32,
    name: String,
    date: Date,
    base_price: f64,
}

impl Event {
    /// Creates a new `Event`.
    ///
    /// # Arguments
    ///
    /// * `event_id` - The event identifier
    /// * `name` - The event name (must not be blank)
    /// * `date` - The race date
    /// * `base_price` - The base ticket price before variant multipliers
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the base price is invalid.
    pub fn new(event_id: u32, name: &str, date: Date, base_price: f64) -> Result<Self, DomainError> {
        let name: String = validate_event_name(name)?;
        validate_base_price(base_price)?;
        Ok(Self {
            event_id,
            name,
            date,
            base_price,
        })
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn event_id(&self) -> u32 {
        self.event_id
    }

    /// Returns the event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the race date.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Returns the base ticket price.
    #[must_use]
    pub const fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Replaces name, date and base price together.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or price is invalid; the event is
    /// unchanged on error.
    pub fn update(&mut self, name: &str, date: Date, base_price: f64) -> Result<(), DomainError> {
        let name: String = validate_event_name(name)?;
        validate_base_price(base_price)?;
        self.name = name;
        self.date = date;
        self.base_price = base_price;
        Ok(())
    }

    /// Returns a one-line description, e.g. `British Grand Prix on 2026-07-05`.
    #[must_use]
    pub fn details(&self) -> String {
        format!("{} on {}", self.name, self.date)
    }
}

fn validate_event_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidEventName(String::from(
            "Event name cannot be empty",
        )));
    }
    Ok(trimmed.to_string())
}

/// Parses an ISO `YYYY-MM-DD` race date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_event_date(date_string: &str) -> Result<Date, DomainError> {
    Date::parse(date_string, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: date_string.to_string(),
            error: e.to_string(),
        }
    })
}
