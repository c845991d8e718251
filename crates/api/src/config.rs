// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session configuration.

use crate::error::ApiError;
use grand_prix_domain::{DomainError, Venue};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The venue a session books against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    /// The venue identifier.
    pub venue_id: u32,
    /// A human-readable location label.
    pub location: String,
    /// The advisory capacity.
    pub capacity: u32,
    /// Number of seat rows.
    pub rows: u16,
    /// Seats in each row.
    pub seats_per_row: u16,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            venue_id: 1,
            location: String::from("Silverstone Circuit"),
            capacity: 150_000,
            rows: 50,
            seats_per_row: 300,
        }
    }
}

impl VenueConfig {
    /// Builds a venue with a fully free seat grid.
    ///
    /// # Errors
    ///
    /// Returns an error if either grid dimension is 0.
    pub fn build(&self) -> Result<Venue, DomainError> {
        Venue::new(
            self.venue_id,
            &self.location,
            self.capacity,
            self.rows,
            self.seats_per_row,
        )
    }
}

/// Settings for a booking session.
///
/// Every field has a default, so a configuration file only needs to name
/// what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the file store keeps its collections.
    pub data_dir: PathBuf,
    /// The code that grants the admin role at registration.
    pub admin_code: String,
    /// The bcrypt cost used for new password hashes.
    pub password_hash_cost: u32,
    /// The venue to book against when none is stored.
    pub venue: VenueConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            admin_code: String::from("ADMIN123"),
            password_hash_cost: bcrypt::DEFAULT_COST,
            venue: VenueConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - The configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON for
    /// this configuration.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ApiError> {
        let path: &Path = path.as_ref();
        let contents: String = std::fs::read_to_string(path).map_err(|e| ApiError::InvalidInput {
            field: String::from("config"),
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_json_str(&contents)
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON for this configuration.
    pub fn from_json_str(contents: &str) -> Result<Self, ApiError> {
        serde_json::from_str(contents).map_err(|e| ApiError::InvalidInput {
            field: String::from("config"),
            message: e.to_string(),
        })
    }
}
