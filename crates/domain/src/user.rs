// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Account roles.
///
/// The role is a capability flag, not a separate account type: admins can
/// do everything a customer can, plus event, discount and sales management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// A ticket buyer.
    #[default]
    Customer,
    /// A venue administrator.
    Admin,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Customer" => Ok(Self::Customer),
            "Admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

/// A registered account and its purchase history.
///
/// The history holds ticket ids in purchase order; the tickets themselves
/// live in the global ticket collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    user_id: u32,
    name: String,
    email: String,
    password_hash: String,
    role: Role,
    history: Vec<u64>,
}

impl User {
    /// Creates a new `User` with an empty purchase history.
    ///
    /// The email is normalized to lowercase so lookups are case-insensitive.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user identifier
    /// * `name` - The display name
    /// * `email` - The login email
    /// * `password_hash` - The stored password hash
    /// * `role` - The account role
    #[must_use]
    pub fn new(user_id: u32, name: &str, email: &str, password_hash: String, role: Role) -> Self {
        Self {
            user_id,
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash,
            role,
            history: Vec::new(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> u32 {
        self.user_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns whether this account has the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Returns the purchased ticket ids in purchase order.
    #[must_use]
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// Appends a ticket to the purchase history.
    pub fn record_purchase(&mut self, ticket_id: u64) {
        self.history.push(ticket_id);
    }

    /// Removes a ticket from the purchase history.
    ///
    /// Returns `true` if the ticket was present.
    pub fn remove_from_history(&mut self, ticket_id: u64) -> bool {
        let before: usize = self.history.len();
        self.history.retain(|id| *id != ticket_id);
        self.history.len() != before
    }
}
