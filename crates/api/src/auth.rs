// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use grand_prix::BookingState;
use grand_prix_domain::{Role, User};
use time::OffsetDateTime;

use crate::error::{ApiError, AuthError};

/// An authenticated user with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user identifier.
    pub user_id: u32,
    /// The normalized login email.
    pub email: String,
    /// The role assigned to this user.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user identifier
    /// * `email` - The login email
    /// * `role` - The role assigned to this user
    #[must_use]
    pub const fn new(user_id: u32, email: String, role: Role) -> Self {
        Self {
            user_id,
            email,
            role,
        }
    }

    /// Creates the actor for a stored user.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self::new(user.user_id(), user.email().to_string(), user.role())
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has permission
/// to perform a specific action based on their role.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to buy and cancel tickets.
    ///
    /// Every role may purchase.
    ///
    /// # Errors
    ///
    /// This check never fails.
    pub const fn authorize_purchase(_actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Ok(())
    }

    /// Checks if an actor is authorized to create, edit or delete events.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_events(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_events")
    }

    /// Checks if an actor is authorized to create, edit or delete discounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_discounts(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_discounts")
    }

    /// Checks if an actor is authorized to view sales and venue status.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_view_sales(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "view_sales")
    }

    /// Checks if an actor is authorized to correct a sold ticket's price.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_correct_ticket(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "correct_ticket_price")
    }

    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Customer => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }
}

/// Authentication service for credential handling.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Hashes a password with bcrypt.
    ///
    /// # Arguments
    ///
    /// * `password` - The plain-text password
    /// * `cost` - The bcrypt cost factor
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails.
    pub fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
        bcrypt::hash(password, cost).map_err(|e| ApiError::Internal {
            message: format!("Failed to hash password: {e}"),
        })
    }

    /// Verifies an email and password against the stored users.
    ///
    /// The failure reason does not reveal whether the email is registered.
    ///
    /// # Arguments
    ///
    /// * `state` - The booking state holding the users
    /// * `email` - The login email
    /// * `password` - The plain-text password
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials do not match.
    pub fn verify_credentials(
        state: &BookingState,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let rejected = || AuthError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        };

        let user: &User = state.user_by_email(email).ok_or_else(rejected)?;
        let matches: bool = bcrypt::verify(password, user.password_hash()).map_err(|e| {
            tracing::warn!(user_id = user.user_id(), error = %e, "Stored password hash unreadable");
            rejected()
        })?;
        if !matches {
            return Err(rejected());
        }

        Ok(AuthenticatedActor::for_user(user))
    }

    /// Generates a session token.
    pub(crate) fn generate_session_token() -> String {
        let timestamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }
}
