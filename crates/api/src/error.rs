// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use grand_prix::CoreError;
use grand_prix_domain::DomainError;
use grand_prix_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Stable failure categories for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Credentials or session token rejected.
    AuthenticationFailed,
    /// The actor's role does not allow the action.
    Unauthorized,
    /// A requested seat is held or does not exist.
    SeatUnavailable,
    /// The venue cannot take that many more seats.
    InsufficientCapacity,
    /// A field failed validation.
    ValidationError,
    /// A business rule refused the operation.
    RuleViolation,
    /// A referenced entity does not exist.
    NotFound,
    /// Payment was declined or abandoned.
    PaymentFailed,
    /// The store could not be read or written.
    Persistence,
    /// Anything else.
    Internal,
}

impl ApiErrorKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::Unauthorized => "unauthorized",
            Self::SeatUnavailable => "seat_unavailable",
            Self::InsufficientCapacity => "insufficient_capacity",
            Self::ValidationError => "validation_error",
            Self::RuleViolation => "rule_violation",
            Self::NotFound => "not_found",
            Self::PaymentFailed => "payment_failed",
            Self::Persistence => "persistence",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A requested seat cannot be held.
    SeatUnavailable {
        /// The seat reference, e.g. `3-12`.
        seat: String,
        /// Why the seat cannot be held.
        message: String,
    },
    /// The venue's remaining capacity is below the request.
    InsufficientCapacity {
        /// Seats requested.
        requested: usize,
        /// Capacity remaining.
        remaining: u32,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Payment was not confirmed.
    PaymentFailed {
        /// Why the payment failed.
        message: String,
    },
    /// The store failed.
    Persistence {
        /// The underlying persistence error.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl ApiError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        match self {
            Self::AuthenticationFailed { .. } => ApiErrorKind::AuthenticationFailed,
            Self::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            Self::SeatUnavailable { .. } => ApiErrorKind::SeatUnavailable,
            Self::InsufficientCapacity { .. } => ApiErrorKind::InsufficientCapacity,
            Self::DomainRuleViolation { .. } => ApiErrorKind::RuleViolation,
            Self::InvalidInput { .. } | Self::PasswordPolicyViolation { .. } => {
                ApiErrorKind::ValidationError
            }
            Self::ResourceNotFound { .. } => ApiErrorKind::NotFound,
            Self::PaymentFailed { .. } => ApiErrorKind::PaymentFailed,
            Self::Persistence { .. } => ApiErrorKind::Persistence,
            Self::Internal { .. } => ApiErrorKind::Internal,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::SeatUnavailable { seat, message } => {
                write!(f, "Seat {seat} unavailable: {message}")
            }
            Self::InsufficientCapacity {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "Insufficient capacity: {requested} seats requested, {remaining} remaining"
                )
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::PaymentFailed { message } => write!(f, "Payment failed: {message}"),
            Self::Persistence { message } => write!(f, "Persistence error: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Persistence {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(&err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(&err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    let message: String = err.to_string();
    let invalid = |field: &str| ApiError::InvalidInput {
        field: field.to_string(),
        message: message.clone(),
    };

    match err {
        DomainError::SeatNotFound(seat) | DomainError::SeatAlreadyReserved(seat) => {
            ApiError::SeatUnavailable {
                seat: seat.to_string(),
                message,
            }
        }
        DomainError::InvalidVenueLayout { .. } => invalid("venue"),
        DomainError::InvalidSeatId(_) => invalid("seats"),
        DomainError::InvalidTicketVariant(_) => invalid("variant"),
        DomainError::MissingGroupSize | DomainError::InvalidGroupSize { .. } => {
            invalid("group_size")
        }
        DomainError::InvalidDiscountPercentage(_) => invalid("percentage"),
        DomainError::InvalidPrice(_) => invalid("base_price"),
        DomainError::InvalidPaymentDetails { field, .. } => invalid(*field),
        DomainError::InvalidPaymentMethod(_) => invalid("payment_method"),
        DomainError::InvalidEmail(_) => invalid("email"),
        DomainError::InvalidName(_) => invalid("name"),
        DomainError::InvalidRole(_) => invalid("role"),
        DomainError::InvalidEventName(_) => invalid("event_name"),
        DomainError::DateParseError { .. } => invalid("date"),
        DomainError::DuplicateEmail(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: &CoreError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CoreError::DomainViolation(domain_error) => translate_domain_error(domain_error),
        CoreError::EmptyRequest | CoreError::DuplicateSeat(_) => ApiError::InvalidInput {
            field: String::from("seats"),
            message,
        },
        CoreError::InsufficientCapacity {
            requested,
            remaining,
        } => ApiError::InsufficientCapacity {
            requested: *requested,
            remaining: *remaining,
        },
        CoreError::PaymentDeclined(_) | CoreError::PaymentAbandoned => {
            ApiError::PaymentFailed { message }
        }
        CoreError::InvalidPhase { .. } => ApiError::Internal { message },
        CoreError::EventNotFound(_) => not_found("Event", message),
        CoreError::UserNotFound(_) => not_found("User", message),
        CoreError::DiscountNotFound(_) => not_found("Discount", message),
        CoreError::TicketNotFound(_) => not_found("Ticket", message),
        CoreError::ReservationNotFound(_) => not_found("Reservation", message),
        CoreError::EventHasSales { .. } => ApiError::DomainRuleViolation {
            rule: String::from("event_without_sales"),
            message,
        },
    }
}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}
