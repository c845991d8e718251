// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::user::User;

/// Validates an email address shape: `local@domain.tld`.
///
/// This mirrors a `[^@]+@[^@]+\.[^@]+` match: exactly one `@`, a non-empty
/// local part, and a domain containing a dot with text on both sides.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address does not match.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let email: &str = email.trim();
    let invalid = |reason: &str| Err(DomainError::InvalidEmail(format!("'{email}' {reason}")));

    let Some((local, domain)) = email.split_once('@') else {
        return invalid("is missing '@'");
    };
    if local.is_empty() || domain.contains('@') {
        return invalid("must have exactly one '@' after a non-empty name");
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return invalid("must have a domain such as example.com");
    };
    if host.is_empty() || tld.is_empty() || email.chars().any(char::is_whitespace) {
        return invalid("must have a domain such as example.com");
    }

    Ok(())
}

/// Validates a user's display name.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is blank.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that no existing user already holds an email address.
///
/// The comparison is case-insensitive.
///
/// # Errors
///
/// Returns `DomainError::DuplicateEmail` if the email is taken.
pub fn validate_email_unique(users: &[User], email: &str) -> Result<(), DomainError> {
    let normalized: String = email.trim().to_lowercase();
    if users.iter().any(|user| user.email() == normalized) {
        return Err(DomainError::DuplicateEmail(normalized));
    }
    Ok(())
}
