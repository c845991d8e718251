// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions a user is permitted to perform so the
//! presentation layer can hide admin screens. They are advisory only and do
//! not replace the authorization checks in the handlers.

use crate::auth::AuthenticatedActor;
use crate::request_response::{Capabilities, Capability};
use grand_prix_domain::Role;

/// Computes the capabilities of an authenticated user.
///
/// # Arguments
///
/// * `actor` - The authenticated actor
#[must_use]
pub const fn compute_capabilities(actor: &AuthenticatedActor) -> Capabilities {
    let is_admin: bool = matches!(actor.role, Role::Admin);
    Capabilities {
        can_purchase: Capability::Allowed,
        can_manage_events: Capability::from_bool(is_admin),
        can_view_sales: Capability::from_bool(is_admin),
        can_manage_discounts: Capability::from_bool(is_admin),
    }
}
