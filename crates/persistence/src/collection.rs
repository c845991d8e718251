// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The collections a store keeps, one serialized document each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionKind {
    /// Registered accounts.
    Users,
    /// Live tickets.
    Tickets,
    /// Committed purchase records.
    Reservations,
    /// Confirmed payments.
    Payments,
    /// Discounts.
    Discounts,
    /// Scheduled events.
    Events,
    /// Venues and their seat layouts.
    Venues,
}

impl CollectionKind {
    /// Every collection, in save order.
    pub const ALL: [Self; 7] = [
        Self::Users,
        Self::Tickets,
        Self::Reservations,
        Self::Payments,
        Self::Discounts,
        Self::Events,
        Self::Venues,
    ];

    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Tickets => "tickets",
            Self::Reservations => "reservations",
            Self::Payments => "payments",
            Self::Discounts => "discounts",
            Self::Events => "events",
            Self::Venues => "venues",
        }
    }

    /// Returns the file name used by the file backend, e.g. `users.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
