// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Grand Prix ticketing system.
//!
//! Each collection (users, tickets, reservations, payments, discounts,
//! events, venues) is stored as one JSON document and always loaded or
//! saved whole.
//!
//! ## Backends
//!
//! - **Files**: `<data dir>/<collection>.json`, replaced atomically through
//!   a temporary file and a rename
//! - **Memory**: documents held in a map, used by tests
//!
//! Durability is limited to what a whole-file overwrite gives: there is no
//! journal and no write retry.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod collection;
mod error;
mod store;

#[cfg(test)]
mod tests;

pub use collection::CollectionKind;
pub use error::PersistenceError;
pub use store::Store;
