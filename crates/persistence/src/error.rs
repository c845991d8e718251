// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::collection::CollectionKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The data directory could not be prepared.
    InitializationError(String),
    /// Reading or writing a collection failed.
    Io {
        /// The collection being accessed.
        collection: CollectionKind,
        /// The underlying I/O error message.
        message: String,
    },
    /// A collection could not be encoded or decoded.
    SerializationError {
        /// The collection being accessed.
        collection: CollectionKind,
        /// The underlying serializer message.
        message: String,
    },
    /// The loaded collections contradict each other.
    InconsistentState(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::Io {
                collection,
                message,
            } => write!(f, "I/O error on {collection}: {message}"),
            Self::SerializationError {
                collection,
                message,
            } => write!(f, "Serialization error on {collection}: {message}"),
            Self::InconsistentState(msg) => write!(f, "Inconsistent stored state: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}
