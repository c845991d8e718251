// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::collection::CollectionKind;
use crate::error::PersistenceError;
use grand_prix::BookingState;
use grand_prix_domain::Venue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where a store keeps its collections.
#[derive(Debug)]
enum StoreBackend {
    /// One JSON file per collection inside a directory.
    Files(PathBuf),
    /// Serialized documents held in memory.
    Memory(HashMap<CollectionKind, String>),
}

/// Whole-collection persistence.
///
/// Every save replaces the entire collection. Loading a collection that was
/// never saved yields an empty list.
#[derive(Debug)]
pub struct Store {
    backend: StoreBackend,
}

impl Store {
    /// Opens a file-backed store, creating the directory if needed.
    ///
    /// # Arguments
    ///
    /// * `dir` - The data directory
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, PersistenceError> {
        let dir: PathBuf = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            PersistenceError::InitializationError(format!(
                "cannot create data directory {}: {e}",
                dir.display()
            ))
        })?;
        tracing::info!(dir = %dir.display(), "Opened file store");
        Ok(Self {
            backend: StoreBackend::Files(dir),
        })
    }

    /// Creates an empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::Memory(HashMap::new()),
        }
    }

    /// Returns the data directory of a file-backed store.
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.backend {
            StoreBackend::Files(dir) => Some(dir),
            StoreBackend::Memory(_) => None,
        }
    }

    /// Loads every item of a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document cannot be read or decoded.
    pub fn load_all<T: DeserializeOwned>(
        &self,
        kind: CollectionKind,
    ) -> Result<Vec<T>, PersistenceError> {
        let Some(document) = self.read_document(kind)? else {
            tracing::debug!(collection = %kind, "Collection not stored yet");
            return Ok(Vec::new());
        };
        let items: Vec<T> =
            serde_json::from_str(&document).map_err(|e| PersistenceError::SerializationError {
                collection: kind,
                message: e.to_string(),
            })?;
        tracing::debug!(collection = %kind, count = items.len(), "Loaded collection");
        Ok(items)
    }

    /// Replaces a collection with `items`.
    ///
    /// The file backend writes a temporary file and renames it over the old
    /// one, so a failed write leaves the previous document in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the items cannot be encoded or written.
    pub fn save_all<T: Serialize>(
        &mut self,
        kind: CollectionKind,
        items: &[T],
    ) -> Result<(), PersistenceError> {
        let document: String =
            serde_json::to_string_pretty(items).map_err(|e| PersistenceError::SerializationError {
                collection: kind,
                message: e.to_string(),
            })?;

        match &mut self.backend {
            StoreBackend::Files(dir) => {
                let path: PathBuf = dir.join(kind.file_name());
                let temp: PathBuf = dir.join(format!("{}.tmp", kind.file_name()));
                let io_error = |e: std::io::Error| PersistenceError::Io {
                    collection: kind,
                    message: e.to_string(),
                };
                std::fs::write(&temp, document).map_err(io_error)?;
                std::fs::rename(&temp, &path).map_err(io_error)?;
            }
            StoreBackend::Memory(blobs) => {
                blobs.insert(kind, document);
            }
        }

        tracing::debug!(collection = %kind, count = items.len(), "Saved collection");
        Ok(())
    }

    /// Loads a complete booking state.
    ///
    /// The stored venue whose id matches `venue` is used; otherwise `venue`
    /// itself is. Seat holds are then rebuilt from the stored tickets.
    ///
    /// # Errors
    ///
    /// Returns an error if a collection cannot be loaded or the tickets name
    /// seats the venue cannot hold.
    pub fn load_state(&self, venue: Venue) -> Result<BookingState, PersistenceError> {
        let venues: Vec<Venue> = self.load_all(CollectionKind::Venues)?;
        let venue: Venue = venues
            .into_iter()
            .find(|stored| stored.venue_id() == venue.venue_id())
            .unwrap_or(venue);

        let mut state: BookingState = BookingState::new(venue);
        state.users = self.load_all(CollectionKind::Users)?;
        state.tickets = self.load_all(CollectionKind::Tickets)?;
        state.reservations = self.load_all(CollectionKind::Reservations)?;
        state.payments = self.load_all(CollectionKind::Payments)?;
        state.discounts = self.load_all(CollectionKind::Discounts)?;
        state.events = self.load_all(CollectionKind::Events)?;

        state
            .rebuild_seat_holds()
            .map_err(|e| PersistenceError::InconsistentState(e.to_string()))?;

        tracing::info!(
            venue_id = state.venue.venue_id(),
            users = state.users.len(),
            tickets = state.tickets.len(),
            events = state.events.len(),
            "Loaded booking state"
        );
        Ok(state)
    }

    /// Saves every collection of a booking state.
    ///
    /// Collections are written one at a time in this order: users, tickets,
    /// reservations, payments, discounts, events, venues. Each write is an
    /// atomic rename, but the sequence is not. When a write fails, the
    /// collections before it hold the new state, the failing one and those
    /// after it still hold the previous state, and the failing one may leave
    /// a stray `.tmp` file. Callers that need all or nothing save the
    /// previous state again after a failure.
    ///
    /// # Errors
    ///
    /// Returns the first collection error encountered; collections saved
    /// before it stay saved.
    pub fn save_state(&mut self, state: &BookingState) -> Result<(), PersistenceError> {
        self.save_all(CollectionKind::Users, &state.users)?;
        self.save_all(CollectionKind::Tickets, &state.tickets)?;
        self.save_all(CollectionKind::Reservations, &state.reservations)?;
        self.save_all(CollectionKind::Payments, &state.payments)?;
        self.save_all(CollectionKind::Discounts, &state.discounts)?;
        self.save_all(CollectionKind::Events, &state.events)?;
        self.save_all(
            CollectionKind::Venues,
            std::slice::from_ref(&state.venue),
        )?;
        Ok(())
    }

    fn read_document(&self, kind: CollectionKind) -> Result<Option<String>, PersistenceError> {
        match &self.backend {
            StoreBackend::Files(dir) => {
                match std::fs::read_to_string(dir.join(kind.file_name())) {
                    Ok(document) => Ok(Some(document)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(PersistenceError::Io {
                        collection: kind,
                        message: e.to_string(),
                    }),
                }
            }
            StoreBackend::Memory(blobs) => Ok(blobs.get(&kind).cloned()),
        }
    }
}
