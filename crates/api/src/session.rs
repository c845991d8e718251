// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The session handle that owns the booking state and its store.

use crate::auth::{AuthenticatedActor, AuthenticationService};
use crate::config::SessionConfig;
use crate::error::{ApiError, AuthError};
use grand_prix::BookingState;
use grand_prix_domain::{User, Venue};
use grand_prix_persistence::Store;
use std::collections::HashMap;

/// An open booking session.
///
/// The session is opened once at start-up, loads every collection, and is
/// flushed after each mutating call. A call whose flush fails leaves the
/// session as it was before the call. Login tokens live only as long as the
/// session.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    store: Store,
    state: BookingState,
    tokens: HashMap<String, u32>,
}

impl Session {
    /// Opens a session backed by the file store in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured venue is invalid or the stored
    /// collections cannot be loaded.
    pub fn open(config: SessionConfig) -> Result<Self, ApiError> {
        let store: Store = Store::open(&config.data_dir)?;
        Self::with_store(config, store)
    }

    /// Opens a session backed by an empty in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured venue is invalid.
    pub fn in_memory(config: SessionConfig) -> Result<Self, ApiError> {
        Self::with_store(config, Store::in_memory())
    }

    /// Opens a session over an existing store.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured venue is invalid or the stored
    /// collections cannot be loaded.
    pub fn with_store(config: SessionConfig, store: Store) -> Result<Self, ApiError> {
        let venue: Venue = config.venue.build()?;
        let state: BookingState = store.load_state(venue)?;
        tracing::info!(
            venue_id = state.venue.venue_id(),
            location = state.venue.location(),
            available = state.venue.available_count(),
            "Session opened"
        );
        Ok(Self {
            config,
            store,
            state,
            tokens: HashMap::new(),
        })
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the booking state.
    #[must_use]
    pub const fn state(&self) -> &BookingState {
        &self.state
    }

    /// Applies a change to the booking state and persists it.
    ///
    /// The change either lands in memory and in the store, or in neither.
    /// When the change fails, or the store rejects the new state, the state
    /// taken before the change is restored and written back so no
    /// collection keeps a half-saved document.
    ///
    /// # Errors
    ///
    /// Returns the change's own error, or the store error if the new state
    /// could not be saved.
    pub(crate) fn apply<T, E>(
        &mut self,
        change: impl FnOnce(&mut BookingState) -> Result<T, E>,
    ) -> Result<T, ApiError>
    where
        ApiError: From<E>,
    {
        let snapshot: BookingState = self.state.clone();
        let value: T = match change(&mut self.state) {
            Ok(value) => value,
            Err(e) => {
                self.state = snapshot;
                return Err(ApiError::from(e));
            }
        };

        if let Err(e) = self.store.save_state(&self.state) {
            tracing::error!(error = %e, "Store rejected change, restoring previous state");
            self.state = snapshot;
            if let Err(restore) = self.store.save_state(&self.state) {
                tracing::error!(error = %restore, "Failed to rewrite previous state");
            }
            return Err(<ApiError as From<grand_prix_persistence::PersistenceError>>::from(e));
        }
        Ok(value)
    }

    /// Writes every collection to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if any collection cannot be saved.
    pub fn flush(&mut self) -> Result<(), ApiError> {
        self.store.save_state(&self.state)?;
        Ok(())
    }

    /// Flushes and closes the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn close(mut self) -> Result<(), ApiError> {
        self.flush()?;
        tracing::info!("Session closed");
        Ok(())
    }

    /// Resolves a login token to its user.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown or its user no longer exists.
    pub fn authenticate(&self, session_token: &str) -> Result<AuthenticatedActor, ApiError> {
        let user_id: u32 =
            *self
                .tokens
                .get(session_token)
                .ok_or_else(|| AuthError::AuthenticationFailed {
                    reason: String::from("Invalid session token"),
                })?;
        let user: &User = self
            .state
            .user(user_id)
            .map_err(|_| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;
        Ok(AuthenticatedActor::for_user(user))
    }

    pub(crate) fn issue_token(&mut self, user_id: u32) -> String {
        let token: String = AuthenticationService::generate_session_token();
        self.tokens.insert(token.clone(), user_id);
        token
    }

    pub(crate) fn revoke_token(&mut self, session_token: &str) -> bool {
        self.tokens.remove(session_token).is_some()
    }
}
