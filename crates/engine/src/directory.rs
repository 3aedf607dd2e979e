//! User directory
//!
//! Registration and credential queries over the injected store. The
//! directory never sees a session: issuing and tracking sessions is the
//! registry's concern.

use atelier_core::error::Result;
use atelier_core::{CredentialHasher, Error, Limits};
use atelier_storage::UserStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Stores registered users and answers authentication queries
pub struct UserDirectory {
    store: Arc<UserStore>,
    hasher: Arc<dyn CredentialHasher>,
    limits: Limits,
}

impl UserDirectory {
    /// Create a directory over a store with a pluggable hasher
    pub fn new(store: Arc<UserStore>, hasher: Arc<dyn CredentialHasher>, limits: Limits) -> Self {
        UserDirectory {
            store,
            hasher,
            limits,
        }
    }

    /// Register a new user
    ///
    /// Validates the alphanumeric username policy and the minimum password
    /// length, then inserts the record. Fails with `DuplicateUser` if the
    /// name is taken; the check-and-insert is atomic on the username.
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        self.limits.validate_username(username)?;
        self.limits.validate_password(password)?;

        let hash = self.hasher.hash(password);
        self.store.insert_user(username, &hash)?;

        info!(username, "user registered");
        Ok(())
    }

    /// Check a username/password pair
    ///
    /// Pure query: unknown users and bad passwords both answer `false`.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        match self.store.credential_hash(username) {
            Some(stored) => self.hasher.verify(password, &stored),
            None => false,
        }
    }

    /// Whether a username is registered
    pub fn contains(&self, username: &str) -> bool {
        self.store.contains_user(username)
    }

    /// Change a user's password
    ///
    /// The old password must verify and the new one must satisfy the
    /// length policy.
    pub fn change_password(&self, username: &str, old: &str, new: &str) -> Result<()> {
        if !self.authenticate(username, old) {
            warn!(username, "password change rejected: bad old password");
            return Err(Error::InvalidCredentials);
        }
        self.limits.validate_password(new)?;
        self.store.set_credential(username, &self.hasher.hash(new))?;
        info!(username, "password changed");
        Ok(())
    }
}
