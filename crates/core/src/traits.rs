//! Core trait definitions
//!
//! These are the seams where remote endpoints and pluggable collaborators
//! plug into the engine.

use crate::error::Result;
use crate::event::DocumentEvent;

/// A registered remote callback notified of document changes
///
/// Implementations stand in for a client-side endpoint across the remote
/// boundary: every method may fail with `RemoteUnreachable`. The hub treats
/// a failed `notify` as a dead endpoint and prunes the subscription; it
/// treats a failed `identity` at attach time the same way.
pub trait Observer: Send + Sync {
    /// The identity (username) this observer's client declared
    ///
    /// Used for echo suppression: a change is not delivered back to the
    /// client identified as its editor.
    fn identity(&self) -> Result<String>;

    /// Deliver a change event
    fn notify(&self, event: &DocumentEvent) -> Result<()>;
}

/// Pluggable credential hashing collaborator
///
/// The session layer never sees plaintext passwords past the boundary of
/// these two calls.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into its stored form
    fn hash(&self, password: &str) -> String;

    /// Check a plaintext password against a stored hash
    fn verify(&self, password: &str, stored: &str) -> bool {
        self.hash(password) == stored
    }
}
