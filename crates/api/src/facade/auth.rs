//! Authentication and session surface

use atelier_core::error::Result;
use atelier_core::SessionId;

/// Registration, login/logout, and session validation
pub trait AuthApi {
    /// Register a new user
    ///
    /// Fails with `InvalidUsernameFormat`, `WeakPassword`, or
    /// `DuplicateUser`. On success the user's empty workspace exists.
    fn register(&self, username: &str, password: &str) -> Result<()>;

    /// Authenticate and open a session
    ///
    /// Returns `Ok(None)` on bad credentials, never an error for that
    /// case. A successful login evicts any previous session for the same
    /// user and synchronizes the user's shared-folder mirrors.
    fn login(&self, username: &str, password: &str) -> Result<Option<SessionId>>;

    /// Close a session
    ///
    /// Idempotent: returns `true` the first time, `false` after.
    fn logout(&self, token: SessionId) -> bool;

    /// Resolve a token to its username
    ///
    /// Expired or unknown tokens answer `None` and are purged lazily.
    fn validate(&self, token: SessionId) -> Option<String>;

    /// Change the calling user's password
    fn change_password(&self, token: SessionId, old: &str, new: &str) -> Result<()>;
}
