//! Session registry
//!
//! Issues, tracks, and invalidates sessions. At most one active session
//! exists per user: creating a session for a user who already has one
//! evicts the previous session first. Expired sessions are purged lazily
//! on validation and eagerly by the cleanup sweep.

use atelier_core::{Session, SessionId};
use dashmap::DashMap;
use tracing::{debug, info};

/// Default idle timeout: 30 minutes
pub const DEFAULT_SESSION_TIMEOUT_SECS: i64 = 30 * 60;

/// Tracks every live session
pub struct SessionRegistry {
    /// token → session
    sessions: DashMap<SessionId, Session>,
    /// username → token of that user's single active session
    by_user: DashMap<String, SessionId>,
    timeout_secs: i64,
}

impl SessionRegistry {
    /// Create a registry with the given idle timeout
    pub fn new(timeout_secs: i64) -> Self {
        SessionRegistry {
            sessions: DashMap::new(),
            by_user: DashMap::new(),
            timeout_secs,
        }
    }

    /// Issue a fresh session for an already-authenticated user
    ///
    /// Evicts (invalidates and removes) any previous session held by the
    /// same user before registering the new one.
    pub fn create(&self, username: &str) -> Session {
        if let Some((_, old_id)) = self.by_user.remove(username) {
            if let Some((_, mut old)) = self.sessions.remove(&old_id) {
                old.invalidate();
                info!(username, evicted = %old_id, "previous session evicted on re-login");
            }
        }

        let session = Session::new(username);
        self.by_user
            .insert(username.to_string(), session.id);
        self.sessions.insert(session.id, session.clone());
        debug!(username, session = %session.id, "session created");
        session
    }

    /// Mark a session inactive and drop it from the registry
    ///
    /// Idempotent: a second logout with the same token returns `false`.
    pub fn logout(&self, id: SessionId) -> bool {
        match self.sessions.remove(&id) {
            Some((_, mut session)) => {
                session.invalidate();
                self.by_user
                    .remove_if(&session.username, |_, active| *active == id);
                info!(username = %session.username, session = %id, "logged out");
                true
            }
            None => false,
        }
    }

    /// Resolve a token to its username, touching the last-access time
    ///
    /// Expired or unknown tokens answer `None`; expired sessions are
    /// purged on the way out.
    pub fn validate(&self, id: SessionId) -> Option<String> {
        let expired = {
            let mut session = self.sessions.get_mut(&id)?;
            if session.is_expired(self.timeout_secs) {
                true
            } else {
                session.touch();
                return Some(session.username.clone());
            }
        };
        if expired {
            self.purge(id);
        }
        None
    }

    /// The active session token for a user, if any
    pub fn active_session(&self, username: &str) -> Option<SessionId> {
        self.by_user.get(username).map(|e| *e.value())
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are live
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every expired session
    pub fn cleanup_expired(&self) {
        let timeout = self.timeout_secs;
        let expired: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|e| e.value().is_expired(timeout))
            .map(|e| *e.key())
            .collect();
        for id in expired {
            self.purge(id);
        }
    }

    fn purge(&self, id: SessionId) {
        if let Some((_, session)) = self.sessions.remove(&id) {
            self.by_user
                .remove_if(&session.username, |_, active| *active == id);
            debug!(username = %session.username, session = %id, "expired session purged");
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_active_session_per_user() {
        let registry = SessionRegistry::default();
        let first = registry.create("alice");
        let second = registry.create("alice");

        assert!(registry.validate(first.id).is_none());
        assert_eq!(registry.validate(second.id).unwrap(), "alice");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_logout_idempotent() {
        let registry = SessionRegistry::default();
        let session = registry.create("alice");

        assert!(registry.logout(session.id));
        assert!(!registry.logout(session.id));
        assert!(registry.validate(session.id).is_none());
    }

    #[test]
    fn test_validate_unknown_token() {
        let registry = SessionRegistry::default();
        assert!(registry.validate(SessionId::new()).is_none());
    }

    #[test]
    fn test_expired_session_purged_lazily() {
        // Zero timeout with a back-dated last access expires immediately
        let registry = SessionRegistry::new(0);
        let session = registry.create("alice");
        registry
            .sessions
            .get_mut(&session.id)
            .unwrap()
            .last_access -= 10;

        assert!(registry.validate(session.id).is_none());
        assert!(registry.is_empty());
        assert!(registry.active_session("alice").is_none());
    }

    #[test]
    fn test_cleanup_sweep() {
        let registry = SessionRegistry::new(0);
        let a = registry.create("alice");
        let b = registry.create("bob");
        registry.sessions.get_mut(&a.id).unwrap().last_access -= 10;
        registry.sessions.get_mut(&b.id).unwrap().last_access -= 10;

        registry.cleanup_expired();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_logout_of_evicted_session_does_not_drop_new_one() {
        let registry = SessionRegistry::default();
        let first = registry.create("alice");
        let second = registry.create("alice");

        // The evicted token is already gone; logging it out is a no-op
        assert!(!registry.logout(first.id));
        assert_eq!(registry.active_session("alice").unwrap(), second.id);
    }
}
