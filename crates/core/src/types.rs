//! Core domain types
//!
//! Identifier newtypes are UUID-backed and opaque: a token handed to a
//! client carries no structure a client could forge or compare beyond
//! equality.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Opaque session token issued at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh session token
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }

    /// Parse a token from its string form
    ///
    /// Returns `None` for anything that is not a well-formed token.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(SessionId)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque subscriber token issued when an observer attaches
///
/// Detach and failure pruning operate on this id, never on observer
/// reference identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    /// Generate a fresh subscriber token
    pub fn new() -> Self {
        SubscriberId(Uuid::new_v4())
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Epoch-second UTC timestamp
pub type Timestamp = i64;

/// Current UTC time as epoch seconds
pub fn now() -> Timestamp {
    Utc::now().timestamp()
}

/// A text document owned by one user's workspace
///
/// Content is replaced atomically on every save; `version` advances
/// monotonically with each replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Name, unique within the owner's namespace
    pub name: String,
    /// Full text payload
    pub content: String,
    /// Username of the owning workspace
    pub owner: String,
    /// Monotonically advancing version tag
    pub version: u64,
}

impl Document {
    /// Create a new empty document at version 0
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            content: String::new(),
            owner: owner.into(),
            version: 0,
        }
    }

    /// Replace the content and advance the version
    pub fn replace_content(&mut self, content: impl Into<String>) -> u64 {
        self.content = content.into();
        self.version += 1;
        self.version
    }
}

/// A named grouping of documents within one user's workspace
///
/// Membership is by document name; the referenced documents must exist in
/// the owner's document map and stay owned by the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Name, unique within the owner's namespace
    pub name: String,
    /// Username of the owning workspace
    pub owner: String,
    /// Names of member documents (unordered)
    pub documents: BTreeSet<String>,
    /// Usernames this folder is currently shared with
    pub shared_with: BTreeSet<String>,
}

impl Folder {
    /// Create a new empty folder
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Folder {
            name: name.into(),
            owner: owner.into(),
            documents: BTreeSet::new(),
            shared_with: BTreeSet::new(),
        }
    }

    /// Add a document name; returns false if already a member
    pub fn add_document(&mut self, name: &str) -> bool {
        self.documents.insert(name.to_string())
    }

    /// Remove a document name; returns false if it was not a member
    pub fn remove_document(&mut self, name: &str) -> bool {
        self.documents.remove(name)
    }

    /// Record a share target; returns false if already shared with them
    pub fn share_with(&mut self, username: &str) -> bool {
        self.shared_with.insert(username.to_string())
    }

    /// Remove a share target; returns false if they were not a target
    pub fn unshare_with(&mut self, username: &str) -> bool {
        self.shared_with.remove(username)
    }

    /// Whether the given user owns this folder or has it shared with them
    pub fn has_access(&self, username: &str) -> bool {
        self.owner == username || self.shared_with.contains(username)
    }
}

/// A time-bounded authentication context bound to one user's workspace
///
/// At most one active session exists per user; a re-login evicts the
/// previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token identifying this session
    pub id: SessionId,
    /// The authenticated username
    pub username: String,
    /// When this session was created (epoch seconds)
    pub created_at: Timestamp,
    /// Last time this session was validated (epoch seconds)
    pub last_access: Timestamp,
    /// Whether this session is still live
    pub active: bool,
}

impl Session {
    /// Create a fresh active session for a user
    pub fn new(username: impl Into<String>) -> Self {
        let created = now();
        Session {
            id: SessionId::new(),
            username: username.into(),
            created_at: created,
            last_access: created,
            active: true,
        }
    }

    /// Refresh the last-access timestamp
    pub fn touch(&mut self) {
        self.last_access = now();
    }

    /// Mark the session inactive
    pub fn invalidate(&mut self) {
        self.active = false;
    }

    /// Whether the session has been invalidated or idle past `timeout_secs`
    pub fn is_expired(&self, timeout_secs: i64) -> bool {
        if !self.active {
            return true;
        }
        now() - self.last_access > timeout_secs
    }
}
