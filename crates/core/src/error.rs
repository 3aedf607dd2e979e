//! Error types for atelier
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for atelier operations
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of named entity an operation failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A registered user
    User,
    /// A document in a workspace
    Document,
    /// A folder in a workspace
    Folder,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Document => write!(f, "document"),
            EntityKind::Folder => write!(f, "folder"),
        }
    }
}

/// Error types for the workspace engine
#[derive(Debug, Error)]
pub enum Error {
    /// Username/password pair did not authenticate
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration attempted with a username that is already taken
    #[error("duplicate user: {0}")]
    DuplicateUser(String),

    /// Username does not match the alphanumeric-only policy
    #[error("invalid username format: {0:?}")]
    InvalidUsernameFormat(String),

    /// Document or folder name is empty, oversized, or path-unsafe
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// Password does not satisfy the minimum-length policy
    #[error("password does not meet the minimum length policy")]
    WeakPassword,

    /// Operation invoked with an invalid, expired, or evicted session token
    #[error("session invalid or expired")]
    SessionInvalid,

    /// Named entity does not exist
    #[error("{kind} not found: {name}")]
    NotFound {
        /// What kind of entity was looked up
        kind: EntityKind,
        /// The name that failed to resolve
        name: String,
    },

    /// Named entity already exists
    #[error("{kind} already exists: {name}")]
    AlreadyExists {
        /// What kind of entity collided
        kind: EntityKind,
        /// The colliding name
        name: String,
    },

    /// Caller is not the owner of (or shared into) the target
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// A remote observer callback or mirror I/O endpoint was unreachable
    #[error("remote unreachable: {0}")]
    RemoteUnreachable(String),

    /// I/O error (mirror areas, snapshot files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot encode/decode error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Shorthand for a `NotFound` error
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Shorthand for an `AlreadyExists` error
    pub fn already_exists(kind: EntityKind, name: impl Into<String>) -> Self {
        Error::AlreadyExists {
            kind,
            name: name.into(),
        }
    }
}
