//! Core types and traits for atelier
//!
//! This crate defines the foundational types used throughout the system:
//! - SessionId / SubscriberId: opaque UUID-backed tokens
//! - Document, Folder, Session: the workspace data model
//! - DocumentEvent, Mutation: change events and persisted operations
//! - Error: error type hierarchy
//! - Limits: username/password/name policy
//! - Traits: Observer and CredentialHasher seams

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod limits;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use error::{EntityKind, Error, Result};
pub use event::{DocumentEvent, Mutation};
pub use limits::Limits;
pub use traits::{CredentialHasher, Observer};
pub use types::{now, Document, Folder, Session, SessionId, SubscriberId, Timestamp};
