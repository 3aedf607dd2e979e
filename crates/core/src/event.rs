//! Change events and workspace mutations
//!
//! `DocumentEvent` is the payload pushed to observers when a document
//! changes. `Mutation` is the tagged variant describing a persisted
//! workspace change; the storage layer applies one handler per variant.

use serde::{Deserialize, Serialize};

/// A document change delivered to observers
///
/// Carries the editor's identity so delivery can suppress the echo back to
/// the editor's own client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEvent {
    /// Name of the changed document
    pub document: String,
    /// Full content after the change (last-writer-wins)
    pub content: String,
    /// Username of the editor that triggered the change
    pub editor: String,
    /// Document version after the change
    pub version: u64,
}

/// A persisted workspace mutation
///
/// One variant per operation kind; each has exactly one filesystem handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    /// Create an empty document in the owner's area
    CreateDoc {
        /// Owning username
        owner: String,
        /// Document name
        name: String,
    },
    /// Replace a document's content
    UpdateDoc {
        /// Owning username
        owner: String,
        /// Document name
        name: String,
        /// New full content
        content: String,
    },
    /// Remove a document from the owner's area
    DeleteDoc {
        /// Owning username
        owner: String,
        /// Document name
        name: String,
    },
    /// Create a folder directory in the owner's area
    CreateFolder {
        /// Owning username
        owner: String,
        /// Folder name
        name: String,
    },
    /// Remove a folder directory from the owner's area
    DeleteFolder {
        /// Owning username
        owner: String,
        /// Folder name
        name: String,
    },
}

impl Mutation {
    /// The username whose area this mutation touches
    pub fn owner(&self) -> &str {
        match self {
            Mutation::CreateDoc { owner, .. }
            | Mutation::UpdateDoc { owner, .. }
            | Mutation::DeleteDoc { owner, .. }
            | Mutation::CreateFolder { owner, .. }
            | Mutation::DeleteFolder { owner, .. } => owner,
        }
    }
}
