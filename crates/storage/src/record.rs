//! Per-user storage record
//!
//! One `UserRecord` holds everything persisted for a single user: the
//! credential hash and the document and folder maps. Records are the unit
//! of locking in the store (per-username atomicity) and the unit of
//! serialization in the snapshot.

use atelier_core::{Document, Folder};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Everything the store persists for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stored credential hash (never plaintext)
    pub credential_hash: String,
    /// Document name → document
    pub documents: FxHashMap<String, Document>,
    /// Folder name → folder
    pub folders: FxHashMap<String, Folder>,
}

impl UserRecord {
    /// Create a fresh record with an empty workspace
    pub fn new(credential_hash: impl Into<String>) -> Self {
        UserRecord {
            credential_hash: credential_hash.into(),
            documents: FxHashMap::default(),
            folders: FxHashMap::default(),
        }
    }

    /// Merge a previously persisted record into this one
    ///
    /// In-memory state wins on conflicting documents (it is fresher), but
    /// persisted folder membership and share targets are unioned in so a
    /// reload never silently drops them.
    pub fn merge_loaded(&mut self, loaded: UserRecord) {
        for (name, doc) in loaded.documents {
            match self.documents.get(&name) {
                Some(existing) if existing.version >= doc.version => {}
                _ => {
                    self.documents.insert(name, doc);
                }
            }
        }
        for (name, folder) in loaded.folders {
            match self.folders.get_mut(&name) {
                Some(existing) => {
                    existing.documents.extend(folder.documents);
                    existing.shared_with.extend(folder.shared_with);
                }
                None => {
                    self.folders.insert(name, folder);
                }
            }
        }
    }
}
