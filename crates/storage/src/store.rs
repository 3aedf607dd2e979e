//! Concurrent user store
//!
//! `UserStore` is the shared mutable state behind every workspace:
//! DashMap-sharded records keyed by username, plus the share table mapping
//! sharee → owner → shared folder names. The entry API gives per-username
//! atomicity for mutating operations without a global lock; reads clone out
//! consistent snapshots.
//!
//! The store is explicitly constructed and passed to its consumers. There
//! is no process-wide instance.

use atelier_core::error::{EntityKind, Error, Result};
use atelier_core::Document;
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

use crate::record::UserRecord;
use crate::snapshot::SnapshotData;

/// Shared store of user records and share mappings
#[derive(Debug, Default)]
pub struct UserStore {
    /// username → record
    users: DashMap<String, UserRecord>,
    /// sharee → (owner → folder names)
    shares: DashMap<String, FxHashMap<String, BTreeSet<String>>>,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        UserStore {
            users: DashMap::new(),
            shares: DashMap::new(),
        }
    }

    // ========================================================================
    // User records
    // ========================================================================

    /// Insert a new user record
    ///
    /// Fails with `DuplicateUser` if the username is taken. The
    /// check-and-insert is atomic on the username key.
    pub fn insert_user(&self, username: &str, credential_hash: &str) -> Result<()> {
        match self.users.entry(username.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(Error::DuplicateUser(username.to_string()))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(UserRecord::new(credential_hash));
                Ok(())
            }
        }
    }

    /// Whether a user is registered
    pub fn contains_user(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Number of registered users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Registered usernames (snapshot)
    pub fn usernames(&self) -> Vec<String> {
        self.users.iter().map(|e| e.key().clone()).collect()
    }

    /// The stored credential hash for a user, if registered
    pub fn credential_hash(&self, username: &str) -> Option<String> {
        self.users.get(username).map(|r| r.credential_hash.clone())
    }

    /// Replace a user's credential hash
    pub fn set_credential(&self, username: &str, credential_hash: &str) -> Result<()> {
        let mut record = self
            .users
            .get_mut(username)
            .ok_or_else(|| Error::not_found(EntityKind::User, username))?;
        record.credential_hash = credential_hash.to_string();
        Ok(())
    }

    /// Run a closure against a user's record (shared access)
    pub fn with_user<R>(&self, username: &str, f: impl FnOnce(&UserRecord) -> R) -> Result<R> {
        let record = self
            .users
            .get(username)
            .ok_or_else(|| Error::not_found(EntityKind::User, username))?;
        Ok(f(record.value()))
    }

    /// Run a closure against a user's record (exclusive access)
    ///
    /// The record's map shard stays locked for the duration of the closure,
    /// making the whole closure atomic with respect to other operations on
    /// the same username.
    pub fn with_user_mut<R>(
        &self,
        username: &str,
        f: impl FnOnce(&mut UserRecord) -> Result<R>,
    ) -> Result<R> {
        let mut record = self
            .users
            .get_mut(username)
            .ok_or_else(|| Error::not_found(EntityKind::User, username))?;
        f(record.value_mut())
    }

    /// Clone out a single document
    pub fn document(&self, owner: &str, name: &str) -> Result<Document> {
        self.with_user(owner, |record| record.documents.get(name).cloned())?
            .ok_or_else(|| Error::not_found(EntityKind::Document, name))
    }

    // ========================================================================
    // Share table
    // ========================================================================

    /// Record a share mapping; returns false if it already existed
    pub fn add_share(&self, sharee: &str, owner: &str, folder: &str) -> bool {
        let mut by_owner = self.shares.entry(sharee.to_string()).or_default();
        by_owner
            .entry(owner.to_string())
            .or_default()
            .insert(folder.to_string())
    }

    /// Remove a share mapping; returns false if it did not exist
    ///
    /// Empty owner entries are dropped so an unshared pair leaves nothing
    /// behind in the table.
    pub fn remove_share(&self, sharee: &str, owner: &str, folder: &str) -> bool {
        let Some(mut by_owner) = self.shares.get_mut(sharee) else {
            return false;
        };
        let Some(folders) = by_owner.get_mut(owner) else {
            return false;
        };
        let removed = folders.remove(folder);
        if folders.is_empty() {
            by_owner.remove(owner);
        }
        removed
    }

    /// Whether a specific mapping exists
    pub fn has_share(&self, sharee: &str, owner: &str, folder: &str) -> bool {
        self.shares
            .get(sharee)
            .map(|by_owner| {
                by_owner
                    .get(owner)
                    .is_some_and(|folders| folders.contains(folder))
            })
            .unwrap_or(false)
    }

    /// Every (owner, folders) pair mapped to a sharee (snapshot)
    pub fn owners_shared_to(&self, sharee: &str) -> Vec<(String, BTreeSet<String>)> {
        self.shares
            .get(sharee)
            .map(|by_owner| {
                by_owner
                    .iter()
                    .map(|(owner, folders)| (owner.clone(), folders.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every (sharee, folders) pair mapped from an owner (snapshot)
    ///
    /// Scans the table; the table is small (one entry per sharee).
    pub fn sharees_of(&self, owner: &str) -> Vec<(String, BTreeSet<String>)> {
        self.shares
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .get(owner)
                    .map(|folders| (entry.key().clone(), folders.clone()))
            })
            .collect()
    }

    // ========================================================================
    // Snapshot import/export
    // ========================================================================

    /// Export the full store state for persistence
    pub fn snapshot(&self) -> SnapshotData {
        let users = self
            .users
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        let shares = self
            .shares
            .iter()
            .map(|e| {
                let by_owner = e
                    .value()
                    .iter()
                    .map(|(owner, folders)| (owner.clone(), folders.clone()))
                    .collect();
                (e.key().clone(), by_owner)
            })
            .collect();
        SnapshotData { users, shares }
    }

    /// Merge a loaded snapshot into the store
    ///
    /// Missing users are inserted whole; existing users merge per
    /// `UserRecord::merge_loaded`. Share mappings are unioned; previously
    /// persisted folder/share state is never dropped by a reload.
    pub fn merge_snapshot(&self, data: SnapshotData) {
        for (username, loaded) in data.users {
            match self.users.entry(username) {
                dashmap::mapref::entry::Entry::Occupied(mut slot) => {
                    slot.get_mut().merge_loaded(loaded);
                }
                dashmap::mapref::entry::Entry::Vacant(slot) => {
                    slot.insert(loaded);
                }
            }
        }
        for (sharee, by_owner) in data.shares {
            let mut entry = self.shares.entry(sharee).or_default();
            for (owner, folders) in by_owner {
                entry.entry(owner).or_default().extend(folders);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::Folder;

    #[test]
    fn test_insert_user_rejects_duplicate() {
        let store = UserStore::new();
        store.insert_user("alice", "h1").unwrap();
        let err = store.insert_user("alice", "h2").unwrap_err();
        assert!(matches!(err, Error::DuplicateUser(_)));
        // First credential untouched
        assert_eq!(store.credential_hash("alice").unwrap(), "h1");
    }

    #[test]
    fn test_with_user_unknown() {
        let store = UserStore::new();
        let err = store.with_user("ghost", |_| ()).unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                kind: EntityKind::User,
                ..
            }
        ));
    }

    #[test]
    fn test_document_lookup() {
        let store = UserStore::new();
        store.insert_user("alice", "h").unwrap();
        store
            .with_user_mut("alice", |rec| {
                rec.documents
                    .insert("notes".to_string(), Document::new("notes", "alice"));
                Ok(())
            })
            .unwrap();

        assert_eq!(store.document("alice", "notes").unwrap().content, "");
        let err = store.document("alice", "missing").unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                kind: EntityKind::Document,
                ..
            }
        ));
    }

    #[test]
    fn test_share_table_roundtrip() {
        let store = UserStore::new();
        assert!(store.add_share("bob", "alice", "reports"));
        assert!(!store.add_share("bob", "alice", "reports"));
        assert!(store.has_share("bob", "alice", "reports"));

        let owners = store.owners_shared_to("bob");
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].0, "alice");

        let sharees = store.sharees_of("alice");
        assert_eq!(sharees.len(), 1);
        assert_eq!(sharees[0].0, "bob");

        assert!(store.remove_share("bob", "alice", "reports"));
        assert!(!store.remove_share("bob", "alice", "reports"));
        assert!(!store.has_share("bob", "alice", "reports"));
        assert!(store.owners_shared_to("bob").is_empty());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let store = UserStore::new();
        store.insert_user("alice", "h").unwrap();
        store
            .with_user_mut("alice", |rec| {
                let mut doc = Document::new("notes", "alice");
                doc.replace_content("hello");
                rec.documents.insert("notes".to_string(), doc);
                rec.folders
                    .insert("reports".to_string(), Folder::new("reports", "alice"));
                Ok(())
            })
            .unwrap();
        store.add_share("bob", "alice", "reports");

        let restored = UserStore::new();
        restored.merge_snapshot(store.snapshot());

        assert_eq!(restored.document("alice", "notes").unwrap().content, "hello");
        assert!(restored.has_share("bob", "alice", "reports"));
    }

    #[test]
    fn test_merge_snapshot_preserves_live_state() {
        let store = UserStore::new();
        store.insert_user("alice", "h").unwrap();
        store.add_share("carol", "alice", "drafts");

        let loaded = UserStore::new();
        loaded.insert_user("alice", "h").unwrap();
        loaded.add_share("bob", "alice", "reports");

        store.merge_snapshot(loaded.snapshot());

        // Both the live mapping and the loaded one survive
        assert!(store.has_share("carol", "alice", "drafts"));
        assert!(store.has_share("bob", "alice", "reports"));
    }
}
