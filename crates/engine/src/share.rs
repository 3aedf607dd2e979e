//! Share coordinator
//!
//! Owns the sharee → owner → folder mappings and drives mirror copies.
//! Mirror copies are snapshots of the owner's current content; freshness
//! comes from the push path (`propagate_save`) plus the `synchronize`
//! sweep run at login or on demand.
//!
//! The coordinator is the sole writer of mirror directories. Operations on
//! the same (owner, sharee) pair are serialized through a per-pair mutex so
//! a teardown cannot interleave with a copy in flight. Mirroring is
//! best-effort, not transactional: a failed copy surfaces an error and
//! leaves any partial state in place.

use atelier_core::error::Result;
use atelier_core::{Document, EntityKind, Error};
use atelier_storage::{UserStore, WorkspaceFs};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

/// Maintains share mappings and mirrors shared folders
pub struct ShareCoordinator {
    store: Arc<UserStore>,
    fs: WorkspaceFs,
    /// (owner, sharee) → serialization lock for that pair's mirror area
    pair_locks: DashMap<(String, String), Arc<Mutex<()>>>,
}

impl ShareCoordinator {
    /// Create a coordinator over the injected store and filesystem layer
    pub fn new(store: Arc<UserStore>, fs: WorkspaceFs) -> Self {
        ShareCoordinator {
            store,
            fs,
            pair_locks: DashMap::new(),
        }
    }

    fn pair_lock(&self, owner: &str, sharee: &str) -> Arc<Mutex<()>> {
        self.pair_locks
            .entry((owner.to_string(), sharee.to_string()))
            .or_default()
            .clone()
    }

    /// Snapshot a folder's member documents out of the owner's store
    fn folder_documents(&self, owner: &str, folder: &str) -> Result<Vec<Document>> {
        self.store.with_user(owner, |record| {
            let f = record
                .folders
                .get(folder)
                .ok_or_else(|| Error::not_found(EntityKind::Folder, folder))?;
            Ok(f.documents
                .iter()
                .filter_map(|name| record.documents.get(name).cloned())
                .collect())
        })?
    }

    /// Record a new mapping and perform the initial mirror copy
    pub fn on_share(&self, owner: &str, folder: &str, target: &str) -> Result<()> {
        let lock = self.pair_lock(owner, target);
        let _guard = lock.lock();

        self.store.add_share(target, owner, folder);
        self.mirror_folder_locked(owner, folder, target)?;
        info!(owner, folder, target, "folder shared and mirrored");
        Ok(())
    }

    /// Remove a mapping and tear down its mirror
    pub fn on_unshare(&self, owner: &str, folder: &str, target: &str) -> Result<()> {
        let lock = self.pair_lock(owner, target);
        let _guard = lock.lock();

        self.store.remove_share(target, owner, folder);
        self.fs.remove_mirror_folder(target, owner, folder)?;
        info!(owner, folder, target, "share removed, mirror torn down");
        Ok(())
    }

    /// Re-run the mirror copy from every owner mapped to this sharee
    ///
    /// Invoked at login and on demand. Errors from one owner do not stop
    /// the sweep; the first error is reported after every owner has been
    /// attempted.
    pub fn synchronize(&self, sharee: &str) -> Result<()> {
        let mut first_err = None;
        for (owner, folders) in self.store.owners_shared_to(sharee) {
            let lock = self.pair_lock(&owner, sharee);
            let _guard = lock.lock();
            for folder in folders {
                if let Err(e) = self.mirror_folder_locked(&owner, &folder, sharee) {
                    warn!(owner, folder, sharee, error = %e, "mirror sync failed");
                    first_err.get_or_insert(e);
                }
            }
        }
        match first_err {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    /// Push one saved document into every mirror that contains it
    ///
    /// Best-effort: a mirror write failure is logged and skipped so a save
    /// never fails because of a sharee-side I/O problem.
    pub fn propagate_save(&self, owner: &str, document: &str, content: &str) {
        for (sharee, folders) in self.store.sharees_of(owner) {
            for folder in folders {
                if !self.folder_contains(owner, &folder, document) {
                    continue;
                }
                let lock = self.pair_lock(owner, &sharee);
                let _guard = lock.lock();
                if let Err(e) =
                    self.fs
                        .write_mirror_document(&sharee, owner, &folder, document, content)
                {
                    warn!(owner, document, sharee, error = %e, "mirror push failed");
                }
            }
        }
    }

    /// Drop a deleted document from every mirror that contained it
    pub fn propagate_remove(&self, owner: &str, document: &str) {
        for (sharee, folders) in self.store.sharees_of(owner) {
            for folder in folders {
                let lock = self.pair_lock(owner, &sharee);
                let _guard = lock.lock();
                if let Err(e) = self
                    .fs
                    .remove_mirror_document(&sharee, owner, &folder, document)
                {
                    warn!(owner, document, sharee, error = %e, "mirror removal failed");
                }
            }
        }
    }

    fn folder_contains(&self, owner: &str, folder: &str, document: &str) -> bool {
        self.store
            .with_user(owner, |record| {
                record
                    .folders
                    .get(folder)
                    .is_some_and(|f| f.documents.contains(document))
            })
            .unwrap_or(false)
    }

    /// Copy every document in a folder into the target's mirror
    ///
    /// Caller must hold the (owner, target) pair lock.
    fn mirror_folder_locked(&self, owner: &str, folder: &str, target: &str) -> Result<()> {
        self.fs.ensure_mirror_folder(target, owner, folder)?;
        for doc in self.folder_documents(owner, folder)? {
            self.fs
                .write_mirror_document(target, owner, folder, &doc.name, &doc.content)?;
        }
        Ok(())
    }
}
