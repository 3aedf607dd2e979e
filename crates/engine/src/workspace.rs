//! Per-user workspace
//!
//! The remote-facing object owning one user's documents and folders. Every
//! mutating operation is atomic on the owner's record; saves broadcast
//! through the notification hub and push into shared mirrors.
//!
//! A workspace trusts its identity binding: it is constructed for one
//! username and the caller (the session-checked facade) guarantees that
//! only that user's calls reach it.

use atelier_core::error::Result;
use atelier_core::{
    Document, DocumentEvent, EntityKind, Error, Folder, Limits, Mutation, Observer, SubscriberId,
};
use atelier_storage::{UserStore, WorkspaceFs};
use std::sync::Arc;
use tracing::{debug, info};

use crate::notify::NotificationHub;
use crate::share::ShareCoordinator;

/// One user's document/folder store and observer registration surface
pub struct Workspace {
    username: String,
    store: Arc<UserStore>,
    fs: WorkspaceFs,
    hub: NotificationHub,
    coordinator: Arc<ShareCoordinator>,
    limits: Limits,
}

impl Workspace {
    /// Bind a workspace to a username over the shared store
    pub fn new(
        username: impl Into<String>,
        store: Arc<UserStore>,
        fs: WorkspaceFs,
        coordinator: Arc<ShareCoordinator>,
        limits: Limits,
    ) -> Self {
        Workspace {
            username: username.into(),
            store,
            fs,
            hub: NotificationHub::new(),
            coordinator,
            limits,
        }
    }

    /// The owning username
    pub fn username(&self) -> &str {
        &self.username
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Create an empty document
    ///
    /// Fails with `AlreadyExists` if the name is taken; the existing
    /// document is left untouched. Opens the document's (empty)
    /// subscription list.
    pub fn create_document(&self, name: &str) -> Result<()> {
        self.limits.validate_name(name)?;
        self.store.with_user_mut(&self.username, |record| {
            if record.documents.contains_key(name) {
                return Err(Error::already_exists(EntityKind::Document, name));
            }
            record
                .documents
                .insert(name.to_string(), Document::new(name, &self.username));
            Ok(())
        })?;

        self.fs.apply(&Mutation::CreateDoc {
            owner: self.username.clone(),
            name: name.to_string(),
        })?;
        self.hub.open_channel(name);
        info!(owner = %self.username, document = name, "document created");
        Ok(())
    }

    /// Read a document's current content
    pub fn open_document(&self, name: &str) -> Result<String> {
        Ok(self.store.document(&self.username, name)?.content)
    }

    /// Replace a document's content
    ///
    /// Atomic replacement: the version advances and the full new content is
    /// broadcast to observers (minus the editor's own client) and pushed
    /// into any mirrors containing the document. Observer and mirror
    /// failures never fail the save.
    pub fn save_document(&self, name: &str, content: &str, editor: &str) -> Result<()> {
        self.limits.validate_content(content)?;
        let version = self.store.with_user_mut(&self.username, |record| {
            let doc = record
                .documents
                .get_mut(name)
                .ok_or_else(|| Error::not_found(EntityKind::Document, name))?;
            Ok(doc.replace_content(content))
        })?;

        self.fs.apply(&Mutation::UpdateDoc {
            owner: self.username.clone(),
            name: name.to_string(),
            content: content.to_string(),
        })?;

        let delivered = self.hub.broadcast(&DocumentEvent {
            document: name.to_string(),
            content: content.to_string(),
            editor: editor.to_string(),
            version,
        });
        debug!(
            owner = %self.username,
            document = name,
            version,
            delivered,
            "document saved"
        );

        self.coordinator
            .propagate_save(&self.username, name, content);
        Ok(())
    }

    /// Delete a document, returning its name to the free pool
    ///
    /// Also drops it from every folder that referenced it, closes its
    /// subscription list, and removes mirrored copies. Recreation under the
    /// same name starts over at version 0.
    pub fn delete_document(&self, name: &str) -> Result<()> {
        self.store.with_user_mut(&self.username, |record| {
            if record.documents.remove(name).is_none() {
                return Err(Error::not_found(EntityKind::Document, name));
            }
            for folder in record.folders.values_mut() {
                folder.remove_document(name);
            }
            Ok(())
        })?;

        self.fs.apply(&Mutation::DeleteDoc {
            owner: self.username.clone(),
            name: name.to_string(),
        })?;
        self.hub.close_channel(name);
        self.coordinator.propagate_remove(&self.username, name);
        info!(owner = %self.username, document = name, "document deleted");
        Ok(())
    }

    /// Names of all documents (snapshot, not a live view)
    pub fn list_documents(&self) -> Result<Vec<String>> {
        self.store.with_user(&self.username, |record| {
            let mut names: Vec<String> = record.documents.keys().cloned().collect();
            names.sort();
            names
        })
    }

    // ========================================================================
    // Folders
    // ========================================================================

    /// Create an empty folder
    pub fn create_folder(&self, name: &str) -> Result<()> {
        self.limits.validate_name(name)?;
        self.store.with_user_mut(&self.username, |record| {
            if record.folders.contains_key(name) {
                return Err(Error::already_exists(EntityKind::Folder, name));
            }
            record
                .folders
                .insert(name.to_string(), Folder::new(name, &self.username));
            Ok(())
        })?;

        self.fs.apply(&Mutation::CreateFolder {
            owner: self.username.clone(),
            name: name.to_string(),
        })?;
        info!(owner = %self.username, folder = name, "folder created");
        Ok(())
    }

    /// Delete a folder, unsharing it from every target first
    pub fn delete_folder(&self, name: &str) -> Result<()> {
        let targets = self.store.with_user(&self.username, |record| {
            record
                .folders
                .get(name)
                .map(|f| f.shared_with.iter().cloned().collect::<Vec<_>>())
        })?;
        let targets = targets.ok_or_else(|| Error::not_found(EntityKind::Folder, name))?;

        for target in targets {
            self.unshare_folder(name, &target)?;
        }

        self.store.with_user_mut(&self.username, |record| {
            record.folders.remove(name);
            Ok(())
        })?;
        self.fs.apply(&Mutation::DeleteFolder {
            owner: self.username.clone(),
            name: name.to_string(),
        })?;
        info!(owner = %self.username, folder = name, "folder deleted");
        Ok(())
    }

    /// Names of all folders (snapshot)
    pub fn list_folders(&self) -> Result<Vec<String>> {
        self.store.with_user(&self.username, |record| {
            let mut names: Vec<String> = record.folders.keys().cloned().collect();
            names.sort();
            names
        })
    }

    /// Add a document to a folder
    ///
    /// Both must already exist in this workspace; membership never
    /// transfers ownership. Returns `false` if the document was already a
    /// member.
    pub fn add_document_to_folder(&self, folder: &str, document: &str) -> Result<bool> {
        self.store.with_user_mut(&self.username, |record| {
            if !record.documents.contains_key(document) {
                return Err(Error::not_found(EntityKind::Document, document));
            }
            let f = record
                .folders
                .get_mut(folder)
                .ok_or_else(|| Error::not_found(EntityKind::Folder, folder))?;
            Ok(f.add_document(document))
        })
    }

    /// Remove a document from a folder; no-op (`false`) if not a member
    pub fn remove_document_from_folder(&self, folder: &str, document: &str) -> Result<bool> {
        self.store.with_user_mut(&self.username, |record| {
            let f = record
                .folders
                .get_mut(folder)
                .ok_or_else(|| Error::not_found(EntityKind::Folder, folder))?;
            Ok(f.remove_document(document))
        })
    }

    /// Names of a folder's member documents (snapshot)
    pub fn list_folder_documents(&self, folder: &str) -> Result<Vec<String>> {
        self.store.with_user(&self.username, |record| {
            record
                .folders
                .get(folder)
                .map(|f| f.documents.iter().cloned().collect())
                .ok_or_else(|| Error::not_found(EntityKind::Folder, folder))
        })?
    }

    // ========================================================================
    // Sharing
    // ========================================================================

    /// Share a folder with another registered user
    ///
    /// Records the mapping and performs the initial mirror copy. Returns
    /// `false` (after refreshing the mirror) if the folder was already
    /// shared with the target.
    pub fn share_folder(&self, folder: &str, target: &str) -> Result<bool> {
        if target == self.username {
            return Err(Error::AccessDenied(
                "cannot share a folder with its owner".to_string(),
            ));
        }
        if !self.store.contains_user(target) {
            return Err(Error::not_found(EntityKind::User, target));
        }

        let newly_shared = self.store.with_user_mut(&self.username, |record| {
            let f = record
                .folders
                .get_mut(folder)
                .ok_or_else(|| Error::not_found(EntityKind::Folder, folder))?;
            Ok(f.share_with(target))
        })?;

        self.coordinator.on_share(&self.username, folder, target)?;
        Ok(newly_shared)
    }

    /// Stop sharing a folder with a user and tear down their mirror
    ///
    /// Returns `false` if the folder was not shared with the target; the
    /// teardown still runs so no mirrored artifacts can linger.
    pub fn unshare_folder(&self, folder: &str, target: &str) -> Result<bool> {
        let was_shared = self.store.with_user_mut(&self.username, |record| {
            let f = record
                .folders
                .get_mut(folder)
                .ok_or_else(|| Error::not_found(EntityKind::Folder, folder))?;
            Ok(f.unshare_with(target))
        })?;

        self.coordinator.on_unshare(&self.username, folder, target)?;
        Ok(was_shared)
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Attach an observer to a document, receiving an opaque subscriber id
    pub fn attach_observer(
        &self,
        document: &str,
        observer: Arc<dyn Observer>,
    ) -> Result<SubscriberId> {
        self.hub.attach(document, observer)
    }

    /// Detach a subscriber by id; no-op (`false`) if absent
    pub fn detach_observer(&self, document: &str, id: SubscriberId) -> bool {
        self.hub.detach(document, id)
    }

    /// Number of live subscribers on a document (test/introspection hook)
    pub fn subscriber_count(&self, document: &str) -> usize {
        self.hub.subscriber_count(document)
    }
}
