//! Facade implementations for [`Atelier`]
//!
//! Thin adapters: resolve the session, pick the caller's workspace, and
//! delegate to the engine. No business logic lives here.

use atelier_core::error::Result;
use atelier_core::{Observer, SessionId, SubscriberId};
use std::sync::Arc;
use tracing::{info, warn};

use crate::facade::{AuthApi, DocumentApi, FolderApi, ObserverApi, ShareApi};
use crate::Atelier;

impl AuthApi for Atelier {
    fn register(&self, username: &str, password: &str) -> Result<()> {
        self.directory().register(username, password)?;
        self.fs().ensure_user_area(username)?;
        self.workspace_for(username);
        Ok(())
    }

    fn login(&self, username: &str, password: &str) -> Result<Option<SessionId>> {
        if !self.directory().authenticate(username, password) {
            info!(username, "login rejected");
            return Ok(None);
        }

        let session = self.sessions().create(username);

        // Refresh this user's mirrors of everything shared with them; a
        // stale mirror must not block the login itself.
        if let Err(e) = self.coordinator().synchronize(username) {
            warn!(username, error = %e, "mirror synchronization at login failed");
        }

        Ok(Some(session.id))
    }

    fn logout(&self, token: SessionId) -> bool {
        self.sessions().logout(token)
    }

    fn validate(&self, token: SessionId) -> Option<String> {
        self.sessions().validate(token)
    }

    fn change_password(&self, token: SessionId, old: &str, new: &str) -> Result<()> {
        let username = self.authorize(token)?;
        self.directory().change_password(&username, old, new)
    }
}

impl DocumentApi for Atelier {
    fn create_document(&self, token: SessionId, name: &str) -> Result<()> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).create_document(name)
    }

    fn open_document(&self, token: SessionId, name: &str) -> Result<String> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).open_document(name)
    }

    fn save_document(&self, token: SessionId, name: &str, content: &str) -> Result<()> {
        let username = self.authorize(token)?;
        self.workspace_for(&username)
            .save_document(name, content, &username)
    }

    fn delete_document(&self, token: SessionId, name: &str) -> Result<()> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).delete_document(name)
    }

    fn list_documents(&self, token: SessionId) -> Result<Vec<String>> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).list_documents()
    }
}

impl FolderApi for Atelier {
    fn create_folder(&self, token: SessionId, name: &str) -> Result<()> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).create_folder(name)
    }

    fn delete_folder(&self, token: SessionId, name: &str) -> Result<()> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).delete_folder(name)
    }

    fn list_folders(&self, token: SessionId) -> Result<Vec<String>> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).list_folders()
    }

    fn add_document_to_folder(
        &self,
        token: SessionId,
        folder: &str,
        document: &str,
    ) -> Result<bool> {
        let username = self.authorize(token)?;
        self.workspace_for(&username)
            .add_document_to_folder(folder, document)
    }

    fn remove_document_from_folder(
        &self,
        token: SessionId,
        folder: &str,
        document: &str,
    ) -> Result<bool> {
        let username = self.authorize(token)?;
        self.workspace_for(&username)
            .remove_document_from_folder(folder, document)
    }

    fn list_folder_documents(&self, token: SessionId, folder: &str) -> Result<Vec<String>> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).list_folder_documents(folder)
    }
}

impl ShareApi for Atelier {
    fn share_folder(&self, token: SessionId, folder: &str, target: &str) -> Result<bool> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).share_folder(folder, target)
    }

    fn unshare_folder(&self, token: SessionId, folder: &str, target: &str) -> Result<bool> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).unshare_folder(folder, target)
    }

    fn synchronize(&self, token: SessionId) -> Result<()> {
        let username = self.authorize(token)?;
        self.coordinator().synchronize(&username)
    }
}

impl ObserverApi for Atelier {
    fn attach_observer(
        &self,
        token: SessionId,
        document: &str,
        observer: Arc<dyn Observer>,
    ) -> Result<SubscriberId> {
        let username = self.authorize(token)?;
        self.workspace_for(&username).attach_observer(document, observer)
    }

    fn detach_observer(
        &self,
        token: SessionId,
        document: &str,
        id: SubscriberId,
    ) -> Result<bool> {
        let username = self.authorize(token)?;
        Ok(self.workspace_for(&username).detach_observer(document, id))
    }
}
