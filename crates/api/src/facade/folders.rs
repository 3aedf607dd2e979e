//! Folder surface

use atelier_core::error::Result;
use atelier_core::SessionId;

/// Folder CRUD and membership against the calling session's workspace
pub trait FolderApi {
    /// Create an empty folder; `AlreadyExists` if the name is taken
    fn create_folder(&self, token: SessionId, name: &str) -> Result<()>;

    /// Delete a folder, tearing down any shares of it first
    fn delete_folder(&self, token: SessionId, name: &str) -> Result<()>;

    /// Folder names (snapshot)
    fn list_folders(&self, token: SessionId) -> Result<Vec<String>>;

    /// Add a document to a folder
    ///
    /// Both must exist in the caller's workspace; returns `false` if the
    /// document was already a member.
    fn add_document_to_folder(
        &self,
        token: SessionId,
        folder: &str,
        document: &str,
    ) -> Result<bool>;

    /// Remove a document from a folder; no-op (`false`) if not a member
    fn remove_document_from_folder(
        &self,
        token: SessionId,
        folder: &str,
        document: &str,
    ) -> Result<bool>;

    /// Member document names of a folder (snapshot)
    fn list_folder_documents(&self, token: SessionId, folder: &str) -> Result<Vec<String>>;
}
