//! Document surface

use atelier_core::error::Result;
use atelier_core::SessionId;

/// Document CRUD against the calling session's own workspace
pub trait DocumentApi {
    /// Create an empty document; `AlreadyExists` if the name is taken
    fn create_document(&self, token: SessionId, name: &str) -> Result<()>;

    /// Read a document's content; `NotFound` if absent
    fn open_document(&self, token: SessionId, name: &str) -> Result<String>;

    /// Atomically replace a document's content
    ///
    /// Advances the version, notifies attached observers (minus the
    /// editor's own client), and refreshes mirrors of folders containing
    /// the document.
    fn save_document(&self, token: SessionId, name: &str, content: &str) -> Result<()>;

    /// Delete a document; recreation under the same name is allowed
    fn delete_document(&self, token: SessionId, name: &str) -> Result<()>;

    /// Document names (snapshot, not a live view)
    fn list_documents(&self, token: SessionId) -> Result<Vec<String>>;
}
