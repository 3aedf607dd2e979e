//! Sharing surface

use atelier_core::error::Result;
use atelier_core::SessionId;

/// Folder sharing and mirror synchronization
pub trait ShareApi {
    /// Share a folder with another registered user
    ///
    /// Fails with `NotFound` if the target user or the folder is unknown;
    /// no mapping is recorded in that case. On success the target's mirror
    /// holds a snapshot copy of the folder's documents. Returns `false` if
    /// the folder was already shared with the target.
    fn share_folder(&self, token: SessionId, folder: &str, target: &str) -> Result<bool>;

    /// Stop sharing a folder; the target's mirror of it is removed
    fn unshare_folder(&self, token: SessionId, folder: &str, target: &str) -> Result<bool>;

    /// Re-run the mirror copy from every owner sharing with the caller
    ///
    /// Mirror I/O failures surface as an error; partial copies are left in
    /// place (best-effort mirroring, not transactional).
    fn synchronize(&self, token: SessionId) -> Result<()>;
}
