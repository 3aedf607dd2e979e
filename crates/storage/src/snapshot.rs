//! Snapshot persistence
//!
//! The whole store serializes to a single bincode snapshot file. Writes go
//! through a temp file followed by an atomic rename, so a crash mid-write
//! leaves the previous snapshot intact. A missing snapshot is not an error:
//! the store bootstraps with zero users.

use atelier_core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::record::UserRecord;

/// Serialized form of the full store state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotData {
    /// username → record
    pub users: BTreeMap<String, UserRecord>,
    /// sharee → (owner → folder names)
    pub shares: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl SnapshotData {
    /// An empty snapshot
    pub fn empty() -> Self {
        SnapshotData {
            users: BTreeMap::new(),
            shares: BTreeMap::new(),
        }
    }
}

/// Load a snapshot from disk
///
/// Returns `Ok(None)` if the file does not exist (fresh start). A present
/// but undecodable file is an error: silently discarding persisted state
/// is worse than failing the open.
pub fn load(path: &Path) -> Result<Option<SnapshotData>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot on disk, starting empty");
            return Ok(None);
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let data: SnapshotData =
        bincode::deserialize(&bytes).map_err(|e| Error::Serialization(e.to_string()))?;
    info!(
        path = %path.display(),
        users = data.users.len(),
        "snapshot loaded"
    );
    Ok(Some(data))
}

/// Write a snapshot to disk (temp file + atomic rename)
pub fn save(path: &Path, data: &SnapshotData) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let bytes = bincode::serialize(data).map_err(|e| Error::Serialization(e.to_string()))?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;

    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        users = data.users.len(),
        "snapshot written"
    );
    Ok(())
}
