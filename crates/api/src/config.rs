//! Service configuration
//!
//! All environment-dependent values are injected here: the storage root,
//! the session idle timeout, and the policy limits. Nothing in the stack
//! reads paths or policy from process-wide state.

use atelier_core::Limits;
use atelier_engine::DEFAULT_SESSION_TIMEOUT_SECS;
use std::path::PathBuf;

/// Configuration for an [`Atelier`](crate::Atelier) instance
#[derive(Debug, Clone)]
pub struct AtelierConfig {
    /// Root directory for workspace content, mirrors, and the snapshot
    pub data_dir: PathBuf,
    /// Session idle timeout in seconds
    pub session_timeout_secs: i64,
    /// Name and credential policy
    pub limits: Limits,
}

impl AtelierConfig {
    /// Configuration with defaults rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        AtelierConfig {
            data_dir: data_dir.into(),
            session_timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
            limits: Limits::default(),
        }
    }

    /// Override the session idle timeout
    pub fn with_session_timeout(mut self, secs: i64) -> Self {
        self.session_timeout_secs = secs;
        self
    }

    /// Override the policy limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Path of the store snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("store.snapshot")
    }

    /// Root of the per-user filesystem areas
    pub fn workspaces_root(&self) -> PathBuf {
        self.data_dir.join("workspaces")
    }
}
