//! The Atelier service
//!
//! `Atelier` wires the store, filesystem layer, directory, session
//! registry, share coordinator, and per-user workspaces together with
//! explicit dependency injection, and is the single struct behind every
//! facade trait.

use atelier_core::error::Result;
use atelier_core::{CredentialHasher, Error, SessionId};
use atelier_engine::{
    Sha256CredentialHasher, SessionRegistry, ShareCoordinator, UserDirectory, Workspace,
};
use atelier_storage::{snapshot, UserStore, WorkspaceFs};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AtelierConfig;

/// The shared-workspace service
///
/// Construct with [`Atelier::open`]; a missing data directory or snapshot
/// bootstraps an empty service. All state is owned here; multiple
/// instances with different roots are fully isolated, which is also what
/// makes the test suites cheap to run.
pub struct Atelier {
    config: AtelierConfig,
    store: Arc<UserStore>,
    fs: WorkspaceFs,
    directory: UserDirectory,
    sessions: SessionRegistry,
    coordinator: Arc<ShareCoordinator>,
    workspaces: DashMap<String, Arc<Workspace>>,
}

impl Atelier {
    /// Open the service with the default SHA-256 credential hasher
    pub fn open(config: AtelierConfig) -> Result<Self> {
        Self::open_with_hasher(config, Arc::new(Sha256CredentialHasher))
    }

    /// Open the service with an injected credential hasher
    ///
    /// Loads the snapshot if one exists (merging per the union rules, so
    /// nothing persisted is silently dropped) and rebuilds a workspace for
    /// every known user.
    pub fn open_with_hasher(
        config: AtelierConfig,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Result<Self> {
        let fs = WorkspaceFs::new(config.workspaces_root())?;
        let store = Arc::new(UserStore::new());

        if let Some(data) = snapshot::load(&config.snapshot_path())? {
            store.merge_snapshot(data);
        }

        let directory = UserDirectory::new(store.clone(), hasher, config.limits.clone());
        let sessions = SessionRegistry::new(config.session_timeout_secs);
        let coordinator = Arc::new(ShareCoordinator::new(store.clone(), fs.clone()));

        let service = Atelier {
            store,
            fs,
            directory,
            sessions,
            coordinator,
            workspaces: DashMap::new(),
            config,
        };

        for username in service.store.usernames() {
            service.fs.ensure_user_area(&username)?;
            service.workspace_for(&username);
        }

        info!(
            data_dir = %service.config.data_dir.display(),
            users = service.store.user_count(),
            "atelier opened"
        );
        Ok(service)
    }

    /// The session registry (e.g. for a periodic expiry sweep)
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// The user directory
    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// Persist the store snapshot (temp file + atomic rename)
    pub fn flush(&self) -> Result<()> {
        snapshot::save(&self.config.snapshot_path(), &self.store.snapshot())
    }

    /// Resolve (or lazily build) the workspace bound to a username
    pub(crate) fn workspace_for(&self, username: &str) -> Arc<Workspace> {
        self.workspaces
            .entry(username.to_string())
            .or_insert_with(|| {
                Arc::new(Workspace::new(
                    username,
                    self.store.clone(),
                    self.fs.clone(),
                    self.coordinator.clone(),
                    self.config.limits.clone(),
                ))
            })
            .clone()
    }

    /// Check a token and resolve the calling username
    ///
    /// Every session-scoped facade call goes through here first and fails
    /// fast with `SessionInvalid` before touching any state.
    pub(crate) fn authorize(&self, token: SessionId) -> Result<String> {
        self.sessions.validate(token).ok_or(Error::SessionInvalid)
    }

    pub(crate) fn fs(&self) -> &WorkspaceFs {
        &self.fs
    }

    pub(crate) fn coordinator(&self) -> &ShareCoordinator {
        &self.coordinator
    }
}

impl Drop for Atelier {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!(error = %e, "snapshot flush on shutdown failed");
        }
    }
}
