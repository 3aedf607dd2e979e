//! Filesystem areas for workspace content and mirrors
//!
//! All on-disk layout hangs off a single injected storage root:
//!
//! ```text
//! <root>/<owner>/<doc>                      owner's documents
//! <root>/<owner>/<folder>/                  owner's folder markers
//! <root>/<sharee>/shared/<owner>/<folder>/  mirror of a shared folder
//! ```
//!
//! `apply` dispatches a [`Mutation`] to exactly one handler per variant.
//! Mirror writes are best-effort building blocks for the share coordinator;
//! failures surface as `Io` errors and partial state is left in place.

use atelier_core::error::Result;
use atelier_core::Mutation;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reserved directory name under a user's area holding mirrored content
const SHARED_DIR: &str = "shared";

/// Filesystem side-effect layer rooted at an injected path
#[derive(Debug, Clone)]
pub struct WorkspaceFs {
    root: PathBuf,
}

impl WorkspaceFs {
    /// Create the layer, ensuring the root directory exists
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(WorkspaceFs { root })
    }

    /// The injected storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A user's own area
    pub fn user_area(&self, username: &str) -> PathBuf {
        self.root.join(username)
    }

    /// Create a user's area if absent
    pub fn ensure_user_area(&self, username: &str) -> Result<()> {
        fs::create_dir_all(self.user_area(username))?;
        Ok(())
    }

    fn doc_path(&self, owner: &str, name: &str) -> PathBuf {
        self.user_area(owner).join(name)
    }

    fn folder_path(&self, owner: &str, name: &str) -> PathBuf {
        self.user_area(owner).join(name)
    }

    // ========================================================================
    // Mutation handlers (one per variant)
    // ========================================================================

    /// Apply a workspace mutation to the owner's area
    pub fn apply(&self, mutation: &Mutation) -> Result<()> {
        match mutation {
            Mutation::CreateDoc { owner, name } => self.create_doc(owner, name),
            Mutation::UpdateDoc {
                owner,
                name,
                content,
            } => self.update_doc(owner, name, content),
            Mutation::DeleteDoc { owner, name } => self.delete_doc(owner, name),
            Mutation::CreateFolder { owner, name } => self.create_folder(owner, name),
            Mutation::DeleteFolder { owner, name } => self.delete_folder(owner, name),
        }
    }

    fn create_doc(&self, owner: &str, name: &str) -> Result<()> {
        self.ensure_user_area(owner)?;
        let path = self.doc_path(owner, name);
        if !path.exists() {
            fs::write(&path, b"")?;
            debug!(path = %path.display(), "document file created");
        }
        Ok(())
    }

    fn update_doc(&self, owner: &str, name: &str, content: &str) -> Result<()> {
        self.ensure_user_area(owner)?;
        fs::write(self.doc_path(owner, name), content.as_bytes())?;
        Ok(())
    }

    fn delete_doc(&self, owner: &str, name: &str) -> Result<()> {
        let path = self.doc_path(owner, name);
        if path.exists() {
            fs::remove_file(&path)?;
            debug!(path = %path.display(), "document file removed");
        }
        Ok(())
    }

    fn create_folder(&self, owner: &str, name: &str) -> Result<()> {
        fs::create_dir_all(self.folder_path(owner, name))?;
        Ok(())
    }

    fn delete_folder(&self, owner: &str, name: &str) -> Result<()> {
        let path = self.folder_path(owner, name);
        if path.exists() {
            fs::remove_dir_all(&path)?;
            debug!(path = %path.display(), "folder removed");
        }
        Ok(())
    }

    // ========================================================================
    // Mirror areas
    // ========================================================================

    /// The mirror area holding one owner's shared content for a sharee
    pub fn mirror_area(&self, sharee: &str, owner: &str) -> PathBuf {
        self.user_area(sharee).join(SHARED_DIR).join(owner)
    }

    /// The mirror directory for one shared folder
    pub fn mirror_folder(&self, sharee: &str, owner: &str, folder: &str) -> PathBuf {
        self.mirror_area(sharee, owner).join(folder)
    }

    /// Create the mirror directory for a shared folder
    pub fn ensure_mirror_folder(&self, sharee: &str, owner: &str, folder: &str) -> Result<()> {
        fs::create_dir_all(self.mirror_folder(sharee, owner, folder))?;
        Ok(())
    }

    /// Write one mirrored document (snapshot copy of the owner's content)
    pub fn write_mirror_document(
        &self,
        sharee: &str,
        owner: &str,
        folder: &str,
        doc: &str,
        content: &str,
    ) -> Result<()> {
        let dir = self.mirror_folder(sharee, owner, folder);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(doc), content.as_bytes())?;
        Ok(())
    }

    /// Remove one mirrored document if present
    pub fn remove_mirror_document(
        &self,
        sharee: &str,
        owner: &str,
        folder: &str,
        doc: &str,
    ) -> Result<()> {
        let path = self.mirror_folder(sharee, owner, folder).join(doc);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Recursively remove the mirror of one shared folder
    pub fn remove_mirror_folder(&self, sharee: &str, owner: &str, folder: &str) -> Result<()> {
        let path = self.mirror_folder(sharee, owner, folder);
        if path.exists() {
            fs::remove_dir_all(&path)?;
            debug!(path = %path.display(), "mirror folder torn down");
        }
        // Drop the per-owner area too once its last folder is gone
        let area = self.mirror_area(sharee, owner);
        if area.exists() && fs::read_dir(&area)?.next().is_none() {
            fs::remove_dir(&area)?;
        }
        Ok(())
    }

    /// Recursively remove everything mirrored from one owner to one sharee
    pub fn remove_mirror_area(&self, sharee: &str, owner: &str) -> Result<()> {
        let path = self.mirror_area(sharee, owner);
        if path.exists() {
            fs::remove_dir_all(&path)?;
        }
        Ok(())
    }

    /// Read a mirrored document back (used by tests and read paths)
    pub fn read_mirror_document(
        &self,
        sharee: &str,
        owner: &str,
        folder: &str,
        doc: &str,
    ) -> Result<String> {
        let path = self.mirror_folder(sharee, owner, folder).join(doc);
        Ok(fs::read_to_string(path)?)
    }
}
