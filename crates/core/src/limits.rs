//! Name and credential policy limits
//!
//! Violations are surfaced as the matching taxonomy error
//! (`InvalidUsernameFormat`, `WeakPassword`, `AlreadyExists`-adjacent name
//! checks are the caller's concern). Custom limits can be injected at
//! service construction time.

use crate::error::{Error, Result};

/// Policy limits enforced at the registration and workspace boundaries
#[derive(Debug, Clone)]
pub struct Limits {
    /// Minimum password length in characters (default: 4)
    pub min_password_len: usize,
    /// Maximum username length in bytes (default: 64)
    pub max_username_len: usize,
    /// Maximum document/folder name length in bytes (default: 255)
    pub max_name_len: usize,
    /// Maximum document content length in bytes (default: 16MB)
    pub max_content_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            min_password_len: 4,
            max_username_len: 64,
            max_name_len: 255,
            max_content_len: 16 * 1024 * 1024, // 16MB
        }
    }
}

impl Limits {
    /// Validate a username against the alphanumeric-only policy
    ///
    /// Usernames key the store and name on-disk areas, so anything outside
    /// ASCII alphanumerics is rejected outright.
    pub fn validate_username(&self, username: &str) -> Result<()> {
        if username.is_empty()
            || username.len() > self.max_username_len
            || !username.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(Error::InvalidUsernameFormat(username.to_string()));
        }
        Ok(())
    }

    /// Validate a password against the minimum-length policy
    pub fn validate_password(&self, password: &str) -> Result<()> {
        if password.chars().count() < self.min_password_len {
            return Err(Error::WeakPassword);
        }
        Ok(())
    }

    /// Validate a document or folder name
    ///
    /// Names become file and directory names under the storage root, so
    /// path separators and traversal components are rejected.
    pub fn validate_name(&self, name: &str) -> Result<()> {
        if name.is_empty()
            || name.len() > self.max_name_len
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0')
        {
            return Err(Error::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// Validate document content size
    pub fn validate_content(&self, content: &str) -> Result<()> {
        if content.len() > self.max_content_len {
            return Err(Error::Serialization(format!(
                "content exceeds {} bytes",
                self.max_content_len
            )));
        }
        Ok(())
    }
}
