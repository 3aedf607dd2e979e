//! Default credential hashing collaborator
//!
//! SHA-256 hex digests. The hasher sits behind the `CredentialHasher`
//! trait so deployments can swap in a slow KDF without touching the
//! session layer.

use atelier_core::CredentialHasher;
use sha2::{Digest, Sha256};

/// SHA-256 based credential hasher
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256CredentialHasher;

impl CredentialHasher for Sha256CredentialHasher {
    fn hash(&self, password: &str) -> String {
        let digest = Sha256::digest(password.as_bytes());
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}
