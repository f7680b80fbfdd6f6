//! Password digest construction.
//!
//! Credentials are stored as a deterministic one-way digest so the
//! repository can answer lookups by `(identifier, digest)` pair. The digest
//! is SHA-256 over a server-side pepper followed by the plaintext; the pepper
//! never leaves the process and is zeroized on drop.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Deterministic one-way transform from plaintext password to stored digest.
#[derive(Clone)]
pub struct PasswordHasher {
    pepper: Zeroizing<String>,
}

impl PasswordHasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: Zeroizing::new(pepper.into()),
        }
    }

    /// Digest a plaintext password.
    ///
    /// Equal inputs always produce equal digests under the same pepper, so
    /// the result is usable as a lookup key.
    pub fn digest(&self, plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.pepper.as_bytes());
        hasher.update(plaintext.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let hasher = PasswordHasher::new("pepper");
        assert_eq!(hasher.digest("hunter2"), hasher.digest("hunter2"));
    }

    #[test]
    fn digest_depends_on_plaintext_and_pepper() {
        let hasher = PasswordHasher::new("pepper");
        assert_ne!(hasher.digest("hunter2"), hasher.digest("hunter3"));

        let other = PasswordHasher::new("other-pepper");
        assert_ne!(hasher.digest("hunter2"), other.digest("hunter2"));
    }

    #[test]
    fn digest_is_hex_encoded_sha256() {
        let hasher = PasswordHasher::new("");
        let digest = hasher.digest("abc");
        assert_eq!(digest.len(), 64);
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
