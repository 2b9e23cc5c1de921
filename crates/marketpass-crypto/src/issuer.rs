//! # Credential Issuance
//!
//! Issues a join credential: a fresh salt from the [`EntropyEngine`] and
//! the digest of `salt:password` from the [`DigestEngine`]. Either both
//! halves are returned or the call fails.

use marketpass_core::{Credential, CredentialError, PasswordHash, Salt};

use crate::digest::DigestEngine;
use crate::entropy::EntropyEngine;
use crate::scheme::digest_input;

/// Issues and rotates join credentials.
#[derive(Debug, Clone, Copy)]
pub struct CredentialIssuer<'a> {
    digest: &'a DigestEngine,
    entropy: &'a EntropyEngine,
    salt_bytes: usize,
}

impl<'a> CredentialIssuer<'a> {
    /// Create an issuer generating `salt_bytes` random bytes per salt.
    pub fn new(digest: &'a DigestEngine, entropy: &'a EntropyEngine, salt_bytes: usize) -> Self {
        Self {
            digest,
            entropy,
            salt_bytes,
        }
    }

    /// Issue a credential for `password`.
    ///
    /// The password is hashed as-is; empty passwords are accepted.
    pub async fn create_secret(&self, password: &str) -> Result<Credential, CredentialError> {
        let salt = Salt::new(self.entropy.generate_hex(self.salt_bytes)?);
        let hash = self.digest.digest_hex(&digest_input(&salt, password)).await?;

        tracing::debug!(
            salt_bytes = self.salt_bytes,
            backend = %self.digest.backend(),
            entropy = %self.entropy.kind(),
            "join credential issued"
        );
        Ok(Credential::new(salt, PasswordHash::from_digest_hex(hash)))
    }

    /// Replace a previous credential with one for `new_password`.
    ///
    /// The old credential is consumed; the result always carries a new salt
    /// and a new hash, even if the password is unchanged.
    pub async fn rotate(
        &self,
        _previous: Credential,
        new_password: &str,
    ) -> Result<Credential, CredentialError> {
        let next = self.create_secret(new_password).await?;
        tracing::debug!("join credential rotated");
        Ok(next)
    }
}
