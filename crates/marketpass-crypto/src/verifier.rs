//! # Join Proof Computation
//!
//! Recomputes the credential digest from a candidate password and the
//! stored salt. The verifier returns the [`Proof`] and stops there: the
//! caller compares it against the stored hash, with [`Proof::matches`] or
//! its own policy. There is no attempt counter or lockout here.

use marketpass_core::{CredentialError, Proof, Salt};

use crate::digest::DigestEngine;
use crate::scheme::digest_input;

/// Computes join proofs.
#[derive(Debug, Clone, Copy)]
pub struct ProofVerifier<'a> {
    digest: &'a DigestEngine,
}

impl<'a> ProofVerifier<'a> {
    /// Create a verifier over the given digest engine.
    pub fn new(digest: &'a DigestEngine) -> Self {
        Self { digest }
    }

    /// Digest of `salt:password` with a caller-supplied salt.
    ///
    /// Neither argument is validated; empty or malformed salts are hashed
    /// as given.
    pub async fn compute_proof(&self, password: &str, salt: &Salt) -> Result<Proof, CredentialError> {
        let hash = self.digest.digest_hex(&digest_input(salt, password)).await?;
        Ok(Proof::from_digest_hex(hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::EntropyEngine;
    use crate::issuer::CredentialIssuer;
    use marketpass_core::{DigestBackendPreference, PasswordHash};

    const SALT: &str = "00112233445566778899aabbccddeeff";

    fn digest() -> DigestEngine {
        DigestEngine::probe(DigestBackendPreference::Auto).unwrap()
    }

    #[tokio::test]
    async fn known_answer() {
        let digest = digest();
        let proof = ProofVerifier::new(&digest)
            .compute_proof("cornell123", &Salt::new(SALT))
            .await
            .unwrap();
        assert_eq!(
            proof.as_str(),
            "984bcaf3aaaeb4c1d73fd43ce4eae0ce2ba00f07b12193d537ccebc1bb9b6c26"
        );
    }

    #[tokio::test]
    async fn empty_password_known_answer() {
        let digest = digest();
        let proof = ProofVerifier::new(&digest)
            .compute_proof("", &Salt::new(SALT))
            .await
            .unwrap();
        assert_eq!(
            proof.as_str(),
            "f223d1c45b3b316ac01db58a30f2b71d302177e16f7822673ade9e7aa67d6339"
        );
    }

    #[tokio::test]
    async fn single_character_change_changes_proof() {
        let digest = digest();
        let verifier = ProofVerifier::new(&digest);
        let salt = Salt::new(SALT);
        let a = verifier.compute_proof("cornell123", &salt).await.unwrap();
        let b = verifier.compute_proof("cornell124", &salt).await.unwrap();
        assert_ne!(a.as_str(), b.as_str());
        assert_eq!(
            b.as_str(),
            "e0593c0b62590677a970a342377350ac18b33448bdfcf2b9c11724ce5f057764"
        );
    }

    #[tokio::test]
    async fn malformed_salt_is_hashed_as_given() {
        let digest = digest();
        let proof = ProofVerifier::new(&digest)
            .compute_proof("pw", &Salt::new("not-hex"))
            .await
            .unwrap();
        assert_eq!(proof.as_str().len(), 64);
    }

    #[tokio::test]
    async fn round_trip_with_issuer() {
        let digest = digest();
        let entropy = EntropyEngine::probe(true).unwrap();
        let cred = CredentialIssuer::new(&digest, &entropy, 16)
            .create_secret("cornell123")
            .await
            .unwrap();
        let verifier = ProofVerifier::new(&digest);

        let good = verifier.compute_proof("cornell123", cred.salt()).await.unwrap();
        assert!(good.matches(cred.hash()));

        let bad = verifier.compute_proof("wrongpass", cred.salt()).await.unwrap();
        assert!(!bad.matches(cred.hash()));
    }

    #[tokio::test]
    async fn proof_under_other_salt_does_not_match() {
        let digest = digest();
        let verifier = ProofVerifier::new(&digest);
        let stored = verifier.compute_proof("pw", &Salt::new(SALT)).await.unwrap();
        let stored = PasswordHash::from_hex(stored.as_str()).unwrap();
        let other = verifier.compute_proof("pw", &Salt::new("ffee")).await.unwrap();
        assert!(!other.matches(&stored));
    }
}
