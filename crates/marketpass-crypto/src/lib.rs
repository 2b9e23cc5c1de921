//! # marketpass-crypto — Join Credential Cryptography
//!
//! Issues salted password credentials for private marketplaces and
//! recomputes join proofs against them:
//!
//! - **Entropy** for salts from the OS CSPRNG, with an insecure fallback
//!   that is logged and counted whenever it is used.
//! - **SHA-256** through one of two probed backends (RustCrypto `sha2`,
//!   `ring`), selected once per process. Both are compiled by default;
//!   building with only one of the `rustcrypto` / `ring` features leaves a
//!   single candidate and no backend to fall through to.
//! - **Issuance** of `{salt, hash}` credentials and **proof** computation
//!   for candidate passwords.
//!
//! ## Operations
//!
//! The four free functions below run against the process-wide [`Runtime`],
//! configured from `MARKETPASS_*` environment variables. Call [`init`] at
//! startup so a missing backend aborts the feature before the first
//! request. Engines can also be constructed directly for embedding and
//! tests.
//!
//! ## Crate Policy
//!
//! - Depends only on `marketpass-core` internally.
//! - No mocking of SHA-256 in tests. Known-answer vectors are checked
//!   against the real backends.
//! - Passwords, salts, and hashes are never logged.

pub mod digest;
pub mod entropy;
pub mod issuer;
pub mod runtime;
pub mod scheme;
pub mod verifier;

use marketpass_core::{Credential, CredentialError, PasswordHash, Proof, Salt};

// Re-export primary types.
pub use digest::{DigestBackend, DigestEngine, DigestProvider};
pub use entropy::{
    EntropyEngine, EntropyKind, EntropySource, InsecureFallbackEntropySource, SecureEntropySource,
};
pub use issuer::CredentialIssuer;
pub use marketpass_core::DEFAULT_SALT_BYTES;
pub use runtime::Runtime;
pub use scheme::{digest_input, SCHEME_SEPARATOR};
pub use verifier::ProofVerifier;

#[cfg(feature = "rustcrypto")]
pub use digest::Sha2Provider;

#[cfg(feature = "ring")]
pub use digest::RingProvider;

/// Probe the process-wide runtime now.
///
/// # Errors
///
/// `EnvironmentUnavailable` (or `Config`) when the process cannot issue or
/// verify credentials. Treat it as fatal for the feature.
pub fn init() -> Result<&'static Runtime, CredentialError> {
    Runtime::global()
}

/// Generate a salt of `byte_length` random bytes (`2 * byte_length` hex
/// characters). Zero yields an empty salt; lengths above
/// [`MAX_SALT_BYTES`](marketpass_core::MAX_SALT_BYTES) return
/// `LengthOutOfRange`.
pub fn generate_salt(byte_length: usize) -> Result<Salt, CredentialError> {
    let hex = Runtime::global()?.entropy().generate_hex(byte_length)?;
    Ok(Salt::new(hex))
}

/// SHA-256 of `salt:password` as a password hash.
pub async fn compute_password_digest(
    password: &str,
    salt: &Salt,
) -> Result<PasswordHash, CredentialError> {
    let digest = Runtime::global()?.digest();
    let hex = digest.digest_hex(&digest_input(salt, password)).await?;
    Ok(PasswordHash::from_digest_hex(hex))
}

/// Issue a fresh credential for `password`.
pub async fn create_password_secret(password: &str) -> Result<Credential, CredentialError> {
    Runtime::global()?.issuer().create_secret(password).await
}

/// Recompute the digest for a join attempt against a stored salt.
///
/// Compare the result with the stored hash; this function does not.
pub async fn compute_join_proof(password: &str, salt: &Salt) -> Result<Proof, CredentialError> {
    Runtime::global()?.verifier().compute_proof(password, salt).await
}
