//! # SHA-256 Digest Engine
//!
//! Abstracts SHA-256 behind the [`DigestProvider`] trait with two backends:
//!
//! - [`Sha2Provider`]: RustCrypto `sha2`, pure Rust (feature `rustcrypto`,
//!   on by default).
//! - [`RingProvider`]: `ring`'s digest module (feature `ring`).
//!
//! [`DigestEngine`] probes the candidates once, in configured order, and
//! keeps the first that is compiled in and passes the SHA-256 known-answer
//! test. If none does, construction fails with `EnvironmentUnavailable`.
//! That is a startup condition, not a per-request error.
//!
//! ## Security Invariant
//!
//! Output is always 64 lowercase hex characters. A backend that returns
//! anything else for the known-answer input is never selected.

use marketpass_core::hex::to_hex;
use marketpass_core::{CredentialError, DigestBackendPreference};
use serde::Serialize;

/// SHA-256("abc"), FIPS 180-2 appendix B.1.
const KAT_INPUT: &[u8] = b"abc";
const KAT_DIGEST: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

/// A SHA-256 backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestBackend {
    /// RustCrypto `sha2`.
    RustCrypto,
    /// `ring::digest`.
    Ring,
}

impl DigestBackend {
    /// Returns the backend identifier used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RustCrypto => "rustcrypto",
            Self::Ring => "ring",
        }
    }

    /// Whether this backend was compiled into the current build.
    pub fn is_compiled(&self) -> bool {
        match self {
            Self::RustCrypto => cfg!(feature = "rustcrypto"),
            Self::Ring => cfg!(feature = "ring"),
        }
    }

    /// Probe order for a configured preference.
    pub fn probe_order(preference: DigestBackendPreference) -> [DigestBackend; 2] {
        match preference {
            DigestBackendPreference::Auto | DigestBackendPreference::RustCrypto => {
                [Self::RustCrypto, Self::Ring]
            }
            DigestBackendPreference::Ring => [Self::Ring, Self::RustCrypto],
        }
    }

    /// Instantiate the provider for this backend, if it is compiled in.
    pub fn provider(&self) -> Option<Box<dyn DigestProvider>> {
        match self {
            #[cfg(feature = "rustcrypto")]
            Self::RustCrypto => Some(Box::new(Sha2Provider)),
            #[cfg(feature = "ring")]
            Self::Ring => Some(Box::new(RingProvider)),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

impl std::fmt::Display for DigestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for SHA-256 backends.
///
/// Implementations must be `Send + Sync`: the selected provider lives in a
/// process-wide static and is shared across async tasks.
pub trait DigestProvider: Send + Sync {
    /// Compute the SHA-256 digest of `data`.
    fn sha256(&self, data: &[u8]) -> Result<[u8; 32], CredentialError>;

    /// Which backend this provider is.
    fn backend(&self) -> DigestBackend;
}

// ─── Sha2Provider ───────────────────────────────────────────────────────

/// SHA-256 via RustCrypto `sha2`.
#[cfg(feature = "rustcrypto")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha2Provider;

#[cfg(feature = "rustcrypto")]
impl DigestProvider for Sha2Provider {
    fn sha256(&self, data: &[u8]) -> Result<[u8; 32], CredentialError> {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(data);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Ok(bytes)
    }

    fn backend(&self) -> DigestBackend {
        DigestBackend::RustCrypto
    }
}

// ─── RingProvider ───────────────────────────────────────────────────────

/// SHA-256 via `ring::digest`.
#[cfg(feature = "ring")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RingProvider;

#[cfg(feature = "ring")]
impl DigestProvider for RingProvider {
    fn sha256(&self, data: &[u8]) -> Result<[u8; 32], CredentialError> {
        let digest = ring::digest::digest(&ring::digest::SHA256, data);
        digest.as_ref().try_into().map_err(|_| {
            CredentialError::Digest(format!(
                "ring returned a {}-byte SHA-256 digest",
                digest.as_ref().len()
            ))
        })
    }

    fn backend(&self) -> DigestBackend {
        DigestBackend::Ring
    }
}

// ─── DigestEngine ───────────────────────────────────────────────────────

/// The selected SHA-256 backend behind a single `digest_hex` entry point.
pub struct DigestEngine {
    provider: Box<dyn DigestProvider>,
}

impl DigestEngine {
    /// Probe the compiled backends in the order implied by `preference`.
    pub fn probe(preference: DigestBackendPreference) -> Result<Self, CredentialError> {
        let candidates = DigestBackend::probe_order(preference)
            .into_iter()
            .filter_map(|backend| {
                let provider = backend.provider();
                if provider.is_none() {
                    tracing::debug!(%backend, "digest backend not compiled into this build");
                }
                provider
            })
            .collect();
        Self::from_candidates(candidates)
    }

    /// Select the first candidate that passes the known-answer test.
    ///
    /// # Errors
    ///
    /// `EnvironmentUnavailable` when no candidate passes.
    pub fn from_candidates(
        candidates: Vec<Box<dyn DigestProvider>>,
    ) -> Result<Self, CredentialError> {
        let mut rejected = Vec::new();
        for provider in candidates {
            let backend = provider.backend();
            match self_test(provider.as_ref()) {
                Ok(()) => {
                    tracing::debug!(%backend, "digest backend selected");
                    metrics::counter!("marketpass_digest_backend_selected", "backend" => backend.as_str())
                        .increment(1);
                    return Ok(Self { provider });
                }
                Err(e) => {
                    tracing::warn!(%backend, error = %e, "digest backend failed self-test");
                    rejected.push(format!("{backend}: {e}"));
                }
            }
        }

        let detail = if rejected.is_empty() {
            "no SHA-256 backend compiled into this build".to_string()
        } else {
            format!("no SHA-256 backend passed self-test ({})", rejected.join("; "))
        };
        Err(CredentialError::EnvironmentUnavailable(detail))
    }

    /// The backend in use.
    pub fn backend(&self) -> DigestBackend {
        self.provider.backend()
    }

    /// SHA-256 of `data` as 64 lowercase hex characters.
    ///
    /// The computation is bounded and never yields.
    pub async fn digest_hex(&self, data: &[u8]) -> Result<String, CredentialError> {
        self.provider.sha256(data).map(|d| to_hex(&d))
    }
}

impl std::fmt::Debug for DigestEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestEngine")
            .field("backend", &self.backend())
            .finish()
    }
}

fn self_test(provider: &dyn DigestProvider) -> Result<(), CredentialError> {
    let got = to_hex(&provider.sha256(KAT_INPUT)?);
    if got == KAT_DIGEST {
        Ok(())
    } else {
        Err(CredentialError::Digest(
            "known-answer test produced an unexpected digest".to_string(),
        ))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────
