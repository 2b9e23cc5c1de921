//! # Entropy Sources
//!
//! Random bytes for salts come from an [`EntropySource`]. Two variants
//! exist:
//!
//! - [`SecureEntropySource`]: the OS CSPRNG (`rand::rngs::OsRng`).
//! - [`InsecureFallbackEntropySource`]: a clock-seeded `SmallRng`. It keeps
//!   salts distinct but not unpredictable, so every use is logged and
//!   counted (`marketpass_insecure_entropy_total`).
//!
//! [`EntropyEngine`] probes the secure source once with a trial fill and
//! installs the fallback only when the probe fails and configuration
//! permits it. A secure source that fails later falls back for that single
//! call under the same rule.
//!
//! ## Security Invariant
//!
//! Degradation never surfaces as an error to callers, but it is never
//! silent to operators either.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use marketpass_core::hex::to_hex;
use marketpass_core::{CredentialError, MAX_SALT_BYTES};
use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};
use serde::Serialize;

/// Bytes drawn from the secure source when probing it.
const PROBE_BYTES: usize = 16;

/// Which kind of generator backs an entropy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntropyKind {
    /// Cryptographically secure OS random source.
    Secure,
    /// Non-cryptographic generator used when no secure source exists.
    InsecureFallback,
}

impl EntropyKind {
    /// Returns the kind identifier used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secure => "secure",
            Self::InsecureFallback => "insecure-fallback",
        }
    }
}

impl std::fmt::Display for EntropyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source of random bytes.
///
/// Implementations must be `Send + Sync`; the process-wide engine is shared
/// across async tasks.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CredentialError>;

    /// The kind of generator behind this source.
    fn kind(&self) -> EntropyKind;

    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;
}

// ─── SecureEntropySource ────────────────────────────────────────────────

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureEntropySource;

impl EntropySource for SecureEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CredentialError> {
        let mut rng = OsRng;
        rng.try_fill_bytes(dest)
            .map_err(|e| CredentialError::Entropy(format!("OS random source failed: {e}")))
    }

    fn kind(&self) -> EntropyKind {
        EntropyKind::Secure
    }

    fn name(&self) -> &str {
        "SecureEntropySource"
    }
}

// ─── InsecureFallbackEntropySource ──────────────────────────────────────

static FALLBACK_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Non-cryptographic generator seeded from the wall clock, the process id,
/// and a per-process counter.
///
/// Output is statistically spread but predictable to anyone who can
/// estimate the seed. Every call increments
/// `marketpass_insecure_entropy_total`; the first call logs at WARN.
pub struct InsecureFallbackEntropySource {
    rng: Mutex<SmallRng>,
    warned: AtomicBool,
}

impl InsecureFallbackEntropySource {
    /// Create a fallback generator with a fresh clock-derived seed.
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let counter = FALLBACK_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
        let seed = nanos ^ (u64::from(std::process::id()) << 32) ^ counter.rotate_left(17);
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
            warned: AtomicBool::new(false),
        }
    }
}

impl Default for InsecureFallbackEntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InsecureFallbackEntropySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsecureFallbackEntropySource").finish_non_exhaustive()
    }
}

impl EntropySource for InsecureFallbackEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CredentialError> {
        metrics::counter!("marketpass_insecure_entropy_total").increment(1);
        if !self.warned.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                bytes = dest.len(),
                "generating salt bytes with the insecure fallback generator; salts are not unpredictable"
            );
        } else {
            tracing::debug!(bytes = dest.len(), "insecure fallback entropy used");
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| CredentialError::Entropy("fallback generator lock poisoned".to_string()))?;
        rng.fill_bytes(dest);
        Ok(())
    }

    fn kind(&self) -> EntropyKind {
        EntropyKind::InsecureFallback
    }

    fn name(&self) -> &str {
        "InsecureFallbackEntropySource"
    }
}

// ─── EntropyEngine ──────────────────────────────────────────────────────

/// Salt entropy with the secure-or-fallback policy applied.
///
/// At least one of the two sources is always present.
pub struct EntropyEngine {
    secure: Option<Box<dyn EntropySource>>,
    fallback: Option<InsecureFallbackEntropySource>,
}

impl EntropyEngine {
    /// Probe the OS random source and build the engine.
    ///
    /// # Errors
    ///
    /// `EnvironmentUnavailable` when the OS source fails its probe and
    /// `allow_insecure` is false.
    pub fn probe(allow_insecure: bool) -> Result<Self, CredentialError> {
        Self::select(Box::new(SecureEntropySource), allow_insecure)
    }

    /// Build the engine around an arbitrary primary source.
    ///
    /// The primary is probed with a trial fill. When the probe fails the
    /// primary is discarded and, if permitted, the insecure fallback takes
    /// over for the life of the engine.
    pub fn select(
        primary: Box<dyn EntropySource>,
        allow_insecure: bool,
    ) -> Result<Self, CredentialError> {
        let fallback = allow_insecure.then(InsecureFallbackEntropySource::new);

        let mut probe = [0u8; PROBE_BYTES];
        match primary.fill_bytes(&mut probe) {
            Ok(()) => {
                tracing::debug!(source = primary.name(), "secure entropy source selected");
                Ok(Self {
                    secure: Some(primary),
                    fallback,
                })
            }
            Err(e) if fallback.is_some() => {
                tracing::warn!(
                    source = primary.name(),
                    error = %e,
                    "secure entropy source unavailable; falling back to insecure generator"
                );
                metrics::counter!("marketpass_entropy_fallback_selected").increment(1);
                Ok(Self {
                    secure: None,
                    fallback,
                })
            }
            Err(e) => Err(CredentialError::EnvironmentUnavailable(format!(
                "secure entropy source {} unavailable and insecure fallback is disabled: {e}",
                primary.name()
            ))),
        }
    }

    /// The kind of source currently serving requests.
    pub fn kind(&self) -> EntropyKind {
        if self.secure.is_some() {
            EntropyKind::Secure
        } else {
            EntropyKind::InsecureFallback
        }
    }

    /// Fill `dest`, falling back for this call if the secure source fails
    /// and the fallback is permitted.
    pub fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CredentialError> {
        if let Some(secure) = &self.secure {
            match secure.fill_bytes(dest) {
                Ok(()) => return Ok(()),
                Err(e) if self.fallback.is_some() => {
                    tracing::warn!(
                        source = secure.name(),
                        error = %e,
                        "secure entropy source failed; using insecure fallback for this call"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        match &self.fallback {
            Some(fallback) => fallback.fill_bytes(dest),
            None => Err(CredentialError::EnvironmentUnavailable(
                "no entropy source configured".to_string(),
            )),
        }
    }

    /// Generate `length_bytes` random bytes rendered as lowercase hex
    /// (`2 * length_bytes` characters). Zero bytes yields an empty string.
    ///
    /// # Errors
    ///
    /// `LengthOutOfRange` when `length_bytes` exceeds [`MAX_SALT_BYTES`].
    pub fn generate_hex(&self, length_bytes: usize) -> Result<String, CredentialError> {
        if length_bytes == 0 {
            return Ok(String::new());
        }
        if length_bytes > MAX_SALT_BYTES {
            return Err(CredentialError::LengthOutOfRange {
                requested: length_bytes,
                max: MAX_SALT_BYTES,
            });
        }
        let mut buf = vec![0u8; length_bytes];
        self.fill_bytes(&mut buf)?;
        Ok(to_hex(&buf))
    }
}

impl std::fmt::Debug for EntropyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntropyEngine")
            .field("kind", &self.kind())
            .field("fallback_permitted", &self.fallback.is_some())
            .finish()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────
