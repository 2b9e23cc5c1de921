//! Credential subsystem configuration.
//!
//! Defaults suit production. Override via environment variables or explicit
//! construction for tests.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of random bytes in a freshly issued salt (32 hex characters).
pub const DEFAULT_SALT_BYTES: usize = 16;

/// Smallest salt length an issuer may be configured with.
pub const MIN_SALT_BYTES: usize = 16;

/// Largest salt length that can be generated in one call.
pub const MAX_SALT_BYTES: usize = 1024;

const VAR_SALT_BYTES: &str = "MARKETPASS_SALT_BYTES";
const VAR_DIGEST_BACKEND: &str = "MARKETPASS_DIGEST_BACKEND";
const VAR_ALLOW_INSECURE_ENTROPY: &str = "MARKETPASS_ALLOW_INSECURE_ENTROPY";

/// Which digest backend to probe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestBackendPreference {
    /// Probe every compiled backend in the default order.
    #[default]
    Auto,
    /// Prefer the RustCrypto `sha2` backend.
    RustCrypto,
    /// Prefer the `ring` backend.
    Ring,
}

impl DigestBackendPreference {
    /// Returns the identifier used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::RustCrypto => "rustcrypto",
            Self::Ring => "ring",
        }
    }
}

impl std::fmt::Display for DigestBackendPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestBackendPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "rustcrypto" | "sha2" => Ok(Self::RustCrypto),
            "ring" => Ok(Self::Ring),
            other => Err(format!(
                "unknown digest backend '{other}' (expected auto, rustcrypto, or ring)"
            )),
        }
    }
}

/// Configuration for salt generation and backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Random bytes per issued salt, within
    /// `MIN_SALT_BYTES..=MAX_SALT_BYTES`.
    pub salt_bytes: usize,
    /// Digest backend probing preference.
    pub digest_backend: DigestBackendPreference,
    /// Whether a non-cryptographic generator may stand in when the OS
    /// random source is unavailable. Use of it is always logged and counted.
    pub allow_insecure_entropy: bool,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            salt_bytes: DEFAULT_SALT_BYTES,
            digest_backend: DigestBackendPreference::Auto,
            allow_insecure_entropy: true,
        }
    }
}

impl CredentialConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `MARKETPASS_SALT_BYTES` (default: 16, range: 16 to 1024)
    /// - `MARKETPASS_DIGEST_BACKEND` — `auto`, `rustcrypto`, or `ring` (default: `auto`)
    /// - `MARKETPASS_ALLOW_INSECURE_ENTROPY` — boolean (default: `true`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to their defaults; set but unparsable
    /// variables are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let salt_bytes = match lookup(VAR_SALT_BYTES) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| invalid(VAR_SALT_BYTES, &raw, e))?,
            None => defaults.salt_bytes,
        };

        let digest_backend = match lookup(VAR_DIGEST_BACKEND) {
            Some(raw) => raw.parse().map_err(|e| invalid(VAR_DIGEST_BACKEND, &raw, e))?,
            None => defaults.digest_backend,
        };

        let allow_insecure_entropy = match lookup(VAR_ALLOW_INSECURE_ENTROPY) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid(VAR_ALLOW_INSECURE_ENTROPY, &raw, "expected true or false")
            })?,
            None => defaults.allow_insecure_entropy,
        };

        let config = Self {
            salt_bytes,
            digest_backend,
            allow_insecure_entropy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the issuer salt length is within bounds.
    ///
    /// A zero or very short salt lets two issuances of one password collide,
    /// so the floor applies to every configuration an issuer is built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SALT_BYTES..=MAX_SALT_BYTES).contains(&self.salt_bytes) {
            return Err(invalid(
                VAR_SALT_BYTES,
                &self.salt_bytes.to_string(),
                format!("must be between {MIN_SALT_BYTES} and {MAX_SALT_BYTES} bytes"),
            ));
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(var: &str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
