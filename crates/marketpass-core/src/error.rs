//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the marketpass workspace. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Environment errors are fatal. They come out of one-time backend
//!   probing and are cached, which is why every error type here is `Clone`.
//! - Credential operations never validate passwords or salts. Only the
//!   explicit parsers (`PasswordHash::from_hex`) produce `MalformedHex`, and
//!   only salt generation past its upper bound produces `LengthOutOfRange`.
//! - Error messages never carry passwords, salts, or hashes.

use thiserror::Error;

/// Top-level error type for credential issuance and verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// No usable digest backend or permitted entropy source exists in this
    /// process. Fatal: surfaced at startup, never retried per call.
    #[error("crypto environment unavailable: {0}")]
    EnvironmentUnavailable(String),

    /// A digest backend failed while computing a digest.
    #[error("digest error: {0}")]
    Digest(String),

    /// The secure random source failed and the insecure fallback is not
    /// permitted by configuration.
    #[error("entropy error: {0}")]
    Entropy(String),

    /// A requested salt length exceeds the supported maximum.
    #[error("requested {requested} random bytes, maximum is {max}")]
    LengthOutOfRange {
        /// Bytes requested by the caller.
        requested: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// A hex-encoded value could not be parsed.
    #[error("malformed {field}: {reason}")]
    MalformedHex {
        /// Name of the value being parsed (e.g. "password hash").
        field: &'static str,
        /// Why parsing failed.
        reason: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Error while loading [`CredentialConfig`](crate::CredentialConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that could not be interpreted.
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        /// Environment variable name.
        var: String,
        /// The raw value found.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
