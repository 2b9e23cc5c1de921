//! # marketpass-core — Foundational Types for Join Credentials
//!
//! Leaf crate of the marketpass workspace. It defines the value types that
//! flow through credential issuance and verification, the error hierarchy,
//! and the environment-driven configuration. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for every credential value.** `Salt`, `PasswordHash`
//!    and `Proof` are distinct types. A proof cannot be persisted in place of
//!    a hash, and a hash cannot be passed where a salt is expected.
//!
//! 2. **Credentials are replaced, never edited.** `Credential` has no setters.
//!    Rotation produces a new value with a new salt and a new hash.
//!
//! 3. **Proofs are transient.** `Proof` does not implement `Serialize`, so it
//!    cannot be written to storage or a response body by accident.
//!
//! 4. **Comparison is the caller's call.** The crates that compute proofs do
//!    not compare them. `Proof::matches()` is offered as a constant-time
//!    comparison for callers that want one.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `marketpass-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod credential;
pub mod error;
pub mod hex;

// Re-export primary types for ergonomic imports.
pub use config::{
    CredentialConfig, DigestBackendPreference, DEFAULT_SALT_BYTES, MAX_SALT_BYTES, MIN_SALT_BYTES,
};
pub use credential::{Credential, PasswordHash, Proof, Salt, SHA256_HEX_LEN};
pub use error::{ConfigError, CredentialError};
