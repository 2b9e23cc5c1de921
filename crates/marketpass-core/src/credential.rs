//! # Credential Newtypes
//!
//! Value types for a marketplace join password: the `Salt` and
//! `PasswordHash` pair that is persisted as a [`Credential`], and the
//! transient [`Proof`] recomputed when someone tries to join.
//!
//! ## Security Invariants
//!
//! - A `Credential` is replaced wholesale on rotation. There are no setters;
//!   the only way to change a salt or hash is to build a new credential.
//! - `Proof` does not implement `Serialize` or `Clone`. It is compared and
//!   then dropped.
//! - `Proof::matches()` compares in constant time via `subtle`.
//! - `Debug` output of hashes and proofs is truncated or redacted so values
//!   do not end up whole in logs.

use serde::{Deserialize, Deserializer, Serialize};
use subtle::ConstantTimeEq;

use crate::error::CredentialError;
use crate::hex::is_lower_hex;

/// Length of a SHA-256 digest rendered as hex.
pub const SHA256_HEX_LEN: usize = 64;

/// Hex-encoded random salt stored alongside a password hash.
///
/// Salts are not secret, but they must be unpredictable. Constructing a
/// `Salt` from a caller-supplied string performs no validation: verification
/// hashes whatever salt the caller stored. Use [`Salt::is_well_formed`] to
/// check the format explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salt(String);

impl Salt {
    /// Wrap a salt string as-is.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the salt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of random bytes this salt encodes (half its hex length).
    pub fn byte_len(&self) -> usize {
        self.0.len() / 2
    }

    /// Returns true if the salt is a non-empty, even-length, lowercase hex
    /// string, i.e. something `generate_salt` could have produced.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0.len() % 2 == 0 && is_lower_hex(&self.0)
    }
}

impl std::fmt::Display for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Salt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A 64-character lowercase hex SHA-256 digest of `salt:password`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a digest that is already known to be 64 lowercase hex chars.
    ///
    /// Used by the digest engine, whose output always has that shape.
    pub fn from_digest_hex(hex: String) -> Self {
        Self(hex)
    }

    /// Parse a persisted hash.
    ///
    /// Surrounding whitespace is trimmed and upper-case digits are folded to
    /// lower case before checking the length and alphabet.
    pub fn from_hex(hex: &str) -> Result<Self, CredentialError> {
        let hex = hex.trim().to_ascii_lowercase();
        if hex.len() != SHA256_HEX_LEN {
            return Err(CredentialError::MalformedHex {
                field: "password hash",
                reason: format!("expected {SHA256_HEX_LEN} hex chars, got {}", hex.len()),
            });
        }
        if !is_lower_hex(&hex) {
            return Err(CredentialError::MalformedHex {
                field: "password hash",
                reason: "contains non-hex characters".to_string(),
            });
        }
        Ok(Self(hex))
    }

    /// Access the hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PasswordHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PasswordHash({}...)", hex_prefix(&self.0))
    }
}

impl std::fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted join credential of a marketplace: a salt and the hash of
/// `salt:password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    salt: Salt,
    hash: PasswordHash,
}

impl Credential {
    /// Assemble a credential, typically when loading it back from storage.
    pub fn new(salt: Salt, hash: PasswordHash) -> Self {
        Self { salt, hash }
    }

    /// The salt this credential was issued with.
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// The stored password hash.
    pub fn hash(&self) -> &PasswordHash {
        &self.hash
    }

    /// Split into the salt and hash for persistence.
    pub fn into_parts(self) -> (Salt, PasswordHash) {
        (self.salt, self.hash)
    }
}

/// A hash recomputed from a candidate password and an existing salt.
///
/// Never persisted. Compare it against the stored [`PasswordHash`] with
/// [`Proof::matches`] (constant time) or `==`, which delegates to it.
pub struct Proof(String);

impl Proof {
    /// Wrap a freshly computed digest.
    pub fn from_digest_hex(hex: String) -> Self {
        Self(hex)
    }

    /// Access the hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against a stored hash.
    pub fn matches(&self, stored: &PasswordHash) -> bool {
        self.0.as_bytes().ct_eq(stored.0.as_bytes()).into()
    }
}

impl PartialEq<PasswordHash> for Proof {
    fn eq(&self, other: &PasswordHash) -> bool {
        self.matches(other)
    }
}

impl PartialEq<Proof> for PasswordHash {
    fn eq(&self, other: &Proof) -> bool {
        other.matches(self)
    }
}

impl std::fmt::Debug for Proof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Proof([REDACTED])")
    }
}

fn hex_prefix(hex: &str) -> &str {
    hex.get(..8).unwrap_or(hex)
}
