//! # Proof and Verify Subcommands
//!
//! `proof` prints the join proof for a password and stored salt. `verify`
//! additionally compares it against a stored hash in constant time.

use clap::Args;
use marketpass_core::{PasswordHash, Salt};

/// Arguments for the proof subcommand.
#[derive(Args, Debug)]
pub struct ProofArgs {
    /// Stored salt of the credential.
    #[arg(long)]
    pub salt: String,

    /// Candidate password. Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Stored salt of the credential.
    #[arg(long)]
    pub salt: String,

    /// Stored password hash (64 hex characters).
    #[arg(long)]
    pub hash: String,

    /// Candidate password. Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

/// Result of comparing a join proof with a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate password is the one the credential was issued for.
    Match,
    /// It is not.
    Mismatch,
}

impl Verdict {
    /// Returns the verdict as printed by the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Mismatch => "mismatch",
        }
    }
}

/// Compute the join proof for `password` under `salt`.
pub async fn run_proof(password: &str, salt: &str) -> anyhow::Result<String> {
    let proof = marketpass_crypto::compute_join_proof(password, &Salt::new(salt)).await?;
    Ok(proof.as_str().to_string())
}

/// Compute the join proof and compare it with the stored hash.
pub async fn run_verify(password: &str, salt: &str, hash: &str) -> anyhow::Result<Verdict> {
    let stored = PasswordHash::from_hex(hash)?;
    let proof = marketpass_crypto::compute_join_proof(password, &Salt::new(salt)).await?;
    let verdict = if proof.matches(&stored) {
        Verdict::Match
    } else {
        Verdict::Mismatch
    };
    tracing::debug!(verdict = verdict.as_str(), "join proof compared");
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: &str = "00112233445566778899aabbccddeeff";
    const HASH: &str = "984bcaf3aaaeb4c1d73fd43ce4eae0ce2ba00f07b12193d537ccebc1bb9b6c26";

    #[tokio::test]
    async fn proof_known_answer() {
        assert_eq!(run_proof("cornell123", SALT).await.unwrap(), HASH);
    }

    #[tokio::test]
    async fn verify_match_and_mismatch() {
        assert_eq!(run_verify("cornell123", SALT, HASH).await.unwrap(), Verdict::Match);
        assert_eq!(run_verify("wrongpass", SALT, HASH).await.unwrap(), Verdict::Mismatch);
    }

    #[tokio::test]
    async fn verify_accepts_uppercase_stored_hash() {
        let upper = HASH.to_ascii_uppercase();
        assert_eq!(run_verify("cornell123", SALT, &upper).await.unwrap(), Verdict::Match);
    }

    #[tokio::test]
    async fn verify_rejects_malformed_hash() {
        assert!(run_verify("cornell123", SALT, "abc").await.is_err());
    }
}
