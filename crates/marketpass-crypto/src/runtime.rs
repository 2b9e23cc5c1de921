//! # Process-Wide Runtime
//!
//! Loads [`CredentialConfig`] from the environment and probes the digest
//! and entropy backends exactly once per process. The outcome, success or
//! failure, is cached in a `OnceLock`; a failed probe is returned to every
//! later caller unchanged and never retried.

use std::sync::OnceLock;

use marketpass_core::{CredentialConfig, CredentialError};

use crate::digest::DigestEngine;
use crate::entropy::EntropyEngine;
use crate::issuer::CredentialIssuer;
use crate::verifier::ProofVerifier;

static RUNTIME: OnceLock<Result<Runtime, CredentialError>> = OnceLock::new();

/// Configuration plus the selected backends.
#[derive(Debug)]
pub struct Runtime {
    config: CredentialConfig,
    digest: DigestEngine,
    entropy: EntropyEngine,
}

impl Runtime {
    /// Probe backends for an explicit configuration.
    ///
    /// The configuration is validated first, so a hand-built config with an
    /// out-of-range salt length is rejected just like one read from the
    /// environment.
    pub fn probe(config: CredentialConfig) -> Result<Self, CredentialError> {
        config.validate()?;
        let digest = DigestEngine::probe(config.digest_backend)?;
        let entropy = EntropyEngine::probe(config.allow_insecure_entropy)?;
        tracing::info!(
            digest_backend = %digest.backend(),
            entropy = %entropy.kind(),
            salt_bytes = config.salt_bytes,
            "credential crypto runtime ready"
        );
        Ok(Self {
            config,
            digest,
            entropy,
        })
    }

    /// The process-wide runtime, probing on first use.
    pub fn global() -> Result<&'static Runtime, CredentialError> {
        RUNTIME
            .get_or_init(|| {
                let result = CredentialConfig::from_env()
                    .map_err(CredentialError::from)
                    .and_then(Self::probe);
                if let Err(e) = &result {
                    tracing::error!(error = %e, "credential crypto runtime unavailable");
                }
                result
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Active configuration.
    pub fn config(&self) -> &CredentialConfig {
        &self.config
    }

    /// Selected digest engine.
    pub fn digest(&self) -> &DigestEngine {
        &self.digest
    }

    /// Selected entropy engine.
    pub fn entropy(&self) -> &EntropyEngine {
        &self.entropy
    }

    /// An issuer using this runtime's engines and salt length.
    pub fn issuer(&self) -> CredentialIssuer<'_> {
        CredentialIssuer::new(&self.digest, &self.entropy, self.config.salt_bytes)
    }

    /// A verifier using this runtime's digest engine.
    pub fn verifier(&self) -> ProofVerifier<'_> {
        ProofVerifier::new(&self.digest)
    }
}
