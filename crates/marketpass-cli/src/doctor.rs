//! # Doctor Subcommand
//!
//! Probes the crypto environment the same way the library does at startup
//! and prints what was selected.

use marketpass_core::CredentialConfig;
use marketpass_crypto::{DigestBackend, EntropyKind};
use serde::Serialize;

/// Environment report printed by `marketpass doctor`.
#[derive(Debug, Serialize)]
pub struct DoctorReport {
    /// Selected SHA-256 backend.
    pub digest_backend: DigestBackend,
    /// Kind of entropy serving salt generation.
    pub entropy: EntropyKind,
    /// Effective configuration.
    pub config: CredentialConfig,
}

/// Probe the runtime and build the report.
pub fn report() -> anyhow::Result<DoctorReport> {
    let rt = marketpass_crypto::init()?;
    Ok(DoctorReport {
        digest_backend: rt.digest().backend(),
        entropy: rt.entropy().kind(),
        config: rt.config().clone(),
    })
}

/// Render the report as JSON.
pub fn run() -> anyhow::Result<String> {
    let report = report()?;
    if report.entropy == EntropyKind::InsecureFallback {
        tracing::warn!("salts are being generated without a secure random source");
    }
    Ok(serde_json::to_string_pretty(&report)?)
}
