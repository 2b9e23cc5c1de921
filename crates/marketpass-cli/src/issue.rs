//! # Issue Subcommand
//!
//! Issues a credential and prints it as `{"salt": ..., "hash": ...}` for the
//! caller to persist.

use clap::Args;

/// Arguments for the issue subcommand.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Join password. Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

/// Issue a credential for `password` and render it as JSON.
pub async fn run(password: &str) -> anyhow::Result<String> {
    let credential = marketpass_crypto::create_password_secret(password).await?;
    Ok(serde_json::to_string_pretty(&credential)?)
}
