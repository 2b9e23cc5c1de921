//! # Salt Subcommand

use clap::Args;
use marketpass_core::DEFAULT_SALT_BYTES;

/// Arguments for the salt subcommand.
#[derive(Args, Debug)]
pub struct SaltArgs {
    /// Random bytes in the salt (printed as twice as many hex characters).
    #[arg(long, default_value_t = DEFAULT_SALT_BYTES)]
    pub bytes: usize,
}

/// Generate a salt.
pub fn run(args: &SaltArgs) -> anyhow::Result<String> {
    Ok(marketpass_crypto::generate_salt(args.bytes)?.to_string())
}
