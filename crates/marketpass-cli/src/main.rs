//! # marketpass CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;
use marketpass_cli::password::resolve_password;
use marketpass_cli::proof::Verdict;

/// Marketplace join credentials — issue and verify salted join passwords.
#[derive(Parser, Debug)]
#[command(name = "marketpass", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate a hex salt.
    Salt(marketpass_cli::salt::SaltArgs),
    /// Issue a credential for a join password.
    Issue(marketpass_cli::issue::IssueArgs),
    /// Compute the join proof for a password and stored salt.
    Proof(marketpass_cli::proof::ProofArgs),
    /// Check a password against a stored salt and hash.
    Verify(marketpass_cli::proof::VerifyArgs),
    /// Report the selected digest backend and entropy source.
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Fail before reading any password if the environment cannot hash.
    marketpass_crypto::init()?;

    let output = match cli.command {
        Commands::Salt(args) => marketpass_cli::salt::run(&args)?,
        Commands::Issue(args) => {
            let password = resolve_password(args.password, std::io::stdin().lock())?;
            marketpass_cli::issue::run(&password).await?
        }
        Commands::Proof(args) => {
            let password = resolve_password(args.password, std::io::stdin().lock())?;
            marketpass_cli::proof::run_proof(&password, &args.salt).await?
        }
        Commands::Verify(args) => {
            let password = resolve_password(args.password, std::io::stdin().lock())?;
            let verdict =
                marketpass_cli::proof::run_verify(&password, &args.salt, &args.hash).await?;
            println!("{}", verdict.as_str());
            return Ok(match verdict {
                Verdict::Match => ExitCode::SUCCESS,
                Verdict::Mismatch => ExitCode::FAILURE,
            });
        }
        Commands::Doctor => marketpass_cli::doctor::run()?,
    };

    println!("{output}");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_verify() {
        let cli = Cli::try_parse_from([
            "marketpass",
            "verify",
            "--salt",
            "00ff",
            "--hash",
            "abcd",
            "--password",
            "pw",
        ])
        .unwrap();
        match cli.command {
            Commands::Verify(args) => {
                assert_eq!(args.salt, "00ff");
                assert_eq!(args.hash, "abcd");
                assert_eq!(args.password.as_deref(), Some("pw"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn salt_bytes_defaults_to_sixteen() {
        let cli = Cli::try_parse_from(["marketpass", "salt"]).unwrap();
        match cli.command {
            Commands::Salt(args) => assert_eq!(args.bytes, 16),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
