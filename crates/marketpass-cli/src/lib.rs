//! # marketpass-cli — Join Credential Command-Line Interface
//!
//! Operator tooling around `marketpass-crypto`: issue a credential for a
//! marketplace, check a candidate password against a stored one, and
//! report which backends the current environment selects.
//!
//! ## Subcommands
//!
//! - `salt` — Generate a salt
//! - `issue` — Issue a `{salt, hash}` credential as JSON
//! - `proof` — Compute the join proof for a password and salt
//! - `verify` — Compare a join proof against a stored hash
//! - `doctor` — Probe backends and print the selected configuration
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `marketpass-crypto` and return their output as a
//!   string; `main` does the printing.
//! - Passwords come from `--password` or the first line of stdin and are
//!   never echoed or logged.

pub mod doctor;
pub mod issue;
pub mod password;
pub mod proof;
pub mod salt;
