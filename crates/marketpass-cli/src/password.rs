//! # Password Input
//!
//! Resolves the password for a subcommand from `--password` or, when the
//! flag is absent, from the first line of stdin.

use std::io::BufRead;

use zeroize::Zeroizing;

/// Take the password from `flag`, or read one line from `input`.
///
/// The trailing line ending (`\n` or `\r\n`) is stripped; other whitespace
/// is part of the password. An empty line is an empty password.
pub fn resolve_password(
    flag: Option<String>,
    mut input: impl BufRead,
) -> anyhow::Result<Zeroizing<String>> {
    if let Some(password) = flag {
        return Ok(Zeroizing::new(password));
    }

    let mut line = Zeroizing::new(String::new());
    input.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}
