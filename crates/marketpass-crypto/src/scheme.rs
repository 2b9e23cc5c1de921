//! # Digest Input Scheme
//!
//! The bytes hashed for a credential are the UTF-8 encoding of
//! `salt + ":" + password`. Every issued credential depends on this exact
//! layout, so the order and separator must not change without a versioned
//! migration of stored hashes.

use marketpass_core::Salt;
use zeroize::Zeroizing;

/// Separator between salt and password in the digest input.
pub const SCHEME_SEPARATOR: char = ':';

/// Build the digest input for `(salt, password)`.
///
/// The buffer holds a copy of the password and is wiped on drop.
pub fn digest_input(salt: &Salt, password: &str) -> Zeroizing<Vec<u8>> {
    let salt = salt.as_str().as_bytes();
    let mut buf = Vec::with_capacity(salt.len() + SCHEME_SEPARATOR.len_utf8() + password.len());
    buf.extend_from_slice(salt);
    buf.push(SCHEME_SEPARATOR as u8);
    buf.extend_from_slice(password.as_bytes());
    Zeroizing::new(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_then_separator_then_password() {
        let input = digest_input(&Salt::new("00ff"), "cornell123");
        assert_eq!(input.as_slice(), b"00ff:cornell123");
    }

    #[test]
    fn empty_parts_are_kept() {
        assert_eq!(digest_input(&Salt::new(""), "").as_slice(), b":");
        assert_eq!(digest_input(&Salt::new("ab"), "").as_slice(), b"ab:");
    }

    #[test]
    fn password_is_utf8_encoded() {
        let input = digest_input(&Salt::new("ab"), "pässwörd");
        assert_eq!(input.as_slice(), "ab:pässwörd".as_bytes());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Hex salts never contain the separator, so the input splits back
        /// into exactly the salt and the password at the first ':'.
        #[test]
        fn splits_at_first_separator(salt in "[0-9a-f]{0,64}", password in ".*") {
            let input = digest_input(&Salt::new(salt.clone()), &password);
            let text = std::str::from_utf8(&input).unwrap();
            let (s, p) = text.split_once(SCHEME_SEPARATOR).unwrap();
            prop_assert_eq!(s, salt.as_str());
            prop_assert_eq!(p, password.as_str());
        }
    }
}
