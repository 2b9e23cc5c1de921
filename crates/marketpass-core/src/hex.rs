//! # Hex Encoding
//!
//! Lowercase hex rendering used for salts and digests. Salts and hashes are
//! persisted as text, so every byte string that leaves the crypto layer goes
//! through [`to_hex`].

/// Render bytes as a lowercase hex string (two characters per byte).
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Returns true if `s` consists only of lowercase hex digits.
///
/// The empty string is considered lowercase hex.
pub fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_hex_pads_and_lowercases() {
        assert_eq!(to_hex(&[0x00, 0x0f, 0xab, 0xff]), "000fabff");
    }

    #[test]
    fn to_hex_empty() {
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn is_lower_hex_rejects_upper_and_non_hex() {
        assert!(is_lower_hex("0123456789abcdef"));
        assert!(is_lower_hex(""));
        assert!(!is_lower_hex("ABCDEF"));
        assert!(!is_lower_hex("xyz"));
        assert!(!is_lower_hex("ab cd"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Hex output is always twice the input length and lowercase.
        #[test]
        fn to_hex_length_and_alphabet(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
            let hex = to_hex(&bytes);
            prop_assert_eq!(hex.len(), bytes.len() * 2);
            prop_assert!(is_lower_hex(&hex));
        }
    }
}
