//! Base62 transcoding between raw bytes and printable tokens.
//!
//! The byte sequence is treated as a big-endian unsigned integer. Leading
//! zero bytes are preserved as leading `0` characters, so decode(encode(b))
//! returns `b` exactly, length included.

use crate::error::BrancaError;

/// The 62-symbol alphabet: digits, then uppercase, then lowercase.
pub const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Base62 encode bytes.
pub fn encode(data: &[u8]) -> String {
    base_x::encode(ALPHABET, data)
}

/// Base62 decode a string to bytes. Any character outside the alphabet
/// makes the whole input invalid.
pub fn decode(s: &str) -> Result<Vec<u8>, BrancaError> {
    base_x::decode(ALPHABET, s).map_err(|_| BrancaError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let data = b"Hello, World!";
        let encoded = encode(data);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn alphabet_only() {
        let encoded = encode(&[0xfb, 0xff, 0xfe, 0x00, 0x7f]);
        assert!(encoded.chars().all(|c| ALPHABET.contains(c)));
    }

    #[test]
    fn preserves_leading_zero_bytes() {
        let data = [0x00, 0x00, 0x01, 0xff];
        let encoded = encode(&data);
        assert!(encoded.starts_with("00"));
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn preserves_all_zero_input() {
        let data = [0u8; 29];
        let decoded = decode(&encode(&data)).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn rejects_out_of_alphabet_characters() {
        assert!(matches!(decode("abc_def"), Err(BrancaError::InvalidToken)));
        assert!(matches!(decode("abc!def"), Err(BrancaError::InvalidToken)));
        assert!(matches!(decode("abc def"), Err(BrancaError::InvalidToken)));
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }
}
