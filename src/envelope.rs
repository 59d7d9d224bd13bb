//! Binary token envelope.
//!
//! Wire format:
//! [1 byte: version=0xBA][4 bytes: timestamp u32 BE][24 bytes: nonce]
//! [N bytes: ciphertext][16 bytes: tag]
//!
//! The 29-byte header is passed to the cipher as associated data, so it is
//! authenticated but not encrypted.

use crate::aead::{NONCE_LENGTH, TAG_LENGTH};
use crate::error::BrancaError;

/// Magic byte identifying the format revision.
pub const VERSION: u8 = 0xBA;

/// Header length in bytes: version (1) + timestamp (4) + nonce (24).
pub const HEADER_LENGTH: usize = 1 + 4 + NONCE_LENGTH;

/// Smallest decodable raw token: header plus tag, for an empty payload.
pub const MIN_RAW_LENGTH: usize = HEADER_LENGTH + TAG_LENGTH;

/// Smallest accepted encoded token, in characters. A conservative floor:
/// anything shorter cannot hold an envelope and is rejected before base62
/// arithmetic is attempted.
pub const MIN_TOKEN_LENGTH: usize = 62;

/// Parsed envelope header.
#[derive(Debug)]
pub struct Header {
    /// Issuance time, seconds since the Unix epoch (wraps at 2^32).
    pub timestamp: u32,
    /// Unique per-encryption value. Must never repeat for a given key.
    pub nonce: [u8; NONCE_LENGTH],
}

impl Header {
    /// Serialize as the 29-byte wire header.
    pub fn to_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut header = [0u8; HEADER_LENGTH];
        header[0] = VERSION;
        header[1..5].copy_from_slice(&self.timestamp.to_be_bytes());
        header[5..].copy_from_slice(&self.nonce);
        header
    }

    /// Split a raw token into its parsed header and the ciphertext+tag body.
    ///
    /// Rejects tokens too short to hold an envelope, then checks the version
    /// byte. The version check happens before any cipher work.
    pub fn parse(raw: &[u8]) -> Result<(Header, &[u8]), BrancaError> {
        if raw.len() < MIN_RAW_LENGTH {
            return Err(BrancaError::InvalidToken);
        }
        let version = raw[0];
        if version != VERSION {
            return Err(BrancaError::InvalidTokenVersion {
                got: version,
                expected: VERSION,
            });
        }
        let timestamp = u32::from_be_bytes(
            raw[1..5]
                .try_into()
                .expect("slice is exactly 4 bytes after length check"),
        );
        let nonce: [u8; NONCE_LENGTH] = raw[5..HEADER_LENGTH]
            .try_into()
            .expect("slice is exactly 24 bytes after length check");
        Ok((Header { timestamp, nonce }, &raw[HEADER_LENGTH..]))
    }
}
