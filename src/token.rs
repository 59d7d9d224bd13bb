//! Token encode/decode and per-instance configuration.

use std::time::{SystemTime, UNIX_EPOCH};

use zeroize::Zeroize;

use crate::aead::{self, NONCE_LENGTH};
use crate::base62;
use crate::envelope::{Header, HEADER_LENGTH, MIN_TOKEN_LENGTH};
use crate::error::BrancaError;

/// Seconds since the Unix epoch, `0` if the clock reads before the epoch.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// If `ttl` is nonzero, check `timestamp + ttl` against `now`.
///
/// The sum is computed in u64 so a timestamp near 2^32-1 plus a large TTL
/// cannot wrap around into the past.
fn check_expiry(timestamp: u32, ttl: u32, now: u64) -> Result<(), BrancaError> {
    if ttl == 0 {
        return Ok(());
    }
    let expiry = u64::from(timestamp) + u64::from(ttl);
    if expiry < now {
        return Err(BrancaError::ExpiredToken { expiry });
    }
    Ok(())
}

/// Token configuration: a 256-bit key plus an optional TTL.
///
/// A value is immutable once built, so it can be shared freely across
/// threads; `encode` and `decode` take `&self` and never mutate. The
/// fixed-nonce and fixed-timestamp builders exist to produce deterministic
/// fixtures for cross-implementation tests and must not be used in
/// production: a repeated nonce under the same key breaks the cipher.
pub struct Branca {
    key: Vec<u8>,
    ttl: u32,
    nonce: Option<String>,
    timestamp: Option<u32>,
}

impl Branca {
    /// Create a configuration from raw key material.
    ///
    /// The key must be exactly 32 bytes; the length is checked on first use
    /// so both `encode` and `decode` report `BadKeyLength` for a bad key.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            ttl: 0,
            nonce: None,
            timestamp: None,
        }
    }

    /// Set a time-to-live in seconds. Zero (the default) never expires.
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Fix the issuance timestamp. Deterministic fixtures only.
    pub fn with_fixed_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Fix the nonce from its 48-character hex form. Deterministic fixtures
    /// only; malformed hex surfaces as `InvalidToken` at encode time.
    pub fn with_fixed_nonce_hex(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Configured time-to-live in seconds.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    fn resolve_timestamp(&self) -> u32 {
        match self.timestamp {
            Some(timestamp) => timestamp,
            None => unix_now() as u32,
        }
    }

    fn resolve_nonce(&self) -> Result<[u8; NONCE_LENGTH], BrancaError> {
        match &self.nonce {
            Some(fixed) => {
                let bytes = hex::decode(fixed).map_err(|_| BrancaError::InvalidToken)?;
                bytes.try_into().map_err(|_| BrancaError::InvalidToken)
            }
            None => {
                let mut nonce = [0u8; NONCE_LENGTH];
                getrandom::getrandom(&mut nonce)
                    .map_err(|e| BrancaError::RngFailed(e.to_string()))?;
                Ok(nonce)
            }
        }
    }

    /// Encode a payload into a token string.
    ///
    /// Builds the header (version, timestamp, nonce), seals the payload with
    /// the header as associated data, and base62-encodes the result.
    pub fn encode(&self, plaintext: &[u8]) -> Result<String, BrancaError> {
        let header = Header {
            timestamp: self.resolve_timestamp(),
            nonce: self.resolve_nonce()?,
        };
        let header_bytes = header.to_bytes();

        let sealed = aead::seal(&self.key, &header.nonce, &header_bytes, plaintext)?;

        let mut raw = Vec::with_capacity(HEADER_LENGTH + sealed.len());
        raw.extend_from_slice(&header_bytes);
        raw.extend_from_slice(&sealed);
        Ok(base62::encode(&raw))
    }

    /// Encode a text payload.
    pub fn encode_str(&self, plaintext: &str) -> Result<String, BrancaError> {
        self.encode(plaintext.as_bytes())
    }

    /// Decode a token string back into the payload bytes.
    ///
    /// The version byte is checked before authentication; the TTL is checked
    /// only after authentication succeeds, so the expiration branch leaks
    /// nothing about unauthenticated tokens.
    pub fn decode(&self, token: &str) -> Result<Vec<u8>, BrancaError> {
        if token.len() < MIN_TOKEN_LENGTH {
            return Err(BrancaError::InvalidToken);
        }
        let raw = base62::decode(token)?;
        let (header, body) = Header::parse(&raw)?;

        let plaintext = aead::open(&self.key, &header.nonce, &raw[..HEADER_LENGTH], body)?;

        check_expiry(header.timestamp, self.ttl, unix_now())?;
        Ok(plaintext)
    }

    /// Decode a token string into text. The payload bytes are reinterpreted
    /// as UTF-8 without re-validation; ill-formed sequences are replaced.
    pub fn decode_str(&self, token: &str) -> Result<String, BrancaError> {
        let payload = self.decode(token)?;
        Ok(String::from_utf8_lossy(&payload).into_owned())
    }
}

impl Drop for Branca {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8; 32] = b"supersecretkeyyoushouldnotcommit";
    const ZERO_NONCE_HEX: &str = "000000000000000000000000000000000000000000000000";

    #[test]
    fn ttl_boundary() {
        let t = 123206400u32;
        assert!(check_expiry(t, 3600, u64::from(t) + 3600).is_ok());

        let err = check_expiry(t, 3600, u64::from(t) + 3601).unwrap_err();
        assert!(matches!(
            err,
            BrancaError::ExpiredToken { expiry } if expiry == u64::from(t) + 3600
        ));
    }

    #[test]
    fn zero_ttl_never_expires() {
        assert!(check_expiry(1, 0, u64::MAX).is_ok());
    }

    #[test]
    fn expiry_does_not_wrap_at_u32_max() {
        // u32 arithmetic would wrap to a past instant; the widened sum must not.
        assert!(check_expiry(u32::MAX, u32::MAX, u64::from(u32::MAX)).is_ok());
    }

    #[test]
    fn fixed_nonce_and_timestamp_are_deterministic() {
        let encode = || {
            Branca::new(KEY.as_slice())
                .with_fixed_timestamp(123206400)
                .with_fixed_nonce_hex(ZERO_NONCE_HEX)
                .encode(b"Hello world!")
                .unwrap()
        };
        assert_eq!(encode(), encode());
    }

    #[test]
    fn malformed_fixture_hex() {
        let err = Branca::new(KEY.as_slice())
            .with_fixed_nonce_hex("zz".repeat(24))
            .encode(b"x")
            .unwrap_err();
        assert!(matches!(err, BrancaError::InvalidToken));
    }

    #[test]
    fn fixture_nonce_wrong_length() {
        // Valid hex, but 12 bytes instead of 24.
        let err = Branca::new(KEY.as_slice())
            .with_fixed_nonce_hex("00".repeat(12))
            .encode(b"x")
            .unwrap_err();
        assert!(matches!(err, BrancaError::InvalidToken));
    }

    #[test]
    fn random_nonce_gives_distinct_tokens() {
        let branca = Branca::new(KEY.as_slice());
        let a = branca.encode(b"same payload").unwrap();
        let b = branca.encode(b"same payload").unwrap();
        assert_ne!(a, b);
        assert_eq!(branca.decode(&a).unwrap(), b"same payload");
        assert_eq!(branca.decode(&b).unwrap(), b"same payload");
    }

    #[test]
    fn ttl_accessor() {
        assert_eq!(Branca::new(KEY.as_slice()).ttl(), 0);
        assert_eq!(Branca::new(KEY.as_slice()).with_ttl(3600).ttl(), 3600);
    }
}
