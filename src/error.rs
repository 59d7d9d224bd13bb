use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrancaError {
    /// Malformed token: too short, not valid base62, or a malformed
    /// hex-encoded fixture nonce.
    #[error("invalid base62 token")]
    InvalidToken,

    #[error("invalid token version: got {got:#04x}, expected {expected:#04x}")]
    InvalidTokenVersion { got: u8, expected: u8 },

    #[error("bad key length: expected {expected} bytes, got {got}")]
    BadKeyLength { expected: usize, got: usize },

    /// Tag verification failed: wrong key, corrupted data, or tampering.
    /// Deliberately carries no further detail.
    #[error("token authentication failed")]
    AuthenticationFailed,

    #[error("token expired at {expiry} (unix seconds)")]
    ExpiredToken { expiry: u64 },

    /// The AEAD seal step reported failure. Not reachable with a validated
    /// key and a 24-byte nonce.
    #[error("encryption failed")]
    EncryptFailed,

    #[error("random number generation failed: {0}")]
    RngFailed(String),
}
