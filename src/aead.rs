//! XChaCha20-Poly1305 seal/open.
//!
//! 256-bit key, 192-bit extended nonce, 128-bit tag appended to the
//! ciphertext. The key length is validated here, before any cipher work.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};

use crate::error::BrancaError;

/// Key length in bytes (256-bit).
pub const KEY_LENGTH: usize = 32;

/// Extended nonce length in bytes (192-bit).
pub const NONCE_LENGTH: usize = 24;

/// Poly1305 tag length in bytes.
pub const TAG_LENGTH: usize = 16;

fn cipher(key: &[u8]) -> Result<XChaCha20Poly1305, BrancaError> {
    if key.len() != KEY_LENGTH {
        return Err(BrancaError::BadKeyLength {
            expected: KEY_LENGTH,
            got: key.len(),
        });
    }
    XChaCha20Poly1305::new_from_slice(key).map_err(|_| BrancaError::BadKeyLength {
        expected: KEY_LENGTH,
        got: key.len(),
    })
}

/// Encrypt `plaintext`, authenticating `aad` alongside it.
///
/// Returns ciphertext with the 16-byte tag appended.
pub fn seal(
    key: &[u8],
    nonce: &[u8; NONCE_LENGTH],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, BrancaError> {
    let cipher = cipher(key)?;
    cipher
        .encrypt(
            XNonce::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| BrancaError::EncryptFailed)
}

/// Verify the tag and decrypt `ciphertext` (tag included in its trailing
/// 16 bytes). Any corruption of ciphertext, tag, nonce, or aad fails with
/// `AuthenticationFailed` and no partial output.
pub fn open(
    key: &[u8],
    nonce: &[u8; NONCE_LENGTH],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, BrancaError> {
    let cipher = cipher(key)?;
    cipher
        .decrypt(
            XNonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| BrancaError::AuthenticationFailed)
}
