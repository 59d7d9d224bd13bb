//! Branca tokens: authenticated, encrypted, URL-safe.
//!
//! A token is a binary envelope
//! `[version=0xBA:1][timestamp:4 BE][nonce:24][ciphertext][tag:16]`
//! sealed with XChaCha20-Poly1305 under a 256-bit key and rendered as a
//! base62 string. The 29-byte header is authenticated as associated data
//! but not encrypted, so issuance time is readable without the key yet
//! cannot be altered.
//!
//! ```
//! use branca::Branca;
//!
//! let branca = Branca::new(*b"supersecretkeyyoushouldnotcommit").with_ttl(3600);
//! let token = branca.encode_str("Hello world!")?;
//! assert_eq!(branca.decode_str(&token)?, "Hello world!");
//! # Ok::<(), branca::BrancaError>(())
//! ```

pub mod aead;
pub mod base62;
pub mod envelope;
pub mod error;
pub mod token;

pub use aead::{KEY_LENGTH, NONCE_LENGTH, TAG_LENGTH};
pub use envelope::{Header, HEADER_LENGTH, MIN_TOKEN_LENGTH, VERSION};
pub use error::BrancaError;
pub use token::Branca;
