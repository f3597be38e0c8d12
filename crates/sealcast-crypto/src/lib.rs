//! Sealcast Cryptographic Primitives
//!
//! Symmetric encryption for secure topic publishers. Each secure publisher
//! owns one [`SymmetricEncoder`], which owns one [`TopicKey`] generated when
//! the encoder is created. The key is handed out read-only so an external
//! key-distribution mechanism can deliver it to subscribers; this crate never
//! transmits it.
//!
//! # Sealed Payload
//!
//! ```text
//! ┌──────────────┬──────────────────────────┬────────────────┐
//! │ nonce (24 B) │ ciphertext (= plaintext) │ Poly1305 (16 B)│
//! └──────────────┴──────────────────────────┴────────────────┘
//! ```
//!
//! # Security
//!
//! Authenticity:
//! - XChaCha20-Poly1305 AEAD; any tampering with nonce, ciphertext or tag
//!   fails [`decrypt_message`]
//!
//! Nonce Uniqueness:
//! - A fresh 192-bit random nonce per message. The extended nonce makes
//!   random selection safe for the lifetime of a key
//!
//! Key Hygiene:
//! - [`TopicKey`] is zeroized on drop and never printed by `Debug`
//! - Staging buffers that held plaintext are zeroized when sealing fails

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod encoder;
pub mod entropy;
pub mod error;
pub mod key;

pub use encoder::{
    MessageEncoder, NONCE_SIZE, SEAL_OVERHEAD, SymmetricEncoder, TAG_SIZE, decrypt_message,
    sealed_len,
};
pub use entropy::{Entropy, OsEntropy};
pub use error::{CryptoError, EntropyError};
pub use key::TopicKey;
