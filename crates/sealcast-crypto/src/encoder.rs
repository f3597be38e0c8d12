//! Message encryption using `XChaCha20-Poly1305`
//!
//! [`SymmetricEncoder`] seals a byte range of a caller buffer into a freshly
//! allocated sealed payload. Each call owns its output, so concurrent calls on
//! one encoder never share a staging buffer.

use chacha20poly1305::{
    Tag, XChaCha20Poly1305, XNonce,
    aead::{AeadInPlace, KeyInit},
};
use sealcast_proto::message_range;
use zeroize::Zeroize;

use crate::{
    entropy::{Entropy, OsEntropy},
    error::CryptoError,
    key::TopicKey,
};

/// Size of the random `XChaCha20` nonce prefix (24 bytes)
pub const NONCE_SIZE: usize = 24;

/// Poly1305 tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// Bytes added to every sealed payload (nonce + tag)
pub const SEAL_OVERHEAD: usize = NONCE_SIZE + TAG_SIZE;

/// Size of the sealed payload for a plaintext of `plaintext_len` bytes.
#[must_use]
pub fn sealed_len(plaintext_len: usize) -> usize {
    plaintext_len + SEAL_OVERHEAD
}

/// Encrypts outbound messages under a key fixed at construction.
///
/// This is the seam the secure send path is generic over; production uses
/// [`SymmetricEncoder`], tests substitute encoders that fail on demand.
///
/// # Invariants
///
/// - `encrypt` never mutates or retains `buffer`
/// - `encrypt` returns either a complete sealed payload or an error, never
///   partial output
/// - `key` returns the same key for the lifetime of the encoder
pub trait MessageEncoder: Send + Sync {
    /// Key every message is sealed under.
    fn key(&self) -> &TopicKey;

    /// Seal `buffer[offset..offset + length]`.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` if the range lies outside `buffer`
    /// - `Encryption` on any cryptographic or entropy fault
    fn encrypt(&self, buffer: &[u8], offset: usize, length: usize)
    -> Result<Vec<u8>, CryptoError>;
}

/// `XChaCha20-Poly1305` encoder owning one topic key.
///
/// The key is drawn from the entropy source once, at construction. Every
/// `encrypt` call draws a fresh 24-byte nonce from the same source.
pub struct SymmetricEncoder<R = OsEntropy> {
    key: TopicKey,
    entropy: R,
}

impl SymmetricEncoder {
    /// Create an encoder with a fresh key from the OS RNG.
    ///
    /// # Errors
    ///
    /// - `KeyGeneration` if the OS RNG is unavailable
    pub fn new() -> Result<Self, CryptoError> {
        Self::with_entropy(OsEntropy)
    }
}

impl<R: Entropy> SymmetricEncoder<R> {
    /// Create an encoder whose key and nonces come from `entropy`.
    ///
    /// # Errors
    ///
    /// - `KeyGeneration` if `entropy` fails
    pub fn with_entropy(entropy: R) -> Result<Self, CryptoError> {
        let key = TopicKey::generate(&entropy)?;
        Ok(Self { key, entropy })
    }

    /// Create an encoder around existing key material.
    pub fn from_key(key: TopicKey, entropy: R) -> Self {
        Self { key, entropy }
    }
}

impl<R: Entropy> MessageEncoder for SymmetricEncoder<R> {
    fn key(&self) -> &TopicKey {
        &self.key
    }

    /// Seal a byte range.
    ///
    /// # Security
    ///
    /// - The nonce is random per call; the 192-bit nonce space makes
    ///   collisions negligible for any realistic message count
    /// - The staging buffer briefly holds plaintext; it is zeroized before
    ///   returning an error
    fn encrypt(
        &self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<Vec<u8>, CryptoError> {
        let plaintext = message_range(buffer, offset, length).ok_or(CryptoError::InvalidRange {
            offset,
            length,
            capacity: buffer.len(),
        })?;

        let mut nonce = [0u8; NONCE_SIZE];
        self.entropy.fill(&mut nonce).map_err(|e| CryptoError::Encryption {
            reason: format!("nonce generation failed: {e}"),
        })?;

        let mut sealed = Vec::with_capacity(sealed_len(length));
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(plaintext);

        let cipher = XChaCha20Poly1305::new(self.key.as_bytes().into());
        let nonce = XNonce::from_slice(&nonce);
        let Ok(tag) = cipher.encrypt_in_place_detached(nonce, &[], &mut sealed[NONCE_SIZE..]) else {
            sealed.zeroize();
            return Err(CryptoError::Encryption {
                reason: "AEAD sealing rejected the message".to_string(),
            });
        };
        sealed.extend_from_slice(&tag);

        debug_assert_eq!(sealed.len(), sealed_len(length));
        Ok(sealed)
    }
}

/// Open a sealed payload produced by a [`MessageEncoder`] under `key`.
///
/// Returns the decrypted plaintext.
///
/// # Errors
///
/// - `SealedTooShort`: payload cannot hold a nonce and tag
/// - `DecryptionFailed`: authentication tag or key is incorrect (tamper)
pub fn decrypt_message(key: &TopicKey, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < SEAL_OVERHEAD {
        return Err(CryptoError::SealedTooShort { min: SEAL_OVERHEAD, actual: sealed.len() });
    }

    let (nonce, body) = sealed.split_at(NONCE_SIZE);
    let (ciphertext, tag) = body.split_at(body.len() - TAG_SIZE);

    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    let mut plaintext = ciphertext.to_vec();

    cipher
        .decrypt_in_place_detached(
            XNonce::from_slice(nonce),
            &[],
            &mut plaintext,
            Tag::from_slice(tag),
        )
        .map_err(|_| CryptoError::DecryptionFailed {
            reason: "authentication failed".to_string(),
        })?;

    Ok(plaintext)
}
