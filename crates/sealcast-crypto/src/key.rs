//! Topic session key.

use std::fmt;

use zeroize::Zeroize;

use crate::{entropy::Entropy, error::CryptoError};

/// 32-byte symmetric key for XChaCha20-Poly1305.
///
/// One key per secure publisher, generated once and never regenerated. The
/// raw bytes are exposed read-only through [`TopicKey::as_bytes`] so a
/// key-distribution collaborator can deliver them to subscribers.
///
/// # Security
///
/// - Zeroized on drop, including every clone
/// - `Debug` output never contains key material
#[derive(Clone)]
pub struct TopicKey {
    bytes: [u8; Self::SIZE],
}

impl TopicKey {
    /// Key size in bytes
    pub const SIZE: usize = 32;

    /// Generate a fresh key from `entropy`.
    ///
    /// # Errors
    ///
    /// - `KeyGeneration` if the entropy source fails
    pub fn generate(entropy: &impl Entropy) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; Self::SIZE];
        if let Err(e) = entropy.fill(&mut bytes) {
            bytes.zeroize();
            return Err(CryptoError::KeyGeneration { reason: e.to_string() });
        }
        Ok(Self { bytes })
    }

    /// Wrap existing key material.
    #[must_use]
    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self { bytes }
    }

    /// Rebuild a key received through key distribution.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength` if `bytes` is not exactly 32 bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; Self::SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKeyLength { expected: Self::SIZE, actual: bytes.len() }
        })?;
        Ok(Self { bytes })
    }

    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.bytes
    }
}

impl Drop for TopicKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TopicKey([REDACTED])")
    }
}
