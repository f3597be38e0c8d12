//! Randomness sources for keys and nonces.
//!
//! Key generation and nonce selection draw from an [`Entropy`] source instead
//! of calling the OS directly. Production uses [`OsEntropy`]; tests plug in
//! seeded or failing sources to get reproducible ciphertexts and to exercise
//! the key-generation and encryption failure paths.

use std::sync::Arc;

use crate::error::EntropyError;

/// Source of cryptographically secure random bytes.
///
/// # Invariants
///
/// - Implementations used outside tests MUST be backed by a CSPRNG
/// - On error the buffer contents are unspecified and MUST NOT be used
pub trait Entropy: Send + Sync {
    /// Fill `buffer` entirely with random bytes.
    fn fill(&self, buffer: &mut [u8]) -> Result<(), EntropyError>;
}

/// OS cryptographic RNG (getrandom).
///
/// Backed by the platform CSPRNG (e.g. `getrandom(2)` on Linux,
/// `BCryptGenRandom` on Windows). Unlike a server that cannot run without
/// randomness, a publisher reports the failure: key generation fails the
/// publisher's construction and nonce failure fails a single send.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn fill(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::fill(buffer).map_err(|e| EntropyError(e.to_string()))
    }
}

impl<E: Entropy + ?Sized> Entropy for Arc<E> {
    fn fill(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_entropy_fills_buffer() {
        let mut bytes = [0u8; 64];
        OsEntropy.fill(&mut bytes).unwrap();

        let non_zero_count = bytes.iter().filter(|&&b| b != 0).count();
        assert!(non_zero_count > 32, "Most bytes should be non-zero");
    }

    #[test]
    fn os_entropy_is_not_repeating() {
        let mut bytes1 = [0u8; 32];
        let mut bytes2 = [0u8; 32];

        OsEntropy.fill(&mut bytes1).unwrap();
        OsEntropy.fill(&mut bytes2).unwrap();

        assert_ne!(bytes1, bytes2, "Random bytes should differ");
    }
}
