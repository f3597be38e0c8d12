//! Deterministic and failing entropy sources.

use std::sync::{Mutex, PoisonError};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sealcast_crypto::{Entropy, EntropyError};

/// Entropy from a seeded `ChaCha8` stream.
///
/// Two sources built from the same seed produce the same bytes in the same
/// order, so publishers built on them generate identical keys and nonces.
/// Never use outside tests: the stream is predictable by construction.
#[derive(Debug)]
pub struct SeededEntropy {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededEntropy {
    /// Create a source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)) }
    }
}

impl Entropy for SeededEntropy {
    fn fill(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner).fill_bytes(buffer);
        Ok(())
    }
}

/// Entropy source that is always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingEntropy;

impl Entropy for FailingEntropy {
    fn fill(&self, _buffer: &mut [u8]) -> Result<(), EntropyError> {
        Err(EntropyError("simulated entropy outage".to_string()))
    }
}
