//! Fuzz target for sealed payload handling
//!
//! # Strategy
//!
//! - Arbitrary keys and plaintext ranges (including out-of-range offsets)
//! - Arbitrary bytes fed straight to `decrypt_message`
//! - Single-bit corruption of freshly sealed payloads
//!
//! # Invariants
//!
//! - Out-of-range input is an error, never a panic
//! - Seal then open returns the exact range
//! - Corrupted payloads never authenticate

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sealcast_crypto::{decrypt_message, sealed_len, MessageEncoder, SymmetricEncoder, TopicKey};
use sealcast_harness::SeededEntropy;

#[derive(Debug, Arbitrary)]
struct SealScenario {
    key: [u8; 32],
    seed: u64,
    buffer: Vec<u8>,
    offset: usize,
    length: usize,
    flip_at: usize,
    garbage: Vec<u8>,
}

fuzz_target!(|scenario: SealScenario| {
    let key = TopicKey::from_bytes(scenario.key);

    // Arbitrary bytes must never authenticate by accident
    assert!(decrypt_message(&key, &scenario.garbage).is_err());

    let encoder = SymmetricEncoder::from_key(key.clone(), SeededEntropy::new(scenario.seed));
    let Ok(sealed) = encoder.encrypt(&scenario.buffer, scenario.offset, scenario.length) else {
        let end = scenario.offset.checked_add(scenario.length);
        assert!(end.map_or(true, |end| end > scenario.buffer.len()));
        return;
    };

    let end = scenario.offset + scenario.length;
    assert_eq!(sealed.len(), sealed_len(scenario.length));
    let opened = decrypt_message(&key, &sealed).expect("fresh payload must open");
    assert_eq!(&opened[..], &scenario.buffer[scenario.offset..end]);

    let mut corrupted = sealed;
    let bit = scenario.flip_at % (corrupted.len() * 8);
    corrupted[bit / 8] ^= 1 << (bit % 8);
    assert!(decrypt_message(&key, &corrupted).is_err());
});
