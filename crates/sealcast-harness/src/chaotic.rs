//! Fault injection wrappers for encoders and transports.
//!
//! Wrappers delegate to an inner implementation but fail a configurable share
//! of calls. Failures come from a seeded LCG, so a failing chaos run replays
//! exactly with the same seed.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use sealcast_crypto::{CryptoError, MessageEncoder, TopicKey};
use sealcast_proto::{MsgType, PublishOutcome, PublisherId};
use sealcast_publisher::TransportSender;

const DEFAULT_SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Deterministic failure schedule shared by the chaotic wrappers.
///
/// Linear congruential generator (Numerical Recipes constants); fast and
/// reproducible, with no claim to statistical quality.
#[derive(Debug)]
struct ChaoticRng {
    state: u64,
}

impl ChaoticRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in [0.0, 1.0)
    fn next(&mut self) -> f64 {
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        (self.state as f64) / (M as f64)
    }

    fn should_fail(&mut self, failure_rate: f64) -> bool {
        self.next() < failure_rate
    }
}

/// Failure decision plus bookkeeping, cloned into each wrapper.
#[derive(Debug, Clone)]
struct Schedule {
    failure_rate: f64,
    rng: Arc<Mutex<ChaoticRng>>,
    calls: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
}

impl Schedule {
    fn new(failure_rate: f64, seed: u64) -> Self {
        assert!(
            (0.0..=1.0).contains(&failure_rate),
            "failure_rate must be between 0.0 and 1.0, got {failure_rate}"
        );

        Self {
            failure_rate,
            rng: Arc::new(Mutex::new(ChaoticRng::new(seed))),
            calls: Arc::new(AtomicUsize::new(0)),
            failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Count a call and decide whether it fails.
    fn roll(&self) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let fail = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .should_fail(self.failure_rate);
        if fail {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
        fail
    }
}

/// Encoder wrapper that randomly fails `encrypt`.
///
/// Injected failures surface as [`CryptoError::Encryption`], exactly like a
/// real cipher fault. `key` is never affected. Clones share the schedule.
#[derive(Debug, Clone)]
pub struct ChaoticEncoder<E> {
    inner: E,
    schedule: Schedule,
}

impl<E: MessageEncoder> ChaoticEncoder<E> {
    /// Wrap `inner`, failing `failure_rate` of calls.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn new(inner: E, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, DEFAULT_SEED)
    }

    /// Like [`ChaoticEncoder::new`] with an explicit seed.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn with_seed(inner: E, failure_rate: f64, seed: u64) -> Self {
        Self { inner, schedule: Schedule::new(failure_rate, seed) }
    }

    /// Underlying encoder.
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Total `encrypt` calls attempted.
    pub fn call_count(&self) -> usize {
        self.schedule.calls.load(Ordering::Relaxed)
    }

    /// `encrypt` calls that were failed on purpose.
    pub fn failure_count(&self) -> usize {
        self.schedule.failures.load(Ordering::Relaxed)
    }
}

impl<E: MessageEncoder> MessageEncoder for ChaoticEncoder<E> {
    fn key(&self) -> &TopicKey {
        self.inner.key()
    }

    fn encrypt(
        &self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<Vec<u8>, CryptoError> {
        if self.schedule.roll() {
            let reason = "chaotic failure injection".to_string();
            return Err(CryptoError::Encryption { reason });
        }
        self.inner.encrypt(buffer, offset, length)
    }
}

/// Transport wrapper that randomly refuses offers.
///
/// Refused offers return `outcome` (back-pressure by default) without
/// reaching the inner transport.
#[derive(Debug, Clone)]
pub struct ChaoticTransport<T> {
    inner: T,
    outcome: PublishOutcome,
    schedule: Schedule,
}

impl<T: TransportSender> ChaoticTransport<T> {
    /// Wrap `inner`, refusing `failure_rate` of offers with `NotSent`.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn new(inner: T, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, DEFAULT_SEED)
    }

    /// Like [`ChaoticTransport::new`] with an explicit seed.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn with_seed(inner: T, failure_rate: f64, seed: u64) -> Self {
        let schedule = Schedule::new(failure_rate, seed);
        Self { inner, outcome: PublishOutcome::NotSent, schedule }
    }

    /// Report refused offers as `outcome` instead of `NotSent`.
    #[must_use]
    pub fn refusing_with(mut self, outcome: PublishOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Underlying transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Offers refused on purpose.
    pub fn failure_count(&self) -> usize {
        self.schedule.failures.load(Ordering::Relaxed)
    }
}

impl<T: TransportSender> TransportSender for ChaoticTransport<T> {
    fn offer(
        &self,
        msg_type: MsgType,
        publisher_id: PublisherId,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> PublishOutcome {
        if self.schedule.roll() {
            tracing::debug!(
                %publisher_id,
                %msg_type,
                outcome = %self.outcome,
                "Injected offer failure"
            );
            return self.outcome;
        }
        self.inner.offer(msg_type, publisher_id, buffer, offset, length)
    }
}

#[cfg(test)]
mod tests {
    use sealcast_crypto::{SymmetricEncoder, decrypt_message};

    use super::*;
    use crate::{RecordingTransport, SeededEntropy};

    fn encoder() -> SymmetricEncoder<SeededEntropy> {
        SymmetricEncoder::with_entropy(SeededEntropy::new(1)).unwrap()
    }

    #[test]
    fn zero_rate_never_fails() {
        let chaotic = ChaoticEncoder::new(encoder(), 0.0);

        for _ in 0..100 {
            let sealed = chaotic.encrypt(b"hello", 0, 5).unwrap();
            assert_eq!(decrypt_message(chaotic.key(), &sealed).unwrap(), b"hello");
        }
        assert_eq!(chaotic.failure_count(), 0);
        assert_eq!(chaotic.call_count(), 100);
    }

    #[test]
    fn full_rate_always_fails() {
        let chaotic = ChaoticEncoder::new(encoder(), 1.0);

        for _ in 0..10 {
            assert!(matches!(
                chaotic.encrypt(b"hello", 0, 5),
                Err(CryptoError::Encryption { .. })
            ));
        }
        assert_eq!(chaotic.failure_count(), 10);
    }

    #[test]
    fn same_seed_same_schedule() {
        let run = |seed| {
            let chaotic = ChaoticEncoder::with_seed(encoder(), 0.5, seed);
            (0..64).map(|_| chaotic.encrypt(b"x", 0, 1).is_err()).collect::<Vec<_>>()
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn refused_offers_skip_inner_transport() {
        let chaotic = ChaoticTransport::new(RecordingTransport::new(), 1.0);

        let outcome = chaotic.offer(MsgType::PlainData, PublisherId::new(1), b"a", 0, 1);

        assert_eq!(outcome, PublishOutcome::NotSent);
        assert_eq!(chaotic.inner().offer_count(), 0);
    }

    #[test]
    fn refusal_outcome_is_configurable() {
        let chaotic = ChaoticTransport::new(RecordingTransport::new(), 1.0)
            .refusing_with(PublishOutcome::UnexpectedError);

        assert_eq!(
            chaotic.offer(MsgType::PlainData, PublisherId::new(1), b"a", 0, 1),
            PublishOutcome::UnexpectedError
        );
    }

    #[test]
    #[should_panic(expected = "failure_rate must be between 0.0 and 1.0")]
    fn rejects_invalid_rate() {
        let _ = ChaoticEncoder::new(encoder(), 1.5);
    }
}
