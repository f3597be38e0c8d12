//! Topic publisher.
//!
//! Owns identity, topic binding and lifecycle, and funnels every send through
//! one entrypoint regardless of security mode.

use std::sync::{Mutex, MutexGuard, PoisonError};

use sealcast_crypto::{Entropy, MessageEncoder, OsEntropy, SymmetricEncoder, TopicKey};
use sealcast_proto::{PublishOutcome, PublisherId, message_range};

use crate::{
    config::{PublisherConfig, SecurityConfig},
    error::PublisherError,
    strategy::{PlainStrategy, SecureStrategy, SendStrategy},
    transport::TransportSender,
};

/// Immutable identity of a publisher: who it is and which topic it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherIdentity {
    id: PublisherId,
    topic: String,
}

impl PublisherIdentity {
    /// Bind `id` to `topic`.
    pub fn new(id: PublisherId, topic: impl Into<String>) -> Self {
        Self { id, topic: topic.into() }
    }

    /// Publisher identifier.
    pub fn id(&self) -> PublisherId {
        self.id
    }

    /// Topic name.
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// Lifecycle of a publisher.
///
/// `Active` → `Closed`, never back. Security mode is not part of the
/// lifecycle; it is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed and able to send
    Active,
    /// Resources released; sends fail with [`PublisherError::Closed`]
    Closed,
}

/// Publisher bound to one topic.
///
/// # Concurrency
///
/// `send` takes `&self` and may be called from many threads. The encrypt and
/// offer steps run under a per-publisher lock, so the transport observes
/// messages in the order their calls acquired it and two calls never
/// interleave. Each secure send seals into its own buffer.
///
/// # Invariants
///
/// - `is_secure()` never changes after construction
/// - After `close()` the strategy (and with it the encoder and its key) is
///   dropped; no later call reaches the transport
pub struct TopicPublisher<T, E = SymmetricEncoder> {
    identity: PublisherIdentity,
    security: Option<SecurityConfig>,
    transport: T,
    /// `None` once closed
    strategy: Mutex<Option<SendStrategy<E>>>,
}

impl<T: TransportSender> TopicPublisher<T> {
    /// Build a publisher from its configuration.
    ///
    /// A configuration with a security template yields a secure publisher
    /// with a fresh key from the OS RNG; otherwise a plain one.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the configuration is rejected
    /// - `KeyGeneration` if a secure publisher's key cannot be generated
    pub fn new(
        id: PublisherId,
        config: PublisherConfig,
        transport: T,
    ) -> Result<Self, PublisherError> {
        Self::with_entropy(id, config, transport, OsEntropy)
    }
}

impl<T: TransportSender, R: Entropy> TopicPublisher<T, SymmetricEncoder<R>> {
    /// Like [`TopicPublisher::new`], drawing key and nonces from `entropy`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the configuration is rejected
    /// - `KeyGeneration` if `entropy` cannot produce the key
    pub fn with_entropy(
        id: PublisherId,
        config: PublisherConfig,
        transport: T,
        entropy: R,
    ) -> Result<Self, PublisherError> {
        config.validate()?;

        let strategy = if config.security.is_some() {
            let encoder = SymmetricEncoder::with_entropy(entropy).map_err(|source| {
                PublisherError::KeyGeneration { topic: config.topic.clone(), source }
            })?;
            SendStrategy::Secure(SecureStrategy::new(encoder))
        } else {
            SendStrategy::Plain(PlainStrategy)
        };

        Ok(Self::assemble(id, config, transport, strategy))
    }
}

impl<T: TransportSender, E: MessageEncoder> TopicPublisher<T, E> {
    /// Build a secure publisher around an existing encoder.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `topic` is empty
    pub fn with_encoder(
        id: PublisherId,
        topic: impl Into<String>,
        security: SecurityConfig,
        encoder: E,
        transport: T,
    ) -> Result<Self, PublisherError> {
        let config = PublisherConfig::secure(topic, security);
        config.validate()?;

        let strategy = SendStrategy::Secure(SecureStrategy::new(encoder));
        Ok(Self::assemble(id, config, transport, strategy))
    }

    fn assemble(
        id: PublisherId,
        config: PublisherConfig,
        transport: T,
        strategy: SendStrategy<E>,
    ) -> Self {
        debug_assert_eq!(strategy.is_secure(), config.security.is_some());

        let PublisherConfig { topic, security } = config;
        let identity = PublisherIdentity::new(id, topic);

        tracing::info!(
            topic = %identity.topic(),
            publisher_id = %identity.id(),
            secure = strategy.is_secure(),
            "Created topic publisher"
        );

        Self { identity, security, transport, strategy: Mutex::new(Some(strategy)) }
    }

    /// Publish `buffer[offset..offset + length]`.
    ///
    /// Encryption and transport faults are returned as
    /// [`PublishOutcome::UnexpectedError`] / [`PublishOutcome::NotSent`],
    /// never as errors.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the range lies outside `buffer`; the publisher
    ///   remains usable
    /// - `Closed` if the publisher has been closed
    pub fn send(
        &self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<PublishOutcome, PublisherError> {
        if message_range(buffer, offset, length).is_none() {
            return Err(PublisherError::InvalidArgument {
                offset,
                length,
                capacity: buffer.len(),
            });
        }

        let guard = self.lock_strategy();
        let Some(strategy) = guard.as_ref() else {
            return Err(self.closed_error());
        };

        Ok(strategy.send_to_transport(&self.transport, &self.identity, buffer, offset, length))
    }

    /// Release the strategy and encoder. Returns `false` if already closed.
    ///
    /// Waits for an in-flight `send` to finish; no send starts afterwards.
    pub fn close(&self) -> bool {
        let released = self.lock_strategy().take();
        if released.is_some() {
            tracing::info!(
                topic = %self.identity.topic(),
                publisher_id = %self.identity.id(),
                "Closed topic publisher"
            );
        }
        released.is_some()
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> LifecycleState {
        if self.lock_strategy().is_some() { LifecycleState::Active } else { LifecycleState::Closed }
    }

    /// Session key for external key distribution.
    ///
    /// `None` for plain publishers.
    ///
    /// # Errors
    ///
    /// - `Closed` if the publisher has been closed (the key is gone)
    pub fn session_key(&self) -> Result<Option<TopicKey>, PublisherError> {
        let guard = self.lock_strategy();
        let Some(strategy) = guard.as_ref() else {
            return Err(self.closed_error());
        };
        Ok(strategy.session_key().cloned())
    }

    /// True if messages are encrypted before they reach the transport.
    pub fn is_secure(&self) -> bool {
        self.security.is_some()
    }

    /// Publisher identifier.
    pub fn id(&self) -> PublisherId {
        self.identity.id()
    }

    /// Topic this publisher is bound to.
    pub fn topic(&self) -> &str {
        self.identity.topic()
    }

    /// Identity handed to strategies and logs.
    pub fn identity(&self) -> &PublisherIdentity {
        &self.identity
    }

    /// Security template, if the publisher is secure.
    pub fn security_config(&self) -> Option<&SecurityConfig> {
        self.security.as_ref()
    }

    // A panicking transport poisons the lock without leaving the strategy in
    // a partial state, so the inner value stays usable.
    fn lock_strategy(&self) -> MutexGuard<'_, Option<SendStrategy<E>>> {
        self.strategy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn closed_error(&self) -> PublisherError {
        PublisherError::Closed {
            topic: self.identity.topic().to_string(),
            publisher_id: self.identity.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use sealcast_crypto::{EntropyError, decrypt_message};
    use sealcast_proto::MsgType;

    use super::*;

    #[derive(Default)]
    struct Capture {
        offers: Mutex<Vec<(MsgType, PublisherId, Vec<u8>)>>,
    }

    impl Capture {
        fn offers(&self) -> Vec<(MsgType, PublisherId, Vec<u8>)> {
            self.offers.lock().unwrap().clone()
        }
    }

    impl TransportSender for Capture {
        fn offer(
            &self,
            msg_type: MsgType,
            publisher_id: PublisherId,
            buffer: &[u8],
            offset: usize,
            length: usize,
        ) -> PublishOutcome {
            let payload = buffer[offset..offset + length].to_vec();
            self.offers.lock().unwrap().push((msg_type, publisher_id, payload));
            PublishOutcome::Success
        }
    }

    struct NoEntropy;

    impl Entropy for NoEntropy {
        fn fill(&self, _buffer: &mut [u8]) -> Result<(), EntropyError> {
            Err(EntropyError("rng unavailable".to_string()))
        }
    }

    const ID: PublisherId = PublisherId::new(0x5EC);

    fn plain(transport: Arc<Capture>) -> TopicPublisher<Arc<Capture>> {
        TopicPublisher::new(ID, PublisherConfig::plain("quotes"), transport).unwrap()
    }

    fn secure(transport: Arc<Capture>) -> TopicPublisher<Arc<Capture>> {
        let config = PublisherConfig::secure("quotes", SecurityConfig::new("desk"));
        TopicPublisher::new(ID, config, transport).unwrap()
    }

    #[test]
    fn plain_publisher_sends_plaintext() {
        let transport = Arc::new(Capture::default());
        let publisher = plain(Arc::clone(&transport));

        let outcome = publisher.send(b"abcdef", 1, 3).unwrap();

        assert_eq!(outcome, PublishOutcome::Success);
        assert!(!publisher.is_secure());
        assert_eq!(transport.offers(), vec![(MsgType::PlainData, ID, b"bcd".to_vec())]);
        assert!(publisher.session_key().unwrap().is_none());
        assert!(publisher.security_config().is_none());
    }

    #[test]
    fn secure_publisher_sends_ciphertext() {
        let transport = Arc::new(Capture::default());
        let publisher = secure(Arc::clone(&transport));

        let outcome = publisher.send(b"abcdef", 0, 6).unwrap();
        let key = publisher.session_key().unwrap().unwrap();

        assert_eq!(outcome, PublishOutcome::Success);
        assert!(publisher.is_secure());
        let offers = transport.offers();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].0, MsgType::EncryptedData);
        assert_eq!(offers[0].1, ID);
        assert_eq!(decrypt_message(&key, &offers[0].2).unwrap(), b"abcdef");
        assert_eq!(publisher.security_config().map(|s| s.template.as_str()), Some("desk"));
    }

    #[test]
    fn invalid_range_fails_call_but_not_publisher() {
        let transport = Arc::new(Capture::default());
        let publisher = secure(Arc::clone(&transport));

        assert_eq!(
            publisher.send(b"abc", 2, 2),
            Err(PublisherError::InvalidArgument { offset: 2, length: 2, capacity: 3 })
        );
        assert_eq!(
            publisher.send(b"abc", usize::MAX, 2),
            Err(PublisherError::InvalidArgument { offset: usize::MAX, length: 2, capacity: 3 })
        );
        assert!(transport.offers().is_empty());

        assert_eq!(publisher.send(b"abc", 0, 3), Ok(PublishOutcome::Success));
    }

    #[test]
    fn send_after_close_fails() {
        let transport = Arc::new(Capture::default());
        let publisher = secure(Arc::clone(&transport));

        assert_eq!(publisher.lifecycle(), LifecycleState::Active);
        assert!(publisher.close());
        assert_eq!(publisher.lifecycle(), LifecycleState::Closed);

        assert!(matches!(publisher.send(b"late", 0, 4), Err(PublisherError::Closed { .. })));
        assert!(matches!(publisher.session_key(), Err(PublisherError::Closed { .. })));
        assert!(transport.offers().is_empty());
    }

    #[test]
    fn close_is_idempotent_and_keeps_mode() {
        let publisher = secure(Arc::new(Capture::default()));

        assert!(publisher.close());
        assert!(!publisher.close());
        assert!(publisher.is_secure());
    }

    #[test]
    fn key_generation_failure_prevents_construction() {
        let config = PublisherConfig::secure("quotes", SecurityConfig::new("desk"));
        let result =
            TopicPublisher::with_entropy(ID, config, Arc::new(Capture::default()), NoEntropy);

        assert!(matches!(
            result,
            Err(PublisherError::KeyGeneration { ref topic, .. }) if topic == "quotes"
        ));
    }

    #[test]
    fn plain_publisher_never_draws_entropy() {
        let result = TopicPublisher::with_entropy(
            ID,
            PublisherConfig::plain("quotes"),
            Arc::new(Capture::default()),
            NoEntropy,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn empty_topic_is_rejected() {
        let transport = Arc::new(Capture::default());
        let result = TopicPublisher::new(ID, PublisherConfig::plain(""), transport);

        assert!(matches!(result, Err(PublisherError::InvalidConfig(_))));
    }

    #[test]
    fn identity_is_exposed() {
        let publisher = plain(Arc::new(Capture::default()));

        assert_eq!(publisher.id(), ID);
        assert_eq!(publisher.topic(), "quotes");
        assert_eq!(publisher.identity(), &PublisherIdentity::new(ID, "quotes"));
    }
}
