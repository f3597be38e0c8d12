//! Send strategies.
//!
//! The strategy decides the message-type tag and the bytes that actually hit
//! the transport. It is fixed when the publisher is built.

use sealcast_crypto::{MessageEncoder, SymmetricEncoder, TopicKey};
use sealcast_proto::{MsgType, PublishOutcome};

use crate::{publisher::PublisherIdentity, transport::TransportSender};

/// Sends the caller's bytes unmodified, tagged [`MsgType::PlainData`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStrategy;

impl PlainStrategy {
    /// Forward `buffer[offset..offset + length]` as-is. No allocation.
    pub fn send_to_transport<T: TransportSender + ?Sized>(
        &self,
        transport: &T,
        identity: &PublisherIdentity,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> PublishOutcome {
        transport.offer(MsgType::PlainData, identity.id(), buffer, offset, length)
    }
}

/// Seals every message with the publisher's encoder, tagged
/// [`MsgType::EncryptedData`].
///
/// # Security
///
/// - An encryption failure returns [`PublishOutcome::UnexpectedError`]
///   without calling the transport. There is no retry and no plaintext
///   fallback.
/// - The failure is logged with topic and publisher id; neither plaintext
///   nor key material is logged.
pub struct SecureStrategy<E = SymmetricEncoder> {
    encoder: E,
}

impl<E: MessageEncoder> SecureStrategy<E> {
    /// Wrap an encoder.
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    /// Encrypt the range and offer the sealed payload.
    ///
    /// The sealed payload is allocated for this call only and dropped before
    /// returning, so concurrent sends never share a staging buffer. It is
    /// offered with its own length, which exceeds `length` by the seal
    /// overhead.
    pub fn send_to_transport<T: TransportSender + ?Sized>(
        &self,
        transport: &T,
        identity: &PublisherIdentity,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> PublishOutcome {
        let sealed = match self.encoder.encrypt(buffer, offset, length) {
            Ok(sealed) => sealed,
            Err(e) => {
                tracing::error!(
                    topic = %identity.topic(),
                    publisher_id = %identity.id(),
                    error = %e,
                    "Failed to encrypt message in secure topic publisher"
                );
                return PublishOutcome::UnexpectedError;
            },
        };

        transport.offer(MsgType::EncryptedData, identity.id(), &sealed, 0, sealed.len())
    }

    /// Session key, for delivery to subscribers by key distribution.
    pub fn session_key(&self) -> &TopicKey {
        self.encoder.key()
    }
}

/// Strategy selected at construction.
pub enum SendStrategy<E = SymmetricEncoder> {
    /// Plaintext publishing
    Plain(PlainStrategy),
    /// Encrypted publishing
    Secure(SecureStrategy<E>),
}

impl<E: MessageEncoder> SendStrategy<E> {
    /// Dispatch to the selected strategy.
    pub fn send_to_transport<T: TransportSender + ?Sized>(
        &self,
        transport: &T,
        identity: &PublisherIdentity,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> PublishOutcome {
        match self {
            Self::Plain(plain) => {
                plain.send_to_transport(transport, identity, buffer, offset, length)
            },
            Self::Secure(secure) => {
                secure.send_to_transport(transport, identity, buffer, offset, length)
            },
        }
    }

    /// True for [`SendStrategy::Secure`].
    pub fn is_secure(&self) -> bool {
        matches!(self, Self::Secure(_))
    }

    /// Session key of a secure strategy, `None` when plain.
    pub fn session_key(&self) -> Option<&TopicKey> {
        match self {
            Self::Plain(_) => None,
            Self::Secure(secure) => Some(secure.session_key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use sealcast_crypto::{CryptoError, decrypt_message};
    use sealcast_proto::PublisherId;

    use super::*;

    #[derive(Default)]
    struct Capture {
        offers: Mutex<Vec<(MsgType, Vec<u8>)>>,
    }

    impl TransportSender for Capture {
        fn offer(
            &self,
            msg_type: MsgType,
            _publisher_id: PublisherId,
            buffer: &[u8],
            offset: usize,
            length: usize,
        ) -> PublishOutcome {
            let payload = buffer[offset..offset + length].to_vec();
            self.offers.lock().unwrap().push((msg_type, payload));
            PublishOutcome::Success
        }
    }

    struct BrokenEncoder {
        key: TopicKey,
    }

    impl MessageEncoder for BrokenEncoder {
        fn key(&self) -> &TopicKey {
            &self.key
        }

        fn encrypt(&self, _: &[u8], _: usize, _: usize) -> Result<Vec<u8>, CryptoError> {
            Err(CryptoError::Encryption { reason: "cipher offline".to_string() })
        }
    }

    fn identity() -> PublisherIdentity {
        PublisherIdentity::new(PublisherId::new(42), "orders")
    }

    #[test]
    fn plain_forwards_exact_range() {
        let transport = Capture::default();
        let outcome = PlainStrategy.send_to_transport(&transport, &identity(), b"..hello..", 2, 5);

        assert_eq!(outcome, PublishOutcome::Success);
        let offers = transport.offers.lock().unwrap();
        assert_eq!(offers.as_slice(), &[(MsgType::PlainData, b"hello".to_vec())]);
    }

    #[test]
    fn secure_tags_and_seals() {
        let transport = Capture::default();
        let strategy = SecureStrategy::new(SymmetricEncoder::new().unwrap());

        let outcome = strategy.send_to_transport(&transport, &identity(), b"hello", 0, 5);

        assert_eq!(outcome, PublishOutcome::Success);
        let offers = transport.offers.lock().unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].0, MsgType::EncryptedData);
        assert_eq!(decrypt_message(strategy.session_key(), &offers[0].1).unwrap(), b"hello");
    }

    #[test]
    fn secure_encryption_failure_skips_transport() {
        let transport = Capture::default();
        let strategy = SecureStrategy::new(BrokenEncoder { key: TopicKey::from_bytes([1; 32]) });

        let outcome = strategy.send_to_transport(&transport, &identity(), b"hello", 0, 5);

        assert_eq!(outcome, PublishOutcome::UnexpectedError);
        assert!(transport.offers.lock().unwrap().is_empty());
    }

    #[test]
    fn dispatch_reports_mode() {
        let plain: SendStrategy = SendStrategy::Plain(PlainStrategy);
        let secure: SendStrategy =
            SendStrategy::Secure(SecureStrategy::new(SymmetricEncoder::new().unwrap()));

        assert!(!plain.is_secure());
        assert!(plain.session_key().is_none());
        assert!(secure.is_secure());
        assert_eq!(secure.session_key().map(|key| key.as_bytes().len()), Some(TopicKey::SIZE));
    }
}
