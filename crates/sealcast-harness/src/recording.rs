//! Transport that records offers instead of sending them.

use std::sync::{Mutex, MutexGuard, PoisonError};

use sealcast_proto::{MsgType, PublishOutcome, PublisherId};
use sealcast_publisher::TransportSender;

/// One captured `offer` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Tag the publisher attached
    pub msg_type: MsgType,
    /// Publisher the message was sent for
    pub publisher_id: PublisherId,
    /// Copy of `buffer[offset..offset + length]`
    pub payload: Vec<u8>,
}

/// Records every offer in call order and returns a scripted outcome.
///
/// Offers are recorded even when the scripted outcome is not `Success`, so
/// tests can see what the publisher attempted.
#[derive(Debug)]
pub struct RecordingTransport {
    offers: Mutex<Vec<Offer>>,
    outcome: Mutex<PublishOutcome>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTransport {
    /// Transport that accepts every offer.
    pub fn new() -> Self {
        Self::answering(PublishOutcome::Success)
    }

    /// Transport that answers every offer with `outcome`.
    pub fn answering(outcome: PublishOutcome) -> Self {
        Self { offers: Mutex::new(Vec::new()), outcome: Mutex::new(outcome) }
    }

    /// Change the outcome returned by subsequent offers.
    pub fn set_outcome(&self, outcome: PublishOutcome) {
        *lock(&self.outcome) = outcome;
    }

    /// Snapshot of all offers so far.
    pub fn offers(&self) -> Vec<Offer> {
        lock(&self.offers).clone()
    }

    /// Number of offers so far.
    pub fn offer_count(&self) -> usize {
        lock(&self.offers).len()
    }

    /// Remove and return all offers so far.
    pub fn drain(&self) -> Vec<Offer> {
        std::mem::take(&mut *lock(&self.offers))
    }
}

impl TransportSender for RecordingTransport {
    fn offer(
        &self,
        msg_type: MsgType,
        publisher_id: PublisherId,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> PublishOutcome {
        let Some(payload) = sealcast_proto::message_range(buffer, offset, length) else {
            tracing::warn!(%publisher_id, offset, length, "Recorded offer outside buffer");
            return PublishOutcome::UnexpectedError;
        };

        lock(&self.offers).push(Offer { msg_type, publisher_id, payload: payload.to_vec() });
        *lock(&self.outcome)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: PublisherId = PublisherId::new(5);

    #[test]
    fn records_exact_range_in_order() {
        let transport = RecordingTransport::new();

        assert!(transport.offer(MsgType::PlainData, ID, b"xxabxx", 2, 2).is_success());
        assert!(transport.offer(MsgType::EncryptedData, ID, b"cd", 0, 2).is_success());

        let offers = transport.offers();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].payload, b"ab");
        assert_eq!(offers[0].msg_type, MsgType::PlainData);
        assert_eq!(offers[1].msg_type, MsgType::EncryptedData);
    }

    #[test]
    fn scripted_outcome_is_returned_and_offer_still_recorded() {
        let transport = RecordingTransport::answering(PublishOutcome::NotSent);

        assert_eq!(transport.offer(MsgType::PlainData, ID, b"a", 0, 1), PublishOutcome::NotSent);
        assert_eq!(transport.offer_count(), 1);

        transport.set_outcome(PublishOutcome::Success);
        assert_eq!(transport.offer(MsgType::PlainData, ID, b"a", 0, 1), PublishOutcome::Success);
    }

    #[test]
    fn drain_empties_the_log() {
        let transport = RecordingTransport::new();
        let _ = transport.offer(MsgType::PlainData, ID, b"a", 0, 1);

        assert_eq!(transport.drain().len(), 1);
        assert_eq!(transport.offer_count(), 0);
    }
}
