//! Transport sender contract.
//!
//! The publisher consumes exactly one transport operation: `offer`. Connection
//! setup, channel management, flow control and retransmission belong to the
//! transport and never appear here.

use std::sync::Arc;

use sealcast_proto::{MsgType, PublishOutcome, PublisherId};

/// Zero-copy send primitive keyed by message type and publisher identity.
///
/// # Invariants
///
/// Implementations MUST:
///
/// - Treat `buffer[offset..offset + length]` as the complete payload and not
///   hold on to `buffer` after returning
/// - Report every failure as a [`PublishOutcome`]; back-pressure maps to
///   `NotSent`, anything else to `UnexpectedError`
/// - Be callable from any thread (`&self`)
pub trait TransportSender: Send + Sync {
    /// Offer one message to the transport.
    fn offer(
        &self,
        msg_type: MsgType,
        publisher_id: PublisherId,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> PublishOutcome;
}

impl<T: TransportSender + ?Sized> TransportSender for Arc<T> {
    fn offer(
        &self,
        msg_type: MsgType,
        publisher_id: PublisherId,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> PublishOutcome {
        (**self).offer(msg_type, publisher_id, buffer, offset, length)
    }
}

impl<T: TransportSender + ?Sized> TransportSender for &T {
    fn offer(
        &self,
        msg_type: MsgType,
        publisher_id: PublisherId,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> PublishOutcome {
        (**self).offer(msg_type, publisher_id, buffer, offset, length)
    }
}
