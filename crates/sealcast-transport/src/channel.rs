//! Bounded channel transport.
//!
//! Mapping of channel conditions onto publish outcomes:
//!
//! | Condition                        | Outcome           |
//! |----------------------------------|-------------------|
//! | frame queued                     | `Success`         |
//! | channel full                     | `NotSent`         |
//! | receiver dropped                 | `UnexpectedError` |
//! | range outside buffer / oversized | `UnexpectedError` |

use bytes::Bytes;
use sealcast_proto::{Frame, MsgType, PublishOutcome, PublisherId, message_range};
use sealcast_publisher::TransportSender;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Create a transport and the receiving end of its channel.
///
/// `capacity` frames may be queued before offers report back-pressure. A
/// capacity of zero is raised to one; the channel always holds at least one
/// frame.
pub fn channel(capacity: usize) -> (ChannelTransport, mpsc::Receiver<Frame>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ChannelTransport { tx }, rx)
}

/// Transport that queues each offered message as a [`Frame`].
///
/// Offers never block: `try_send` either queues the frame or reports why it
/// could not. Clones share the same channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::Sender<Frame>,
}

impl ChannelTransport {
    /// Frames that can still be queued before back-pressure.
    pub fn available_capacity(&self) -> usize {
        self.tx.capacity()
    }
}

impl TransportSender for ChannelTransport {
    fn offer(
        &self,
        msg_type: MsgType,
        publisher_id: PublisherId,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> PublishOutcome {
        let Some(payload) = message_range(buffer, offset, length) else {
            tracing::warn!(%publisher_id, offset, length, "Offer range outside buffer");
            return PublishOutcome::UnexpectedError;
        };

        let frame = match Frame::tagged(msg_type, publisher_id, Bytes::copy_from_slice(payload)) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(%publisher_id, error = %e, "Failed to build frame");
                return PublishOutcome::UnexpectedError;
            },
        };

        match self.tx.try_send(frame) {
            Ok(()) => PublishOutcome::Success,
            Err(TrySendError::Full(_)) => PublishOutcome::NotSent,
            Err(TrySendError::Closed(_)) => {
                tracing::warn!(%publisher_id, %msg_type, "Frame receiver dropped");
                PublishOutcome::UnexpectedError
            },
        }
    }
}
