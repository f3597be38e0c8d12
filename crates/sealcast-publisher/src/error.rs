//! Publisher error types.
//!
//! Only caller bugs and lifecycle misuse are errors. Encryption and transport
//! faults on the send path are reported as [`sealcast_proto::PublishOutcome`]
//! values instead.

use sealcast_crypto::CryptoError;
use sealcast_proto::PublisherId;
use thiserror::Error;

/// Errors from constructing or using a topic publisher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublisherError {
    /// `(offset, length)` does not describe a range inside the buffer.
    ///
    /// Fails the call only; the publisher stays usable.
    #[error("invalid argument: offset {offset} + length {length} exceeds buffer of {capacity} bytes")]
    InvalidArgument {
        /// Start of the requested range
        offset: usize,
        /// Length of the requested range
        length: usize,
        /// Size of the caller's buffer
        capacity: usize,
    },

    /// Publisher configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The topic key could not be generated; no publisher was created
    #[error("key generation failed for topic '{topic}': {source}")]
    KeyGeneration {
        /// Topic the publisher was being created for
        topic: String,
        /// Underlying cryptographic error
        #[source]
        source: CryptoError,
    },

    /// Operation attempted after [`crate::TopicPublisher::close`]
    #[error("publisher {publisher_id} for topic '{topic}' is closed")]
    Closed {
        /// Topic of the closed publisher
        topic: String,
        /// Identity of the closed publisher
        publisher_id: PublisherId,
    },
}

impl PublisherError {
    /// Returns true if the publisher can still be used after this error.
    ///
    /// Argument errors fail a single call. A closed publisher, or one that
    /// never finished construction, cannot send again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
