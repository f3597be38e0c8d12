//! Result of offering a message to a transport.

use std::fmt;

/// Outcome of a publish attempt.
///
/// Returned as a value on every send path; faults below the publisher
/// (encryption, transport) are folded into one of these variants instead of
/// surfacing as errors.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishOutcome {
    /// The transport accepted the message
    Success,
    /// The transport could not take the message right now (back-pressure).
    /// The caller may retry later.
    NotSent,
    /// The message could not be sent because of a fault in encryption or in
    /// the transport. The publisher remains usable.
    UnexpectedError,
}

impl PublishOutcome {
    /// True if the transport accepted the message.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::NotSent => f.write_str("not sent"),
            Self::UnexpectedError => f.write_str("unexpected error"),
        }
    }
}
