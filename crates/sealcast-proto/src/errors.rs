//! Frame validation errors.

use thiserror::Error;

/// Result alias for frame parsing and encoding.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while validating frames from untrusted bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer is shorter than a frame header
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Minimum number of bytes required
        expected: usize,
        /// Number of bytes available
        actual: usize,
    },

    /// Payload is shorter than the header claims
    #[error("frame truncated: header claims {expected} payload bytes, got {actual}")]
    FrameTruncated {
        /// Payload size announced by the header
        expected: usize,
        /// Payload bytes actually present
        actual: usize,
    },

    /// Magic number does not identify a Sealcast frame
    #[error("invalid magic number: {0:#010x}")]
    InvalidMagic(u32),

    /// Protocol version is not understood by this build
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    /// Message type tag is outside the closed set
    #[error("unknown message type: {0:#06x}")]
    UnknownMessageType(u16),

    /// Payload exceeds the protocol maximum
    #[error("payload too large: {size} bytes exceeds maximum of {max}")]
    PayloadTooLarge {
        /// Payload size in bytes
        size: usize,
        /// Maximum allowed payload size
        max: usize,
    },
}
