//! Error types for encryption operations

use thiserror::Error;

/// Errors from key generation, sealing and opening payloads
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// No key could be generated (entropy source unavailable)
    #[error("key generation failed: {reason}")]
    KeyGeneration {
        /// Reason for the failure
        reason: String,
    },

    /// Sealing a message failed. No partial output is produced.
    #[error("encryption failed: {reason}")]
    Encryption {
        /// Reason for the failure
        reason: String,
    },

    /// Requested byte range lies outside the input buffer
    #[error("invalid range: offset {offset} + length {length} exceeds buffer of {capacity} bytes")]
    InvalidRange {
        /// Start of the range
        offset: usize,
        /// Length of the range
        length: usize,
        /// Size of the buffer
        capacity: usize,
    },

    /// Invalid key material length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length
        expected: usize,
        /// Actual key length
        actual: usize,
    },

    /// Sealed payload is too short to hold a nonce and tag
    #[error("sealed payload too short: need at least {min} bytes, got {actual}")]
    SealedTooShort {
        /// Minimum sealed payload size
        min: usize,
        /// Actual size
        actual: usize,
    },

    /// Decryption failed (authentication tag mismatch)
    #[error("decryption failed: {reason}")]
    DecryptionFailed {
        /// Reason for decryption failure
        reason: String,
    },
}

/// The platform entropy source failed to produce bytes
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("entropy source unavailable: {0}")]
pub struct EntropyError(pub String);
