//! Message-type tags.

use std::fmt;

/// Wire-level message type.
///
/// # Invariants
///
/// - Every payload a publisher emits carries exactly one of these tags, and
///   the tag alone decides whether the receiver decrypts it.
/// - The set is closed: [`MsgType::from_u16`] returns `None` for any other
///   value and frame decoding rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum MsgType {
    /// User payload sent as-is
    PlainData = 0x0001,
    /// User payload sealed under the publisher's topic key
    EncryptedData = 0x0002,
}

impl MsgType {
    /// Raw wire value.
    #[must_use]
    pub fn to_u16(self) -> u16 {
        self as u16
    }

    /// Parse a wire value. `None` if unrecognized.
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0001 => Some(Self::PlainData),
            0x0002 => Some(Self::EncryptedData),
            _ => None,
        }
    }

    /// True if the payload must be decrypted before use.
    #[must_use]
    pub fn is_encrypted(self) -> bool {
        matches!(self, Self::EncryptedData)
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlainData => f.write_str("plain-data"),
            Self::EncryptedData => f.write_str("encrypted-data"),
        }
    }
}
