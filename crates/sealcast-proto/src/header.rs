//! Frame header.
//!
//! The `FrameHeader` is a fixed 28-byte structure serialized as raw binary
//! (Big Endian). A receiver can pick the decode path for the payload from the
//! header alone, without touching the payload bytes.

use bytes::{Buf, BufMut};

use crate::{
    MsgType, PublisherId,
    errors::{ProtocolError, Result},
};

/// Fixed 28-byte frame header (Big Endian network byte order).
///
/// ```text
/// bytes 0-3    magic         "SCST"
/// byte  4      version       0x01
/// byte  5      flags         reserved, zero
/// bytes 6-7    msg_type      u16
/// bytes 8-23   publisher_id  u128
/// bytes 24-27  payload_size  u32
/// ```
///
/// # Invariants
///
/// - A parsed header always carries a known [`MsgType`]; unknown tags are
///   rejected in [`FrameHeader::from_bytes`] so no receiver has to guess.
/// - `payload_size` never exceeds [`FrameHeader::MAX_PAYLOAD_SIZE`] in a
///   parsed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    flags: u8,
    msg_type: MsgType,
    publisher_id: PublisherId,
    pub(crate) payload_size: u32,
}

impl FrameHeader {
    /// Size of the serialized header (28 bytes)
    pub const SIZE: usize = 28;

    /// Magic number: "SCST" in ASCII (0x53435354)
    pub const MAGIC: u32 = 0x5343_5354;

    /// Current protocol version
    pub const VERSION: u8 = 0x01;

    /// Maximum payload size (16 MB)
    pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

    /// Create a header for a message from `publisher_id`.
    ///
    /// `payload_size` starts at zero and is filled in by [`crate::Frame::new`].
    #[must_use]
    pub fn new(msg_type: MsgType, publisher_id: PublisherId) -> Self {
        Self { flags: 0, msg_type, publisher_id, payload_size: 0 }
    }

    /// Parse a header from the start of `bytes`.
    ///
    /// Trailing bytes (the payload) are ignored.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameTooShort` if fewer than 28 bytes are available
    /// - `ProtocolError::InvalidMagic` if the magic number is wrong
    /// - `ProtocolError::UnsupportedVersion` if the version is not 0x01
    /// - `ProtocolError::UnknownMessageType` if the tag is outside the closed
    ///   set
    /// - `ProtocolError::PayloadTooLarge` if the size exceeds the maximum
    ///
    /// Cheapest checks run first so garbage input fails fast.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut buf = bytes
            .get(..Self::SIZE)
            .ok_or(ProtocolError::FrameTooShort { expected: Self::SIZE, actual: bytes.len() })?;

        let magic = buf.get_u32();
        if magic != Self::MAGIC {
            return Err(ProtocolError::InvalidMagic(magic));
        }

        let version = buf.get_u8();
        if version != Self::VERSION {
            return Err(ProtocolError::UnsupportedVersion(version));
        }

        let flags = buf.get_u8();

        let raw_type = buf.get_u16();
        let msg_type =
            MsgType::from_u16(raw_type).ok_or(ProtocolError::UnknownMessageType(raw_type))?;

        let publisher_id = PublisherId::new(buf.get_u128());

        let payload_size = buf.get_u32();
        if payload_size > Self::MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::PayloadTooLarge {
                size: payload_size as usize,
                max: Self::MAX_PAYLOAD_SIZE as usize,
            });
        }

        debug_assert!(buf.is_empty());

        Ok(Self { flags, msg_type, publisher_id, payload_size })
    }

    /// Serialize the header.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut arr = [0u8; Self::SIZE];
        let mut dst = &mut arr[..];
        dst.put_u32(Self::MAGIC);
        dst.put_u8(Self::VERSION);
        dst.put_u8(self.flags);
        dst.put_u16(self.msg_type.to_u16());
        dst.put_u128(self.publisher_id.as_u128());
        dst.put_u32(self.payload_size);
        debug_assert!(dst.is_empty());
        arr
    }

    /// Message-type tag.
    #[must_use]
    pub fn msg_type(&self) -> MsgType {
        self.msg_type
    }

    /// Identity of the publisher that emitted the frame.
    #[must_use]
    pub fn publisher_id(&self) -> PublisherId {
        self.publisher_id
    }

    /// Reserved flag byte.
    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Payload size in bytes (max 16 MB).
    #[must_use]
    pub fn payload_size(&self) -> u32 {
        self.payload_size
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn arbitrary_msg_type() -> impl Strategy<Value = MsgType> {
        prop_oneof![Just(MsgType::PlainData), Just(MsgType::EncryptedData)]
    }

    impl Arbitrary for FrameHeader {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            (arbitrary_msg_type(), any::<u8>(), any::<u128>(), 0u32..=Self::MAX_PAYLOAD_SIZE)
                .prop_map(|(msg_type, flags, publisher_id, payload_size)| Self {
                    flags,
                    msg_type,
                    publisher_id: PublisherId::new(publisher_id),
                    payload_size,
                })
                .boxed()
        }
    }

    fn valid_prefix() -> [u8; FrameHeader::SIZE] {
        FrameHeader::new(MsgType::PlainData, PublisherId::new(7)).to_bytes()
    }

    proptest! {
        #[test]
        fn header_round_trip(header in any::<FrameHeader>()) {
            let bytes = header.to_bytes();
            let parsed = FrameHeader::from_bytes(&bytes).expect("should parse");
            prop_assert_eq!(header, parsed);
        }
    }

    #[test]
    fn layout_matches_documented_offsets() {
        let mut header = FrameHeader::new(
            MsgType::EncryptedData,
            PublisherId::new(0x0102_0304_0506_0708_090A_0B0C_0D0E_0F10),
        );
        header.payload_size = 0x0000_0400;

        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], b"SCST");
        assert_eq!(bytes[4], FrameHeader::VERSION);
        assert_eq!(bytes[5], 0);
        assert_eq!(&bytes[6..8], &[0x00, 0x02]);
        assert_eq!(bytes[8], 0x01);
        assert_eq!(bytes[23], 0x10);
        assert_eq!(&bytes[24..28], &[0x00, 0x00, 0x04, 0x00]);
    }

    #[test]
    fn reject_short_buffer() {
        let result = FrameHeader::from_bytes(&[0u8; 20]);
        assert_eq!(result, Err(ProtocolError::FrameTooShort { expected: 28, actual: 20 }));
    }

    #[test]
    fn reject_invalid_magic() {
        let mut buf = valid_prefix();
        buf[0..4].copy_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);

        let result = FrameHeader::from_bytes(&buf);
        assert_eq!(result, Err(ProtocolError::InvalidMagic(0xFFFF_FFFF)));
    }

    #[test]
    fn reject_invalid_version() {
        let mut buf = valid_prefix();
        buf[4] = 0xFF;

        let result = FrameHeader::from_bytes(&buf);
        assert_eq!(result, Err(ProtocolError::UnsupportedVersion(0xFF)));
    }

    #[test]
    fn reject_unknown_message_type() {
        let mut buf = valid_prefix();
        buf[6..8].copy_from_slice(&0x0099u16.to_be_bytes());

        let result = FrameHeader::from_bytes(&buf);
        assert_eq!(result, Err(ProtocolError::UnknownMessageType(0x0099)));
    }

    #[test]
    fn reject_oversized_payload() {
        let mut buf = valid_prefix();
        let oversized = FrameHeader::MAX_PAYLOAD_SIZE + 1;
        buf[24..28].copy_from_slice(&oversized.to_be_bytes());

        let result = FrameHeader::from_bytes(&buf);
        assert!(matches!(result, Err(ProtocolError::PayloadTooLarge { .. })));
    }
}
