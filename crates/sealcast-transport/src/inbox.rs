//! Receive-side decode dispatch.

use bytes::Bytes;
use sealcast_crypto::{CryptoError, TopicKey, decrypt_message};
use sealcast_proto::{Frame, MsgType, PublisherId};
use thiserror::Error;

/// Errors from opening a received frame.
#[derive(Debug, Error)]
pub enum InboxError {
    /// Frame is encrypted but no session key is known for its publisher
    #[error("no session key for encrypted frame from publisher {0}")]
    MissingKey(PublisherId),

    /// Sealed payload failed to open
    #[error("failed to open sealed payload: {0}")]
    Crypto(#[from] CryptoError),
}

/// Return the application payload carried by `frame`.
///
/// The decode path is chosen from the frame's message type alone: plaintext
/// is returned as-is (no copy), encrypted data is opened with `key`.
///
/// # Errors
///
/// - `MissingKey` if the frame is encrypted and `key` is `None`
/// - `Crypto` if the sealed payload does not authenticate under `key`
pub fn open_frame(frame: &Frame, key: Option<&TopicKey>) -> Result<Bytes, InboxError> {
    match frame.header.msg_type() {
        MsgType::PlainData => Ok(frame.payload.clone()),
        MsgType::EncryptedData => {
            let key = key.ok_or(InboxError::MissingKey(frame.header.publisher_id()))?;
            Ok(Bytes::from(decrypt_message(key, &frame.payload)?))
        },
    }
}

#[cfg(test)]
mod tests {
    use sealcast_crypto::{MessageEncoder, SymmetricEncoder};

    use super::*;

    #[test]
    fn plain_frames_pass_through() {
        let frame = Frame::tagged(MsgType::PlainData, PublisherId::new(1), &b"hello"[..]).unwrap();

        assert_eq!(open_frame(&frame, None).unwrap().as_ref(), b"hello");
    }

    #[test]
    fn encrypted_frames_are_opened() {
        let encoder = SymmetricEncoder::new().unwrap();
        let sealed = encoder.encrypt(b"hello", 0, 5).unwrap();
        let frame = Frame::tagged(MsgType::EncryptedData, PublisherId::new(1), sealed).unwrap();

        assert_eq!(open_frame(&frame, Some(encoder.key())).unwrap().as_ref(), b"hello");
    }

    #[test]
    fn encrypted_frame_without_key_is_rejected() {
        let frame =
            Frame::tagged(MsgType::EncryptedData, PublisherId::new(3), vec![0u8; 64]).unwrap();

        assert!(matches!(
            open_frame(&frame, None),
            Err(InboxError::MissingKey(id)) if id == PublisherId::new(3)
        ));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let encoder = SymmetricEncoder::new().unwrap();
        let sealed = encoder.encrypt(b"hello", 0, 5).unwrap();
        let frame = Frame::tagged(MsgType::EncryptedData, PublisherId::new(1), sealed).unwrap();
        let other = TopicKey::from_bytes([9; TopicKey::SIZE]);

        assert!(matches!(open_frame(&frame, Some(&other)), Err(InboxError::Crypto(_))));
    }
}
