//! Fuzz target for Frame::decode
//!
//! Decodes arbitrary byte sequences as frames, looking for:
//! - Parser crashes or panics
//! - Length arithmetic that over-reads the input
//! - Headers with unknown message types that slip past validation
//!
//! Must never panic. Invalid input returns an error; valid input re-encodes to
//! the same bytes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sealcast_proto::Frame;

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = Frame::decode(data) else {
        return;
    };

    let mut encoded = Vec::with_capacity(frame.encoded_len());
    frame.encode(&mut encoded).expect("decoded frame must re-encode");
    assert_eq!(&encoded[..], &data[..encoded.len()]);
});
