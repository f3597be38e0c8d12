//! Fuzz target for the publish pipeline
//!
//! Drives a publisher with arbitrary operation sequences against a recording
//! transport with scripted outcomes and a chaotic encoder.
//!
//! # Invariants
//!
//! - Secure publishers never offer plaintext-tagged messages
//! - Every offered sealed payload opens under the session key
//! - Out-of-range sends fail with a recoverable error and never reach the
//!   transport
//! - Nothing reaches the transport after close

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sealcast_crypto::{decrypt_message, MessageEncoder, SymmetricEncoder};
use sealcast_harness::{ChaoticEncoder, RecordingTransport, SeededEntropy};
use sealcast_proto::{MsgType, PublishOutcome, PublisherId};
use sealcast_publisher::{PublisherError, SecurityConfig, TopicPublisher};

#[derive(Debug, Arbitrary)]
enum Operation {
    Send { buffer: Vec<u8>, offset: usize, length: usize },
    ScriptOutcome(u8),
    Close,
}

#[derive(Debug, Arbitrary)]
struct PipelineScenario {
    seed: u64,
    failure_percent: u8,
    operations: Vec<Operation>,
}

fuzz_target!(|scenario: PipelineScenario| {
    let encoder = SymmetricEncoder::with_entropy(SeededEntropy::new(scenario.seed))
        .expect("seeded entropy never fails");
    let rate = f64::from(scenario.failure_percent % 101) / 100.0;
    let encoder = ChaoticEncoder::with_seed(encoder, rate, scenario.seed);
    let key = encoder.key().clone();

    let transport = Arc::new(RecordingTransport::new());
    let publisher = TopicPublisher::with_encoder(
        PublisherId::new(1),
        "fuzz",
        SecurityConfig::new("fuzz"),
        encoder,
        Arc::clone(&transport),
    )
    .expect("topic is non-empty");

    let mut closed = false;
    for op in scenario.operations {
        match op {
            Operation::Send { buffer, offset, length } => {
                let before = transport.offer_count();
                match publisher.send(&buffer, offset, length) {
                    Ok(PublishOutcome::UnexpectedError) => {
                        // Encryption failures never reach the transport; scripted ones do
                        assert!(transport.offer_count() <= before + 1);
                    },
                    Ok(_) => assert_eq!(transport.offer_count(), before + 1),
                    Err(e @ PublisherError::InvalidArgument { .. }) => {
                        assert!(e.is_recoverable());
                        assert_eq!(transport.offer_count(), before);
                    },
                    Err(PublisherError::Closed { .. }) => assert!(closed),
                    Err(e) => panic!("unexpected send error: {e}"),
                }
            },
            Operation::ScriptOutcome(raw) => transport.set_outcome(match raw % 3 {
                0 => PublishOutcome::Success,
                1 => PublishOutcome::NotSent,
                _ => PublishOutcome::UnexpectedError,
            }),
            Operation::Close => {
                let _ = publisher.close();
                closed = true;
            },
        }
    }

    for offer in transport.offers() {
        assert_eq!(offer.msg_type, MsgType::EncryptedData);
        assert!(decrypt_message(&key, &offer.payload).is_ok());
    }
});
