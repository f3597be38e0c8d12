//! Deterministic test harness for Sealcast publishers.
//!
//! Test doubles for the seams a publisher is built on:
//!
//! - [`RecordingTransport`] captures every offer and answers with a scripted
//!   [`PublishOutcome`](sealcast_proto::PublishOutcome)
//! - [`SeededEntropy`] replays the same key and nonce stream for a given seed;
//!   [`FailingEntropy`] simulates an unavailable RNG
//! - [`ChaoticEncoder`] and [`ChaoticTransport`] inject failures at a
//!   configured rate from a seeded generator, so chaos runs are reproducible
//!
//! Everything here is `Send + Sync` and can be shared across publishing
//! threads.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod chaotic;
pub mod entropy;
pub mod recording;

pub use chaotic::{ChaoticEncoder, ChaoticTransport};
pub use entropy::{FailingEntropy, SeededEntropy};
pub use recording::{Offer, RecordingTransport};
