//! In-process transport for Sealcast publishers.
//!
//! [`ChannelTransport`] implements the publisher's
//! [`TransportSender`](sealcast_publisher::TransportSender) contract on top of
//! a bounded Tokio channel: each offer becomes one [`Frame`] and a full
//! channel surfaces as back-pressure. [`open_frame`] is the matching receive
//! step and picks its decode path from the frame's message type alone.
//!
//! Useful for wiring publishers and subscribers inside one process, and as a
//! reference for how a network transport maps its failures onto
//! [`PublishOutcome`](sealcast_proto::PublishOutcome).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod channel;
pub mod inbox;

pub use channel::{ChannelTransport, channel};
pub use inbox::{InboxError, open_frame};
pub use sealcast_proto::Frame;
