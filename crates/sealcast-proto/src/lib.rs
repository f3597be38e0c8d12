//! Sealcast wire protocol.
//!
//! Shared vocabulary between publishers, transports and receivers:
//!
//! - [`MsgType`]: the tag that tells a receiver whether a payload is plaintext
//!   or a sealed (encrypted) payload. Receivers pick a decode path from this
//!   tag alone.
//! - [`PublisherId`]: the 128-bit identity carried by every frame.
//! - [`PublishOutcome`]: the closed set of results a transport offer can have.
//! - [`FrameHeader`] and [`Frame`]: the raw binary framing used on the wire.
//!
//! ```text
//! ┌──────────────────────────── FrameHeader (28 bytes) ───────────────────────────┐
//! │ magic (4) │ version (1) │ flags (1) │ msg_type (2) │ publisher_id (16) │ size (4) │
//! └────────────────────────────────────────────────────────────────────────────────┘
//!   followed by `size` payload bytes
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod frame;
pub mod header;
pub mod id;
pub mod msg_type;
pub mod outcome;
pub mod view;

pub use errors::{ProtocolError, Result};
pub use frame::Frame;
pub use header::FrameHeader;
pub use id::PublisherId;
pub use msg_type::MsgType;
pub use outcome::PublishOutcome;
pub use view::message_range;
