//! Sealcast topic publishers.
//!
//! A [`TopicPublisher`] is bound to one topic and owns one
//! [`TransportSender`]. Callers always go through [`TopicPublisher::send`];
//! how the bytes reach the wire is decided by the [`SendStrategy`] fixed at
//! construction:
//!
//! ```text
//! application
//!     │ send(buffer, offset, length)
//!     ▼
//! TopicPublisher ── range check, lifecycle check, lock
//!     │
//!     ├── Plain  ──────────────────────────► offer(PlainData, id, range)
//!     │
//!     └── Secure ── encoder.encrypt(range) ─► offer(EncryptedData, id, sealed)
//!                        │ error
//!                        ▼
//!                  PublishOutcome::UnexpectedError (logged, transport untouched)
//! ```
//!
//! # Invariants
//!
//! - Security mode is chosen once; a plain publisher never touches an encoder
//!   and a secure publisher never sends plaintext, even when encryption fails
//! - Faults below the publisher come back as [`PublishOutcome`] values;
//!   [`PublisherError`] is reserved for caller bugs and lifecycle misuse
//! - Messages reach the transport in the order their `send` calls took the
//!   publisher's lock

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod publisher;
pub mod strategy;
pub mod transport;

pub use config::{PublisherConfig, SecurityConfig};
pub use error::PublisherError;
pub use publisher::{LifecycleState, PublisherIdentity, TopicPublisher};
pub use sealcast_proto::{MsgType, PublishOutcome, PublisherId};
pub use strategy::{PlainStrategy, SecureStrategy, SendStrategy};
pub use transport::TransportSender;
