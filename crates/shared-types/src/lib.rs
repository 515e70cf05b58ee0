//! # Shared Types Crate
//!
//! This crate contains the Tangle data model used by every subsystem of the
//! node core.
//!
//! ## Design Principles
//!
//! - **Content Addressing**: `MessageId` and `TransactionId` are SHA-256 digests
//!   of the object content. Ids are derived at construction, never supplied.
//! - **Immutable Messages**: a `Message` never changes after creation. All
//!   mutable state lives in `MessageMetadata`.
//! - **Monotonic Flags**: metadata flags only ever transition `false → true`.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod entities;
pub mod errors;
pub mod metadata;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use metadata::MessageMetadata;
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource, Timestamp};
