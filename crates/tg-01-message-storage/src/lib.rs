//! # Message Storage (tg-01)
//!
//! Content-addressed store for messages, their mutable metadata and the
//! transaction ↔ message attachment relation.
//!
//! ## Data Flow
//!
//! ```text
//! network / issuer ──store_message──→ ┌──────────────────┐
//!                                     │  MessageStorage  │ ──MessageStored──→ Solidifier
//!                                     │  messages        │
//!                                     │  metadata arena  │ ←──consume(fn)──── Solidifier
//!                                     │  attachments     │ ←──consume(fn)──── Eligibility
//!                                     └──────────────────┘
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Idempotent Store | Re-storing a message returns the existing record |
//! | 2 | Atomic Creation | A message and its metadata become visible together |
//! | 3 | Per-ID Exclusion | `consume` serializes all mutation of one record |
//! | 4 | Single Stored Event | `MessageStored` fires once per message id |
//!
//! ## Locking
//!
//! The arena lock is held only to look up or insert a record handle. Each
//! record has its own mutex, which `consume` takes for the duration of the
//! closure. No arena lock is held while a record is consumed.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod error;
pub mod events;
pub mod service;

pub use domain::attachments::AttachmentIndex;
pub use domain::cached::CachedMetadata;
pub use error::{StorageError, StorageResult};
pub use events::StorageEvents;
pub use service::MessageStorage;
