//! # Solidifier (tg-02)
//!
//! Marks a message **solid** once every strong and weak parent is stored
//! and solid itself, i.e. once its whole past cone is available locally.
//!
//! ## Flow
//!
//! ```text
//! MessageStored ──→ solidify(id)
//!                      │
//!                      ├─ parent missing  ──→ register on parent, MessageMissing
//!                      ├─ parent unsolid  ──→ register on parent
//!                      ├─ parent invalid / too old ──→ invalid, MessageInvalid
//!                      └─ all parents solid ──→ solid, MessageSolid
//!                                                 │
//!                      children waiting on id ←───┘ (work queue)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Solid Past Cone | `solid` implies every parent is stored and solid |
//! | 2 | Single Transition | solid and invalid are each set at most once |
//! | 3 | Exclusive Outcome | a message is never both solid and invalid |
//! | 4 | No Lost Wakeup | a child registers before re-reading its parent |
//!
//! Waiting never blocks a thread: the call returns and work resumes when
//! the awaited parent resolves.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod error;
pub mod events;
pub mod service;

pub use domain::{ParentAgeViolation, SolidifierConfig};
pub use error::{SolidifierError, SolidifierResult};
pub use events::SolidifierEvents;
pub use service::Solidifier;
