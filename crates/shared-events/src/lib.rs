//! # Shared Events - Typed Observer Registries
//!
//! Every subsystem owns the events it emits. There is no global dispatcher:
//! a consumer subscribes directly on the producer's `Event<T>`.
//!
//! ```text
//! ┌──────────────┐   attach(handler)   ┌──────────────┐
//! │  Consumer    │ ──────────────────→ │  Producer    │
//! │              │                     │  Event<T>    │
//! │  handler(&T) │ ←────────────────── │  trigger(&T) │
//! └──────────────┘   synchronous call  └──────────────┘
//! ```
//!
//! ## Delivery Rules
//!
//! - `trigger` is synchronous: it returns once every handler has run.
//! - The subscriber list is snapshotted before invocation, so handlers may
//!   attach, detach or re-trigger without deadlocking.
//! - No lock of the registry is held while a handler runs.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod event;

pub use event::{Event, Handler, SubscriptionId};
