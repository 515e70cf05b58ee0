//! # Domain Layer
//!
//! - `cached` - Metadata handle with closure-scoped exclusive access
//! - `attachments` - Transaction ↔ message relation

pub mod attachments;
pub mod cached;
