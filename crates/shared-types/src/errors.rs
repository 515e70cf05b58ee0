//! # Error Types
//!
//! Defines error types shared across subsystems.

use crate::entities::MessageId;
use thiserror::Error;

/// Errors raised by the data model itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A flag transition would break a metadata invariant.
    #[error("Invariant violation for message {message_id}: {reason}")]
    InvariantViolation {
        message_id: MessageId,
        reason: &'static str,
    },
}
