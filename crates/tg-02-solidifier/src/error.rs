//! Error types for the Solidifier subsystem

use shared_types::{MessageId, ModelError};
use thiserror::Error;

/// Solidifier errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolidifierError {
    /// The message to solidify is not stored
    #[error("Message not found: {message_id}")]
    MessageNotFound { message_id: MessageId },

    /// A solid flag would be set while a parent is not solid
    #[error("Invariant violation for message {message_id}: {reason}")]
    InvariantViolation {
        message_id: MessageId,
        reason: &'static str,
    },
}

impl From<ModelError> for SolidifierError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvariantViolation { message_id, reason } => {
                Self::InvariantViolation { message_id, reason }
            }
        }
    }
}

/// Result type for solidifier operations
pub type SolidifierResult<T> = Result<T, SolidifierError>;
