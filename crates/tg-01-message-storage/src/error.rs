//! Error types for the Message Storage subsystem

use shared_types::MessageId;
use thiserror::Error;

/// Message storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No message with this id is stored locally
    #[error("Message not found: {message_id}")]
    MessageNotFound { message_id: MessageId },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
