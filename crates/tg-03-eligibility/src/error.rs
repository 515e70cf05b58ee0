//! Error types for the Eligibility subsystem

use crate::ports::outbound::LedgerStateError;
use shared_types::{MessageId, ModelError, TransactionId};
use thiserror::Error;

/// Eligibility errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityError {
    /// The message is not stored locally
    #[error("Message not found: {message_id}")]
    MessageNotFound { message_id: MessageId },

    /// The payload transaction fails structural checks
    #[error("Malformed payload in message {message_id}: {reason}")]
    MalformedPayload {
        message_id: MessageId,
        reason: &'static str,
    },

    /// The ledger could not report an inclusion state
    #[error("Inclusion state of {transaction_id} unavailable: {source}")]
    InclusionStateUnavailable {
        transaction_id: TransactionId,
        #[source]
        source: LedgerStateError,
    },

    /// Eligible would be set on a message that is not solid
    #[error("Invariant violation for message {message_id}: {reason}")]
    InvariantViolation {
        message_id: MessageId,
        reason: &'static str,
    },
}

impl EligibilityError {
    /// Whether a later trigger can succeed without outside intervention.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::MessageNotFound { .. } | Self::InclusionStateUnavailable { .. }
        )
    }
}

impl From<ModelError> for EligibilityError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvariantViolation { message_id, reason } => {
                Self::InvariantViolation { message_id, reason }
            }
        }
    }
}

/// Result type for eligibility operations
pub type EligibilityResult<T> = Result<T, EligibilityError>;
