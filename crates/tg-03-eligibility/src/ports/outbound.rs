//! Driven Ports (SPI - Outbound Dependencies)
//!
//! The ledger state oracle consulted for transaction settlement.

use shared_events::Event;
use shared_types::{InclusionState, TransactionId};
use thiserror::Error;

/// A transaction's inclusion state changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InclusionStateChange {
    pub transaction_id: TransactionId,
    pub previous: InclusionState,
    pub current: InclusionState,
}

/// Failures reaching the ledger state. All of them are transient from the
/// eligibility manager's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerStateError {
    /// The ledger could not be queried right now
    #[error("Ledger state unavailable: {reason}")]
    Unavailable { reason: String },

    /// The transaction is not booked yet
    #[error("Transaction not booked: {transaction_id}")]
    TransactionNotFound { transaction_id: TransactionId },
}

/// UTXO DAG interface.
///
/// Implementations must trigger `inclusion_state_changed` only after the new
/// state is visible through `inclusion_state`, and must not hold internal
/// locks while triggering it.
pub trait UtxoDag: Send + Sync {
    /// Current inclusion state of `transaction_id`.
    fn inclusion_state(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<InclusionState, LedgerStateError>;

    /// Registry notified on every inclusion state change.
    fn inclusion_state_changed(&self) -> &Event<InclusionStateChange>;
}
