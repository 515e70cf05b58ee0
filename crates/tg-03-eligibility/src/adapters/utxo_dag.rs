//! In-memory UTXO DAG adapter.
//!
//! Holds inclusion states set by hand. Used by tests and local runs in place
//! of a real ledger.

use crate::ports::outbound::{InclusionStateChange, LedgerStateError, UtxoDag};
use parking_lot::RwLock;
use shared_events::Event;
use shared_types::{InclusionState, Transaction, TransactionId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

pub struct InMemoryUtxoDag {
    states: RwLock<HashMap<TransactionId, InclusionState>>,
    unavailable: AtomicBool,
    changed: Event<InclusionStateChange>,
}

impl InMemoryUtxoDag {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
            changed: Event::new("InclusionStateChanged"),
        }
    }

    /// Book a transaction as Pending. Returns `false` if already booked.
    pub fn store_transaction(&self, transaction: &Transaction) -> bool {
        let mut states = self.states.write();
        if states.contains_key(&transaction.id()) {
            return false;
        }
        states.insert(transaction.id(), InclusionState::Pending);
        true
    }

    /// Set the inclusion state, booking the transaction if needed.
    ///
    /// Subscribers are notified after the write lock is released, and only
    /// if the state actually changed.
    pub fn set_inclusion_state(
        &self,
        transaction_id: TransactionId,
        state: InclusionState,
    ) -> bool {
        let previous = {
            let mut states = self.states.write();
            states
                .insert(transaction_id, state)
                .unwrap_or(InclusionState::Pending)
        };
        if previous == state {
            return false;
        }

        debug!(tx_id = %transaction_id, from = %previous, to = %state, "Inclusion state changed");
        self.changed.trigger(&InclusionStateChange {
            transaction_id,
            previous,
            current: state,
        });
        true
    }

    /// Make every query fail with `Unavailable` until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn transaction_count(&self) -> usize {
        self.states.read().len()
    }
}

impl Default for InMemoryUtxoDag {
    fn default() -> Self {
        Self::new()
    }
}

impl UtxoDag for InMemoryUtxoDag {
    fn inclusion_state(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<InclusionState, LedgerStateError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LedgerStateError::Unavailable {
                reason: "ledger offline".to_string(),
            });
        }
        self.states
            .read()
            .get(transaction_id)
            .copied()
            .ok_or(LedgerStateError::TransactionNotFound {
                transaction_id: *transaction_id,
            })
    }

    fn inclusion_state_changed(&self) -> &Event<InclusionStateChange> {
        &self.changed
    }
}
