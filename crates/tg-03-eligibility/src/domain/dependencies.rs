//! # Ledger Dependencies
//!
//! Turns a payload into the set of transactions its message waits for, and
//! indexes messages by the transactions they wait on.

use super::config::DependencyScope;
use shared_types::{MessageId, Payload, TransactionId};
use std::collections::{HashMap, HashSet};

/// Transactions that must leave Pending before the message is eligible.
///
/// The genesis transaction is always settled and never listed. Returns the
/// structural reason if the carried transaction is malformed.
pub fn ledger_dependencies(
    payload: Option<&Payload>,
    scope: DependencyScope,
) -> Result<Vec<TransactionId>, &'static str> {
    let Some(payload) = payload.filter(|p| p.has_ledger_dependency()) else {
        return Ok(Vec::new());
    };
    let Some(transaction) = payload.transaction() else {
        return Ok(Vec::new());
    };
    transaction.check_structure()?;

    let mut dependencies = vec![transaction.id()];
    if scope == DependencyScope::PayloadAndInputs {
        dependencies.extend(transaction.input_transaction_ids());
    }
    dependencies.retain(|id| !id.is_genesis());
    dependencies.sort();
    dependencies.dedup();
    Ok(dependencies)
}

/// transaction → messages waiting on it
#[derive(Debug, Default)]
pub struct PendingDependencies {
    waiting: HashMap<TransactionId, HashSet<MessageId>>,
}

impl PendingDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, transaction_id: TransactionId, message_id: MessageId) -> bool {
        self.waiting
            .entry(transaction_id)
            .or_default()
            .insert(message_id)
    }

    pub fn unregister(&mut self, transaction_id: &TransactionId, message_id: &MessageId) {
        if let Some(messages) = self.waiting.get_mut(transaction_id) {
            messages.remove(message_id);
            if messages.is_empty() {
                self.waiting.remove(transaction_id);
            }
        }
    }

    /// Remove and return every message waiting on `transaction_id`.
    pub fn take(&mut self, transaction_id: &TransactionId) -> Vec<MessageId> {
        self.waiting
            .remove(transaction_id)
            .map(|messages| messages.into_iter().collect())
            .unwrap_or_default()
    }

    /// Distinct messages waiting on any transaction.
    pub fn waiting_messages(&self) -> Vec<MessageId> {
        let all: HashSet<MessageId> = self.waiting.values().flatten().copied().collect();
        all.into_iter().collect()
    }

    /// Number of transactions being waited on.
    pub fn transaction_count(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_waiting(&self, message_id: &MessageId) -> bool {
        self.waiting.values().any(|messages| messages.contains(message_id))
    }
}
