//! # Attachment Index
//!
//! Many-to-many relation between transactions and the messages that carry
//! them. Only the forward direction (transaction → messages) is indexed; the
//! reverse is recoverable from the message payload.

use shared_types::{Attachment, MessageId, TransactionId};
use std::collections::{BTreeSet, HashMap};

/// Pure in-memory attachment relation. Locking is the caller's concern.
#[derive(Debug, Default)]
pub struct AttachmentIndex {
    by_transaction: HashMap<TransactionId, BTreeSet<MessageId>>,
    len: usize,
}

impl AttachmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only the first time the pair is inserted.
    pub fn insert(&mut self, attachment: Attachment) -> bool {
        let inserted = self
            .by_transaction
            .entry(attachment.transaction_id)
            .or_default()
            .insert(attachment.message_id);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Messages carrying `transaction_id`, in id order.
    pub fn messages(&self, transaction_id: &TransactionId) -> Vec<MessageId> {
        self.by_transaction
            .get(transaction_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, attachment: &Attachment) -> bool {
        self.by_transaction
            .get(&attachment.transaction_id)
            .is_some_and(|set| set.contains(&attachment.message_id))
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
