//! # Pending Solidification Requests
//!
//! Index from an awaited parent to the children blocked on it. Whoever
//! resolves the parent (it turns solid or invalid) drains its entry and
//! re-evaluates the children.
//!
//! This type holds no lock; the service wraps it in a mutex and never holds
//! that mutex while calling out.

use shared_types::MessageId;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct PendingRequests {
    /// parent → children waiting on it
    waiting: HashMap<MessageId, HashSet<MessageId>>,
    /// Parents found absent from storage and already reported.
    missing: HashSet<MessageId>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `child` as blocked on `parent`. Returns `true` if new.
    pub fn register(&mut self, parent: MessageId, child: MessageId) -> bool {
        self.waiting.entry(parent).or_default().insert(child)
    }

    pub fn unregister(&mut self, parent: &MessageId, child: &MessageId) {
        if let Some(children) = self.waiting.get_mut(parent) {
            children.remove(child);
            if children.is_empty() {
                self.waiting.remove(parent);
            }
        }
    }

    /// Remove and return every child blocked on `parent`.
    pub fn take(&mut self, parent: &MessageId) -> Vec<MessageId> {
        self.waiting
            .remove(parent)
            .map(|children| children.into_iter().collect())
            .unwrap_or_default()
    }

    /// Record `id` as missing. Returns `true` the first time only.
    pub fn mark_missing(&mut self, id: MessageId) -> bool {
        self.missing.insert(id)
    }

    pub fn clear_missing(&mut self, id: &MessageId) -> bool {
        self.missing.remove(id)
    }

    pub fn missing(&self) -> impl Iterator<Item = &MessageId> {
        self.missing.iter()
    }

    /// Number of (parent, child) pairs.
    pub fn request_count(&self) -> usize {
        self.waiting.values().map(HashSet::len).sum()
    }

    /// Number of distinct parents being awaited.
    pub fn awaited_count(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_waiting(&self, child: &MessageId) -> bool {
        self.waiting.values().any(|children| children.contains(child))
    }
}
