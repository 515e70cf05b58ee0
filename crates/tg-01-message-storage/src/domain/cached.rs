//! # Cached Metadata Handle
//!
//! A reference-counted handle to one record in the metadata arena.

use parking_lot::Mutex;
use shared_types::{MessageId, MessageMetadata};
use std::sync::Arc;

/// Handle to the metadata of a single message.
///
/// Cloning the handle is cheap; every clone points at the same record.
/// `consume` takes the record's lock for the duration of the closure, so no
/// two callers observe or mutate the same record concurrently.
#[derive(Clone, Debug)]
pub struct CachedMetadata {
    message_id: MessageId,
    record: Arc<Mutex<MessageMetadata>>,
}

impl CachedMetadata {
    pub(crate) fn new(message_id: MessageId, record: Arc<Mutex<MessageMetadata>>) -> Self {
        Self { message_id, record }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Run `f` with exclusive access to the record, then release the handle.
    pub fn consume<R>(self, f: impl FnOnce(&mut MessageMetadata) -> R) -> R {
        let mut guard = self.record.lock();
        f(&mut guard)
    }

    /// Run `f` with exclusive read access, keeping the handle.
    pub fn read<R>(&self, f: impl FnOnce(&MessageMetadata) -> R) -> R {
        let guard = self.record.lock();
        f(&guard)
    }

    /// Copy of the current record.
    pub fn snapshot(&self) -> MessageMetadata {
        self.record.lock().clone()
    }
}
