//! Events emitted by the storage layer.

use shared_events::Event;
use shared_types::Message;
use std::sync::Arc;

/// Observer registries owned by [`crate::MessageStorage`].
#[derive(Debug)]
pub struct StorageEvents {
    /// Fired once per message id, after the message and its metadata are
    /// visible to readers.
    pub message_stored: Event<Arc<Message>>,
}

impl StorageEvents {
    pub fn new() -> Self {
        Self {
            message_stored: Event::new("MessageStored"),
        }
    }
}

impl Default for StorageEvents {
    fn default() -> Self {
        Self::new()
    }
}
