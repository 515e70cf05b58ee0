//! # Message Storage Service
//!
//! In-memory implementation of the storage layer.

use crate::domain::attachments::AttachmentIndex;
use crate::domain::cached::CachedMetadata;
use crate::error::{StorageError, StorageResult};
use crate::events::StorageEvents;
use parking_lot::{Mutex, RwLock};
use shared_types::{
    Attachment, Message, MessageId, MessageMetadata, SystemTimeSource, TimeSource, TransactionId,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// A stored message together with its metadata record.
struct StoredObject {
    message: Arc<Message>,
    metadata: Arc<Mutex<MessageMetadata>>,
}

/// Content-addressed message store.
pub struct MessageStorage {
    objects: RwLock<HashMap<MessageId, StoredObject>>,
    attachments: RwLock<AttachmentIndex>,
    time_source: Arc<dyn TimeSource>,
    events: StorageEvents,
}

impl MessageStorage {
    /// Create an empty storage that stamps records with the system clock.
    pub fn new() -> Self {
        Self::with_time_source(Arc::new(SystemTimeSource))
    }

    pub fn with_time_source(time_source: Arc<dyn TimeSource>) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            attachments: RwLock::new(AttachmentIndex::new()),
            time_source,
            events: StorageEvents::new(),
        }
    }

    pub fn events(&self) -> &StorageEvents {
        &self.events
    }

    pub fn time_source(&self) -> &Arc<dyn TimeSource> {
        &self.time_source
    }

    /// Persist a message with fresh metadata.
    ///
    /// Returns the stored message and `true` on first store. A repeated call
    /// returns the existing record and `false` without triggering
    /// `MessageStored` again.
    pub fn store_message(&self, message: Message) -> (Arc<Message>, bool) {
        let message_id = message.id();
        let stored = {
            let mut objects = self.objects.write();
            if let Some(existing) = objects.get(&message_id) {
                trace!(message_id = %message_id, "Message already stored");
                return (Arc::clone(&existing.message), false);
            }

            let received_time = self.time_source.now();
            let stored = Arc::new(message);
            objects.insert(
                message_id,
                StoredObject {
                    message: Arc::clone(&stored),
                    metadata: Arc::new(Mutex::new(MessageMetadata::new(message_id, received_time))),
                },
            );
            stored
        };

        if let Some(transaction_id) = stored.payload().and_then(|p| p.transaction_id()) {
            self.store_attachment(transaction_id, message_id);
        }

        debug!(
            message_id = %message_id,
            parents = stored.parents().len(),
            "Message stored"
        );
        self.events.message_stored.trigger(&stored);

        (stored, true)
    }

    /// Handle to the metadata of `message_id`, or `None` if not stored.
    pub fn message_metadata(&self, message_id: &MessageId) -> Option<CachedMetadata> {
        self.objects
            .read()
            .get(message_id)
            .map(|obj| CachedMetadata::new(*message_id, Arc::clone(&obj.metadata)))
    }

    /// Copy of the metadata of `message_id`.
    pub fn metadata_snapshot(&self, message_id: &MessageId) -> StorageResult<MessageMetadata> {
        self.message_metadata(message_id)
            .map(|handle| handle.snapshot())
            .ok_or(StorageError::MessageNotFound {
                message_id: *message_id,
            })
    }

    pub fn message(&self, message_id: &MessageId) -> Option<Arc<Message>> {
        self.objects
            .read()
            .get(message_id)
            .map(|obj| Arc::clone(&obj.message))
    }

    /// Message and metadata handle in one lookup.
    pub fn message_with_metadata(
        &self,
        message_id: &MessageId,
    ) -> Option<(Arc<Message>, CachedMetadata)> {
        self.objects.read().get(message_id).map(|obj| {
            (
                Arc::clone(&obj.message),
                CachedMetadata::new(*message_id, Arc::clone(&obj.metadata)),
            )
        })
    }

    pub fn contains_message(&self, message_id: &MessageId) -> bool {
        self.objects.read().contains_key(message_id)
    }

    /// Register that `message_id` carries `transaction_id`.
    ///
    /// Returns `true` only on the first registration of the pair.
    pub fn store_attachment(&self, transaction_id: TransactionId, message_id: MessageId) -> bool {
        let stored = self
            .attachments
            .write()
            .insert(Attachment::new(transaction_id, message_id));
        if stored {
            trace!(tx_id = %transaction_id, message_id = %message_id, "Attachment stored");
        }
        stored
    }

    /// Messages carrying `transaction_id`.
    pub fn attachments(&self, transaction_id: &TransactionId) -> Vec<MessageId> {
        self.attachments.read().messages(transaction_id)
    }

    pub fn message_count(&self) -> usize {
        self.objects.read().len()
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.read().len()
    }
}

impl Default for MessageStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MessageStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStorage")
            .field("messages", &self.message_count())
            .field("attachments", &self.attachment_count())
            .finish()
    }
}
