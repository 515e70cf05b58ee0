//! Events emitted by the solidifier.

use shared_events::Event;
use shared_types::{Message, MessageId};
use std::sync::Arc;

/// Observer registries owned by [`crate::Solidifier`].
#[derive(Debug)]
pub struct SolidifierEvents {
    /// Fired once per message, after the solid flag is set.
    pub message_solid: Event<Arc<Message>>,
    /// Fired the first time a referenced parent is found absent.
    pub message_missing: Event<MessageId>,
    /// Fired once per message, after the invalid flag is set.
    pub message_invalid: Event<Arc<Message>>,
}

impl SolidifierEvents {
    pub fn new() -> Self {
        Self {
            message_solid: Event::new("MessageSolid"),
            message_missing: Event::new("MessageMissing"),
            message_invalid: Event::new("MessageInvalid"),
        }
    }
}

impl Default for SolidifierEvents {
    fn default() -> Self {
        Self::new()
    }
}
