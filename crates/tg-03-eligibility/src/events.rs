//! Events emitted by the eligibility manager.

use shared_events::Event;
use shared_types::Message;
use std::sync::Arc;

#[derive(Debug)]
pub struct EligibilityEvents {
    /// Fired once per message, after the eligible flag is set.
    pub message_eligible: Event<Arc<Message>>,
}

impl EligibilityEvents {
    pub fn new() -> Self {
        Self {
            message_eligible: Event::new("MessageEligible"),
        }
    }
}

impl Default for EligibilityEvents {
    fn default() -> Self {
        Self::new()
    }
}
