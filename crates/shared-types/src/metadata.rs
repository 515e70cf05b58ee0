//! Mutable per-message state.

use serde::{Deserialize, Serialize};

use crate::entities::MessageId;
use crate::errors::ModelError;
use crate::time::Timestamp;

/// Metadata tracked for every stored message.
///
/// Flags are monotonic. Setters return `Ok(true)` only on the transition
/// that actually flipped the flag, so exactly one caller observes it.
///
/// | Flag     | Requires        | Excludes |
/// |----------|-----------------|----------|
/// | solid    | not invalid     | invalid  |
/// | eligible | solid           |          |
/// | invalid  | not solid       | solid    |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    message_id: MessageId,
    received_time: Timestamp,
    solid: bool,
    solidification_time: Option<Timestamp>,
    eligible: bool,
    eligibility_time: Option<Timestamp>,
    invalid: bool,
}

impl MessageMetadata {
    pub fn new(message_id: MessageId, received_time: Timestamp) -> Self {
        Self {
            message_id,
            received_time,
            solid: false,
            solidification_time: None,
            eligible: false,
            eligibility_time: None,
            invalid: false,
        }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn received_time(&self) -> Timestamp {
        self.received_time
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    pub fn solidification_time(&self) -> Option<Timestamp> {
        self.solidification_time
    }

    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    pub fn eligibility_time(&self) -> Option<Timestamp> {
        self.eligibility_time
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Marks the message solid.
    pub fn set_solid(&mut self, now: Timestamp) -> Result<bool, ModelError> {
        if self.solid {
            return Ok(false);
        }
        if self.invalid {
            return Err(self.violation("invalid message cannot become solid"));
        }
        self.solid = true;
        self.solidification_time = Some(now);
        Ok(true)
    }

    /// Marks the message eligible. The message must already be solid.
    pub fn set_eligible(&mut self, now: Timestamp) -> Result<bool, ModelError> {
        if self.eligible {
            return Ok(false);
        }
        if !self.solid {
            return Err(self.violation("eligible requires solid"));
        }
        self.eligible = true;
        self.eligibility_time = Some(now);
        Ok(true)
    }

    /// Marks the message invalid. A solid message can never become invalid.
    pub fn set_invalid(&mut self) -> Result<bool, ModelError> {
        if self.invalid {
            return Ok(false);
        }
        if self.solid {
            return Err(self.violation("solid message cannot become invalid"));
        }
        self.invalid = true;
        Ok(true)
    }

    fn violation(&self, reason: &'static str) -> ModelError {
        ModelError::InvariantViolation {
            message_id: self.message_id,
            reason,
        }
    }
}
