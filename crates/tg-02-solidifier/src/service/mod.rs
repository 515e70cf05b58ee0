//! # Solidifier Service
//!
//! Evaluates messages against their parents and propagates resolutions to
//! the children waiting on them through an explicit work queue.

use crate::domain::{check_parent_age, ParentAgeViolation, PendingRequests, SolidifierConfig};
use crate::error::{SolidifierError, SolidifierResult};
use crate::events::SolidifierEvents;
use parking_lot::Mutex;
use shared_types::{Message, MessageId};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tg_01_message_storage::{CachedMetadata, MessageStorage};
use tracing::{debug, error, info, trace, warn};


/// Result of evaluating a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Evaluation {
    /// This call set the solid flag.
    Solid,
    /// This call set the invalid flag.
    Invalid,
    /// At least one parent is missing or unsolid.
    Waiting,
    /// The message was already solid or invalid.
    AlreadyResolved,
}

impl Evaluation {
    fn is_resolved(self) -> bool {
        !matches!(self, Evaluation::Waiting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentState {
    Solid,
    Invalid,
    Unsolid,
    Missing,
}

/// Solidifier service.
pub struct Solidifier {
    storage: Arc<MessageStorage>,
    config: SolidifierConfig,
    pending: Mutex<PendingRequests>,
    events: SolidifierEvents,
    attached: AtomicBool,
}

impl Solidifier {
    pub fn new(storage: Arc<MessageStorage>, config: SolidifierConfig) -> Self {
        Self {
            storage,
            config,
            pending: Mutex::new(PendingRequests::new()),
            events: SolidifierEvents::new(),
            attached: AtomicBool::new(false),
        }
    }

    /// Subscribe to `MessageStored` so every newly stored message is
    /// solidified. Returns `false` if already subscribed.
    pub fn setup(self: &Arc<Self>) -> bool {
        if self.attached.swap(true, Ordering::SeqCst) {
            return false;
        }

        let solidifier: Weak<Self> = Arc::downgrade(self);
        self.storage.events().message_stored.attach(move |message| {
            let Some(solidifier) = solidifier.upgrade() else {
                return;
            };
            if let Err(err) = solidifier.solidify(&message.id()) {
                warn!(message_id = %message.id(), error = %err, "Solidification failed");
            }
        });

        info!("[tg-02] Solidifier attached to storage");
        true
    }

    pub fn events(&self) -> &SolidifierEvents {
        &self.events
    }

    pub fn config(&self) -> &SolidifierConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<MessageStorage> {
        &self.storage
    }

    /// Try to solidify `message_id`, then every message that was waiting on
    /// something this call resolved.
    ///
    /// Only a failure on `message_id` itself is returned; failures further
    /// down the queue are logged.
    pub fn solidify(&self, message_id: &MessageId) -> SolidifierResult<()> {
        self.pending.lock().clear_missing(message_id);

        let mut queue = VecDeque::new();
        if self.evaluate(message_id)?.is_resolved() {
            queue.extend(self.pending.lock().take(message_id));
        }

        while let Some(child) = queue.pop_front() {
            match self.evaluate(&child) {
                Ok(outcome) if outcome.is_resolved() => {
                    queue.extend(self.pending.lock().take(&child));
                }
                Ok(_) => {}
                Err(err @ SolidifierError::InvariantViolation { .. }) => {
                    error!(message_id = %child, error = %err, "Dropping message");
                }
                Err(err) => {
                    warn!(
                        message_id = %child,
                        error = %err,
                        "Solidification of waiting child failed"
                    );
                }
            }
        }
        Ok(())
    }

    pub fn is_solid(&self, message_id: &MessageId) -> bool {
        self.storage
            .message_metadata(message_id)
            .is_some_and(|meta| meta.read(|m| m.is_solid()))
    }

    /// Parents referenced by stored messages but absent from storage.
    pub fn missing_messages(&self) -> Vec<MessageId> {
        let missing: Vec<MessageId> = self.pending.lock().missing().copied().collect();
        missing
            .into_iter()
            .filter(|id| !self.storage.contains_message(id))
            .collect()
    }

    /// Number of (awaited parent, blocked child) pairs.
    pub fn pending_request_count(&self) -> usize {
        self.pending.lock().request_count()
    }

    pub fn is_waiting(&self, message_id: &MessageId) -> bool {
        self.pending.lock().is_waiting(message_id)
    }

    fn evaluate(&self, message_id: &MessageId) -> SolidifierResult<Evaluation> {
        let (message, metadata) = self.storage.message_with_metadata(message_id).ok_or(
            SolidifierError::MessageNotFound {
                message_id: *message_id,
            },
        )?;

        if metadata.read(|meta| meta.is_solid() || meta.is_invalid()) {
            return Ok(Evaluation::AlreadyResolved);
        }

        let mut waiting = false;
        for parent in message.parents() {
            if parent.is_empty() {
                continue;
            }
            match self.await_parent(&parent, message_id) {
                ParentState::Solid => {}
                ParentState::Invalid => {
                    debug!(message_id = %message_id, parent = %parent, "Parent is invalid");
                    return self.mark_invalid(&message, metadata);
                }
                ParentState::Unsolid | ParentState::Missing => waiting = true,
            }
        }
        if waiting {
            trace!(message_id = %message_id, "Waiting for parents");
            return Ok(Evaluation::Waiting);
        }

        if let Some((parent, violation)) = self.parent_age_violation(&message) {
            debug!(
                message_id = %message_id,
                parent = %parent,
                reason = %violation,
                "Parent age check failed"
            );
            return self.mark_invalid(&message, metadata);
        }

        self.check_past_cone(&message)?;

        let now = self.storage.time_source().now();
        if metadata.consume(|meta| meta.set_solid(now))? {
            debug!(message_id = %message_id, "Message solid");
            self.events.message_solid.trigger(&message);
            Ok(Evaluation::Solid)
        } else {
            Ok(Evaluation::AlreadyResolved)
        }
    }

    /// Register `child` on `parent` unless the parent is already resolved.
    ///
    /// The parent is re-read after registering, so a parent that resolves
    /// concurrently is seen either here or by its own drain.
    fn await_parent(&self, parent: &MessageId, child: &MessageId) -> ParentState {
        let state = self.parent_state(parent);
        if matches!(state, ParentState::Solid | ParentState::Invalid) {
            return state;
        }

        self.pending.lock().register(*parent, *child);

        let state = self.parent_state(parent);
        match state {
            ParentState::Solid | ParentState::Invalid => {
                self.pending.lock().unregister(parent, child);
            }
            ParentState::Missing => self.report_missing(parent),
            ParentState::Unsolid => {}
        }
        state
    }

    fn parent_state(&self, parent: &MessageId) -> ParentState {
        match self.storage.message_metadata(parent) {
            None => ParentState::Missing,
            Some(meta) => meta.read(|m| {
                if m.is_solid() {
                    ParentState::Solid
                } else if m.is_invalid() {
                    ParentState::Invalid
                } else {
                    ParentState::Unsolid
                }
            }),
        }
    }

    fn report_missing(&self, parent: &MessageId) {
        if !self.pending.lock().mark_missing(*parent) {
            return;
        }
        if self.storage.contains_message(parent) {
            self.pending.lock().clear_missing(parent);
            return;
        }
        debug!(message_id = %parent, "Parent missing");
        self.events.message_missing.trigger(parent);
    }

    fn parent_age_violation(&self, message: &Message) -> Option<(MessageId, ParentAgeViolation)> {
        message
            .parents()
            .into_iter()
            .filter(|parent| !parent.is_empty())
            .find_map(|parent| {
                let parent_message = self.storage.message(&parent)?;
                check_parent_age(
                    message.issuing_time(),
                    parent_message.issuing_time(),
                    self.config.max_parent_age_ms,
                )
                .err()
                .map(|violation| (parent, violation))
            })
    }

    fn check_past_cone(&self, message: &Message) -> SolidifierResult<()> {
        let all_solid = message
            .parents()
            .iter()
            .filter(|parent| !parent.is_empty())
            .all(|parent| self.parent_state(parent) == ParentState::Solid);
        if all_solid {
            return Ok(());
        }
        let err = SolidifierError::InvariantViolation {
            message_id: message.id(),
            reason: "parent not solid at solidification",
        };
        error!(message_id = %message.id(), error = %err, "Past cone check failed");
        Err(err)
    }

    fn mark_invalid(
        &self,
        message: &Arc<Message>,
        metadata: CachedMetadata,
    ) -> SolidifierResult<Evaluation> {
        if metadata.consume(|meta| meta.set_invalid())? {
            info!(message_id = %message.id(), "Message invalid");
            self.events.message_invalid.trigger(message);
            Ok(Evaluation::Invalid)
        } else {
            Ok(Evaluation::AlreadyResolved)
        }
    }
}

impl std::fmt::Debug for Solidifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solidifier")
            .field("config", &self.config)
            .field("pending_requests", &self.pending_request_count())
            .finish()
    }
}
