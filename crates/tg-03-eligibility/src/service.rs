//! Eligibility Manager - Core business logic
//!
//! Driven by two triggers:
//!
//! - `MessageSolid` from the solidifier, checking the message once
//! - Inclusion state changes from the UTXO DAG, re-checking every message
//!   that was waiting on the changed transaction

use crate::domain::{ledger_dependencies, EligibilityConfig, PendingDependencies};
use crate::error::{EligibilityError, EligibilityResult};
use crate::events::EligibilityEvents;
use crate::ports::outbound::{InclusionStateChange, LedgerStateError, UtxoDag};
use parking_lot::Mutex;
use shared_types::{InclusionState, Message, MessageId, TransactionId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tg_01_message_storage::{CachedMetadata, MessageStorage};
use tg_02_solidifier::Solidifier;
use tracing::{debug, error, info, trace, warn};

/// Eligibility manager, generic over the ledger state oracle.
pub struct EligibilityManager<U: UtxoDag + 'static> {
    storage: Arc<MessageStorage>,
    solidifier: Arc<Solidifier>,
    utxo_dag: Arc<U>,
    config: EligibilityConfig,
    pending: Mutex<PendingDependencies>,
    events: EligibilityEvents,
    attached: AtomicBool,
}

impl<U: UtxoDag + 'static> EligibilityManager<U> {
    pub fn new(
        storage: Arc<MessageStorage>,
        solidifier: Arc<Solidifier>,
        utxo_dag: Arc<U>,
        config: EligibilityConfig,
    ) -> Self {
        Self {
            storage,
            solidifier,
            utxo_dag,
            config,
            pending: Mutex::new(PendingDependencies::new()),
            events: EligibilityEvents::new(),
            attached: AtomicBool::new(false),
        }
    }

    /// Subscribe to `MessageSolid` and to inclusion state changes.
    ///
    /// Must run once before any eligibility transition can happen. Returns
    /// `false` if already set up.
    pub fn setup(self: &Arc<Self>) -> bool {
        if self.attached.swap(true, Ordering::SeqCst) {
            return false;
        }

        let manager: Weak<Self> = Arc::downgrade(self);
        self.solidifier.events().message_solid.attach(move |message| {
            if let Some(manager) = manager.upgrade() {
                manager.check_and_log(&message.id());
            }
        });

        let manager: Weak<Self> = Arc::downgrade(self);
        self.utxo_dag
            .inclusion_state_changed()
            .attach(move |change| {
                if let Some(manager) = manager.upgrade() {
                    manager.on_inclusion_state_changed(change);
                }
            });

        info!(
            scope = %self.config.dependency_scope,
            "[tg-03] Eligibility manager attached"
        );
        true
    }

    pub fn events(&self) -> &EligibilityEvents {
        &self.events
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn utxo_dag(&self) -> &Arc<U> {
        &self.utxo_dag
    }

    /// Evaluate `message_id` and mark it eligible if every ledger dependency
    /// has left Pending.
    ///
    /// A pending dependency or an unreachable ledger defers the message and
    /// returns `Ok`. Only an absent message or a malformed payload fails.
    pub fn check_eligibility(&self, message_id: &MessageId) -> EligibilityResult<()> {
        let (message, metadata) = self.storage.message_with_metadata(message_id).ok_or(
            EligibilityError::MessageNotFound {
                message_id: *message_id,
            },
        )?;

        let (solid, eligible) = metadata.read(|meta| (meta.is_solid(), meta.is_eligible()));
        if eligible {
            return Ok(());
        }
        if !solid {
            trace!(message_id = %message_id, "Not solid yet, deferring eligibility");
            return Ok(());
        }

        let dependencies = ledger_dependencies(message.payload(), self.config.dependency_scope)
            .map_err(|reason| EligibilityError::MalformedPayload {
                message_id: *message_id,
                reason,
            })?;

        if !self.dependencies_resolved(message_id, &dependencies) {
            debug!(
                message_id = %message_id,
                dependencies = dependencies.len(),
                "Eligibility deferred"
            );
            return Ok(());
        }

        self.mark_eligible(&message, metadata)
    }

    pub fn is_eligible(&self, message_id: &MessageId) -> bool {
        self.storage
            .message_metadata(message_id)
            .is_some_and(|meta| meta.read(|m| m.is_eligible()))
    }

    /// Re-check every message waiting on a transaction.
    ///
    /// Recovers messages whose dependency resolved while the ledger was
    /// unreachable, since no further change notification will arrive for it.
    /// Returns the number of messages that became eligible.
    pub fn recheck_pending(&self) -> usize {
        let waiting = self.pending.lock().waiting_messages();
        if waiting.is_empty() {
            return 0;
        }

        let released = waiting
            .iter()
            .filter(|message_id| {
                self.check_and_log(message_id);
                self.is_eligible(message_id)
            })
            .count();
        debug!(waiting = waiting.len(), released, "Re-checked pending messages");
        released
    }

    /// Number of transactions messages are waiting on.
    pub fn pending_dependencies(&self) -> usize {
        self.pending.lock().transaction_count()
    }

    pub fn is_waiting(&self, message_id: &MessageId) -> bool {
        self.pending.lock().is_waiting(message_id)
    }

    /// Registers on every dependency first, then queries each one. A
    /// dependency found resolved is unregistered again.
    fn dependencies_resolved(
        &self,
        message_id: &MessageId,
        dependencies: &[TransactionId],
    ) -> bool {
        {
            let mut pending = self.pending.lock();
            for transaction_id in dependencies {
                pending.register(*transaction_id, *message_id);
            }
        }

        let mut resolved = true;
        for transaction_id in dependencies {
            match self.inclusion_state(transaction_id) {
                Ok(state) if state.is_resolved() => {
                    self.pending.lock().unregister(transaction_id, message_id);
                }
                Ok(_) => resolved = false,
                Err(source) => {
                    let err = EligibilityError::InclusionStateUnavailable {
                        transaction_id: *transaction_id,
                        source,
                    };
                    warn!(message_id = %message_id, error = %err, "Will retry eligibility");
                    resolved = false;
                }
            }
        }
        resolved
    }

    fn inclusion_state(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<InclusionState, LedgerStateError> {
        if transaction_id.is_genesis() {
            return Ok(InclusionState::Confirmed);
        }
        self.utxo_dag.inclusion_state(transaction_id)
    }

    fn mark_eligible(
        &self,
        message: &Arc<Message>,
        metadata: CachedMetadata,
    ) -> EligibilityResult<()> {
        let now = self.storage.time_source().now();
        match metadata.consume(|meta| meta.set_eligible(now)) {
            Ok(true) => {
                debug!(message_id = %message.id(), "Message eligible");
                self.events.message_eligible.trigger(message);
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(err) => {
                let err = EligibilityError::from(err);
                error!(message_id = %message.id(), error = %err, "Dropping eligibility");
                Err(err)
            }
        }
    }

    fn on_inclusion_state_changed(&self, change: &InclusionStateChange) {
        if !change.current.is_resolved() {
            return;
        }
        let waiting = self.pending.lock().take(&change.transaction_id);
        if waiting.is_empty() {
            return;
        }

        debug!(
            tx_id = %change.transaction_id,
            state = %change.current,
            waiting = waiting.len(),
            "Re-checking messages after inclusion state change"
        );
        for message_id in waiting {
            self.check_and_log(&message_id);
        }
    }

    fn check_and_log(&self, message_id: &MessageId) {
        if let Err(err) = self.check_eligibility(message_id) {
            if err.is_retryable() {
                warn!(message_id = %message_id, error = %err, "Eligibility check failed");
            } else {
                error!(message_id = %message_id, error = %err, "Eligibility check failed");
            }
        }
    }
}
