//! # Tangle
//!
//! Owns the three subsystems and the wiring between them.
//!
//! ```text
//! store_message ──→ MessageStorage ──MessageStored──→ Solidifier
//!                                                         │
//!                                                    MessageSolid
//!                                                         ↓
//! UtxoDag ──InclusionStateChanged──────────────→ EligibilityManager ──→ MessageEligible
//! ```

use crate::config::TangleConfig;
use crate::error::{TangleError, TangleResult};
use parking_lot::RwLock;
use shared_events::Event;
use shared_types::{Message, MessageId, MessageMetadata, SystemTimeSource, TimeSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tg_01_message_storage::MessageStorage;
use tg_02_solidifier::Solidifier;
use tg_03_eligibility::{EligibilityManager, UtxoDag};
use tracing::info;

/// Point-in-time counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TangleStats {
    pub messages: usize,
    pub attachments: usize,
    pub pending_solidifications: usize,
    pub missing_messages: usize,
    pub pending_dependencies: usize,
}

/// A running solidification and eligibility core.
pub struct Tangle<U: UtxoDag + 'static> {
    config: TangleConfig,
    storage: Arc<MessageStorage>,
    solidifier: Arc<Solidifier>,
    eligibility: Arc<EligibilityManager<U>>,
    accepting: AtomicBool,
    /// Held shared by every store call, exclusively by `shutdown`.
    in_flight: RwLock<()>,
}

impl<U: UtxoDag + 'static> Tangle<U> {
    pub fn new(config: TangleConfig, utxo_dag: Arc<U>) -> TangleResult<Self> {
        Self::with_time_source(config, utxo_dag, Arc::new(SystemTimeSource))
    }

    pub fn with_time_source(
        config: TangleConfig,
        utxo_dag: Arc<U>,
        time_source: Arc<dyn TimeSource>,
    ) -> TangleResult<Self> {
        config.validate()?;

        let storage = Arc::new(MessageStorage::with_time_source(time_source));
        let solidifier = Arc::new(Solidifier::new(Arc::clone(&storage), config.solidifier));
        let eligibility = Arc::new(EligibilityManager::new(
            Arc::clone(&storage),
            Arc::clone(&solidifier),
            utxo_dag,
            config.eligibility,
        ));

        solidifier.setup();
        eligibility.setup();

        info!(
            max_parent_age_ms = config.solidifier.max_parent_age_ms,
            scope = %config.eligibility.dependency_scope,
            "Tangle core started"
        );

        Ok(Self {
            config,
            storage,
            solidifier,
            eligibility,
            accepting: AtomicBool::new(true),
            in_flight: RwLock::new(()),
        })
    }

    /// Message arrival entry point.
    ///
    /// Returns `true` if the message was new. Solidification and eligibility
    /// run synchronously inside this call as far as dependencies allow.
    pub fn store_message(&self, message: Message) -> TangleResult<bool> {
        // Recursive read so a subscriber may store from inside a callback
        // while shutdown is waiting for the write lock.
        let _guard = self.in_flight.read_recursive();
        if !self.accepting.load(Ordering::SeqCst) {
            return Err(TangleError::ShuttingDown);
        }
        let (_, stored) = self.storage.store_message(message);
        Ok(stored)
    }

    /// Force (re-)evaluation of a message's eligibility.
    pub fn check_eligibility(&self, message_id: &MessageId) -> TangleResult<()> {
        Ok(self.eligibility.check_eligibility(message_id)?)
    }

    /// Force (re-)evaluation of a message's solidity.
    pub fn solidify(&self, message_id: &MessageId) -> TangleResult<()> {
        Ok(self.solidifier.solidify(message_id)?)
    }

    pub fn metadata(&self, message_id: &MessageId) -> TangleResult<MessageMetadata> {
        Ok(self.storage.metadata_snapshot(message_id)?)
    }

    /// Re-check messages parked on a ledger dependency.
    ///
    /// Returns how many became eligible. Does nothing once shutdown began.
    pub fn recheck_pending(&self) -> usize {
        let _guard = self.in_flight.read_recursive();
        if !self.accepting.load(Ordering::SeqCst) {
            return 0;
        }
        self.eligibility.recheck_pending()
    }

    /// Stop accepting messages and wait for in-flight store calls.
    ///
    /// Pending solidification and eligibility requests are dropped with the
    /// instance; nothing is persisted.
    pub fn shutdown(&self) {
        if !self.accepting.swap(false, Ordering::SeqCst) {
            return;
        }
        info!("Shutting down, draining in-flight messages");
        let _drained = self.in_flight.write();
        let stats = self.stats();
        info!(
            messages = stats.messages,
            pending_solidifications = stats.pending_solidifications,
            pending_dependencies = stats.pending_dependencies,
            "Tangle core stopped"
        );
    }

    pub fn is_shutting_down(&self) -> bool {
        !self.accepting.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> TangleStats {
        TangleStats {
            messages: self.storage.message_count(),
            attachments: self.storage.attachment_count(),
            pending_solidifications: self.solidifier.pending_request_count(),
            missing_messages: self.solidifier.missing_messages().len(),
            pending_dependencies: self.eligibility.pending_dependencies(),
        }
    }

    pub fn config(&self) -> &TangleConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<MessageStorage> {
        &self.storage
    }

    pub fn solidifier(&self) -> &Arc<Solidifier> {
        &self.solidifier
    }

    pub fn eligibility_manager(&self) -> &Arc<EligibilityManager<U>> {
        &self.eligibility
    }

    pub fn message_solid(&self) -> &Event<Arc<Message>> {
        &self.solidifier.events().message_solid
    }

    pub fn message_missing(&self) -> &Event<MessageId> {
        &self.solidifier.events().message_missing
    }

    pub fn message_invalid(&self) -> &Event<Arc<Message>> {
        &self.solidifier.events().message_invalid
    }

    pub fn message_eligible(&self) -> &Event<Arc<Message>> {
        &self.eligibility.events().message_eligible
    }
}
