//! # Core Domain Entities
//!
//! Defines the Tangle entities shared by Storage, Solidifier and
//! EligibilityManager.
//!
//! ## Clusters
//!
//! - **Tangle**: `MessageId`, `Message`, `Payload`, `PayloadType`
//! - **Ledger**: `TransactionId`, `OutputId`, `Output`, `Transaction`,
//!   `InclusionState`
//! - **Relations**: `Attachment`

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::time::Timestamp;

/// A 32-byte hash (SHA-256).
pub type Hash = [u8; 32];

// =============================================================================
// CLUSTER A: THE TANGLE
// =============================================================================

/// Content hash identifying a message.
///
/// The all-zero id is reserved as `MessageId::EMPTY` and denotes "no parent"
/// (a message attached directly to genesis).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct MessageId(pub Hash);

impl MessageId {
    /// Sentinel used as the parent of genesis-attached messages.
    pub const EMPTY: MessageId = MessageId([0u8; 32]);

    pub fn new(bytes: Hash) -> Self {
        Self(bytes)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", hex::encode(&self.0[..8]))
    }
}

/// Payload kind discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum PayloadType {
    /// Opaque application data.
    Data = 0,
    /// Ledger transaction.
    Transaction = 1337,
}

/// Content carried by a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// Opaque bytes with no ledger effect.
    Data(Vec<u8>),
    /// A UTXO transaction.
    Transaction(Transaction),
}

impl Payload {
    /// Explicit kind discriminant.
    pub fn kind(&self) -> PayloadType {
        match self {
            Payload::Data(_) => PayloadType::Data,
            Payload::Transaction(_) => PayloadType::Transaction,
        }
    }

    /// Whether this payload has ledger effects that may still be pending.
    pub fn has_ledger_dependency(&self) -> bool {
        matches!(self, Payload::Transaction(_))
    }

    /// The carried transaction, if any.
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            Payload::Transaction(tx) => Some(tx),
            Payload::Data(_) => None,
        }
    }

    /// Id of the carried transaction, if any.
    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.transaction().map(Transaction::id)
    }

    fn hash_into(&self, hasher: &mut Sha256) {
        hasher.update((self.kind() as u32).to_le_bytes());
        match self {
            Payload::Data(bytes) => {
                hasher.update((bytes.len() as u64).to_le_bytes());
                hasher.update(bytes);
            }
            Payload::Transaction(tx) => hasher.update(tx.id().as_bytes()),
        }
    }
}

/// An immutable Tangle message.
///
/// Parents are stored as ordered, de-duplicated sets. A message built with
/// no strong parents references `MessageId::EMPTY`.
///
/// The id is not part of the serialized form; decoding goes through
/// `Message::new` and recomputes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MessageParts", into = "MessageParts")]
pub struct Message {
    id: MessageId,
    strong_parents: Vec<MessageId>,
    weak_parents: Vec<MessageId>,
    issuing_time: Timestamp,
    payload: Option<Payload>,
}

impl Message {
    /// Creates a message and derives its id from the content.
    pub fn new(
        strong_parents: Vec<MessageId>,
        weak_parents: Vec<MessageId>,
        issuing_time: Timestamp,
        payload: Option<Payload>,
    ) -> Self {
        let mut strong_parents = normalize_parents(strong_parents);
        if strong_parents.is_empty() {
            strong_parents.push(MessageId::EMPTY);
        }
        let weak_parents = normalize_parents(weak_parents);
        let id = compute_message_id(&strong_parents, &weak_parents, issuing_time, payload.as_ref());

        Self {
            id,
            strong_parents,
            weak_parents,
            issuing_time,
            payload,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn strong_parents(&self) -> &[MessageId] {
        &self.strong_parents
    }

    pub fn weak_parents(&self) -> &[MessageId] {
        &self.weak_parents
    }

    /// All distinct parents, strong first.
    pub fn parents(&self) -> Vec<MessageId> {
        let mut parents = self.strong_parents.clone();
        for weak in &self.weak_parents {
            if !parents.contains(weak) {
                parents.push(*weak);
            }
        }
        parents
    }

    pub fn issuing_time(&self) -> Timestamp {
        self.issuing_time
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// The transaction carried in the payload, if any.
    pub fn transaction(&self) -> Option<&Transaction> {
        self.payload.as_ref().and_then(Payload::transaction)
    }
}

/// Wire form of a `Message`.
#[derive(Serialize, Deserialize)]
struct MessageParts {
    strong_parents: Vec<MessageId>,
    weak_parents: Vec<MessageId>,
    issuing_time: Timestamp,
    payload: Option<Payload>,
}

impl From<MessageParts> for Message {
    fn from(parts: MessageParts) -> Self {
        Message::new(
            parts.strong_parents,
            parts.weak_parents,
            parts.issuing_time,
            parts.payload,
        )
    }
}

impl From<Message> for MessageParts {
    fn from(message: Message) -> Self {
        Self {
            strong_parents: message.strong_parents,
            weak_parents: message.weak_parents,
            issuing_time: message.issuing_time,
            payload: message.payload,
        }
    }
}

fn normalize_parents(mut parents: Vec<MessageId>) -> Vec<MessageId> {
    parents.sort();
    parents.dedup();
    parents
}

fn compute_message_id(
    strong_parents: &[MessageId],
    weak_parents: &[MessageId],
    issuing_time: Timestamp,
    payload: Option<&Payload>,
) -> MessageId {
    let mut hasher = Sha256::new();
    hasher.update((strong_parents.len() as u32).to_le_bytes());
    for parent in strong_parents {
        hasher.update(parent.as_bytes());
    }
    hasher.update((weak_parents.len() as u32).to_le_bytes());
    for parent in weak_parents {
        hasher.update(parent.as_bytes());
    }
    hasher.update(issuing_time.to_le_bytes());
    match payload {
        Some(payload) => {
            hasher.update([1u8]);
            payload.hash_into(&mut hasher);
        }
        None => hasher.update([0u8]),
    }
    MessageId(hasher.finalize().into())
}

// =============================================================================
// CLUSTER B: THE LEDGER
// =============================================================================

/// Content hash identifying a transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct TransactionId(pub Hash);

impl TransactionId {
    /// Id of the virtual genesis transaction that created the initial supply.
    pub const GENESIS: TransactionId = TransactionId([0u8; 32]);

    pub fn new(bytes: Hash) -> Self {
        Self(bytes)
    }

    pub fn is_genesis(&self) -> bool {
        *self == Self::GENESIS
    }

    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", hex::encode(&self.0[..8]))
    }
}

/// Reference to an output created by a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutputId {
    pub transaction_id: TransactionId,
    pub index: u16,
}

impl OutputId {
    pub fn new(transaction_id: TransactionId, index: u16) -> Self {
        Self {
            transaction_id,
            index,
        }
    }
}

/// A transaction output: a balance locked to an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Output {
    pub address: Hash,
    pub balance: u64,
}

impl Output {
    pub fn new(address: Hash, balance: u64) -> Self {
        Self { address, balance }
    }
}

/// A UTXO transaction.
///
/// Validity is decided by the ledger; this crate only checks structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TransactionParts", into = "TransactionParts")]
pub struct Transaction {
    id: TransactionId,
    inputs: Vec<OutputId>,
    outputs: Vec<Output>,
    timestamp: Timestamp,
}

impl Transaction {
    /// Creates a transaction and derives its id from the content.
    pub fn new(inputs: Vec<OutputId>, outputs: Vec<Output>, timestamp: Timestamp) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((inputs.len() as u32).to_le_bytes());
        for input in &inputs {
            hasher.update(input.transaction_id.as_bytes());
            hasher.update(input.index.to_le_bytes());
        }
        hasher.update((outputs.len() as u32).to_le_bytes());
        for output in &outputs {
            hasher.update(output.address);
            hasher.update(output.balance.to_le_bytes());
        }
        hasher.update(timestamp.to_le_bytes());
        let id = TransactionId(hasher.finalize().into());

        Self {
            id,
            inputs,
            outputs,
            timestamp,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn inputs(&self) -> &[OutputId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Distinct ids of the transactions whose outputs this one spends.
    pub fn input_transaction_ids(&self) -> Vec<TransactionId> {
        let mut ids: Vec<TransactionId> =
            self.inputs.iter().map(|input| input.transaction_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Structural checks only. Returns the reason on failure.
    pub fn check_structure(&self) -> Result<(), &'static str> {
        if self.inputs.is_empty() {
            return Err("transaction has no inputs");
        }
        let mut seen = self.inputs.clone();
        seen.sort();
        seen.dedup();
        if seen.len() != self.inputs.len() {
            return Err("transaction spends the same output twice");
        }
        if self.outputs.is_empty() {
            return Err("transaction has no outputs");
        }
        Ok(())
    }
}

/// Wire form of a `Transaction`.
#[derive(Serialize, Deserialize)]
struct TransactionParts {
    inputs: Vec<OutputId>,
    outputs: Vec<Output>,
    timestamp: Timestamp,
}

impl From<TransactionParts> for Transaction {
    fn from(parts: TransactionParts) -> Self {
        Transaction::new(parts.inputs, parts.outputs, parts.timestamp)
    }
}

impl From<Transaction> for TransactionParts {
    fn from(tx: Transaction) -> Self {
        Self {
            inputs: tx.inputs,
            outputs: tx.outputs,
            timestamp: tx.timestamp,
        }
    }
}

/// Settlement status of a transaction as reported by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InclusionState {
    Pending,
    Confirmed,
    Rejected,
}

impl InclusionState {
    /// Confirmed and Rejected are both final verdicts.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, InclusionState::Pending)
    }
}

impl fmt::Display for InclusionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InclusionState::Pending => write!(f, "pending"),
            InclusionState::Confirmed => write!(f, "confirmed"),
            InclusionState::Rejected => write!(f, "rejected"),
        }
    }
}

// =============================================================================
// CLUSTER C: RELATIONS
// =============================================================================

/// Link between a transaction and a message carrying it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Attachment {
    pub transaction_id: TransactionId,
    pub message_id: MessageId,
}

impl Attachment {
    pub fn new(transaction_id: TransactionId, message_id: MessageId) -> Self {
        Self {
            transaction_id,
            message_id,
        }
    }
}
