//! # Ports Layer
//!
//! - `outbound.rs` - Driven ports (ledger state oracle)

pub mod outbound;

pub use outbound::{InclusionStateChange, LedgerStateError, UtxoDag};
