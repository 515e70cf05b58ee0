//! # Eligibility Manager (tg-03)
//!
//! Marks a solid message **eligible** once the ledger effects of its payload
//! are no longer pending. Eligible messages may be used for tip selection
//! and structural voting.
//!
//! ## Flow
//!
//! ```text
//! Solidifier (2) ──MessageSolid──→ ┐
//!                                  ├──→ Eligibility (3) ──MessageEligible──→ consensus
//! UTXO DAG ──InclusionStateChanged─┘         │
//!                                            └── inclusion_state(tx) ──→ UTXO DAG
//! ```
//!
//! ## Rules
//!
//! | Payload | Eligible when |
//! |---------|---------------|
//! | none / data | immediately after solid |
//! | transaction | every dependency is Confirmed or Rejected |
//!
//! Rejection still grants eligibility: the carrying message stays
//! structurally usable even though its transaction is void. The dependency
//! set is chosen by [`DependencyScope`]; the check is an AND over that set.
//!
//! A pending dependency never blocks a thread. The message is indexed under
//! each pending transaction and re-checked when the UTXO DAG reports that
//! transaction resolved.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod service;

pub use adapters::InMemoryUtxoDag;
pub use domain::{DependencyScope, EligibilityConfig, UnknownDependencyScope};
pub use error::{EligibilityError, EligibilityResult};
pub use events::EligibilityEvents;
pub use ports::{InclusionStateChange, LedgerStateError, UtxoDag};
pub use service::EligibilityManager;
