//! # Tangle Runtime
//!
//! Builds and wires the Tangle core subsystems.
//!
//! ## Subsystems
//!
//! 1. Message Storage (tg-01) - messages, metadata, attachments
//! 2. Solidifier (tg-02) - past cone completeness
//! 3. Eligibility (tg-03) - ledger dependency settlement
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (`TangleConfig::from_env`)
//! 2. Initialize logging (`telemetry::init_logging`)
//! 3. Create storage, solidifier and eligibility manager
//! 4. Subscribe solidifier to `MessageStored`, eligibility to
//!    `MessageSolid` and the UTXO DAG
//! 5. Start the periodic pending re-check (`spawn_pending_recheck`)
//! 6. Accept messages until `shutdown`

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod maintenance;
pub mod tangle;
pub mod telemetry;

pub use config::{ConfigError, LogConfig, TangleConfig};
pub use error::{TangleError, TangleResult};
pub use maintenance::spawn_pending_recheck;
pub use tangle::{Tangle, TangleStats};
pub use telemetry::{init_logging, TelemetryError};
