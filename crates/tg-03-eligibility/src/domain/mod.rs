//! # Domain Layer
//!
//! - `config` - Eligibility configuration and dependency scope
//! - `dependencies` - Payload → dependency set, pending-work index

pub mod config;
pub mod dependencies;

pub use config::{DependencyScope, EligibilityConfig, UnknownDependencyScope};
pub use dependencies::{ledger_dependencies, PendingDependencies};
