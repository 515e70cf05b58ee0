//! # Domain Layer
//!
//! Pure solidification logic, no locking and no storage access.
//!
//! - `config` - Solidifier configuration
//! - `pending` - Awaited parent → blocked children index
//! - `validity` - Parent age window check

pub mod config;
pub mod pending;
pub mod validity;

pub use config::SolidifierConfig;
pub use pending::PendingRequests;
pub use validity::{check_parent_age, ParentAgeViolation};
