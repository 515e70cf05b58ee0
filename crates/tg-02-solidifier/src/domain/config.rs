//! # Solidifier Configuration
//!
//! - `max_parent_age_ms`: largest allowed gap between a parent's issuing time
//!   and its child's

use std::time::Duration;

/// Default parent age window: 30 minutes.
pub const DEFAULT_MAX_PARENT_AGE_MS: u64 = 30 * 60 * 1000;

/// Configuration for the solidifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidifierConfig {
    /// A parent issued more than this many milliseconds before its child
    /// makes the child invalid (default: 30 minutes).
    pub max_parent_age_ms: u64,
}

impl Default for SolidifierConfig {
    fn default() -> Self {
        Self {
            max_parent_age_ms: DEFAULT_MAX_PARENT_AGE_MS,
        }
    }
}

impl SolidifierConfig {
    pub fn new(max_parent_age_ms: u64) -> Self {
        Self { max_parent_age_ms }
    }

    pub fn with_max_parent_age(mut self, age: Duration) -> Self {
        self.max_parent_age_ms = u64::try_from(age.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Returns `true` if all values are within acceptable bounds.
    pub fn is_valid(&self) -> bool {
        self.max_parent_age_ms > 0
    }
}
