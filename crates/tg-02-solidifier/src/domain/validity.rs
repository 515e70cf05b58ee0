//! # Parent Age Validity
//!
//! A child may not be issued before its parent, nor more than the configured
//! window after it.

use shared_types::Timestamp;
use std::fmt;

/// Why a parent failed the age check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentAgeViolation {
    /// The parent claims to be issued after the child.
    FromFuture { ahead_ms: u64 },
    /// The parent is older than the allowed window.
    TooOld { age_ms: u64, max_age_ms: u64 },
}

impl fmt::Display for ParentAgeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromFuture { ahead_ms } => {
                write!(f, "parent issued {ahead_ms}ms after child")
            }
            Self::TooOld { age_ms, max_age_ms } => {
                write!(f, "parent is {age_ms}ms older than child (max {max_age_ms}ms)")
            }
        }
    }
}

/// Check `0 <= child - parent <= max_age_ms`.
pub fn check_parent_age(
    child_issuing_time: Timestamp,
    parent_issuing_time: Timestamp,
    max_age_ms: u64,
) -> Result<(), ParentAgeViolation> {
    if parent_issuing_time > child_issuing_time {
        return Err(ParentAgeViolation::FromFuture {
            ahead_ms: parent_issuing_time - child_issuing_time,
        });
    }
    let age_ms = child_issuing_time - parent_issuing_time;
    if age_ms > max_age_ms {
        return Err(ParentAgeViolation::TooOld { age_ms, max_age_ms });
    }
    Ok(())
}
