//! # Eligibility Configuration

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which transactions a message's eligibility waits for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DependencyScope {
    /// Only the transaction carried in the payload.
    #[default]
    PayloadTransaction,
    /// The carried transaction plus the transactions that created its inputs.
    PayloadAndInputs,
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadTransaction => write!(f, "payload"),
            Self::PayloadAndInputs => write!(f, "inputs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown dependency scope '{0}' (expected 'payload' or 'inputs')")]
pub struct UnknownDependencyScope(pub String);

impl FromStr for DependencyScope {
    type Err = UnknownDependencyScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "payload" => Ok(Self::PayloadTransaction),
            "inputs" => Ok(Self::PayloadAndInputs),
            other => Err(UnknownDependencyScope(other.to_string())),
        }
    }
}

/// Eligibility manager configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EligibilityConfig {
    pub dependency_scope: DependencyScope,
}

impl EligibilityConfig {
    pub fn new(dependency_scope: DependencyScope) -> Self {
        Self { dependency_scope }
    }

    pub fn with_dependency_scope(mut self, scope: DependencyScope) -> Self {
        self.dependency_scope = scope;
        self
    }
}
