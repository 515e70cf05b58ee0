//! # Tangle Configuration
//!
//! Unified configuration for all subsystems and logging.
//!
//! ## Environment Variables
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TANGLE_LOG_LEVEL` or `RUST_LOG` | log filter | `info` |
//! | `TANGLE_JSON_LOGS` | JSON log output | `false` |
//! | `TANGLE_MAX_PARENT_AGE_SECS` | parent age window | `1800` |
//! | `TANGLE_DEPENDENCY_SCOPE` | `payload` or `inputs` | `payload` |
//! | `TANGLE_RECHECK_INTERVAL_SECS` | period of the pending eligibility re-check | `10` |

use std::env;
use std::time::Duration;
use tg_02_solidifier::SolidifierConfig;
use tg_03_eligibility::{DependencyScope, EligibilityConfig};
use thiserror::Error;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `tg_02_solidifier=debug`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Default period of the pending eligibility re-check.
pub const DEFAULT_RECHECK_INTERVAL: Duration = Duration::from_secs(10);

/// Complete configuration of a Tangle core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TangleConfig {
    pub solidifier: SolidifierConfig,
    pub eligibility: EligibilityConfig,
    pub log: LogConfig,
    /// How often messages parked on a ledger dependency are re-checked.
    pub recheck_interval: Duration,
}

impl Default for TangleConfig {
    fn default() -> Self {
        Self {
            solidifier: SolidifierConfig::default(),
            eligibility: EligibilityConfig::default(),
            log: LogConfig::default(),
            recheck_interval: DEFAULT_RECHECK_INTERVAL,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Solidifier configuration out of bounds: {0:?}")]
    InvalidSolidifier(SolidifierConfig),

    #[error("Recheck interval must be positive")]
    InvalidRecheckInterval,
}

impl TangleConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(level) = lookup("TANGLE_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.log.level = level;
        }
        if let Some(json) = lookup("TANGLE_JSON_LOGS") {
            config.log.json = json.eq_ignore_ascii_case("true") || json == "1";
        }
        if let Some(secs) = lookup("TANGLE_MAX_PARENT_AGE_SECS") {
            let parsed = secs
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "TANGLE_MAX_PARENT_AGE_SECS",
                    value: secs.clone(),
                    reason: e.to_string(),
                })?;
            config.solidifier = config
                .solidifier
                .with_max_parent_age(Duration::from_secs(parsed));
        }
        if let Some(scope) = lookup("TANGLE_DEPENDENCY_SCOPE") {
            let parsed = scope
                .parse::<DependencyScope>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "TANGLE_DEPENDENCY_SCOPE",
                    value: scope.clone(),
                    reason: e.to_string(),
                })?;
            config.eligibility = config.eligibility.with_dependency_scope(parsed);
        }
        if let Some(secs) = lookup("TANGLE_RECHECK_INTERVAL_SECS") {
            let parsed = secs
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "TANGLE_RECHECK_INTERVAL_SECS",
                    value: secs.clone(),
                    reason: e.to_string(),
                })?;
            config.recheck_interval = Duration::from_secs(parsed);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_solidifier(mut self, solidifier: SolidifierConfig) -> Self {
        self.solidifier = solidifier;
        self
    }

    pub fn with_eligibility(mut self, eligibility: EligibilityConfig) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn with_recheck_interval(mut self, interval: Duration) -> Self {
        self.recheck_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.solidifier.is_valid() {
            return Err(ConfigError::InvalidSolidifier(self.solidifier));
        }
        if self.recheck_interval.is_zero() {
            return Err(ConfigError::InvalidRecheckInterval);
        }
        Ok(())
    }
}
