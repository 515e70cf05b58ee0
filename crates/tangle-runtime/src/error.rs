//! Error types for the Tangle runtime

use crate::config::ConfigError;
use thiserror::Error;
use tg_01_message_storage::StorageError;
use tg_02_solidifier::SolidifierError;
use tg_03_eligibility::EligibilityError;

#[derive(Debug, Error)]
pub enum TangleError {
    /// `shutdown` was called; no new messages are accepted
    #[error("Tangle is shutting down")]
    ShuttingDown,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Solidifier(#[from] SolidifierError),

    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
}

pub type TangleResult<T> = Result<T, TangleError>;
