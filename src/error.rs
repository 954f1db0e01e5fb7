//! Error types for the unfreeze ledger

use thiserror::Error;

/// Reasons a withdraw-expire-unfreeze request is rejected at admission time.
///
/// Validation never mutates state, so any of these leaves the account exactly
/// as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No account store or dynamic store!")]
    RepositoryUnavailable,
    #[error("Not support WithdrawExpireUnfreeze transaction, need to be opened by the committee")]
    FeatureDisabled,
    #[error("Invalid address")]
    InvalidAddress,
    #[error("Account[{address}] not exists")]
    AccountNotFound { address: String },
    #[error("no unFreeze balance to withdraw")]
    NothingToWithdraw,
    #[error("overflow: checkedAdd({balance}, {amount})")]
    BalanceOverflow { balance: u64, amount: u64 },
    /// A repository read failed while the request was being checked. This
    /// is not a rejection; converting back into `ChainError` yields the
    /// original storage error.
    #[error("Store error: {0}")]
    Store(Box<ChainError>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Validation failed: {0}")]
    Validation(ValidationError),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Balance overflow: {balance} + {amount}")]
    BalanceOverflow { balance: u64, amount: u64 },
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::ConfigError(err.to_string())
    }
}

impl From<ValidationError> for ChainError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Store(inner) => *inner,
            other => ChainError::Validation(other),
        }
    }
}

impl From<ChainError> for ValidationError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Validation(inner) => inner,
            other => ValidationError::Store(Box::new(other)),
        }
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
