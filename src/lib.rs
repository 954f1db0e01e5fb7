//! Unfreeze ledger - withdraw-expire-unfreeze state transition
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Native Contracts
//! - [`nativecontract`] - Two-phase processors (validate, then execute)
//!
//! ## Ledger State
//! - [`account`] - Accounts and their unfreeze schedules
//! - [`properties`] - Chain clock and governance switches
//! - [`crypto`] - Address format and helpers
//!
//! ## Storage
//! - [`repository`] - Repository trait and in-memory store
//! - [`persistence`] - SQLite-backed store
//! - [`cache`] - Write-through account cache
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Native Contracts
// ============================================================================
pub mod nativecontract;

// ============================================================================
// Ledger State
// ============================================================================
pub mod account;
pub mod crypto;
pub mod properties;

// ============================================================================
// Storage
// ============================================================================
pub mod cache;
pub mod persistence;
pub mod repository;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;

pub use account::{Account, UnfreezeEntry};
pub use error::{ChainError, ValidationError};
pub use nativecontract::{
    NativeProcessor, WithdrawExpireUnfreezeParam, WithdrawExpireUnfreezeProcessor,
};
pub use properties::ChainClock;
pub use repository::{InMemoryRepository, Repository};
