//! SQLite-backed account store

use crate::account::Account;
use crate::config::{DatabaseConfig, GovernanceConfig};
use crate::crypto::{address_to_hex, Address};
use crate::error::ChainError;
use crate::properties::ChainClock;
use crate::repository::Repository;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

const LATEST_BLOCK_TIMESTAMP_KEY: &str = "latest_block_header_timestamp";
const UNFREEZE_DELAY_DAYS_KEY: &str = "unfreeze_delay_days";

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &str) -> Result<Self, ChainError> {
        let conn = Connection::open(path)
            .map_err(|e| ChainError::DatabaseError(format!("Failed to open database: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS accounts (
                address BLOB PRIMARY KEY,
                account_data TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| {
            ChainError::DatabaseError(format!("Failed to create accounts table: {}", e))
        })?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS metadata (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| {
            ChainError::DatabaseError(format!("Failed to create metadata table: {}", e))
        })?;

        Ok(Database { conn: Mutex::new(conn) })
    }

    /// Opens the configured store and seeds the chain clock from governance
    /// settings when the store has none yet.
    pub fn from_config(
        database: &DatabaseConfig,
        governance: &GovernanceConfig,
    ) -> Result<Self, ChainError> {
        let db = Self::open(&database.path)?;
        if db.load_metadata(UNFREEZE_DELAY_DAYS_KEY)?.is_none() {
            tracing::info!(
                "Seeding dynamic properties in {} (unfreeze_delay_days = {})",
                database.path,
                governance.unfreeze_delay_days
            );
            db.save_chain_clock(&ChainClock::new(
                governance.genesis_timestamp,
                governance.unfreeze_delay_days,
            ))?;
        }
        tracing::debug!(
            "Opened account store {} with {} accounts",
            database.path,
            db.account_count()?
        );
        Ok(db)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, ChainError> {
        self.conn
            .lock()
            .map_err(|_| ChainError::DatabaseError("Mutex poisoned".to_string()))
    }

    pub fn save_account(&self, key: &Address, account: &Account) -> Result<(), ChainError> {
        let account_json = serde_json::to_string(account).map_err(|e| {
            ChainError::DatabaseError(format!("Failed to serialize account: {}", e))
        })?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO accounts (address, account_data) VALUES (?1, ?2)",
            params![key.to_vec(), account_json],
        )
        .map_err(|e| ChainError::DatabaseError(format!("Failed to save account: {}", e)))?;

        Ok(())
    }

    pub fn load_account(&self, address: &Address) -> Result<Option<Account>, ChainError> {
        let conn = self.lock()?;
        let account_json: Option<String> = conn
            .query_row(
                "SELECT account_data FROM accounts WHERE address = ?1",
                params![address.to_vec()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| ChainError::DatabaseError(format!("Failed to query account: {}", e)))?;

        match account_json {
            Some(json) => {
                let account: Account = serde_json::from_str(&json).map_err(|e| {
                    ChainError::DatabaseError(format!(
                        "Failed to deserialize account {}: {}",
                        address_to_hex(address),
                        e
                    ))
                })?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }

    pub fn account_count(&self) -> Result<usize, ChainError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
            .map_err(|e| ChainError::DatabaseError(format!("Failed to count accounts: {}", e)))?;
        Ok(count as usize)
    }

    /// Atomically replaces both dynamic properties.
    pub fn save_chain_clock(&self, clock: &ChainClock) -> Result<(), ChainError> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction().map_err(|e| {
            ChainError::DatabaseError(format!("Failed to start transaction: {}", e))
        })?;

        for (key, value) in [
            (LATEST_BLOCK_TIMESTAMP_KEY, clock.latest_block_timestamp),
            (UNFREEZE_DELAY_DAYS_KEY, clock.unfreeze_delay_days),
        ] {
            tx.execute(
                "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
                params![key, value.to_string()],
            )
            .map_err(|e| ChainError::DatabaseError(format!("Failed to save {}: {}", key, e)))?;
        }

        tx.commit().map_err(|e| {
            ChainError::DatabaseError(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    pub fn load_chain_clock(&self) -> Result<ChainClock, ChainError> {
        let latest_block_timestamp = self.load_metadata(LATEST_BLOCK_TIMESTAMP_KEY)?;
        let unfreeze_delay_days = self.load_metadata(UNFREEZE_DELAY_DAYS_KEY)?;
        if latest_block_timestamp.is_none() || unfreeze_delay_days.is_none() {
            tracing::warn!("Dynamic properties missing from store, treating them as zero");
        }
        Ok(ChainClock {
            latest_block_timestamp: latest_block_timestamp.unwrap_or(0),
            unfreeze_delay_days: unfreeze_delay_days.unwrap_or(0),
        })
    }

    fn load_metadata(&self, key: &str) -> Result<Option<i64>, ChainError> {
        let conn = self.lock()?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM metadata WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| ChainError::DatabaseError(format!("Failed to load {}: {}", key, e)))?;

        value
            .map(|v| {
                v.parse::<i64>().map_err(|e| {
                    ChainError::DatabaseError(format!("Corrupt metadata {}: {}", key, e))
                })
            })
            .transpose()
    }
}

impl Repository for Database {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, ChainError> {
        self.load_account(address)
    }

    fn chain_clock(&self) -> Result<ChainClock, ChainError> {
        self.load_chain_clock()
    }

    fn update_account(&mut self, key: Address, account: Account) -> Result<(), ChainError> {
        self.save_account(&key, &account)
    }
}
