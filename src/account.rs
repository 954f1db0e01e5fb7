//! Account records and their pending unfreeze schedule

use crate::crypto::Address;
use serde::{Deserialize, Serialize};

/// One scheduled release of previously frozen funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnfreezeEntry {
    pub amount: u64,
    /// Release time in milliseconds.
    pub expire_at: i64,
}

impl UnfreezeEntry {
    pub fn new(amount: u64, expire_at: i64) -> Self {
        Self { amount, expire_at }
    }

    /// Has this entry been released by `now`.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expire_at <= now
    }

    /// Released and carrying value. Zero-amount entries never qualify.
    pub fn is_withdrawable(&self, now: i64) -> bool {
        self.amount > 0 && self.is_expired(now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    pub balance: u64,
    /// Pending releases in insertion order. Duplicates are allowed.
    #[serde(default)]
    pub unfreeze_entries: Vec<UnfreezeEntry>,
    #[serde(default)]
    pub latest_withdraw_timestamp: i64,
}

impl Account {
    pub fn new(address: Address, balance: u64) -> Self {
        Self {
            address,
            balance,
            unfreeze_entries: Vec::new(),
            latest_withdraw_timestamp: 0,
        }
    }

    pub fn with_unfreeze(mut self, amount: u64, expire_at: i64) -> Self {
        self.add_unfreeze(UnfreezeEntry::new(amount, expire_at));
        self
    }

    pub fn add_unfreeze(&mut self, entry: UnfreezeEntry) {
        self.unfreeze_entries.push(entry);
    }

    /// Key under which the account is stored.
    pub fn db_key(&self) -> Address {
        self.address
    }
}
