//! Network-wide dynamic properties read by native contracts

use serde::{Deserialize, Serialize};

/// Authoritative chain time plus the governance switch for unfreeze
/// withdrawals. Native contracts only read this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainClock {
    /// Timestamp of the latest block header, in milliseconds.
    pub latest_block_timestamp: i64,
    /// Zero disables withdraw-expire-unfreeze network-wide.
    pub unfreeze_delay_days: i64,
}

impl ChainClock {
    pub fn new(latest_block_timestamp: i64, unfreeze_delay_days: i64) -> Self {
        Self {
            latest_block_timestamp,
            unfreeze_delay_days,
        }
    }

    pub fn unfreeze_enabled(&self) -> bool {
        self.unfreeze_delay_days != 0
    }
}
