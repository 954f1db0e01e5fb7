use serde::{Deserialize, Serialize};

/// Request to move every released unfreeze entry of an account into its
/// balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawExpireUnfreezeParam {
    /// Account that wants to withdraw its released funds. Not yet checked
    /// for well-formedness.
    owner_address: Vec<u8>,
    /// Caller-side timestamp of the transaction. Processing always uses the
    /// chain clock instead.
    now_in_ms: i64,
}

impl WithdrawExpireUnfreezeParam {
    pub fn new(owner_address: impl Into<Vec<u8>>, now_in_ms: i64) -> Self {
        Self {
            owner_address: owner_address.into(),
            now_in_ms,
        }
    }

    pub fn owner_address(&self) -> &[u8] {
        &self.owner_address
    }

    pub fn now_in_ms(&self) -> i64 {
        self.now_in_ms
    }
}
