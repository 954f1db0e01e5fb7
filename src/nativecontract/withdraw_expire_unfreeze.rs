use crate::account::UnfreezeEntry;
use crate::config::NetworkConfig;
use crate::crypto::{address_from_bytes, readable_address, Address, MAINNET_ADDRESS_PREFIX};
use crate::error::{ChainError, ValidationError};
use crate::nativecontract::{NativeProcessor, WithdrawExpireUnfreezeParam};
use crate::repository::Repository;
use tracing::{debug, info};

/// Moves every released unfreeze entry of an account into its balance.
///
/// The processor holds no ledger state; the address prefix only decides which
/// owner addresses are well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawExpireUnfreezeProcessor {
    address_prefix: u8,
}

impl Default for WithdrawExpireUnfreezeProcessor {
    fn default() -> Self {
        Self::new(MAINNET_ADDRESS_PREFIX)
    }
}

impl WithdrawExpireUnfreezeProcessor {
    pub fn new(address_prefix: u8) -> Self {
        Self { address_prefix }
    }

    pub fn from_config(network: &NetworkConfig) -> Result<Self, ChainError> {
        Ok(Self::new(network.address_prefix_byte()?))
    }

    pub fn address_prefix(&self) -> u8 {
        self.address_prefix
    }

    /// Amount that a withdrawal would release at `timestamp`, for wallet
    /// queries. Ignores the governance switch; unknown accounts report 0.
    pub fn withdrawable_amount<R: Repository + ?Sized>(
        &self,
        repo: &R,
        owner_address: &[u8],
        timestamp: i64,
    ) -> Result<u64, ChainError> {
        let address = address_from_bytes(owner_address, self.address_prefix)?;
        let Some(account) = repo.get_account(&address)? else {
            return Ok(0);
        };
        total_withdrawable(&account.unfreeze_entries, timestamp).ok_or(
            ChainError::BalanceOverflow {
                balance: account.balance,
                amount: u64::MAX,
            },
        )
    }

    fn owner(&self, param: &WithdrawExpireUnfreezeParam) -> Option<Address> {
        address_from_bytes(param.owner_address(), self.address_prefix).ok()
    }
}

impl NativeProcessor for WithdrawExpireUnfreezeProcessor {
    type Param = WithdrawExpireUnfreezeParam;
    type Output = u64;

    fn validate<R: Repository + ?Sized>(
        &self,
        param: &WithdrawExpireUnfreezeParam,
        repo: Option<&R>,
    ) -> Result<(), ValidationError> {
        let repo = repo.ok_or(ValidationError::RepositoryUnavailable)?;

        let clock = repo.chain_clock()?;
        if !clock.unfreeze_enabled() {
            debug!("WithdrawExpireUnfreeze rejected: unfreeze delay days is 0");
            return Err(ValidationError::FeatureDisabled);
        }

        let address = self.owner(param).ok_or(ValidationError::InvalidAddress)?;
        let account = repo
            .get_account(&address)?
            .ok_or_else(|| ValidationError::AccountNotFound {
                address: readable_address(param.owner_address()),
            })?;

        let now = clock.latest_block_timestamp;
        let total = match total_withdrawable(&account.unfreeze_entries, now) {
            Some(0) => {
                debug!(
                    "WithdrawExpireUnfreeze rejected: nothing released for {} at {}",
                    readable_address(&address),
                    now
                );
                return Err(ValidationError::NothingToWithdraw);
            }
            Some(total) => total,
            None => {
                debug!("WithdrawExpireUnfreeze rejected: released amounts overflow u64");
                return Err(ValidationError::BalanceOverflow {
                    balance: account.balance,
                    amount: u64::MAX,
                });
            }
        };

        if account.balance.checked_add(total).is_none() {
            debug!(
                "WithdrawExpireUnfreeze rejected: overflow: checkedAdd({}, {})",
                account.balance, total
            );
            return Err(ValidationError::BalanceOverflow {
                balance: account.balance,
                amount: total,
            });
        }

        Ok(())
    }

    fn execute<R: Repository + ?Sized>(
        &self,
        param: &WithdrawExpireUnfreezeParam,
        repo: &mut R,
    ) -> Result<u64, ChainError> {
        let address = address_from_bytes(param.owner_address(), self.address_prefix)?;
        let now = repo.chain_clock()?.latest_block_timestamp;

        let mut account = repo
            .get_account(&address)?
            .ok_or_else(|| ChainError::AccountNotFound(readable_address(&address)))?;

        let withdrawn = total_withdrawable(&account.unfreeze_entries, now).ok_or(
            ChainError::BalanceOverflow {
                balance: account.balance,
                amount: u64::MAX,
            },
        )?;
        let balance = account.balance;
        account.balance = balance
            .checked_add(withdrawn)
            .ok_or(ChainError::BalanceOverflow {
                balance,
                amount: withdrawn,
            })?;
        account.latest_withdraw_timestamp = now;
        account.unfreeze_entries = remaining_entries(&account.unfreeze_entries, now);

        repo.update_account(account.db_key(), account)?;

        info!(
            "WithdrawExpireUnfreeze: {} withdrew {} at {}",
            readable_address(&address),
            withdrawn,
            now
        );
        Ok(withdrawn)
    }
}

/// Entries released by `now` that carry value.
fn withdrawable_entries(
    entries: &[UnfreezeEntry],
    now: i64,
) -> impl Iterator<Item = &UnfreezeEntry> + '_ {
    entries.iter().filter(move |e| e.is_withdrawable(now))
}

/// Sum of the withdrawable entries, `None` on u64 overflow.
fn total_withdrawable(entries: &[UnfreezeEntry], now: i64) -> Option<u64> {
    withdrawable_entries(entries, now).try_fold(0u64, |acc, e| acc.checked_add(e.amount))
}

/// Entries still locked at `now`, in their original order. Released
/// zero-amount entries are dropped along with the withdrawn ones.
fn remaining_entries(entries: &[UnfreezeEntry], now: i64) -> Vec<UnfreezeEntry> {
    entries
        .iter()
        .filter(|e| !e.is_expired(now))
        .copied()
        .collect()
}
