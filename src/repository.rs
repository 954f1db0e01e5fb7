//! Repository abstraction through which native contracts read and write
//! ledger state.

use crate::account::Account;
use crate::crypto::Address;
use crate::error::ChainError;
use crate::properties::ChainClock;
use std::collections::HashMap;

/// Read/write gateway to account and chain state.
///
/// Implementations must offer read-your-writes consistency within one
/// execution context. Reads hand out owned snapshots; the only way to change
/// an account is `update_account`.
pub trait Repository {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, ChainError>;
    fn chain_clock(&self) -> Result<ChainClock, ChainError>;
    fn update_account(&mut self, key: Address, account: Account) -> Result<(), ChainError>;
}

impl<R: Repository + ?Sized> Repository for Box<R> {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, ChainError> {
        (**self).get_account(address)
    }

    fn chain_clock(&self) -> Result<ChainClock, ChainError> {
        (**self).chain_clock()
    }

    fn update_account(&mut self, key: Address, account: Account) -> Result<(), ChainError> {
        (**self).update_account(key, account)
    }
}

/// Simple in-memory repository useful for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    pub accounts: HashMap<Address, Account>,
    pub clock: ChainClock,
}

impl InMemoryRepository {
    pub fn new(clock: ChainClock) -> Self {
        Self {
            accounts: HashMap::new(),
            clock,
        }
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.insert(account.db_key(), account);
        self
    }

    pub fn set_chain_clock(&mut self, clock: ChainClock) {
        self.clock = clock;
    }

    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }
}

impl Repository for InMemoryRepository {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, ChainError> {
        Ok(self.accounts.get(address).cloned())
    }

    fn chain_clock(&self) -> Result<ChainClock, ChainError> {
        Ok(self.clock)
    }

    fn update_account(&mut self, key: Address, account: Account) -> Result<(), ChainError> {
        self.accounts.insert(key, account);
        Ok(())
    }
}
