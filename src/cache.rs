//! Write-through account cache layered over any repository
//!
//! Hot accounts are kept in an LRU in front of the backing store. Writes go to
//! the store first and only then refresh the cache; a failed write evicts the
//! cached copy.
use crate::account::Account;
use crate::crypto::Address;
use crate::error::ChainError;
use crate::properties::ChainClock;
use crate::repository::Repository;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_ACCOUNT_CACHE_SIZE: usize = 1024;

pub struct CachedRepository<R> {
    inner: R,
    accounts: Mutex<LruCache<Address, Account>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<R: Repository> CachedRepository<R> {
    pub fn new(inner: R, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            accounts: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn with_default_capacity(inner: R) -> Self {
        Self::new(inner, DEFAULT_ACCOUNT_CACHE_SIZE)
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn invalidate(&self, address: &Address) -> Option<Account> {
        self.accounts.lock().pop(address)
    }

    pub fn clear(&self) {
        self.accounts.lock().clear();
    }

    /// (entries, capacity, hits, misses)
    pub fn stats(&self) -> (usize, usize, u64, u64) {
        let accounts = self.accounts.lock();
        (
            accounts.len(),
            accounts.cap().get(),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

impl<R: Repository> Repository for CachedRepository<R> {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, ChainError> {
        if let Some(account) = self.accounts.lock().get(address) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Some(account.clone()));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let loaded = self.inner.get_account(address)?;
        if let Some(account) = &loaded {
            self.accounts.lock().put(*address, account.clone());
        }
        Ok(loaded)
    }

    fn chain_clock(&self) -> Result<ChainClock, ChainError> {
        self.inner.chain_clock()
    }

    fn update_account(&mut self, key: Address, account: Account) -> Result<(), ChainError> {
        match self.inner.update_account(key, account.clone()) {
            Ok(()) => {
                self.accounts.lock().put(key, account);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "Account write failed, dropping cached copy of {}: {}",
                    hex::encode(key),
                    e
                );
                self.accounts.lock().pop(&key);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{address_from_string, MAINNET_ADDRESS_PREFIX};
    use crate::repository::InMemoryRepository;

    struct FailingWrites(InMemoryRepository);

    impl Repository for FailingWrites {
        fn get_account(&self, address: &Address) -> Result<Option<Account>, ChainError> {
            self.0.get_account(address)
        }

        fn chain_clock(&self) -> Result<ChainClock, ChainError> {
            self.0.chain_clock()
        }

        fn update_account(&mut self, _key: Address, _account: Account) -> Result<(), ChainError> {
            Err(ChainError::DatabaseError("read-only".to_string()))
        }
    }

    #[test]
    fn test_hits_and_misses() {
        let addr = address_from_string("alice", MAINNET_ADDRESS_PREFIX);
        let backing = InMemoryRepository::new(ChainClock::new(20, 14))
            .with_account(Account::new(addr, 100));
        let cache = CachedRepository::new(backing, 4);

        assert_eq!(cache.get_account(&addr).unwrap().unwrap().balance, 100);
        assert_eq!(cache.get_account(&addr).unwrap().unwrap().balance, 100);

        let missing = address_from_string("nobody", MAINNET_ADDRESS_PREFIX);
        assert!(cache.get_account(&missing).unwrap().is_none());

        assert_eq!(cache.stats(), (1, 4, 1, 2));
        assert_eq!(cache.chain_clock().unwrap(), ChainClock::new(20, 14));
    }

    #[test]
    fn test_write_through() {
        let addr = address_from_string("bob", MAINNET_ADDRESS_PREFIX);
        let backing = InMemoryRepository::new(ChainClock::new(20, 14))
            .with_account(Account::new(addr, 1));
        let mut cache = CachedRepository::with_default_capacity(backing);

        cache.get_account(&addr).unwrap();
        cache.update_account(addr, Account::new(addr, 9)).unwrap();

        assert_eq!(cache.get_account(&addr).unwrap().unwrap().balance, 9);
        assert_eq!(cache.inner().account(&addr).unwrap().balance, 9);
    }

    #[test]
    fn test_failed_write_evicts() {
        let addr = address_from_string("carol", MAINNET_ADDRESS_PREFIX);
        let backing = InMemoryRepository::new(ChainClock::new(20, 14))
            .with_account(Account::new(addr, 5));
        let mut cache = CachedRepository::new(FailingWrites(backing), 2);

        cache.get_account(&addr).unwrap();
        assert_eq!(cache.stats().0, 1);

        let result = cache.update_account(addr, Account::new(addr, 50));
        assert!(matches!(result, Err(ChainError::DatabaseError(_))));
        assert_eq!(cache.stats().0, 0);
        assert_eq!(cache.get_account(&addr).unwrap().unwrap().balance, 5);
    }

    #[test]
    fn test_lru_eviction() {
        let backing = InMemoryRepository::new(ChainClock::default());
        let mut cache = CachedRepository::new(backing, 2);

        let addrs: Vec<Address> = (0..3)
            .map(|i| address_from_string(&format!("acct-{}", i), MAINNET_ADDRESS_PREFIX))
            .collect();
        for addr in &addrs {
            cache.update_account(*addr, Account::new(*addr, 1)).unwrap();
        }

        let (size, cap, _, _) = cache.stats();
        assert_eq!((size, cap), (2, 2));
        assert!(cache.invalidate(&addrs[0]).is_none());
        assert!(cache.invalidate(&addrs[2]).is_some());

        cache.clear();
        assert_eq!(cache.stats().0, 0);
        // Evicted entries are still served from the backing store.
        assert_eq!(cache.into_inner().accounts.len(), 3);
    }
}
