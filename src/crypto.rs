//! Address primitives for the unfreeze ledger

use crate::error::ChainError;
use sha2::{Digest, Sha256};

/// Length of an encoded account address: one network prefix byte plus a
/// 20-byte body.
pub const ADDRESS_SIZE: usize = 21;

/// Prefix byte of mainnet addresses.
pub const MAINNET_ADDRESS_PREFIX: u8 = 0x41;

/// Prefix byte of testnet addresses.
pub const TESTNET_ADDRESS_PREFIX: u8 = 0xa0;

/// Fixed-size account address. Accounts are keyed by this in every store.
pub type Address = [u8; ADDRESS_SIZE];

/// Returns true when `bytes` is a well-formed address for the network
/// identified by `prefix`.
pub fn address_valid(bytes: &[u8], prefix: u8) -> bool {
    if bytes.is_empty() {
        tracing::debug!("address is empty");
        return false;
    }
    if bytes.len() != ADDRESS_SIZE {
        tracing::debug!(
            "address length must be {}, got {}",
            ADDRESS_SIZE,
            bytes.len()
        );
        return false;
    }
    if bytes[0] != prefix {
        tracing::debug!(
            "address prefix must be {:#04x}, got {:#04x}",
            prefix,
            bytes[0]
        );
        return false;
    }
    true
}

/// Converts raw bytes into an address after the well-formedness check.
pub fn address_from_bytes(bytes: &[u8], prefix: u8) -> Result<Address, ChainError> {
    if !address_valid(bytes, prefix) {
        return Err(ChainError::InvalidAddress(hex::encode(bytes)));
    }
    bytes
        .try_into()
        .map_err(|_| ChainError::InvalidAddress(hex::encode(bytes)))
}

/// Derives an address from a string by hashing it. Useful for tests and
/// debugging.
pub fn address_from_string(s: &str, prefix: u8) -> Address {
    let digest = Sha256::digest(s.as_bytes());
    let mut address = [0u8; ADDRESS_SIZE];
    address[0] = prefix;
    address[1..].copy_from_slice(&digest[digest.len() - (ADDRESS_SIZE - 1)..]);
    address
}

/// Convert an address to a hex string for display.
pub fn address_to_hex(addr: &Address) -> String {
    hex::encode(addr)
}

/// Hex rendering of arbitrary address bytes, used in error messages where
/// the input may not be a well-formed address.
pub fn readable_address(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
