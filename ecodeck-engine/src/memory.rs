//! Bundled in-memory wallet and ledger store.
//!
//! Mutex-guarded maps behind `Arc`, so clones share state. These back
//! single-process deployments and every test in the crate; a database-backed
//! deployment implements the same traits against its own rows.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};

use crate::{Coins, LedgerStore, OwnerId, OwnerLedger, WalletError, WalletService};

/// In-memory per-owner coin balances.
#[derive(Debug, Clone, Default)]
pub struct MemoryWallet {
    balances: Arc<Mutex<HashMap<OwnerId, Coins>>>,
}

impl MemoryWallet {
    /// Set an owner's balance directly. Account provisioning and test setup
    /// both go through here.
    pub fn set_balance(&self, owner: OwnerId, coins: Coins) {
        let mut balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        balances.insert(owner, coins);
    }
}

impl WalletService for MemoryWallet {
    fn balance(&self, owner: OwnerId) -> Result<Coins, WalletError> {
        let balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(balances.get(&owner).copied().unwrap_or(0))
    }

    fn debit(&self, owner: OwnerId, amount: Coins) -> Result<(), WalletError> {
        let mut balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        let balance = balances.entry(owner).or_insert(0);
        if *balance < amount {
            return Err(WalletError::InsufficientFunds {
                required: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        Ok(())
    }

    fn credit(&self, owner: OwnerId, amount: Coins) -> Result<(), WalletError> {
        let mut balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        let balance = balances.entry(owner).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(())
    }
}

/// In-memory store for the per-owner economy rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    rows: Arc<Mutex<HashMap<OwnerId, OwnerLedger>>>,
}

impl LedgerStore for MemoryLedger {
    type Error = Infallible;

    fn load(&self, owner: OwnerId) -> Result<Option<OwnerLedger>, Self::Error> {
        let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(rows.get(&owner).cloned())
    }

    fn save(&self, owner: OwnerId, ledger: &OwnerLedger) -> Result<(), Self::Error> {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        rows.insert(owner, ledger.clone());
        Ok(())
    }
}
