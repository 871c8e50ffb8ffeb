//! EcoDeck Card Economy Engine
//!
//! Platform-agnostic economy logic for EcoDeck: weighted pack opening, the
//! per-owner inventory ledger, and the five-slot merge that upgrades five
//! same-tier cards into one card of the next tier. The crate has no UI or
//! storage dependencies; callers plug in a wallet service and a ledger store
//! through the traits below.

pub mod catalog;
pub mod engine;
pub mod inventory;
pub mod memory;
pub mod merge;
pub mod rewards;

// Re-export commonly used types
pub use catalog::{Card, CardId, Catalog, CatalogError, Pack, PackId, Rarity};
pub use engine::{CardEngine, EconomyError};
pub use inventory::Inventory;
pub use memory::{MemoryLedger, MemoryWallet};
pub use merge::{MERGE_SLOT_COUNT, MergeSlots};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coin amount used by wallets and pack prices.
pub type Coins = u64;

/// Opaque account identifier. Owners are managed by an external account
/// system; the engine only keys its rows by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub u64);

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OwnerId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// The per-owner economy rows: the inventory entries and the merge staging
/// slots, persisted together so one save commits a whole operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OwnerLedger {
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub slots: MergeSlots,
}

/// Errors surfaced by a wallet service.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("insufficient funds: {required} coins required, {available} available")]
    InsufficientFunds { required: Coins, available: Coins },
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Trait for the external per-owner coin balance.
///
/// Implementations must apply each call atomically: `debit` checks and
/// subtracts in one step, and no call may leave a balance below zero.
pub trait WalletService {
    /// Current balance, zero for owners without a wallet row yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read.
    fn balance(&self, owner: OwnerId) -> Result<Coins, WalletError>;

    /// Remove `amount` coins.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` when the balance is below `amount`.
    fn debit(&self, owner: OwnerId, amount: Coins) -> Result<(), WalletError>;

    /// Add `amount` coins. Also the compensation path when a pack draw fails
    /// after its debit, and the deposit path for challenge rewards.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be written.
    fn credit(&self, owner: OwnerId, amount: Coins) -> Result<(), WalletError>;
}

/// Trait for persisting the per-owner economy rows.
/// Platform-specific implementations should provide this.
pub trait LedgerStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load one owner's rows, `None` before first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be loaded.
    fn load(&self, owner: OwnerId) -> Result<Option<OwnerLedger>, Self::Error>;

    /// Persist one owner's rows in a single step.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be saved.
    fn save(&self, owner: OwnerId, ledger: &OwnerLedger) -> Result<(), Self::Error>;
}
