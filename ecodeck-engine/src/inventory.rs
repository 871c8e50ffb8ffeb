//! Per-owner inventory ledger: the single writer of owned-card quantities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::CardId;
use crate::engine::EconomyError;

/// Owned card quantities for one owner. Entries are created on first credit
/// and persist at zero after spends, so collection views can still show a
/// card the owner ran out of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Inventory {
    #[serde(default)]
    entries: BTreeMap<CardId, u32>,
}

impl Inventory {
    /// Owned quantity of a card, zero when no entry exists.
    #[must_use]
    pub fn quantity_of(&self, card: CardId) -> u32 {
        self.entries.get(&card).copied().unwrap_or(0)
    }

    /// Add `n` copies, creating the entry on first acquisition.
    pub fn credit(&mut self, card: CardId, n: u32) {
        let quantity = self.entries.entry(card).or_insert(0);
        *quantity = quantity.saturating_add(n);
    }

    /// Remove `n` copies. The quantity never goes below zero and a failed
    /// debit creates no entry.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientInventory` when fewer than `n` copies are owned.
    pub fn debit(&mut self, card: CardId, n: u32) -> Result<(), EconomyError> {
        let available = self.quantity_of(card);
        if available < n {
            return Err(EconomyError::InsufficientInventory {
                card,
                requested: n,
                available,
            });
        }
        if n > 0 {
            self.entries.insert(card, available - n);
        }
        Ok(())
    }

    /// All entries in card-id order, zero-quantity rows included.
    pub fn entries(&self) -> impl Iterator<Item = (CardId, u32)> + '_ {
        self.entries.iter().map(|(&card, &quantity)| (card, quantity))
    }

    /// Number of distinct cards ever acquired.
    #[must_use]
    pub fn distinct_cards(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
