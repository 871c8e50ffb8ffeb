//! Five-slot merge staging area.
//!
//! Slots fill lowest-index-first and clear in place; the occupied slots
//! always reference cards of one single rarity. The tier checks involving
//! card data live in the engine, which owns the catalog.

use serde::{Deserialize, Serialize};

use crate::catalog::CardId;
use crate::engine::EconomyError;

/// Number of cards consumed by one merge.
pub const MERGE_SLOT_COUNT: usize = 5;

/// Per-owner merge staging row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MergeSlots {
    #[serde(default)]
    slots: [Option<CardId>; MERGE_SLOT_COUNT],
}

impl MergeSlots {
    /// The raw slot array, index 0 first.
    #[must_use]
    pub const fn slots(&self) -> &[Option<CardId>; MERGE_SLOT_COUNT] {
        &self.slots
    }

    /// Card staged at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CardId> {
        self.slots.get(index).copied().flatten()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupied() == MERGE_SLOT_COUNT
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    /// Card in the lowest occupied slot. All occupied slots share its
    /// rarity, so this one card determines the staged tier.
    #[must_use]
    pub fn staged(&self) -> Option<CardId> {
        self.slots.iter().flatten().copied().next()
    }

    /// True when some slot holds this exact card.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.slots.iter().flatten().any(|&staged| staged == card)
    }

    /// Stage a card into the lowest-index empty slot and return that index.
    ///
    /// # Errors
    ///
    /// Returns `SlotsFull` when every slot is occupied.
    pub fn place(&mut self, card: CardId) -> Result<usize, EconomyError> {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(card);
                return Ok(index);
            }
        }
        Err(EconomyError::SlotsFull)
    }

    /// Clear the highest-index slot holding this exact card and return that
    /// index. The inverse of first-empty-ascending placement, so a place
    /// followed by a remove of the same card restores the prior layout.
    ///
    /// # Errors
    ///
    /// Returns `CardNotInSlot` when the card is not staged; nothing changes.
    pub fn remove(&mut self, card: CardId) -> Result<usize, EconomyError> {
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if *slot == Some(card) {
                *slot = None;
                return Ok(index);
            }
        }
        Err(EconomyError::CardNotInSlot(card))
    }

    /// Empty every slot. Used when a merge consumes the staged cards.
    pub fn clear(&mut self) {
        self.slots = [None; MERGE_SLOT_COUNT];
    }
}
