//! Operation orchestration: pack opening, merge staging, and activation.
//!
//! Every mutating operation for an owner runs serialized behind that owner's
//! lock, works on a loaded copy of the owner's rows, and commits with a
//! single save. The only state committed outside that save is the wallet
//! debit of a pack purchase, which is compensated with a refund when a later
//! step fails.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::catalog::{Card, CardId, Catalog, Pack, PackId, Rarity};
use crate::merge::{MERGE_SLOT_COUNT, MergeSlots};
use crate::rewards;
use crate::{Coins, LedgerStore, OwnerId, OwnerLedger, WalletError, WalletService};

/// Every recoverable outcome an economy operation can surface. Callers map
/// these to user-facing messages; none of them is process-fatal.
#[derive(Debug, Error)]
pub enum EconomyError {
    #[error("unknown pack {0}")]
    InvalidPack(PackId),
    #[error("unknown card {0}")]
    UnknownCard(CardId),
    #[error("insufficient funds: {required} coins required, {available} available")]
    InsufficientFunds { required: Coins, available: Coins },
    #[error("the catalog has no {0} cards")]
    EmptyRarityBucket(Rarity),
    #[error("all five merge slots are occupied")]
    SlotsFull,
    #[error("staged cards are {staged}, cannot stage a {offered} card")]
    RarityMismatch { staged: Rarity, offered: Rarity },
    #[error("card {card}: {requested} copies requested, {available} owned")]
    InsufficientInventory {
        card: CardId,
        requested: u32,
        available: u32,
    },
    #[error("card {0} is not staged in any merge slot")]
    CardNotInSlot(CardId),
    #[error("merge needs five staged cards, only {occupied} staged")]
    SlotsNotFull { occupied: usize },
    #[error("{0} is already the highest rarity")]
    MaxTierReached(Rarity),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

fn wallet_to_economy(err: WalletError) -> EconomyError {
    match err {
        WalletError::InsufficientFunds {
            required,
            available,
        } => EconomyError::InsufficientFunds {
            required,
            available,
        },
        WalletError::Backend(err) => EconomyError::Backend(err),
    }
}

/// Main engine for running economy operations against a catalog, a wallet
/// service, and a ledger store.
pub struct CardEngine<W, S>
where
    W: WalletService,
    S: LedgerStore,
{
    catalog: Catalog,
    wallet: W,
    store: S,
    locks: Mutex<HashMap<OwnerId, Arc<Mutex<()>>>>,
    rng: Mutex<SmallRng>,
}

impl<W, S> CardEngine<W, S>
where
    W: WalletService,
    S: LedgerStore,
{
    /// Create an engine with an entropy-seeded RNG.
    pub fn new(catalog: Catalog, wallet: W, store: S) -> Self {
        Self::with_rng(catalog, wallet, store, SmallRng::from_entropy())
    }

    /// Create an engine whose draws replay deterministically for a seed.
    pub fn with_rng_seed(catalog: Catalog, wallet: W, store: S, seed: u64) -> Self {
        Self::with_rng(catalog, wallet, store, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Catalog, wallet: W, store: S, rng: SmallRng) -> Self {
        Self {
            catalog,
            wallet,
            store,
            locks: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    /// The read-only catalog this engine draws from.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The wallet service. External reward paths (challenge completions)
    /// credit coins through this.
    #[must_use]
    pub const fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Current coin balance of an owner.
    ///
    /// # Errors
    ///
    /// Returns `Backend` when the wallet cannot be read.
    pub fn balance(&self, owner: OwnerId) -> Result<Coins, EconomyError> {
        self.wallet.balance(owner).map_err(wallet_to_economy)
    }

    /// Open a pack: debit its cost, draw a tier from its odds, draw a card
    /// of that tier, and credit the card to the owner's inventory.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPack` for an unknown or odds-less pack,
    /// `InsufficientFunds` when the balance is below the cost, and
    /// `EmptyRarityBucket` when the drawn tier has no cards; the debit is
    /// refunded before the draw error surfaces.
    pub fn open_pack(&self, owner: OwnerId, pack_id: PackId) -> Result<Card, EconomyError> {
        let owner_lock = self.lock_owner(owner);
        let _serialized = owner_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let pack = self
            .catalog
            .pack(pack_id)
            .ok_or(EconomyError::InvalidPack(pack_id))?;
        if pack.odds.is_empty() {
            // no declared odds, nothing to draw from
            return Err(EconomyError::InvalidPack(pack_id));
        }

        self.wallet
            .debit(owner, pack.cost)
            .map_err(wallet_to_economy)?;

        // Past the debit, every failure refunds it before surfacing.
        let drawn = match self.draw_from_pack(pack) {
            Ok(card) => card,
            Err(err) => {
                self.refund(owner, pack.cost, "pack draw failed");
                return Err(err);
            }
        };

        let mut ledger = match self.load_ledger(owner) {
            Ok(ledger) => ledger,
            Err(err) => {
                self.refund(owner, pack.cost, "ledger load failed");
                return Err(err);
            }
        };
        ledger.inventory.credit(drawn.id, 1);
        if let Err(err) = self.save_ledger(owner, &ledger) {
            self.refund(owner, pack.cost, "ledger save failed");
            return Err(err);
        }

        info!(
            "owner {owner} opened {} and drew {} ({})",
            pack.title, drawn.title, drawn.rarity
        );
        Ok(drawn)
    }

    /// Stage an owned card into the lowest-index empty merge slot, debiting
    /// one copy. Returns the filled slot index.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCard`, `SlotsFull`, `RarityMismatch` against the
    /// staged tier, or `InsufficientInventory` when no copy is owned.
    pub fn place_card(&self, owner: OwnerId, card_id: CardId) -> Result<usize, EconomyError> {
        let owner_lock = self.lock_owner(owner);
        let _serialized = owner_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let card = self
            .catalog
            .card(card_id)
            .ok_or(EconomyError::UnknownCard(card_id))?;
        let mut ledger = self.load_ledger(owner)?;
        if ledger.slots.is_full() {
            return Err(EconomyError::SlotsFull);
        }
        if let Some(staged) = self.staged_rarity(&ledger.slots)? {
            if staged != card.rarity {
                return Err(EconomyError::RarityMismatch {
                    staged,
                    offered: card.rarity,
                });
            }
        }
        ledger.inventory.debit(card_id, 1)?;
        let slot = ledger.slots.place(card_id)?;
        self.save_ledger(owner, &ledger)?;

        debug!("owner {owner} staged card {card_id} in slot {slot}");
        Ok(slot)
    }

    /// Pull a staged card back out of the merge slots, crediting the copy
    /// back to the inventory.
    ///
    /// # Errors
    ///
    /// Returns `CardNotInSlot` when the card is not staged; nothing changes.
    pub fn remove_card(&self, owner: OwnerId, card_id: CardId) -> Result<(), EconomyError> {
        let owner_lock = self.lock_owner(owner);
        let _serialized = owner_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut ledger = self.load_ledger(owner)?;
        let slot = ledger.slots.remove(card_id)?;
        ledger.inventory.credit(card_id, 1);
        self.save_ledger(owner, &ledger)?;

        debug!("owner {owner} unstaged card {card_id} from slot {slot}");
        Ok(())
    }

    /// Consume five staged same-tier cards and credit one card drawn from
    /// the next tier up. The staged copies were already debited when placed,
    /// so clearing the slots destroys them.
    ///
    /// # Errors
    ///
    /// Returns `SlotsNotFull` below five staged cards, `MaxTierReached` for
    /// a mythic stage, and `EmptyRarityBucket` when the next tier has no
    /// cards; all three leave every slot and inventory row untouched.
    pub fn activate_merge(&self, owner: OwnerId) -> Result<Card, EconomyError> {
        let owner_lock = self.lock_owner(owner);
        let _serialized = owner_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut ledger = self.load_ledger(owner)?;
        let occupied = ledger.slots.occupied();
        if occupied < MERGE_SLOT_COUNT {
            return Err(EconomyError::SlotsNotFull { occupied });
        }
        let staged = match ledger.slots.staged() {
            Some(id) => {
                self.catalog
                    .card(id)
                    .ok_or(EconomyError::UnknownCard(id))?
                    .rarity
            }
            None => return Err(EconomyError::SlotsNotFull { occupied }),
        };
        let Some(upgrade) = staged.next() else {
            return Err(EconomyError::MaxTierReached(staged));
        };

        // Draw before mutating, so a failed draw leaves the stage intact.
        let drawn = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rewards::draw_card(&self.catalog, upgrade, &mut *rng).cloned()?
        };

        ledger.slots.clear();
        ledger.inventory.credit(drawn.id, 1);
        self.save_ledger(owner, &ledger)?;

        info!(
            "owner {owner} merged five {staged} cards into {} ({upgrade})",
            drawn.title
        );
        Ok(drawn)
    }

    /// Read-only snapshot of the merge slots, resolved to catalog cards.
    ///
    /// # Errors
    ///
    /// Returns `Backend` when the ledger store cannot be read.
    pub fn merge_state(
        &self,
        owner: OwnerId,
    ) -> Result<[Option<Card>; MERGE_SLOT_COUNT], EconomyError> {
        let ledger = self.load_ledger(owner)?;
        Ok(std::array::from_fn(|index| {
            ledger
                .slots
                .get(index)
                .and_then(|id| self.catalog.card(id).cloned())
        }))
    }

    /// The owner's collection: every inventory row resolved to its card,
    /// zero-quantity rows included.
    ///
    /// # Errors
    ///
    /// Returns `Backend` when the ledger store cannot be read.
    pub fn collection(&self, owner: OwnerId) -> Result<Vec<(Card, u32)>, EconomyError> {
        let ledger = self.load_ledger(owner)?;
        let mut cards = Vec::with_capacity(ledger.inventory.distinct_cards());
        for (id, quantity) in ledger.inventory.entries() {
            if let Some(card) = self.catalog.card(id) {
                cards.push((card.clone(), quantity));
            }
        }
        Ok(cards)
    }

    /// Owned quantity of one card, zero when the owner never acquired it.
    ///
    /// # Errors
    ///
    /// Returns `Backend` when the ledger store cannot be read.
    pub fn quantity_of(&self, owner: OwnerId, card_id: CardId) -> Result<u32, EconomyError> {
        Ok(self.load_ledger(owner)?.inventory.quantity_of(card_id))
    }

    fn draw_from_pack(&self, pack: &Pack) -> Result<Card, EconomyError> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(rarity) = rewards::draw_tier(&pack.odds, &mut *rng) else {
            return Err(EconomyError::InvalidPack(pack.id));
        };
        rewards::draw_card(&self.catalog, rarity, &mut *rng).cloned()
    }

    fn staged_rarity(&self, slots: &MergeSlots) -> Result<Option<Rarity>, EconomyError> {
        match slots.staged() {
            Some(id) => {
                let card = self
                    .catalog
                    .card(id)
                    .ok_or(EconomyError::UnknownCard(id))?;
                Ok(Some(card.rarity))
            }
            None => Ok(None),
        }
    }

    fn refund(&self, owner: OwnerId, amount: Coins, reason: &str) {
        warn!("refunding {amount} coins to owner {owner}: {reason}");
        if let Err(err) = self.wallet.credit(owner, amount) {
            error!("refund of {amount} coins to owner {owner} failed: {err}");
        }
    }

    /// The explicit get-or-create for an owner's rows.
    fn load_ledger(&self, owner: OwnerId) -> Result<OwnerLedger, EconomyError> {
        let loaded = self
            .store
            .load(owner)
            .map_err(|err| EconomyError::Backend(err.into()))?;
        Ok(loaded.unwrap_or_default())
    }

    fn save_ledger(&self, owner: OwnerId, ledger: &OwnerLedger) -> Result<(), EconomyError> {
        self.store
            .save(owner, ledger)
            .map_err(|err| EconomyError::Backend(err.into()))
    }

    fn lock_owner(&self, owner: OwnerId) -> Arc<Mutex<()>> {
        let mut table = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(table.entry(owner).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryLedger, MemoryWallet};
    use std::collections::BTreeMap;

    const OWNER: OwnerId = OwnerId(1);
    const BASIC_PACK: PackId = PackId(1);
    const ANCIENT_TREE: CardId = CardId(1);
    const BUSH: CardId = CardId(2);
    const CACTUS: CardId = CardId(3);
    const OAK_TREE: CardId = CardId(8);

    fn standard_engine(seed: u64) -> CardEngine<MemoryWallet, MemoryLedger> {
        CardEngine::with_rng_seed(
            Catalog::standard(),
            MemoryWallet::default(),
            MemoryLedger::default(),
            seed,
        )
    }

    fn funded_engine(coins: Coins, seed: u64) -> CardEngine<MemoryWallet, MemoryLedger> {
        let engine = standard_engine(seed);
        engine.wallet().set_balance(OWNER, coins);
        engine
    }

    fn engine_with_inventory(
        entries: &[(CardId, u32)],
        seed: u64,
    ) -> CardEngine<MemoryWallet, MemoryLedger> {
        let store = MemoryLedger::default();
        let mut ledger = OwnerLedger::default();
        for &(card, quantity) in entries {
            ledger.inventory.credit(card, quantity);
        }
        store.save(OWNER, &ledger).expect("memory save succeeds");
        CardEngine::with_rng_seed(
            Catalog::standard(),
            MemoryWallet::default(),
            store,
            seed,
        )
    }

    fn mini_card(id: u32, rarity: Rarity) -> Card {
        Card {
            id: CardId(id),
            title: format!("card-{id}"),
            description: String::new(),
            rarity,
            image: String::new(),
        }
    }

    fn single_tier_pack(id: u32, cost: Coins, rarity: Rarity) -> Pack {
        Pack {
            id: PackId(id),
            title: format!("pack-{id}"),
            cost,
            odds: BTreeMap::from([(rarity, 1.0)]),
            image: String::new(),
            color_class: String::new(),
        }
    }

    #[test]
    fn open_pack_debits_cost_and_credits_one_card() {
        let engine = funded_engine(9_999_999, 0xEC0);
        let card = engine.open_pack(OWNER, BASIC_PACK).expect("funded open succeeds");

        assert_eq!(engine.balance(OWNER).expect("balance reads"), 9_999_979);
        assert_ne!(card.rarity, Rarity::Mythic, "packs never sell mythic");
        assert_eq!(engine.quantity_of(OWNER, card.id).expect("quantity reads"), 1);
        let collection = engine.collection(OWNER).expect("collection reads");
        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].0.id, card.id);
    }

    #[test]
    fn open_pack_with_empty_wallet_changes_nothing() {
        let engine = standard_engine(0xEC0);
        match engine.open_pack(OWNER, BASIC_PACK) {
            Err(EconomyError::InsufficientFunds {
                required,
                available,
            }) => {
                assert_eq!(required, 20);
                assert_eq!(available, 0);
            }
            other => panic!("expected insufficient funds, got {other:?}"),
        }
        assert_eq!(engine.balance(OWNER).expect("balance reads"), 0);
        assert!(engine.collection(OWNER).expect("collection reads").is_empty());
    }

    #[test]
    fn open_pack_rejects_unknown_packs_before_the_debit() {
        let engine = funded_engine(50, 0xEC0);
        match engine.open_pack(OWNER, PackId(42)) {
            Err(EconomyError::InvalidPack(pack)) => assert_eq!(pack, PackId(42)),
            other => panic!("expected invalid pack, got {other:?}"),
        }
        assert_eq!(engine.balance(OWNER).expect("balance reads"), 50);
    }

    #[test]
    fn empty_rarity_bucket_refunds_the_debit() {
        // A pack that always rolls legendary, in a catalog without any.
        let catalog = Catalog {
            cards: vec![mini_card(1, Rarity::Common)],
            packs: vec![single_tier_pack(1, 30, Rarity::Legendary)],
        };
        let wallet = MemoryWallet::default();
        wallet.set_balance(OWNER, 100);
        let engine = CardEngine::with_rng_seed(catalog, wallet, MemoryLedger::default(), 0xEC0);

        match engine.open_pack(OWNER, PackId(1)) {
            Err(EconomyError::EmptyRarityBucket(rarity)) => {
                assert_eq!(rarity, Rarity::Legendary);
            }
            other => panic!("expected empty bucket, got {other:?}"),
        }
        assert_eq!(engine.balance(OWNER).expect("balance reads"), 100);
        assert!(engine.collection(OWNER).expect("collection reads").is_empty());
    }

    #[test]
    fn place_then_remove_restores_quantity_and_slots() {
        let engine = engine_with_inventory(&[(BUSH, 3)], 7);

        let slot = engine.place_card(OWNER, BUSH).expect("owned card stages");
        assert_eq!(slot, 0);
        assert_eq!(engine.quantity_of(OWNER, BUSH).expect("quantity reads"), 2);

        engine.remove_card(OWNER, BUSH).expect("staged card unstages");
        assert_eq!(engine.quantity_of(OWNER, BUSH).expect("quantity reads"), 3);
        let state = engine.merge_state(OWNER).expect("state reads");
        assert!(state.iter().all(Option::is_none));
    }

    #[test]
    fn place_enforces_slot_homogeneity() {
        let engine = engine_with_inventory(&[(CACTUS, 1), (BUSH, 1)], 7);
        engine.place_card(OWNER, CACTUS).expect("rare card stages");

        match engine.place_card(OWNER, BUSH) {
            Err(EconomyError::RarityMismatch { staged, offered }) => {
                assert_eq!(staged, Rarity::Rare);
                assert_eq!(offered, Rarity::Common);
            }
            other => panic!("expected rarity mismatch, got {other:?}"),
        }
        assert_eq!(engine.quantity_of(OWNER, BUSH).expect("quantity reads"), 1);
        let state = engine.merge_state(OWNER).expect("state reads");
        assert_eq!(state.iter().flatten().count(), 1);
    }

    #[test]
    fn place_requires_an_owned_copy() {
        let engine = engine_with_inventory(&[(BUSH, 0)], 7);
        match engine.place_card(OWNER, BUSH) {
            Err(EconomyError::InsufficientInventory {
                card, available, ..
            }) => {
                assert_eq!(card, BUSH);
                assert_eq!(available, 0);
            }
            other => panic!("expected insufficient inventory, got {other:?}"),
        }
    }

    #[test]
    fn place_rejects_cards_missing_from_the_catalog() {
        let engine = standard_engine(7);
        match engine.place_card(OWNER, CardId(999)) {
            Err(EconomyError::UnknownCard(card)) => assert_eq!(card, CardId(999)),
            other => panic!("expected unknown card, got {other:?}"),
        }
    }

    #[test]
    fn sixth_placement_hits_the_capacity_wall() {
        let engine = engine_with_inventory(&[(BUSH, 6)], 7);
        for _ in 0..MERGE_SLOT_COUNT {
            engine.place_card(OWNER, BUSH).expect("slot open");
        }
        match engine.place_card(OWNER, BUSH) {
            Err(EconomyError::SlotsFull) => {}
            other => panic!("expected full slots, got {other:?}"),
        }
        assert_eq!(engine.quantity_of(OWNER, BUSH).expect("quantity reads"), 1);
    }

    #[test]
    fn merge_turns_five_commons_into_one_rare() {
        let engine = engine_with_inventory(&[(BUSH, 5)], 11);
        for placed in 0..MERGE_SLOT_COUNT {
            engine.place_card(OWNER, BUSH).expect("owned card stages");
            assert_eq!(
                engine.quantity_of(OWNER, BUSH).expect("quantity reads"),
                (4 - placed) as u32
            );
        }

        let upgraded = engine.activate_merge(OWNER).expect("full stage merges");
        assert_eq!(upgraded.rarity, Rarity::Rare);

        let state = engine.merge_state(OWNER).expect("state reads");
        assert!(state.iter().all(Option::is_none));
        assert_eq!(engine.quantity_of(OWNER, BUSH).expect("quantity reads"), 0);
        assert_eq!(
            engine.quantity_of(OWNER, upgraded.id).expect("quantity reads"),
            1
        );
        // The spent commons keep their zero-quantity row.
        let collection = engine.collection(OWNER).expect("collection reads");
        assert!(collection.iter().any(|(card, quantity)| card.id == BUSH && *quantity == 0));
    }

    #[test]
    fn merge_requires_every_slot_filled() {
        let engine = engine_with_inventory(&[(BUSH, 3)], 11);
        for _ in 0..3 {
            engine.place_card(OWNER, BUSH).expect("owned card stages");
        }
        match engine.activate_merge(OWNER) {
            Err(EconomyError::SlotsNotFull { occupied }) => assert_eq!(occupied, 3),
            other => panic!("expected unfilled slots, got {other:?}"),
        }
        let state = engine.merge_state(OWNER).expect("state reads");
        assert_eq!(state.iter().flatten().count(), 3);
    }

    #[test]
    fn merge_at_the_top_of_the_ladder_is_rejected() {
        let engine = engine_with_inventory(&[(ANCIENT_TREE, 5)], 11);
        for _ in 0..MERGE_SLOT_COUNT {
            engine.place_card(OWNER, ANCIENT_TREE).expect("owned card stages");
        }

        match engine.activate_merge(OWNER) {
            Err(EconomyError::MaxTierReached(rarity)) => assert_eq!(rarity, Rarity::Mythic),
            other => panic!("expected max tier, got {other:?}"),
        }
        // Nothing moved: the stage is still full and no reward appeared.
        let state = engine.merge_state(OWNER).expect("state reads");
        assert_eq!(state.iter().flatten().count(), MERGE_SLOT_COUNT);
        assert_eq!(
            engine.quantity_of(OWNER, ANCIENT_TREE).expect("quantity reads"),
            0
        );
        let collection = engine.collection(OWNER).expect("collection reads");
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn merge_with_an_empty_upgrade_bucket_leaves_the_stage_intact() {
        // Epic cards exist, the legendary bucket above them is empty.
        let catalog = Catalog {
            cards: vec![mini_card(1, Rarity::Epic)],
            packs: vec![],
        };
        let store = MemoryLedger::default();
        let mut ledger = OwnerLedger::default();
        ledger.inventory.credit(CardId(1), 5);
        store.save(OWNER, &ledger).expect("memory save succeeds");
        let engine =
            CardEngine::with_rng_seed(catalog, MemoryWallet::default(), store, 11);
        for _ in 0..MERGE_SLOT_COUNT {
            engine.place_card(OWNER, CardId(1)).expect("owned card stages");
        }

        match engine.activate_merge(OWNER) {
            Err(EconomyError::EmptyRarityBucket(rarity)) => {
                assert_eq!(rarity, Rarity::Legendary);
            }
            other => panic!("expected empty bucket, got {other:?}"),
        }
        let state = engine.merge_state(OWNER).expect("state reads");
        assert_eq!(state.iter().flatten().count(), MERGE_SLOT_COUNT);
    }

    #[test]
    fn merge_state_resolves_staged_cards() {
        let engine = engine_with_inventory(&[(OAK_TREE, 2)], 11);
        engine.place_card(OWNER, OAK_TREE).expect("owned card stages");
        engine.place_card(OWNER, OAK_TREE).expect("owned card stages");

        let state = engine.merge_state(OWNER).expect("state reads");
        assert_eq!(state[0].as_ref().map(|c| c.title.as_str()), Some("Oak Tree"));
        assert_eq!(state[1].as_ref().map(|c| c.id), Some(OAK_TREE));
        assert!(state[2..].iter().all(Option::is_none));
    }

    #[test]
    fn same_seed_replays_the_same_draws() {
        let first = funded_engine(1_000, 0x5EED);
        let second = funded_engine(1_000, 0x5EED);
        for _ in 0..10 {
            let a = first.open_pack(OWNER, BASIC_PACK).expect("funded open succeeds");
            let b = second.open_pack(OWNER, BASIC_PACK).expect("funded open succeeds");
            assert_eq!(a.id, b.id);
        }
    }
}
