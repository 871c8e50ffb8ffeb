//! Catalog reference data: rarity tiers, collectible cards, and purchasable packs.
//!
//! The catalog is owned by an external admin workflow and read-only to the
//! engine. It can be parsed from JSON or built from the standard starter set.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Coins;

/// Slack allowed when checking that pack odds sum to at most one.
const ODDS_SUM_EPSILON: f64 = 1e-9;

/// Rarity tier ladder. The ordering is total: each tier upgrades into the
/// next one, and mythic has no successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// All tiers in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Common,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
        Self::Mythic,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
            Self::Mythic => "mythic",
        }
    }

    /// One-based position on the ladder.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Common => 1,
            Self::Rare => 2,
            Self::Epic => 3,
            Self::Legendary => 4,
            Self::Mythic => 5,
        }
    }

    /// The tier directly above this one, `None` at the top of the ladder.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Common => Some(Self::Rare),
            Self::Rare => Some(Self::Epic),
            Self::Epic => Some(Self::Legendary),
            Self::Legendary => Some(Self::Mythic),
            Self::Mythic => None,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Self::Common),
            "rare" => Ok(Self::Rare),
            "epic" => Ok(Self::Epic),
            "legendary" => Ok(Self::Legendary),
            "mythic" => Ok(Self::Mythic),
            _ => Err(()),
        }
    }
}

impl From<Rarity> for String {
    fn from(value: Rarity) -> Self {
        value.as_str().to_string()
    }
}

/// Identifier of a card in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CardId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Identifier of a pack in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackId(pub u32);

impl fmt::Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PackId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A collectible card. Immutable catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub image: String,
}

/// A purchasable pack: a coin cost plus a probability distribution over the
/// four sellable tiers. Odds are keyed by tier, so iteration always walks the
/// ladder in ascending declared order; mythic cards are only reachable
/// through merging, never through a pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub id: PackId,
    pub title: String,
    pub cost: Coins,
    pub odds: BTreeMap<Rarity, f64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub color_class: String,
}

/// Errors raised when catalog data violates its integrity rules. These are
/// admin-tooling checks; the engine itself never runs them on the hot path.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate card id {0}")]
    DuplicateCardId(CardId),
    #[error("duplicate pack id {0}")]
    DuplicatePackId(PackId),
    #[error("pack {pack} costs nothing")]
    ZeroCost { pack: PackId },
    #[error("pack {pack} declares no tier odds")]
    MissingOdds { pack: PackId },
    #[error("pack {pack} sells {rarity} directly")]
    UnsellableRarity { pack: PackId, rarity: Rarity },
    #[error("pack {pack} odds for {rarity} out of range (got {value})")]
    OddsOutOfRange {
        pack: PackId,
        rarity: Rarity,
        value: f64,
    },
    #[error("pack {pack} odds sum to {sum}, expected at most 1")]
    OddsSumExceedsOne { pack: PackId, sum: f64 },
}

/// Container for the whole card catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub packs: Vec<Pack>,
}

impl Catalog {
    /// Create an empty catalog (useful for tests).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cards: Vec::new(),
            packs: Vec::new(),
        }
    }

    /// Load a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid catalog data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The standard starter catalog: seventeen cards across all five tiers
    /// and the three storefront packs.
    #[must_use]
    pub fn standard() -> Self {
        let cards = vec![
            card(1, "Ancient Tree", "Mythical Card forged from legendary cards", Rarity::Mythic, "cards/ancienttree.png"),
            card(2, "Bush", "A humble common bush", Rarity::Common, "cards/bush.png"),
            card(3, "Cactus", "A spiky cactus straight from the desert", Rarity::Rare, "cards/cactus.png"),
            card(4, "Cherry Blossom", "A blooming cherry blossom tree from the Sakura forest", Rarity::Legendary, "cards/cherryBlossom.png"),
            card(5, "Dandelion Patch", "A patch of common dandelions", Rarity::Common, "cards/dandelion.png"),
            card(6, "Golden Tree", "The legendary Golden tree", Rarity::Legendary, "cards/goldenTree.png"),
            card(7, "Maple Tree", "Found around Canada", Rarity::Legendary, "cards/mapleTree.png"),
            card(8, "Oak Tree", "A simple but gracious oak tree", Rarity::Epic, "cards/oakTree.png"),
            card(9, "Orange Tree", "Filled with plenty of ripe fruit", Rarity::Epic, "cards/orangeTree.png"),
            card(10, "Rainbow Flower", "Something you wish was actually real", Rarity::Rare, "cards/rainbowflower.png"),
            card(11, "Scarecrow", "Just a casual field scarecrow", Rarity::Epic, "cards/scarecrow.png"),
            card(12, "Starry Tree", "Straight from the milky way", Rarity::Epic, "cards/starryTree.png"),
            card(13, "Statue", "A head bust of an important historical recycler", Rarity::Epic, "cards/statue.png"),
            card(14, "Sunflower", "Shines bright in the fields", Rarity::Rare, "cards/sunflower.png"),
            card(15, "Tulip Patch", "A simple patch of tulips", Rarity::Rare, "cards/tulip.png"),
            card(16, "Log", "From a long lost oak tree", Rarity::Common, "cards/log.png"),
            card(17, "Olive Tree", "From the fields of ancient greece", Rarity::Epic, "cards/olivetree.png"),
        ];
        let packs = vec![
            pack(
                1,
                "Basic Pack",
                20,
                [(Rarity::Common, 0.5), (Rarity::Rare, 0.35), (Rarity::Epic, 0.1), (Rarity::Legendary, 0.05)],
                "packs/basicpack.png",
                "bronze",
            ),
            pack(
                2,
                "Rare Pack",
                45,
                [(Rarity::Common, 0.35), (Rarity::Rare, 0.35), (Rarity::Epic, 0.175), (Rarity::Legendary, 0.125)],
                "packs/rarepack.png",
                "silver",
            ),
            pack(
                3,
                "Icon Pack",
                100,
                [(Rarity::Common, 0.1), (Rarity::Rare, 0.4), (Rarity::Epic, 0.25), (Rarity::Legendary, 0.25)],
                "packs/iconpack.png",
                "gold",
            ),
        ];
        Self { cards, packs }
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Look up a pack by id.
    #[must_use]
    pub fn pack(&self, id: PackId) -> Option<&Pack> {
        self.packs.iter().find(|p| p.id == id)
    }

    /// All cards of one tier, in declared order.
    #[must_use]
    pub fn cards_of(&self, rarity: Rarity) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.rarity == rarity).collect()
    }

    /// All packs in declared order, for storefront listings.
    #[must_use]
    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    /// Check the catalog integrity rules admin tooling relies on: unique ids,
    /// non-zero pack costs, and well-formed odds that never sell the top tier.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut card_ids = HashSet::new();
        for card in &self.cards {
            if !card_ids.insert(card.id) {
                return Err(CatalogError::DuplicateCardId(card.id));
            }
        }

        let mut pack_ids = HashSet::new();
        for pack in &self.packs {
            if !pack_ids.insert(pack.id) {
                return Err(CatalogError::DuplicatePackId(pack.id));
            }
            if pack.cost == 0 {
                return Err(CatalogError::ZeroCost { pack: pack.id });
            }
            if pack.odds.is_empty() {
                return Err(CatalogError::MissingOdds { pack: pack.id });
            }
            let mut sum = 0.0;
            for (&rarity, &value) in &pack.odds {
                if rarity.next().is_none() {
                    return Err(CatalogError::UnsellableRarity {
                        pack: pack.id,
                        rarity,
                    });
                }
                if !(0.0..=1.0).contains(&value) {
                    return Err(CatalogError::OddsOutOfRange {
                        pack: pack.id,
                        rarity,
                        value,
                    });
                }
                sum += value;
            }
            if sum > 1.0 + ODDS_SUM_EPSILON {
                return Err(CatalogError::OddsSumExceedsOne { pack: pack.id, sum });
            }
        }
        Ok(())
    }
}

fn card(id: u32, title: &str, description: &str, rarity: Rarity, image: &str) -> Card {
    Card {
        id: CardId(id),
        title: title.to_string(),
        description: description.to_string(),
        rarity,
        image: image.to_string(),
    }
}

fn pack<const N: usize>(
    id: u32,
    title: &str,
    cost: Coins,
    odds: [(Rarity, f64); N],
    image: &str,
    color_class: &str,
) -> Pack {
    Pack {
        id: PackId(id),
        title: title.to_string(),
        cost,
        odds: BTreeMap::from(odds),
        image: image.to_string(),
        color_class: color_class.to_string(),
    }
}
