//! Reward resolution: weighted tier draw, then uniform card draw.
//!
//! Both draws are pure functions of the catalog and the caller-supplied RNG,
//! so every consumer can make them deterministic by seeding.

use std::collections::BTreeMap;

use log::debug;
use rand::Rng;

use crate::catalog::{Card, Catalog, Rarity};
use crate::engine::EconomyError;

/// Draw a rarity from a tier distribution.
///
/// Walks the declared tiers in ascending ladder order, accumulating
/// probability, and returns the first tier whose cumulative sum exceeds the
/// roll. When rounding (or a distribution summing below one) leaves the roll
/// unmatched, the last declared tier is returned. `None` only when the
/// distribution declares no tiers at all.
pub fn draw_tier(odds: &BTreeMap<Rarity, f64>, rng: &mut impl Rng) -> Option<Rarity> {
    if odds.is_empty() {
        return None;
    }

    let roll: f64 = rng.gen_range(0.0..1.0);
    let mut cumulative = 0.0;
    let mut last = None;
    for (&rarity, &probability) in odds {
        cumulative += probability;
        if roll < cumulative {
            debug!("tier draw: roll {roll:.4} -> {rarity}");
            return Some(rarity);
        }
        last = Some(rarity);
    }

    debug!("tier draw: roll {roll:.4} fell past the declared odds, using last tier");
    last
}

/// Draw one card uniformly from a rarity bucket of the catalog.
///
/// # Errors
///
/// Returns `EmptyRarityBucket` when the catalog holds no cards of that tier.
pub fn draw_card<'a>(
    catalog: &'a Catalog,
    rarity: Rarity,
    rng: &mut impl Rng,
) -> Result<&'a Card, EconomyError> {
    let bucket = catalog.cards_of(rarity);
    if bucket.is_empty() {
        return Err(EconomyError::EmptyRarityBucket(rarity));
    }
    let index = rng.gen_range(0..bucket.len());
    debug!("card draw: {} of {} candidates at {rarity}", index, bucket.len());
    Ok(bucket[index])
}
