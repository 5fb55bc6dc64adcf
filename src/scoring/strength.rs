//! Deck strength.
//!
//! For each archetype, every physical copy in the pool gets that archetype's
//! win rate and the best `cards_considered` copies are summed. The three
//! strongest archetypes are then blended 100% / 80% / 40% and scaled by 100.

use crate::models::{ArchetypeWinRateMap, ArchetypeWinRates, PoolSlot};

/// Copies counted per archetype
pub const DEFAULT_CARDS_CONSIDERED: usize = 60;

/// Weights of the best, second and third archetype
pub const ARCHETYPE_WEIGHTS: [f64; 3] = [1.0, 0.8, 0.4];

/// Raw strength of a pool in one archetype
pub fn archetype_strength(
    slots: &[PoolSlot],
    rates: Option<&ArchetypeWinRateMap>,
    cards_considered: usize,
) -> f64 {
    let mut copies: Vec<f64> = slots
        .iter()
        .flat_map(|slot| {
            let rate = rates
                .and_then(|r| r.get(&slot.card_name))
                .copied()
                .unwrap_or(0.0);
            std::iter::repeat(rate).take(slot.amount as usize)
        })
        .collect();

    copies.sort_by(|a, b| b.total_cmp(a));
    copies.iter().take(cards_considered).sum()
}

/// Blend per-archetype strengths. Missing second or third entries count as 0.
pub fn combine_top_archetypes(mut strengths: Vec<f64>) -> i64 {
    strengths.sort_by(|a, b| b.total_cmp(a));

    let blended: f64 = ARCHETYPE_WEIGHTS
        .iter()
        .enumerate()
        .map(|(i, weight)| strengths.get(i).copied().unwrap_or(0.0) * weight)
        .sum();

    (blended * 100.0).round() as i64
}

/// Strength score of a pool over the given archetypes
pub fn score(
    slots: &[PoolSlot],
    archetypes: &[&str],
    rates: &ArchetypeWinRates,
    cards_considered: usize,
) -> i64 {
    let strengths = archetypes
        .iter()
        .map(|archetype| archetype_strength(slots, rates.get(*archetype), cards_considered))
        .collect();

    combine_top_archetypes(strengths)
}
