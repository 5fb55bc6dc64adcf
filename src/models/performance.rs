use std::collections::HashMap;

use crate::api::CardPerformance;
use crate::models::Rarity;

/// Card name -> ever-drawn win rate in [0, 1] for one archetype
pub type ArchetypeWinRateMap = HashMap<String, f64>;

/// Archetype -> win rates, across every set processed
pub type ArchetypeWinRates = HashMap<String, ArchetypeWinRateMap>;

pub const TWO_COLOUR_ARCHETYPES: &[&str] =
    &["WU", "WB", "WR", "WG", "UB", "UR", "UG", "BR", "BG", "RG"];

pub const THREE_COLOUR_ARCHETYPES: &[&str] = &[
    "WUB", "WUR", "WUG", "BRW", "GWB", "WRG", "UBR", "UBG", "RGU", "BRG",
];

/// Sets with performance data, oldest first
pub const SET_RELEASE_ORDER: &[&str] = &[
    "DOM", "M19", "RNA", "GRN", "WAR", "M20", "ELD", "THB", "IKO", "M21", "AKR", "ZNR", "KLR",
    "KHM", "STX", "AFR", "MID", "VOW", "NEO", "SNC", "HBG",
];

/// Sets drafted as three-colour formats
pub const THREE_COLOUR_SETS: &[&str] = &["SNC"];

/// Archetypes to query and score for a set
pub fn archetypes_for(set: &str) -> Vec<&'static str> {
    let mut archetypes = TWO_COLOUR_ARCHETYPES.to_vec();
    if THREE_COLOUR_SETS.contains(&set.to_uppercase().as_str()) {
        archetypes.extend_from_slice(THREE_COLOUR_ARCHETYPES);
    }
    archetypes
}

/// Release order with the active set appended when it is not listed yet
pub fn release_order(current_set: &str) -> Vec<String> {
    let current = current_set.to_uppercase();
    let mut order: Vec<String> = SET_RELEASE_ORDER.iter().map(|s| s.to_string()).collect();
    if !order.contains(&current) {
        order.push(current);
    }
    order
}

/// Ever-drawn win rate, or 0 when the card was not drawn in strictly more
/// games than its rarity's threshold
pub fn filtered_win_rate(record: &CardPerformance, base_threshold: u64) -> f64 {
    let threshold = Rarity::parse(&record.rarity).prevalence_threshold(base_threshold);
    if record.ever_drawn_game_count > threshold {
        record.ever_drawn_win_rate.unwrap_or(0.0)
    } else {
        0.0
    }
}

pub fn win_rate_map(records: &[CardPerformance], base_threshold: u64) -> ArchetypeWinRateMap {
    records
        .iter()
        .map(|r| (r.name.clone(), filtered_win_rate(r, base_threshold)))
        .collect()
}

/// Colour label for a performance record: single letter, gold or colourless
pub fn colour_label(record: &CardPerformance) -> &str {
    match record.color.chars().count() {
        0 => "colourless",
        1 => record.color.as_str(),
        _ => "gold",
    }
}
