use std::collections::HashSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{PoolFacts, PoolSlot};

/// Hand-picked card lists matched against every pool
#[derive(Debug, Clone, Default)]
pub struct CuratedLists {
    pub bombs: HashSet<String>,
    pub duds: HashSet<String>,
    pub top_commons: HashSet<String>,
}

/// Facts for one pool. Basic lands are skipped entirely and slots without
/// resolved metadata only count toward the curated lists. `strength` is
/// left at 0 for the caller to fill in.
pub fn gather(slots: &[PoolSlot], curated: &CuratedLists) -> PoolFacts {
    let mut facts = PoolFacts::default();
    let mut cmc = 0.0_f64;
    let mut cost = Decimal::ZERO;

    for slot in slots {
        let amount = i64::from(slot.amount);

        let card = match &slot.card {
            Some(card) if card.is_basic_land() => continue,
            Some(card) => Some(card),
            None => None,
        };

        facts.unique_cards += 1;

        if curated.bombs.contains(&slot.card_name) {
            facts.bombs += amount;
        }
        if curated.duds.contains(&slot.card_name) {
            facts.duds += amount;
        }
        if curated.top_commons.contains(&slot.card_name) {
            facts.top_commons += amount;
        }

        let Some(card) = card else {
            continue;
        };

        for (colour, count) in [
            ("W", &mut facts.white),
            ("U", &mut facts.blue),
            ("B", &mut facts.black),
            ("R", &mut facts.red),
            ("G", &mut facts.green),
        ] {
            if card.is_colour(colour, true) {
                *count += amount;
            }
        }

        if card.is_multicolour() {
            facts.gold += amount;
        }
        if card.is_colourless() && !card.is_land() {
            facts.colourless += amount;
        }
        if card.is_land() {
            facts.non_basic_land += amount;
        }
        if slot.amount >= 4 {
            facts.playsets += 1;
        }
        // Legendary creatures, one per distinct card
        if card.has_type("Legendary Creature") {
            facts.commanders += 1;
        }

        cost += card.price_or_zero() * Decimal::from(slot.amount);
        cmc += card.cmc * slot.amount as f64;
    }

    facts.cmc = cmc.round() as i64;
    facts.cost_usd = cost
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);

    facts
}
