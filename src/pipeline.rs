use std::collections::BTreeSet;

use tracing::info;

use crate::api::sealeddeck::pool_url;
use crate::error::ResolveResult;
use crate::models::performance::archetypes_for;
use crate::models::pool::merge_slots;
use crate::models::{ArchetypeWinRates, PlayerPool, PoolSlot};
use crate::resolvers::{CardResolver, PerformanceResolver, PoolResolver};
use crate::scoring::{facts, strength, CuratedLists};

/// State built up over one run
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub current_set: String,
    /// Only the current set is ever queried for performance data
    pub mono_set: bool,
    /// Sets seen on resolved cards, upper-cased
    pub observed_sets: BTreeSet<String>,
    pub curated: CuratedLists,
}

impl PipelineContext {
    pub fn new(current_set: &str, mono_set: bool) -> Self {
        let current_set = current_set.to_uppercase();
        let mut observed_sets = BTreeSet::new();
        observed_sets.insert(current_set.clone());

        Self {
            current_set,
            mono_set,
            observed_sets,
            curated: CuratedLists::default(),
        }
    }

    pub fn observe_set(&mut self, set: &str) {
        if !self.mono_set && !set.is_empty() {
            self.observed_sets.insert(set.to_uppercase());
        }
    }
}

/// Pool ids of the curated lists
#[derive(Debug, Clone)]
pub struct CuratedPoolIds {
    pub bombs: String,
    pub duds: String,
    pub top_commons: String,
}

/// Scoring parameters
#[derive(Debug, Clone, Copy)]
pub struct ScoringSettings {
    pub cards_considered: usize,
    pub force_performance_refresh: bool,
}

/// Drives the resolvers and the scorer over a whole roster
pub struct Pipeline {
    pub cards: CardResolver,
    pub pools: PoolResolver,
    pub performance: PerformanceResolver,
    pub scoring: ScoringSettings,
}

impl Pipeline {
    /// Fetch each pool and attach card metadata, one pool and one card at a
    /// time. Any resolution failure aborts.
    pub async fn populate_pools(
        &self,
        ctx: &mut PipelineContext,
        pools: &mut [PlayerPool],
    ) -> ResolveResult<()> {
        for pool in pools.iter_mut() {
            info!("Fetching pool for {}", pool.player);

            let slots = self.pools.resolve(&pool.uri).await?;
            let mut cards = Vec::with_capacity(slots.len());

            for slot in slots {
                let card = self.cards.resolve(&slot.card_name).await?;
                ctx.observe_set(&card.set);
                cards.push(slot.with_card(card));
            }

            pool.cards = cards;
        }

        Ok(())
    }

    /// Load the bomb, dud and top-common lists into the context
    pub async fn load_curated_lists(
        &self,
        ctx: &mut PipelineContext,
        pool_api_url: &str,
        ids: &CuratedPoolIds,
    ) -> ResolveResult<()> {
        ctx.curated = CuratedLists {
            bombs: self.pools.resolve_names(&pool_url(pool_api_url, &ids.bombs)).await?,
            duds: self.pools.resolve_names(&pool_url(pool_api_url, &ids.duds)).await?,
            top_commons: self
                .pools
                .resolve_names(&pool_url(pool_api_url, &ids.top_commons))
                .await?,
        };

        info!(
            "Curated lists: {} bombs, {} duds, {} top commons",
            ctx.curated.bombs.len(),
            ctx.curated.duds.len(),
            ctx.curated.top_commons.len()
        );
        Ok(())
    }

    /// Load win rates for every observed set, then fill in each pool's facts
    pub async fn score_pools(&self, ctx: &PipelineContext, pools: &mut [PlayerPool]) {
        let rates = self
            .performance
            .load_archetype_maps(&ctx.observed_sets, self.scoring.force_performance_refresh)
            .await;

        apply_facts(ctx, &rates, self.scoring.cards_considered, pools);
    }
}

/// Facts and strength for each pool. Eliminated pools keep a strength of 0.
pub fn apply_facts(
    ctx: &PipelineContext,
    rates: &ArchetypeWinRates,
    cards_considered: usize,
    pools: &mut [PlayerPool],
) {
    let archetypes = archetypes_for(&ctx.current_set);

    for pool in pools.iter_mut() {
        let mut pool_facts = facts::gather(&pool.cards, &ctx.curated);
        if pool.is_alive {
            pool_facts.strength = strength::score(&pool.cards, &archetypes, rates, cards_considered);
        }
        pool.facts = pool_facts;
    }
}

/// All cards across a group of pools, merged by name
pub fn combined_cards<'a, I>(pools: I) -> Vec<PoolSlot>
where
    I: IntoIterator<Item = &'a PlayerPool>,
{
    merge_slots(pools.into_iter().flat_map(|p| p.cards.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_tracks_sets() {
        let mut ctx = PipelineContext::new("hbg", false);
        ctx.observe_set("snc");
        ctx.observe_set("HBG");
        ctx.observe_set("");

        let sets: Vec<&str> = ctx.observed_sets.iter().map(String::as_str).collect();
        assert_eq!(sets, vec!["HBG", "SNC"]);
    }

    #[test]
    fn test_mono_set_league_ignores_card_sets() {
        let mut ctx = PipelineContext::new("HBG", true);
        ctx.observe_set("snc");
        assert_eq!(ctx.observed_sets.len(), 1);
    }

    #[test]
    fn test_dead_pools_score_zero() {
        let ctx = PipelineContext::new("HBG", false);
        let mut rates = ArchetypeWinRates::new();
        rates.insert(
            "WR".to_string(),
            [("Shock".to_string(), 0.6)].into_iter().collect(),
        );

        let mut alive = PlayerPool::new("Ana", "", "uri", 1, 0, 11);
        alive.cards = vec![PoolSlot::new("Shock", 1)];
        let mut dead = PlayerPool::new("Bo", "", "uri", 1, 11, 11);
        dead.cards = vec![PoolSlot::new("Shock", 1)];

        let mut pools = vec![alive, dead];
        apply_facts(&ctx, &rates, 60, &mut pools);

        assert_eq!(pools[0].facts.strength, 60);
        assert_eq!(pools[1].facts.strength, 0);
    }
}
