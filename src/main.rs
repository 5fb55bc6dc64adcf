use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pool_strength::api::{Fetcher, HttpFetcher};
use pool_strength::config::Config;
use pool_strength::db::{KvStore, SqliteCache};
use pool_strength::models::PlayerPool;
use pool_strength::pipeline::{
    combined_cards, CuratedPoolIds, Pipeline, PipelineContext, ScoringSettings,
};
use pool_strength::report::{
    create_report, report_stamp, write_card_listing, write_fact_sheet,
};
use pool_strength::resolvers::{CardResolver, PerformanceResolver, PoolResolver};
use pool_strength::roster::load_roster;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pool_strength=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting pool-strength");

    let config = Config::from_env()?;
    info!("Configuration loaded (current set {})", config.current_set);

    let store: Arc<dyn KvStore> = Arc::new(SqliteCache::new(&config.database_url).await?);
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new());

    let pipeline = Pipeline {
        cards: CardResolver::new(
            Arc::clone(&store),
            Arc::clone(&fetcher),
            &config.scryfall_api_url,
            &config.current_set,
        ),
        pools: PoolResolver::new(Arc::clone(&fetcher)),
        performance: PerformanceResolver::new(
            Arc::clone(&store),
            Arc::clone(&fetcher),
            config.performance_settings(),
        ),
        scoring: ScoringSettings {
            cards_considered: config.strength_cards_considered,
            force_performance_refresh: config.force_performance_refresh,
        },
    };

    let mut pools: Vec<PlayerPool> = load_roster(&config.roster_path)?
        .into_iter()
        .map(|row| row.into_pool(&config.sealeddeck_api_url, config.elimination_losses))
        .collect();

    let mut ctx = PipelineContext::new(&config.current_set, config.league_is_mono_set);
    pipeline.populate_pools(&mut ctx, &mut pools).await?;

    let (alive, dead): (Vec<&PlayerPool>, Vec<&PlayerPool>) =
        pools.iter().partition(|p| p.is_alive);
    info!(
        "Found {} living pools and {} dead pools",
        alive.len(),
        dead.len()
    );

    let stamp = report_stamp(Local::now());
    for (kind, group) in [("alive", alive), ("dead", dead)] {
        if group.is_empty() {
            continue;
        }
        let name = format!("{}_{}_{}.txt", config.report_prefix, stamp, kind);
        let (_, file) = create_report(&config.output_dir, &name)?;
        write_card_listing(file, &combined_cards(group))?;
    }

    let curated_ids = CuratedPoolIds {
        bombs: config.bomb_pool_id.clone(),
        duds: config.dud_pool_id.clone(),
        top_commons: config.top_common_pool_id.clone(),
    };
    pipeline
        .load_curated_lists(&mut ctx, &config.sealeddeck_api_url, &curated_ids)
        .await?;

    pipeline.score_pools(&ctx, &mut pools).await;

    let name = format!("{}_{}_funfacts.csv", config.report_prefix, stamp);
    let (path, file) = create_report(&config.output_dir, &name)?;
    write_fact_sheet(file, &pools)?;

    info!("Done, fact sheet at {}", path.display());
    Ok(())
}
