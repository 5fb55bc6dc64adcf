use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pool_strength::api::{CardPerformance, Fetcher, HttpFetcher};
use pool_strength::config::Config;
use pool_strength::db::{KvStore, SqliteCache};
use pool_strength::models::performance::archetypes_for;
use pool_strength::report::{create_report, report_stamp, write_performance_dump};
use pool_strength::resolvers::PerformanceResolver;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dump_performance=info,pool_strength=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let set = config.current_set.clone();

    info!("Dumping card performance data for {}", set);

    let store: Arc<dyn KvStore> = Arc::new(SqliteCache::new(&config.database_url).await?);
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new());
    let resolver = PerformanceResolver::new(store, fetcher, config.performance_settings());

    let mut rows: Vec<(String, Vec<CardPerformance>)> = Vec::new();
    let mut failed_count = 0;

    for archetype in archetypes_for(&set) {
        let result = resolver
            .records(&set, archetype, config.force_performance_refresh)
            .await;

        match result {
            Ok(records) => {
                info!("{} {}: {} cards", set, archetype, records.len());
                rows.push((archetype.to_string(), records));
            }
            Err(e) => {
                warn!("Skipping {} {}: {}", set, archetype, e);
                failed_count += 1;
            }
        }
    }

    let name = format!("{}_{}.csv", set, report_stamp(Local::now()));
    let (path, file) = create_report(&config.perf_output_dir, &name)?;
    write_performance_dump(file, &rows, config.drawn_threshold)?;

    info!("=== Summary ===");
    info!("Archetypes written: {}", rows.len());
    info!("Archetypes failed: {}", failed_count);
    info!("Output: {}", path.display());

    Ok(())
}
