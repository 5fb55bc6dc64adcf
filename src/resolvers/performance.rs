use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::api::seventeen_lands::card_ratings_url;
use crate::api::{CardPerformance, Fetcher, RemoteSource};
use crate::db::KvStore;
use crate::error::{ResolveError, ResolveResult};
use crate::models::performance::{archetypes_for, release_order, win_rate_map};
use crate::models::{ArchetypeWinRateMap, ArchetypeWinRates};

/// Courtesy pause after each 17lands call
pub const SEVENTEEN_LANDS_PAUSE: Duration = Duration::from_millis(1000);

/// Settings for performance lookups
#[derive(Debug, Clone)]
pub struct PerformanceSettings {
    pub base_url: String,
    /// Active set: its data is refreshed daily
    pub current_set: String,
    /// Event format, e.g. PremierDraft
    pub format: String,
    /// Ever-drawn game count a common needs to be counted
    pub drawn_threshold: u64,
}

/// Cache key for one set and archetype. The active set's key carries the
/// date so it rotates daily; older sets are cached permanently.
pub fn performance_cache_key(
    set: &str,
    archetype: &str,
    current_set: &str,
    today: NaiveDate,
) -> String {
    let set = set.to_uppercase();
    if set == current_set.to_uppercase() {
        format!("perf_{}_{}_{}", set, archetype, today.format("%Y-%m-%d"))
    } else {
        format!("perf_{}_{}", set, archetype)
    }
}

/// Resolves (set, archetype) pairs to per-card win rates
pub struct PerformanceResolver {
    store: Arc<dyn KvStore>,
    source: RemoteSource,
    settings: PerformanceSettings,
    today: NaiveDate,
}

impl PerformanceResolver {
    pub fn new(
        store: Arc<dyn KvStore>,
        fetcher: Arc<dyn Fetcher>,
        settings: PerformanceSettings,
    ) -> Self {
        Self::with_pause(store, fetcher, settings, SEVENTEEN_LANDS_PAUSE)
    }

    pub fn with_pause(
        store: Arc<dyn KvStore>,
        fetcher: Arc<dyn Fetcher>,
        mut settings: PerformanceSettings,
        pause: Duration,
    ) -> Self {
        settings.base_url = settings.base_url.trim_end_matches('/').to_string();
        Self {
            store,
            source: RemoteSource::new(fetcher, pause),
            settings,
            today: Local::now().date_naive(),
        }
    }

    /// Pin the date used for cache keys and the query's end date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn cache_key(&self, set: &str, archetype: &str) -> String {
        performance_cache_key(set, archetype, &self.settings.current_set, self.today)
    }

    /// Raw per-card records, from cache or 17lands
    pub async fn records(
        &self,
        set: &str,
        archetype: &str,
        force_refresh: bool,
    ) -> ResolveResult<Vec<CardPerformance>> {
        let key = self.cache_key(set, archetype);

        let cached = if force_refresh {
            None
        } else {
            self.store
                .get(&key)
                .await?
                .filter(|raw| !String::from_utf8_lossy(raw).trim().is_empty())
        };

        let raw = match cached {
            Some(raw) => {
                debug!("Performance cache hit: {}", key);
                raw
            }
            None => {
                let raw = self.fetch_remote(set, archetype).await?;
                self.store.set(&key, raw.as_bytes()).await?;
                raw.into_bytes()
            }
        };

        Ok(serde_json::from_slice::<Vec<CardPerformance>>(&raw).unwrap_or_else(|e| {
            warn!("Malformed performance payload for {}: {}", key, e);
            Vec::new()
        }))
    }

    /// Win rates for one set and archetype, with the prevalence filter applied
    pub async fn resolve(
        &self,
        set: &str,
        archetype: &str,
        force_refresh: bool,
    ) -> ResolveResult<ArchetypeWinRateMap> {
        let records = self.records(set, archetype, force_refresh).await?;
        Ok(win_rate_map(&records, self.settings.drawn_threshold))
    }

    /// Win rates per archetype across every observed set.
    ///
    /// Sets are walked oldest first and merged card by card, so a card
    /// printed in several sets keeps the rate from the latest one, and a card
    /// found only in an older set keeps that set's rate. An archetype that
    /// cannot be resolved is skipped.
    pub async fn load_archetype_maps(
        &self,
        observed_sets: &BTreeSet<String>,
        force_refresh: bool,
    ) -> ArchetypeWinRates {
        let mut by_archetype = ArchetypeWinRates::new();

        for set in release_order(&self.settings.current_set) {
            if !observed_sets.contains(&set) {
                continue;
            }

            info!("Fetching card performance data for {}", set);

            for archetype in archetypes_for(&set) {
                match self.resolve(&set, archetype, force_refresh).await {
                    Ok(rates) => {
                        by_archetype
                            .entry(archetype.to_string())
                            .or_default()
                            .extend(rates);
                    }
                    Err(e) => {
                        warn!("Skipping {} {}: {}", set, archetype, e);
                    }
                }
            }
        }

        by_archetype
    }

    async fn fetch_remote(&self, set: &str, archetype: &str) -> ResolveResult<String> {
        info!("Fetching card performance data from 17lands: {} {}", set, archetype);

        let url = card_ratings_url(
            &self.settings.base_url,
            set,
            &self.settings.format,
            self.today,
            archetype,
        );

        self.source.get(&url).await.map_err(|e| {
            warn!("Performance lookup failed for {} {}: {}", set, archetype, e);
            ResolveError::NotFound {
                kind: "performance data",
                id: format!("{} {}", set, archetype),
            }
        })
    }
}
