#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use pool_strength::db::MemoryCache;
use pool_strength::resolvers::{
    CardResolver, PerformanceResolver, PerformanceSettings, PoolResolver,
};

use super::mocks::MockFetcher;

pub const SCRYFALL_URL: &str = "https://scryfall.test";
pub const SEALEDDECK_URL: &str = "https://sealeddeck.test/api";
pub const SEVENTEEN_LANDS_URL: &str = "https://17lands.test";
pub const CURRENT_SET: &str = "HBG";

/// Read a JSON body from `tests/fixtures`
pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {}", path, e))
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 7, 9).unwrap()
}

pub fn performance_settings() -> PerformanceSettings {
    PerformanceSettings {
        base_url: SEVENTEEN_LANDS_URL.to_string(),
        current_set: CURRENT_SET.to_string(),
        format: "PremierDraft".to_string(),
        drawn_threshold: 100,
    }
}

/// Shared store and mock remote, with resolvers wired up without pauses
pub struct TestSetup {
    pub store: Arc<MemoryCache>,
    pub fetcher: Arc<MockFetcher>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryCache::new()),
            fetcher: Arc::new(MockFetcher::new()),
        }
    }

    pub fn card_resolver(&self) -> CardResolver {
        CardResolver::with_pause(
            self.store.clone(),
            self.fetcher.clone(),
            SCRYFALL_URL,
            CURRENT_SET,
            Duration::ZERO,
        )
    }

    pub fn pool_resolver(&self) -> PoolResolver {
        PoolResolver::with_pause(self.fetcher.clone(), Duration::ZERO)
    }

    pub fn performance_resolver(&self) -> PerformanceResolver {
        self.performance_resolver_on(today())
    }

    pub fn performance_resolver_on(&self, day: NaiveDate) -> PerformanceResolver {
        PerformanceResolver::with_pause(
            self.store.clone(),
            self.fetcher.clone(),
            performance_settings(),
            Duration::ZERO,
        )
        .with_today(day)
    }
}
