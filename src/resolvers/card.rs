use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::scryfall::named_card_url;
use crate::api::{Fetcher, RemoteSource, ScryfallCard};
use crate::db::KvStore;
use crate::error::{ResolveError, ResolveResult};
use crate::models::{normalize_card_name, CardRecord};

/// Courtesy pause after each Scryfall call
pub const SCRYFALL_PAUSE: Duration = Duration::from_millis(75);

/// Resolves card names to metadata: cache first, then a set-scoped and an
/// unscoped exact-name lookup
pub struct CardResolver {
    store: Arc<dyn KvStore>,
    source: RemoteSource,
    base_url: String,
    current_set: String,
}

impl CardResolver {
    pub fn new(
        store: Arc<dyn KvStore>,
        fetcher: Arc<dyn Fetcher>,
        base_url: &str,
        current_set: &str,
    ) -> Self {
        Self::with_pause(store, fetcher, base_url, current_set, SCRYFALL_PAUSE)
    }

    pub fn with_pause(
        store: Arc<dyn KvStore>,
        fetcher: Arc<dyn Fetcher>,
        base_url: &str,
        current_set: &str,
        pause: Duration,
    ) -> Self {
        Self {
            store,
            source: RemoteSource::new(fetcher, pause),
            base_url: base_url.trim_end_matches('/').to_string(),
            current_set: current_set.to_string(),
        }
    }

    /// Resolve a card by name
    pub async fn resolve(&self, name: &str) -> ResolveResult<CardRecord> {
        let key = normalize_card_name(name);

        if let Some(raw) = self.store.get(key).await? {
            debug!("Card cache hit: {}", key);
            return Ok(parse_card(&raw, key));
        }

        let raw = self.fetch_remote(key).await?;
        self.store.set(key, raw.as_bytes()).await?;

        Ok(parse_card(raw.as_bytes(), key))
    }

    /// Current-set printing first, any printing second
    async fn fetch_remote(&self, name: &str) -> ResolveResult<String> {
        info!("Fetching card from Scryfall: {}", name);

        let scoped = named_card_url(&self.base_url, name, Some(&self.current_set));
        match self.source.get(&scoped).await {
            Ok(raw) => return Ok(raw),
            Err(e) => debug!("Set-scoped lookup failed for {}: {}", name, e),
        }

        let unscoped = named_card_url(&self.base_url, name, None);
        match self.source.get(&unscoped).await {
            Ok(raw) => Ok(raw),
            Err(e) => {
                warn!("Card lookup failed for {}: {}", name, e);
                Err(ResolveError::NotFound {
                    kind: "card",
                    id: name.to_string(),
                })
            }
        }
    }
}

fn parse_card(raw: &[u8], key: &str) -> CardRecord {
    let card = serde_json::from_slice::<ScryfallCard>(raw).unwrap_or_else(|e| {
        warn!("Malformed card payload for {}: {}", key, e);
        ScryfallCard::default()
    });
    CardRecord::from(card)
}
