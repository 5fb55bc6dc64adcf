use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::{Fetcher, RemoteSource, SealedDeck};
use crate::error::ResolveResult;
use crate::models::pool::flatten_entries;
use crate::models::PoolSlot;

/// Courtesy pause after each sealeddeck.tech call
pub const SEALEDDECK_PAUSE: Duration = Duration::from_millis(100);

/// Fetches pool contents and flattens deck + sideboard into one slot per card
pub struct PoolResolver {
    source: RemoteSource,
}

impl PoolResolver {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_pause(fetcher, SEALEDDECK_PAUSE)
    }

    pub fn with_pause(fetcher: Arc<dyn Fetcher>, pause: Duration) -> Self {
        Self {
            source: RemoteSource::new(fetcher, pause),
        }
    }

    /// Fetch a pool and merge it by card name. Card metadata is not attached.
    pub async fn resolve(&self, pool_uri: &str) -> ResolveResult<Vec<PoolSlot>> {
        info!("Fetching pool from: {}", pool_uri);

        let raw = self.source.get(pool_uri).await?;
        let deck = serde_json::from_str::<SealedDeck>(&raw).unwrap_or_else(|e| {
            warn!("Malformed pool payload from {}: {}", pool_uri, e);
            SealedDeck::default()
        });

        Ok(flatten_deck(&deck))
    }

    /// Distinct card names in a pool, for curated lists
    pub async fn resolve_names(&self, pool_uri: &str) -> ResolveResult<HashSet<String>> {
        let slots = self.resolve(pool_uri).await?;
        Ok(slots.into_iter().map(|s| s.card_name).collect())
    }
}

pub fn flatten_deck(deck: &SealedDeck) -> Vec<PoolSlot> {
    flatten_entries(
        deck.deck
            .iter()
            .chain(deck.sideboard.iter())
            .map(|e| (e.name.as_str(), e.count)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::sealeddeck::SealedDeckEntry;

    fn entry(name: &str, count: u32) -> SealedDeckEntry {
        SealedDeckEntry {
            name: name.to_string(),
            count,
        }
    }

    #[test]
    fn test_flatten_deck_merges_sideboard() {
        let deck = SealedDeck {
            pool_id: "p".to_string(),
            deck: vec![entry("Shock", 2), entry("Opt", 1)],
            sideboard: vec![entry("Shock", 3), entry("Forest", 8)],
        };

        let slots = flatten_deck(&deck);
        assert_eq!(slots.len(), 3);

        let shock = slots.iter().find(|s| s.card_name == "Shock").unwrap();
        assert_eq!(shock.amount, 5);
        assert!(shock.card.is_none());
    }
}
