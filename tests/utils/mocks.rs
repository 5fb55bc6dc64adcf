use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use pool_strength::api::Fetcher;
use pool_strength::FetchError;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Serves canned bodies by exact URI and records every call. Unknown URIs
/// answer with a 404.
#[derive(Clone, Default)]
pub struct MockFetcher {
    routes: Arc<RwLock<HashMap<String, String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

#[allow(dead_code)]
impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn route(&self, uri: impl Into<String>, body: impl Into<String>) {
        self.routes.write().await.insert(uri.into(), body.into());
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    pub async fn calls_to(&self, uri: &str) -> usize {
        self.calls.read().await.iter().filter(|c| *c == uri).count()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, uri: &str) -> Result<String, FetchError> {
        self.calls.write().await.push(uri.to_string());

        match self.routes.read().await.get(uri) {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::Status {
                uri: uri.to_string(),
                status: 404,
            }),
        }
    }
}
