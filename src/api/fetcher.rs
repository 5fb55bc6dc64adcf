use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::FetchError;

/// Number of attempts made for each remote call
pub const MAX_ATTEMPTS: usize = 3;

/// Fixed delay between attempts
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Sent with every request; Scryfall rejects anonymous clients
pub const USER_AGENT: &str = concat!("pool-strength/", env!("CARGO_PKG_VERSION"));

/// Performs an outbound lookup and returns the response body
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher with bounded retries
pub struct HttpFetcher {
    client: Client,
    attempts: usize,
    retry_delay: Duration,
}

impl HttpFetcher {
    /// Create a new fetcher with the default retry policy
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            attempts: MAX_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Single attempt, no retry
    async fn fetch_once(&self, uri: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(uri)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                uri: uri.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                uri: uri.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            uri: uri.to_string(),
            source,
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, uri: &str) -> Result<String, FetchError> {
        debug!("GET {}", uri);
        with_retries(self.attempts, self.retry_delay, || self.fetch_once(uri)).await
    }
}

/// Run `op` up to `attempts` times, sleeping `delay` after each failure.
/// Returns the last error when every attempt fails.
pub async fn with_retries<T, E, F, Fut>(attempts: usize, delay: Duration, mut op: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= attempts => return Err(e),
            Err(e) => {
                warn!("Attempt {}/{} failed: {}", attempt, attempts, e);
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// A remote source: a fetcher plus the courtesy pause owed after each
/// successful call to it
#[derive(Clone)]
pub struct RemoteSource {
    fetcher: Arc<dyn Fetcher>,
    pause: Duration,
}

impl RemoteSource {
    pub fn new(fetcher: Arc<dyn Fetcher>, pause: Duration) -> Self {
        Self { fetcher, pause }
    }

    pub async fn get(&self, uri: &str) -> Result<String, FetchError> {
        let body = self.fetcher.fetch(uri).await?;
        sleep(self.pause).await;
        Ok(body)
    }
}
