use thiserror::Error;

/// Failure of a single remote call, after retries are exhausted
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {uri} failed: {source}")]
    Transport {
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {uri} returned status {status}")]
    Status { uri: String, status: u16 },
}

/// Failure of the durable key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failure to resolve an entity through cache and remote sources
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("remote source unavailable: {0}")]
    Transient(#[from] FetchError),

    #[error("{kind} not found in cache or remote sources: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
