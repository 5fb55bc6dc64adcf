pub mod cache;

pub use cache::{KvStore, MemoryCache, SqliteCache};
