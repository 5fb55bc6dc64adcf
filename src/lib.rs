pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod resolvers;
pub mod roster;
pub mod scoring;

pub use error::{FetchError, ResolveError, StoreError};
