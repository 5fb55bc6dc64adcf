pub mod card;
pub mod performance;
pub mod pool;

pub use card::CardResolver;
pub use performance::{PerformanceResolver, PerformanceSettings};
pub use pool::PoolResolver;
