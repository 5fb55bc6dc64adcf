pub mod card;
pub mod performance;
pub mod pool;

pub use card::{normalize_card_name, CardRecord, Rarity};
pub use performance::{ArchetypeWinRateMap, ArchetypeWinRates};
pub use pool::{PlayerPool, PoolFacts, PoolSlot};
