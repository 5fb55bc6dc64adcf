pub mod facts;
pub mod strength;

pub use facts::CuratedLists;
