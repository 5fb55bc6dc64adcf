pub mod fetcher;
pub mod scryfall;
pub mod sealeddeck;
pub mod seventeen_lands;

pub use fetcher::{Fetcher, HttpFetcher, RemoteSource};
pub use scryfall::ScryfallCard;
pub use sealeddeck::SealedDeck;
pub use seventeen_lands::CardPerformance;
