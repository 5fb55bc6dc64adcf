use std::collections::BTreeMap;

use crate::models::CardRecord;

/// One distinct card in a pool
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSlot {
    pub card_name: String,
    pub amount: u32,
    /// Filled in by the card resolver
    pub card: Option<CardRecord>,
}

impl PoolSlot {
    pub fn new(card_name: impl Into<String>, amount: u32) -> Self {
        Self {
            card_name: card_name.into(),
            amount,
            card: None,
        }
    }

    pub fn with_card(mut self, card: CardRecord) -> Self {
        self.card = Some(card);
        self
    }
}

/// Merge raw (name, count) entries into one slot per distinct name with
/// summed amounts. Slots come out ordered by name.
pub fn flatten_entries<'a, I>(entries: I) -> Vec<PoolSlot>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let mut merged: BTreeMap<&str, u32> = BTreeMap::new();
    for (name, count) in entries {
        *merged.entry(name).or_insert(0) += count;
    }

    merged
        .into_iter()
        .map(|(name, amount)| PoolSlot::new(name, amount))
        .collect()
}

/// Merge already-resolved slots from several pools, keeping card metadata
pub fn merge_slots<'a, I>(slots: I) -> Vec<PoolSlot>
where
    I: IntoIterator<Item = &'a PoolSlot>,
{
    let mut merged: BTreeMap<&str, PoolSlot> = BTreeMap::new();
    for slot in slots {
        merged
            .entry(slot.card_name.as_str())
            .and_modify(|existing| {
                existing.amount += slot.amount;
                if existing.card.is_none() {
                    existing.card = slot.card.clone();
                }
            })
            .or_insert_with(|| slot.clone());
    }

    merged.into_values().collect()
}

/// Facts derived for one pool's row in the fact sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolFacts {
    pub bombs: i64,
    pub duds: i64,
    pub top_commons: i64,
    pub white: i64,
    pub blue: i64,
    pub black: i64,
    pub red: i64,
    pub green: i64,
    pub gold: i64,
    pub colourless: i64,
    pub cmc: i64,
    pub non_basic_land: i64,
    pub commanders: i64,
    pub playsets: i64,
    pub unique_cards: i64,
    pub cost_usd: i64,
    pub strength: i64,
}

/// One league player's pool
#[derive(Debug, Clone)]
pub struct PlayerPool {
    pub player: String,
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    /// Still in the league
    pub is_alive: bool,
    /// Pool API URI
    pub uri: String,
    pub cards: Vec<PoolSlot>,
    pub facts: PoolFacts,
}

impl PlayerPool {
    /// A pool is alive while its losses stay below `elimination_losses`
    pub fn new(
        player: impl Into<String>,
        team: impl Into<String>,
        uri: impl Into<String>,
        wins: u32,
        losses: u32,
        elimination_losses: u32,
    ) -> Self {
        Self {
            player: player.into(),
            team: team.into(),
            wins,
            losses,
            is_alive: losses < elimination_losses,
            uri: uri.into(),
            cards: Vec::new(),
            facts: PoolFacts::default(),
        }
    }

    pub fn record(&self) -> String {
        format!("{} | {}", self.wins, self.losses)
    }
}
