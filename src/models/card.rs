use std::str::FromStr;

use rust_decimal::Decimal;

use crate::api::ScryfallCard;

/// Marker digital-only rebalanced printings carry in front of the name
pub const ALCHEMY_PREFIX: &str = "A-";

/// Mis-encoded em-dash as it appears in some type lines
const MISENCODED_DASH: &str = "\u{e2}\u{20ac}\u{201d}";

/// Cards that are never counted in pool facts
pub const BASIC_LANDS: &[&str] = &[
    "Plains",
    "Island",
    "Swamp",
    "Mountain",
    "Forest",
    "Command Tower",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    /// Anything unrecognised (special, bonus, empty) is treated as common
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "uncommon" => Rarity::Uncommon,
            "rare" => Rarity::Rare,
            "mythic" => Rarity::Mythic,
            _ => Rarity::Common,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
        }
    }

    /// Minimum ever-drawn game count, from a base count for commons
    pub fn prevalence_threshold(&self, base: u64) -> u64 {
        match self {
            Rarity::Common => base,
            Rarity::Uncommon => base / 2,
            Rarity::Rare => base / 4,
            Rarity::Mythic => base / 6,
        }
    }
}

/// Resolved card metadata
#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub name: String,
    pub colors: Vec<String>,
    pub color_identity: Vec<String>,
    /// Printed cost; double-faced cards fall back to their faces
    pub mana_cost: Option<String>,
    pub cmc: f64,
    pub type_line: String,
    pub rarity: Rarity,
    pub set: String,
    /// USD price. `None` when absent or unparseable, counted as zero.
    pub price_usd: Option<Decimal>,
}

impl From<ScryfallCard> for CardRecord {
    fn from(card: ScryfallCard) -> Self {
        let mana_cost = non_empty(card.mana_cost).or_else(|| {
            card.card_faces
                .iter()
                .take(2)
                .find_map(|face| non_empty(face.mana_cost.clone()))
        });

        let price_usd = card
            .prices
            .usd
            .as_deref()
            .and_then(|p| Decimal::from_str(p.trim()).ok());

        CardRecord {
            name: card.name,
            colors: card.colors,
            color_identity: card.color_identity,
            mana_cost,
            cmc: card.cmc.max(0.0),
            type_line: card.type_line.replace(MISENCODED_DASH, "-"),
            rarity: Rarity::parse(&card.rarity),
            set: card.set,
            price_usd,
        }
    }
}

impl CardRecord {
    /// Price with the zero-default applied
    pub fn price_or_zero(&self) -> Decimal {
        self.price_usd.unwrap_or(Decimal::ZERO)
    }

    /// Case-sensitive substring match on the type line
    pub fn has_type(&self, phrase: &str) -> bool {
        self.type_line.contains(phrase)
    }

    pub fn is_land(&self) -> bool {
        self.has_type("Land")
    }

    pub fn is_basic_land(&self) -> bool {
        BASIC_LANDS.contains(&self.name.as_str())
    }

    /// Colour identity contains `colour`. With `mono`, multi-coloured cards never match.
    pub fn is_colour(&self, colour: &str, mono: bool) -> bool {
        if mono && self.color_identity.len() > 1 {
            return false;
        }
        self.color_identity.iter().any(|c| c == colour)
    }

    pub fn is_multicolour(&self) -> bool {
        self.color_identity.len() > 1 && !self.is_land()
    }

    pub fn is_colourless(&self) -> bool {
        self.color_identity.is_empty()
    }
}

/// Strip the alchemy marker. The result is both the lookup and the cache key.
pub fn normalize_card_name(name: &str) -> &str {
    let name = name.trim();
    name.strip_prefix(ALCHEMY_PREFIX).unwrap_or(name)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
