use serde::Deserialize;

/// Card payload from the Scryfall `cards/named` endpoint.
///
/// Only the fields the league reports use are kept. Every field defaults so
/// a sparse or malformed payload still yields a (mostly empty) card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScryfallCard {
    pub name: String,
    pub mana_cost: Option<String>,
    pub cmc: f64,
    pub type_line: String,
    pub colors: Vec<String>,
    pub color_identity: Vec<String>,
    pub card_faces: Vec<ScryfallCardFace>,
    pub set: String,
    pub rarity: String,
    pub prices: ScryfallPrices,
}

/// One face of a double-faced card
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScryfallCardFace {
    pub name: String,
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScryfallPrices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub eur: Option<String>,
}

/// Exact-name lookup, optionally restricted to one set
pub fn named_card_url(base_url: &str, name: &str, set: Option<&str>) -> String {
    let mut url = format!(
        "{}/cards/named?exact={}",
        base_url,
        urlencoding::encode(name)
    );
    if let Some(set) = set {
        url.push_str("&set=");
        url.push_str(&urlencoding::encode(set));
    }
    url
}
