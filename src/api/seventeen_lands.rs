use chrono::NaiveDate;
use serde::Deserialize;

/// Earliest date requested from the card ratings endpoint
pub const RATINGS_START_DATE: &str = "2019-01-01";

/// Per-card statistics record from the 17lands card ratings endpoint.
///
/// Rates are null for cards with no games in the sample.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CardPerformance {
    pub name: String,
    pub color: String,
    pub rarity: String,
    pub url: String,
    pub url_back: String,
    pub seen_count: u64,
    pub avg_seen: Option<f64>,
    pub pick_count: u64,
    pub avg_pick: Option<f64>,
    pub game_count: u64,
    pub win_rate: Option<f64>,
    pub opening_hand_game_count: u64,
    pub opening_hand_win_rate: Option<f64>,
    pub drawn_game_count: u64,
    pub drawn_win_rate: Option<f64>,
    pub ever_drawn_game_count: u64,
    pub ever_drawn_win_rate: Option<f64>,
    pub never_drawn_game_count: u64,
    pub never_drawn_win_rate: Option<f64>,
    pub drawn_improvement_win_rate: Option<f64>,
}

/// Card ratings for one set, format and archetype up to `end_date`
pub fn card_ratings_url(
    base_url: &str,
    set: &str,
    format: &str,
    end_date: NaiveDate,
    archetype: &str,
) -> String {
    format!(
        "{}/card_ratings/data?expansion={}&format={}&start_date={}&end_date={}&colors={}",
        base_url,
        urlencoding::encode(set),
        urlencoding::encode(format),
        RATINGS_START_DATE,
        end_date.format("%Y-%m-%d"),
        urlencoding::encode(archetype)
    )
}
