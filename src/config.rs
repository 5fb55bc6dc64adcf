use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::resolvers::PerformanceSettings;
use crate::scoring::strength::DEFAULT_CARDS_CONSIDERED;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite cache database
    pub database_url: String,

    /// Roster CSV export (player, team, wins, losses, link)
    pub roster_path: PathBuf,

    /// Directory for card listings and fact sheets
    pub output_dir: PathBuf,

    /// Directory for performance dumps
    pub perf_output_dir: PathBuf,

    /// Prefix for report file names
    pub report_prefix: String,

    /// Set currently being drafted
    pub current_set: String,

    /// 17lands event format
    pub performance_format: String,

    /// Skip collecting sets from pool cards and only query the current set
    pub league_is_mono_set: bool,

    /// Ever-drawn game count a common needs before its win rate counts
    pub drawn_threshold: u64,

    /// Losses at which a player is eliminated
    pub elimination_losses: u32,

    /// Copies counted per archetype when scoring
    pub strength_cards_considered: usize,

    /// Ignore cached performance data
    pub force_performance_refresh: bool,

    /// sealeddeck.tech pool ids of the curated lists
    pub bomb_pool_id: String,
    pub dud_pool_id: String,
    pub top_common_pool_id: String,

    pub scryfall_api_url: String,
    pub sealeddeck_api_url: String,
    pub seventeen_lands_api_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/cache.db".to_string()),

            roster_path: env::var("ROSTER_PATH")
                .unwrap_or_else(|_| "data/roster.csv".to_string())
                .into(),

            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "out".to_string())
                .into(),

            perf_output_dir: env::var("PERF_OUTPUT_DIR")
                .unwrap_or_else(|_| "out-perf".to_string())
                .into(),

            report_prefix: env::var("REPORT_PREFIX").unwrap_or_else(|_| "ASL".to_string()),

            current_set: env::var("CURRENT_SET")
                .unwrap_or_else(|_| "HBG".to_string())
                .to_uppercase(),

            performance_format: env::var("PERFORMANCE_FORMAT")
                .unwrap_or_else(|_| "PremierDraft".to_string()),

            league_is_mono_set: parse_var("LEAGUE_IS_MONO_SET", false)?,

            drawn_threshold: parse_var("DRAWN_THRESHOLD", 100)?,

            elimination_losses: parse_var("ELIMINATION_LOSSES", 11)?,

            strength_cards_considered: parse_var(
                "STRENGTH_CARDS_CONSIDERED",
                DEFAULT_CARDS_CONSIDERED,
            )?,

            force_performance_refresh: parse_var("FORCE_PERFORMANCE_REFRESH", false)?,

            bomb_pool_id: env::var("BOMB_POOL_ID").unwrap_or_else(|_| "PSYLhA4Tit".to_string()),

            dud_pool_id: env::var("DUD_POOL_ID").unwrap_or_else(|_| "Ga4qDQMx6I".to_string()),

            top_common_pool_id: env::var("TOP_COMMON_POOL_ID")
                .unwrap_or_else(|_| "fKAvpTdSeX".to_string()),

            scryfall_api_url: env::var("SCRYFALL_API_URL")
                .unwrap_or_else(|_| "https://api.scryfall.com".to_string()),

            sealeddeck_api_url: env::var("SEALEDDECK_API_URL")
                .unwrap_or_else(|_| "https://sealeddeck.tech/api".to_string()),

            seventeen_lands_api_url: env::var("SEVENTEEN_LANDS_API_URL")
                .unwrap_or_else(|_| "https://www.17lands.com".to_string()),
        })
    }

    pub fn performance_settings(&self) -> PerformanceSettings {
        PerformanceSettings {
            base_url: self.seventeen_lands_api_url.clone(),
            current_set: self.current_set.clone(),
            format: self.performance_format.clone(),
            drawn_threshold: self.drawn_threshold,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .ok()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}
