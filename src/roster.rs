use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::api::sealeddeck::{pool_id_from_link, pool_url};
use crate::models::PlayerPool;

/// One row of the league roster export
#[derive(Debug, Clone, Deserialize)]
pub struct RosterRow {
    pub player: String,
    #[serde(default)]
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    /// Shared pool link; its last path segment is the pool id
    pub link: String,
}

impl RosterRow {
    pub fn into_pool(self, pool_api_url: &str, elimination_losses: u32) -> PlayerPool {
        let uri = pool_url(pool_api_url, pool_id_from_link(&self.link));
        PlayerPool::new(
            self.player,
            self.team,
            uri,
            self.wins,
            self.losses,
            elimination_losses,
        )
    }
}

/// Read roster rows from a CSV file with a `player,team,wins,losses,link` header
pub fn load_roster(path: &Path) -> Result<Vec<RosterRow>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open roster {}", path.display()))?;
    let rows = read_roster(file)?;

    info!("Loaded {} roster rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn read_roster<R: Read>(reader: R) -> Result<Vec<RosterRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<RosterRow>()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("Invalid roster row {}", i + 1)))
        .collect()
}
