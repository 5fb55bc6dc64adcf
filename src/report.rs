use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::info;

use crate::api::CardPerformance;
use crate::models::performance::{colour_label, filtered_win_rate};
use crate::models::{PlayerPool, PoolSlot};

/// Timestamp used in report file names
pub fn report_stamp(now: DateTime<Local>) -> String {
    now.format("%Y_%m_%d_%H_%M").to_string()
}

/// Tab-delimited listing of every card across a group of pools
pub fn write_card_listing<W: Write>(writer: W, slots: &[PoolSlot]) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    out.write_record([
        "Name", "Set", "Rarity", "ManaCost", "TypeLine", "PriceUSD", "Amount",
    ])?;

    for slot in slots {
        let Some(card) = &slot.card else {
            continue;
        };
        out.write_record([
            card.name.as_str(),
            card.set.as_str(),
            card.rarity.as_str(),
            card.mana_cost.as_deref().unwrap_or(""),
            card.type_line.as_str(),
            &card.price_usd.map(|p| p.to_string()).unwrap_or_default(),
            &slot.amount.to_string(),
        ])?;
    }

    out.flush()?;
    Ok(())
}

/// One row of facts per pool
pub fn write_fact_sheet<W: Write>(writer: W, pools: &[PlayerPool]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record([
        "Player", "Team", "IsAlive", "Record", "Bombs", "Duds", "TopCommons", "W", "U", "B", "R",
        "G", "Gold", "Colourless", "Cmc", "NonBasicLand", "Commanders", "Playsets",
        "UniqueCards", "CostUSD", "Strength",
    ])?;

    for pool in pools {
        let f = &pool.facts;
        let mut row = vec![
            pool.player.clone(),
            pool.team.clone(),
            pool.is_alive.to_string(),
            pool.record(),
        ];
        row.extend(
            [
                f.bombs,
                f.duds,
                f.top_commons,
                f.white,
                f.blue,
                f.black,
                f.red,
                f.green,
                f.gold,
                f.colourless,
                f.cmc,
                f.non_basic_land,
                f.commanders,
                f.playsets,
                f.unique_cards,
                f.cost_usd,
                f.strength,
            ]
            .iter()
            .map(|v| v.to_string()),
        );
        out.write_record(&row)?;
    }

    out.flush()?;
    Ok(())
}

/// Filtered GIH win rate per card and archetype, as a percentage
pub fn write_performance_dump<W: Write>(
    writer: W,
    rows: &[(String, Vec<CardPerformance>)],
    drawn_threshold: u64,
) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(["Card", "URL", "Rarity", "Colour", "Deck", "GIH WR"])?;

    for (archetype, records) in rows {
        for record in records {
            let rate = filtered_win_rate(record, drawn_threshold) * 100.0;
            out.write_record([
                record.name.replace(',', " ").as_str(),
                record.url.as_str(),
                record.rarity.as_str(),
                colour_label(record),
                archetype.as_str(),
                &format!("{:.1}", rate),
            ])?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Create `dir` and open `dir/name` for writing
pub fn create_report(dir: &Path, name: &str) -> Result<(PathBuf, std::fs::File)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

    let path = dir.join(name);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;

    info!("Writing {}", path.display());
    Ok((path, file))
}
