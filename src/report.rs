// 📊 Filter/Formatter - threshold filter, presentation sort, CSV output

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::aggregate::CareerRecord;

const OUTPUT_HEADER: [&str; 3] = ["year", "player", "career_hr"];

/// Statistics for the console summary, computed over the final table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub rows: usize,
    pub players: usize,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

/// Keep rows at or above `min_hr` and order them for presentation: year
/// ascending, career total descending within a year. The sort is stable,
/// so further ties keep input order. A threshold <= 0 keeps every row.
pub fn filter_and_sort(records: &[CareerRecord], min_hr: i64) -> Vec<CareerRecord> {
    let mut rows: Vec<CareerRecord> = if min_hr > 0 {
        records
            .iter()
            .filter(|r| r.career_hr >= min_hr)
            .cloned()
            .collect()
    } else {
        records.to_vec()
    };

    rows.sort_by(|a, b| a.year.cmp(&b.year).then(b.career_hr.cmp(&a.career_hr)));
    rows
}

/// Write `rows` as CSV with header `year,player,career_hr`. An empty
/// table still gets the header line.
pub fn write_csv(rows: &[CareerRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot create output file {}", path.display()))?;

    if rows.is_empty() {
        writer
            .write_record(OUTPUT_HEADER)
            .context("cannot write CSV header")?;
    }
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("cannot write row for {:?}", row.player))?;
    }

    writer
        .flush()
        .with_context(|| format!("cannot flush output file {}", path.display()))?;
    Ok(())
}

/// Distinct players and year range of the final table.
pub fn summarize(rows: &[CareerRecord]) -> Summary {
    let players: HashSet<&str> = rows.iter().map(|r| r.player.as_str()).collect();

    Summary {
        rows: rows.len(),
        players: players.len(),
        min_year: rows.iter().map(|r| r.year).min(),
        max_year: rows.iter().map(|r| r.year).max(),
    }
}
