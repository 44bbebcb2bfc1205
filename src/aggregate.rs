// 🧮 Aggregator - per-player running career home-run totals

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::source::SeasonRecord;

// ============================================================================
// CAREER RECORD
// ============================================================================

/// A player's cumulative home-run total through `year`.
///
/// For a fixed player, `career_hr` is non-decreasing as `year` increases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecord {
    pub year: i32,
    pub player: String,
    pub career_hr: i64,
}

// ============================================================================
// COERCION
// ============================================================================

/// A season or HR cell that cannot be coerced to an integer.
#[derive(Debug, Clone)]
pub struct MalformedValue {
    pub field: &'static str,
    pub player: String,
    pub value: Value,
}

impl fmt::Display for MalformedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot coerce {} value {} for player {:?} to an integer",
            self.field, self.value, self.player
        )
    }
}

impl std::error::Error for MalformedValue {}

enum Cell {
    Missing,
    Int(i64),
    Malformed,
}

/// Integer coercion for leaderboard cells. Integers pass through, integral
/// floats are accepted (leaderboard payloads carry whole-number floats),
/// numeric strings parse. Null is a missing cell.
fn coerce_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Missing,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Int(i)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => Cell::Int(f as i64),
                    _ => Cell::Malformed,
                }
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Cell::Int(i),
            Err(_) => Cell::Malformed,
        },
        _ => Cell::Malformed,
    }
}

// ============================================================================
// CAREER TOTALS
// ============================================================================

/// Career totals grouped by the exact player name string. Spelling
/// variants of the same person count as different players.
pub fn career_totals(records: &[SeasonRecord]) -> Result<Vec<CareerRecord>> {
    career_totals_by(records, |name| name.to_string())
}

/// Career totals using `key` to decide which rows belong to the same
/// player.
///
/// Rows with a null HR cell are dropped entirely (never counted as zero).
/// A non-coercible season or HR cell fails the whole run: no partial
/// totals are produced. Within a group, rows are ordered season-ascending
/// (stable, so duplicate seasons keep input order) and each row is
/// assigned the running HR sum.
pub fn career_totals_by<K>(records: &[SeasonRecord], key: K) -> Result<Vec<CareerRecord>>
where
    K: Fn(&str) -> String,
{
    // (group key, season, player, hr), coerced up front so a malformed
    // row aborts before any totals exist
    let mut rows: Vec<(String, i32, String, i64)> = Vec::with_capacity(records.len());

    for rec in records {
        let hr = match coerce_cell(&rec.home_runs) {
            Cell::Missing => continue,
            Cell::Int(hr) => hr,
            Cell::Malformed => {
                return Err(MalformedValue {
                    field: "HR",
                    player: rec.player.clone(),
                    value: rec.home_runs.clone(),
                }
                .into())
            }
        };

        let season = match coerce_cell(&rec.season) {
            Cell::Int(season) => match i32::try_from(season) {
                Ok(season) => season,
                Err(_) => {
                    return Err(MalformedValue {
                        field: "Season",
                        player: rec.player.clone(),
                        value: rec.season.clone(),
                    }
                    .into())
                }
            },
            // A row without a season cannot be placed in a career
            _ => {
                return Err(MalformedValue {
                    field: "Season",
                    player: rec.player.clone(),
                    value: rec.season.clone(),
                }
                .into())
            }
        };

        rows.push((key(&rec.player), season, rec.player.clone(), hr));
    }

    rows.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut totals = Vec::with_capacity(rows.len());
    let mut current_key: Option<&str> = None;
    let mut running = 0i64;
    for (k, season, player, hr) in &rows {
        if current_key != Some(k.as_str()) {
            current_key = Some(k.as_str());
            running = 0;
        }
        running += hr;
        totals.push(CareerRecord {
            year: *season,
            player: player.clone(),
            career_hr: running,
        });
    }

    Ok(totals)
}
