// ⚾ Batting Data Source - FanGraphs leaderboard client
// The remote provider is an opaque collaborator behind a trait, so the
// fetch policy can be exercised against in-memory fakes.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::cache::ResponseCache;

// ============================================================================
// SEASON RECORD
// ============================================================================

/// One leaderboard row: a single player's batting line for one season.
///
/// `season` and `home_runs` stay as raw JSON values until aggregation, so a
/// missing cell can be told apart from a malformed one. Every other payload
/// column is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonRecord {
    #[serde(rename = "Season", default)]
    pub season: Value,

    #[serde(rename = "Name", alias = "PlayerName")]
    pub player: String,

    #[serde(rename = "HR", default)]
    pub home_runs: Value,
}

// ============================================================================
// SOURCE TRAIT
// ============================================================================

/// The remote statistics provider boundary.
pub trait BattingSource {
    /// Batting stats for the inclusive season range [start, end], one
    /// record per player per season covered.
    fn batting_stats(&self, start: i32, end: i32) -> Result<Vec<SeasonRecord>>;
}

// ============================================================================
// FANGRAPHS CLIENT
// ============================================================================

const LEADERS_URL: &str = "https://www.fangraphs.com/api/leaders/major-league/data";

// Large enough to hold any season range on a single page
const PAGE_ITEMS: u32 = 1_000_000;

/// Blocking client for the major-league batting leaderboard.
pub struct FangraphsClient {
    http: reqwest::blocking::Client,
    base_url: String,
    cache: Option<ResponseCache>,
}

impl FangraphsClient {
    pub fn new() -> Self {
        FangraphsClient {
            http: reqwest::blocking::Client::new(),
            base_url: LEADERS_URL.to_string(),
            cache: None,
        }
    }

    /// Keep responses in an on-disk cache under `dir`.
    pub fn with_cache(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache = Some(ResponseCache::new(dir));
        self
    }

    /// Point the client at a different endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn request_url(&self, start: i32, end: i32) -> String {
        // ind=1 splits multi-season players into one row per season;
        // qual=0 keeps non-qualified batters in the table.
        format!(
            "{}?pos=all&stats=bat&lg=all&qual=0&ind=1&season1={}&season={}&pageitems={}&pagenum=1",
            self.base_url, start, end, PAGE_ITEMS
        )
    }

    fn fetch_rows(&self, url: &str, start: i32, end: i32) -> Result<Vec<Value>> {
        let resp = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("request failed for seasons {}-{}", start, end))?
            .error_for_status()
            .with_context(|| format!("leaderboard rejected seasons {}-{}", start, end))?;

        let payload: Value = resp
            .json()
            .with_context(|| format!("invalid JSON payload for seasons {}-{}", start, end))?;

        extract_rows(&payload)
    }
}

impl Default for FangraphsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BattingSource for FangraphsClient {
    fn batting_stats(&self, start: i32, end: i32) -> Result<Vec<SeasonRecord>> {
        let url = self.request_url(start, end);

        if let Some(cache) = &self.cache {
            if let Some(rows) = cache.lookup(&url) {
                return parse_records(rows);
            }
        }

        let rows = self.fetch_rows(&url, start, end)?;

        if let Some(cache) = &self.cache {
            cache.store(&url, &rows);
        }

        parse_records(rows)
    }
}

/// Pull the row array out of a leaderboard payload.
fn extract_rows(payload: &Value) -> Result<Vec<Value>> {
    payload
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| anyhow!("leaderboard payload has no data array"))
}

fn parse_records(rows: Vec<Value>) -> Result<Vec<SeasonRecord>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).context("unreadable leaderboard row"))
        .collect()
}
