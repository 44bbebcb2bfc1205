// 📦 Fetcher - chunked leaderboard retrieval with skip-on-error
// Partial data is preferred over aborting: a failed chunk is logged and
// skipped, and only a run where every chunk fails is fatal.

use anyhow::Result;
use std::fmt;

use crate::config::PipelineConfig;
use crate::source::{BattingSource, SeasonRecord};

/// Every chunk failed; there is nothing to aggregate.
#[derive(Debug, Clone)]
pub struct NoDataError;

impl fmt::Display for NoDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No data could be loaded. Try reducing the date range or check your connection."
        )
    }
}

impl std::error::Error for NoDataError {}

/// One skipped chunk and why.
#[derive(Debug, Clone)]
pub struct ChunkFailure {
    pub start: i32,
    pub end: i32,
    pub reason: String,
}

/// Outcome of the chunked fetch: every successfully retrieved row plus a
/// record of every chunk that was skipped.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub records: Vec<SeasonRecord>,
    pub failures: Vec<ChunkFailure>,
}

/// Partition [start, end] into consecutive inclusive sub-ranges of at
/// most `size` years.
///
/// Inputs violating `start <= end` or `size >= 1` yield no ranges;
/// `PipelineConfig::validate` rejects them before any fetch.
pub fn chunk_ranges(start: i32, end: i32, size: i32) -> Vec<(i32, i32)> {
    if size < 1 {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut lo = start;
    while lo <= end {
        let hi = (lo + size - 1).min(end);
        ranges.push((lo, hi));
        lo = hi + 1;
    }
    ranges
}

/// Fetch every chunk in the configured range, in order, folding each
/// result-or-skip into a `FetchReport`. Duplicate (season, player) rows
/// from overlapping responses are kept as-is.
pub fn fetch_all<S: BattingSource>(source: &S, cfg: &PipelineConfig) -> Result<FetchReport> {
    cfg.validate()?;

    let ranges = chunk_ranges(cfg.start_year, cfg.end_year, cfg.chunk_size);
    let total = ranges.len();

    let report = ranges
        .into_iter()
        .fold(FetchReport::default(), |mut report, (start, end)| {
            println!("📦 Loading batting stats {}-{} ...", start, end);
            match source.batting_stats(start, end) {
                Ok(mut rows) => report.records.append(&mut rows),
                Err(e) => {
                    eprintln!("⚠️ Skipped {}-{} due to error: {:#}", start, end, e);
                    report.failures.push(ChunkFailure {
                        start,
                        end,
                        reason: format!("{:#}", e),
                    });
                }
            }
            report
        });

    if report.failures.len() == total {
        return Err(NoDataError.into());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use serde_json::json;
    use std::collections::{HashMap, HashSet};

    /// In-memory source with scripted rows and failures per chunk.
    struct ScriptedSource {
        rows: HashMap<(i32, i32), Vec<SeasonRecord>>,
        failing: HashSet<(i32, i32)>,
    }

    impl ScriptedSource {
        fn new() -> Self {
            ScriptedSource {
                rows: HashMap::new(),
                failing: HashSet::new(),
            }
        }
    }

    impl BattingSource for ScriptedSource {
        fn batting_stats(&self, start: i32, end: i32) -> Result<Vec<SeasonRecord>> {
            if self.failing.contains(&(start, end)) {
                bail!("scripted network failure");
            }
            Ok(self.rows.get(&(start, end)).cloned().unwrap_or_default())
        }
    }

    fn rec(season: i32, player: &str, hr: i64) -> SeasonRecord {
        SeasonRecord {
            season: json!(season),
            player: player.to_string(),
            home_runs: json!(hr),
        }
    }

    fn cfg(start: i32, end: i32, chunk: i32) -> PipelineConfig {
        PipelineConfig {
            start_year: start,
            end_year: end,
            chunk_size: chunk,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_chunk_ranges_partition_the_full_span() {
        let ranges = chunk_ranges(1871, 1895, 10);

        assert_eq!(ranges, vec![(1871, 1880), (1881, 1890), (1891, 1895)]);
    }

    #[test]
    fn test_chunk_ranges_exact_multiple() {
        let ranges = chunk_ranges(1900, 1919, 10);

        assert_eq!(ranges, vec![(1900, 1909), (1910, 1919)]);
    }

    #[test]
    fn test_chunk_ranges_single_year() {
        assert_eq!(chunk_ranges(1927, 1927, 10), vec![(1927, 1927)]);
    }

    #[test]
    fn test_chunk_ranges_degenerate_inputs_yield_nothing() {
        assert!(chunk_ranges(1930, 1920, 10).is_empty());
        assert!(chunk_ranges(1920, 1930, 0).is_empty());
    }

    #[test]
    fn test_fetch_all_accumulates_chunks_in_order() {
        let mut source = ScriptedSource::new();
        source.rows.insert((1920, 1921), vec![rec(1920, "Babe Ruth", 54)]);
        source.rows.insert((1922, 1923), vec![rec(1922, "Rogers Hornsby", 42)]);

        let report = fetch_all(&source, &cfg(1920, 1923, 2)).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].player, "Babe Ruth");
        assert_eq!(report.records[1].player, "Rogers Hornsby");
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_failed_chunk_is_skipped_not_fatal() {
        let mut source = ScriptedSource::new();
        source.rows.insert((1920, 1921), vec![rec(1920, "Babe Ruth", 54)]);
        source.failing.insert((1922, 1923));
        source.rows.insert((1924, 1925), vec![rec(1924, "Babe Ruth", 46)]);

        let report = fetch_all(&source, &cfg(1920, 1925, 2)).unwrap();

        assert_eq!(report.records.len(), 2, "both good chunks kept");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].start, 1922);
        assert_eq!(report.failures[0].end, 1923);
        assert!(report.failures[0].reason.contains("scripted network failure"));
    }

    #[test]
    fn test_all_chunks_failing_is_no_data() {
        let mut source = ScriptedSource::new();
        source.failing.insert((1920, 1921));
        source.failing.insert((1922, 1923));

        let err = fetch_all(&source, &cfg(1920, 1923, 2)).unwrap_err();

        assert!(err.downcast_ref::<NoDataError>().is_some());
    }

    #[test]
    fn test_empty_chunks_are_success_not_no_data() {
        // A chunk that returns zero rows still counts as a successful fetch
        let source = ScriptedSource::new();

        let report = fetch_all(&source, &cfg(1920, 1923, 2)).unwrap();

        assert!(report.records.is_empty());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_invalid_config_fails_before_fetching() {
        let source = ScriptedSource::new();

        assert!(fetch_all(&source, &cfg(1930, 1920, 10)).is_err());
    }
}
