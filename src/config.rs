// ⚙️ Pipeline Configuration
// Explicit config passed into the pipeline entry point (no globals)

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Configuration for one pipeline run.
///
/// `Default` carries the canonical constants; tests construct narrower
/// ranges directly.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// First season to fetch, inclusive (default: 1871)
    pub start_year: i32,

    /// Last season to fetch, inclusive (default: 2024)
    pub end_year: i32,

    /// Years per leaderboard request (default: 10)
    pub chunk_size: i32,

    /// Inclusive lower bound on career HR for output inclusion (default: 50).
    /// A threshold <= 0 keeps every row.
    pub min_hr_filter: i64,

    /// Destination path for the CSV table (default: "career_hr.csv")
    pub output_file: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            start_year: 1871,
            end_year: 2024,
            chunk_size: 10,
            min_hr_filter: 50,
            output_file: PathBuf::from("career_hr.csv"),
        }
    }
}

impl PipelineConfig {
    /// Reject impossible ranges before any request is made.
    pub fn validate(&self) -> Result<()> {
        if self.start_year > self.end_year {
            bail!(
                "start year {} is after end year {}",
                self.start_year,
                self.end_year
            );
        }
        if self.chunk_size < 1 {
            bail!("chunk size must be at least 1 year, got {}", self.chunk_size);
        }
        Ok(())
    }
}
