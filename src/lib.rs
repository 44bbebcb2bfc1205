// Career HR Pipeline - Core Library
// Exposes all modules for use in the CLI binary and tests

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod pipeline;
pub mod report;
pub mod source;

// Re-export commonly used types
pub use aggregate::{career_totals, career_totals_by, CareerRecord, MalformedValue};
pub use cache::ResponseCache;
pub use config::PipelineConfig;
pub use fetch::{chunk_ranges, fetch_all, ChunkFailure, FetchReport, NoDataError};
pub use pipeline::run;
pub use report::{filter_and_sort, summarize, write_csv, Summary};
pub use source::{BattingSource, FangraphsClient, SeasonRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
