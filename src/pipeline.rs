// 🚀 Pipeline - fetch → aggregate → filter/format, one forward pass

use anyhow::Result;

use crate::aggregate::{career_totals, CareerRecord};
use crate::config::PipelineConfig;
use crate::fetch::fetch_all;
use crate::report::{filter_and_sort, summarize, write_csv, Summary};
use crate::source::BattingSource;

/// Run the full pipeline against `source` and write the career table to
/// `cfg.output_file`. Returns the summary of what was written.
///
/// Chunk failures are reported and skipped inside the fetch stage; every
/// other error propagates and no output file is produced.
pub fn run<S: BattingSource>(source: &S, cfg: &PipelineConfig) -> Result<Summary> {
    let report = fetch_all(source, cfg)?;
    println!("✅ Loaded {} total player-seasons.", report.records.len());
    if !report.failures.is_empty() {
        println!(
            "⚠️ Continuing with partial data: {} chunk(s) skipped.",
            report.failures.len()
        );
    }

    let totals = career_totals(&report.records)?;
    let rows = filter_and_sort(&totals, cfg.min_hr_filter);

    write_csv(&rows, &cfg.output_file)?;
    println!("💾 Saved file: {}", cfg.output_file.display());

    let summary = summarize(&rows);
    print_summary(&rows, &summary);
    Ok(summary)
}

fn print_summary(rows: &[CareerRecord], summary: &Summary) {
    println!("\nSample of data:");
    for row in rows.iter().take(10) {
        println!("{:>6}  {:<24} {:>4}", row.year, row.player, row.career_hr);
    }

    println!("\nTotal players: {}", summary.players);
    match (summary.min_year, summary.max_year) {
        (Some(lo), Some(hi)) => println!("Year range: {}–{}", lo, hi),
        _ => println!("Year range: (empty)"),
    }
    println!("Done!");
}
