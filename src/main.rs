use anyhow::Result;

use career_hr::{run, FangraphsClient, PipelineConfig};

// Cached leaderboard chunks persist across runs
const CACHE_DIR: &str = ".fangraphs_cache";

fn main() -> Result<()> {
    println!("⚾ Career Home Run Table v{}", career_hr::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let cfg = PipelineConfig::default();
    let client = FangraphsClient::new().with_cache(CACHE_DIR);

    run(&client, &cfg)?;
    Ok(())
}
