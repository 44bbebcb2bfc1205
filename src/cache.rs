// 💾 Response Cache - on-disk cache of leaderboard row arrays
// Keyed by SHA-256 of the request URL, one JSON file per entry. The cache
// is best-effort: any read or write problem degrades to a miss and the
// caller fetches live.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: DateTime<Utc>,
    rows: Vec<Value>,
}

pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ResponseCache { dir: dir.into() }
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        self.dir.join(format!("{:x}.json", hasher.finalize()))
    }

    /// Cached rows for `url`, or None on a miss or an unreadable entry.
    pub fn lookup(&self, url: &str) -> Option<Vec<Value>> {
        let raw = fs::read_to_string(self.entry_path(url)).ok()?;
        let entry: CacheEntry = serde_json::from_str(&raw).ok()?;
        if entry.url != url {
            return None;
        }
        Some(entry.rows)
    }

    /// Store rows for `url`. Errors are discarded.
    pub fn store(&self, url: &str, rows: &[Value]) {
        if fs::create_dir_all(&self.dir).is_err() {
            return;
        }
        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at: Utc::now(),
            rows: rows.to_vec(),
        };
        if let Ok(json) = serde_json::to_string(&entry) {
            let _ = fs::write(self.entry_path(url), json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_then_lookup_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path());
        let rows = vec![json!({"Season": 1920, "Name": "Babe Ruth", "HR": 54})];

        cache.store("http://example/leaders?season1=1920", &rows);
        let hit = cache.lookup("http://example/leaders?season1=1920");

        assert_eq!(hit, Some(rows));
    }

    #[test]
    fn test_lookup_on_empty_cache_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path());

        assert!(cache.lookup("http://example/leaders").is_none());
    }

    #[test]
    fn test_entries_are_keyed_by_url() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path());

        cache.store("http://example/a", &[json!({"HR": 1})]);

        assert!(cache.lookup("http://example/b").is_none());
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path());
        let url = "http://example/leaders";

        cache.store(url, &[json!({"HR": 1})]);
        fs::write(cache.entry_path(url), "not json").unwrap();

        assert!(cache.lookup(url).is_none());
    }

    #[test]
    fn test_store_into_unwritable_dir_is_silent() {
        let cache = ResponseCache::new("/dev/null/nope");

        // Must not panic or error out
        cache.store("http://example/leaders", &[json!({"HR": 1})]);
        assert!(cache.lookup("http://example/leaders").is_none());
    }
}
