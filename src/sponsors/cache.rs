use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const SPONSORS_CACHE_KEY_PREFIX: &str = "sponsors:";

/// Cached sponsor list with timestamp
#[derive(Debug, Serialize, Deserialize)]
pub struct CachedSponsors {
    pub sponsors: BTreeSet<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Get the platform-appropriate cache directory for scoreboard-sync
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("scoreboard-sync"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/scoreboard-sync",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

fn cache_key(url: &str) -> String {
    format!("{}{}", SPONSORS_CACHE_KEY_PREFIX, url)
}

/// Read the cached sponsor list for a page
pub fn read_cached_sponsors(cache_path: &Path, url: &str) -> Option<CachedSponsors> {
    let bytes = cacache::read_sync(cache_path, cache_key(url)).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Write a sponsor list to the cache
pub fn write_cached_sponsors(cache_path: &Path, url: &str, info: &CachedSponsors) -> Result<()> {
    let json = serde_json::to_vec(info)?;
    cacache::write_sync(cache_path, cache_key(url), &json)?;
    Ok(())
}

/// Check if a cached list is younger than `ttl`
pub fn is_cache_fresh(info: &CachedSponsors, ttl: Duration, now: DateTime<Utc>) -> bool {
    now - info.fetched_at < ttl
}
