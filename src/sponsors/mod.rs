pub mod cache;
pub mod scrape;

pub use scrape::scrape_sponsors;

use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::SponsorsConfig;

/// Source of sponsor usernames.
///
/// Implementations never fail: any problem is logged and reported as
/// "no sponsors".
#[allow(async_fn_in_trait)]
pub trait SponsorSource {
    async fn fetch_sponsors(&self) -> BTreeSet<String>;
}

/// Fixed sponsor list, used when fetching is disabled and in tests
#[derive(Debug, Clone, Default)]
pub struct StaticSponsors(pub BTreeSet<String>);

impl StaticSponsors {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }
}

impl SponsorSource for StaticSponsors {
    async fn fetch_sponsors(&self) -> BTreeSet<String> {
        self.0.clone()
    }
}

/// Scrapes the public sponsors page over HTTP
pub struct HttpSponsorSource {
    client: reqwest::Client,
    url: String,
    owner: String,
}

impl HttpSponsorSource {
    /// Create a source with the configured timeout
    pub fn new(config: &SponsorsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; scoreboard-sync)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: config.url.clone(),
            owner: config.owner.clone(),
        })
    }

    async fn fetch_page(&self) -> Result<String> {
        let response = self
            .client
            .get(self.url.as_str())
            .send()
            .await
            .with_context(|| format!("Failed to fetch sponsors page {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Sponsors page returned status {}", status);
        }

        response
            .text()
            .await
            .context("Failed to read sponsors page body")
    }
}

impl SponsorSource for HttpSponsorSource {
    async fn fetch_sponsors(&self) -> BTreeSet<String> {
        match self.fetch_page().await {
            Ok(html) => {
                let sponsors = scrape_sponsors(&html, &self.owner);
                tracing::debug!(count = sponsors.len(), "scraped sponsors page");
                sponsors
            }
            Err(e) => {
                // Fail silently: leaderboards render without sponsor marks
                tracing::warn!(error = %format!("{:#}", e), "sponsor lookup failed");
                BTreeSet::new()
            }
        }
    }
}

/// Wraps a source with an on-disk cache.
///
/// Only non-empty results are cached so a transient failure does not
/// hide sponsors for the whole TTL. Cache errors are ignored.
pub struct CachedSponsorSource<S> {
    inner: S,
    cache_path: PathBuf,
    key: String,
    ttl: chrono::Duration,
}

impl<S: SponsorSource> CachedSponsorSource<S> {
    pub fn new(inner: S, cache_path: PathBuf, key: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            inner,
            cache_path,
            key: key.into(),
            ttl: chrono::Duration::seconds(ttl_secs as i64),
        }
    }
}

impl<S: SponsorSource> SponsorSource for CachedSponsorSource<S> {
    async fn fetch_sponsors(&self) -> BTreeSet<String> {
        let now = Utc::now();
        if let Some(cached) = cache::read_cached_sponsors(&self.cache_path, &self.key) {
            if cache::is_cache_fresh(&cached, self.ttl, now) {
                tracing::debug!(count = cached.sponsors.len(), "using cached sponsors");
                return cached.sponsors;
            }
        }

        let sponsors = self.inner.fetch_sponsors().await;
        if !sponsors.is_empty() {
            let info = cache::CachedSponsors {
                sponsors: sponsors.clone(),
                fetched_at: now,
            };
            // Ignore cache write errors
            let _ = cache::write_cached_sponsors(&self.cache_path, &self.key, &info);
        }
        sponsors
    }
}

/// The sponsor source selected by configuration and CLI flags
pub enum ConfiguredSponsors {
    Disabled(StaticSponsors),
    Http(HttpSponsorSource),
    Cached(CachedSponsorSource<HttpSponsorSource>),
}

impl ConfiguredSponsors {
    /// Pick a source: nothing when disabled, otherwise the HTTP scraper,
    /// behind the on-disk cache when `use_cache` is set. A client that
    /// cannot be built disables the lookup instead of failing the run.
    pub fn from_config(config: &SponsorsConfig, use_cache: bool) -> Self {
        if !config.enabled {
            return Self::Disabled(StaticSponsors::none());
        }

        let http = match HttpSponsorSource::new(config) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "sponsor lookup disabled");
                return Self::Disabled(StaticSponsors::none());
            }
        };

        if use_cache {
            Self::Cached(CachedSponsorSource::new(
                http,
                cache::get_cache_path(),
                &config.url,
                config.cache_ttl_secs,
            ))
        } else {
            Self::Http(http)
        }
    }
}

impl SponsorSource for ConfiguredSponsors {
    async fn fetch_sponsors(&self) -> BTreeSet<String> {
        match self {
            Self::Disabled(source) => source.fetch_sponsors().await,
            Self::Http(source) => source.fetch_sponsors().await,
            Self::Cached(source) => source.fetch_sponsors().await,
        }
    }
}
