//! Local cache of downloaded profiles.
//!
//! A profile is stored as `<BAI>.json` in the cache directory and reused as
//! long as it was written today. Older copies are reused or refreshed at the
//! caller's choice.

use crate::client::InspireClient;
use crate::error::{MetricsError, Result};
use crate::types::Record;
use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "INSPIRE_METRICS_CACHE_DIR";

/// A profile read back from the cache.
#[derive(Debug, Clone)]
pub struct CachedProfile {
    pub records: Vec<Record>,
    /// Local date the cache file was last written.
    pub saved_on: NaiveDate,
}

/// Directory holding cached profiles.
#[derive(Debug, Clone)]
pub struct ProfileCache {
    dir: PathBuf,
}

impl ProfileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Use `INSPIRE_METRICS_CACHE_DIR`, or the platform cache directory.
    pub fn from_env() -> Result<Self> {
        if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(Self::new(dir));
            }
        }
        dirs::cache_dir()
            .map(|d| Self::new(d.join("inspire-metrics")))
            .ok_or_else(|| {
                MetricsError::Config(format!(
                    "no cache directory on this platform; set {}",
                    CACHE_DIR_ENV
                ))
            })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache file of an author.
    pub fn path(&self, bai: &str) -> Result<PathBuf> {
        if bai.is_empty() || bai.contains(['/', '\\']) || bai.starts_with('.') {
            return Err(MetricsError::Config(format!(
                "'{}' is not a usable author identifier",
                bai
            )));
        }
        Ok(self.dir.join(format!("{}.json", bai)))
    }

    /// Read a cached profile, `None` when there is none.
    pub fn load(&self, bai: &str) -> Result<Option<CachedProfile>> {
        let path = self.path(bai)?;
        if !path.is_file() {
            debug!(path = %path.display(), "No cached profile");
            return Ok(None);
        }

        let modified = fs::metadata(&path)?.modified()?;
        let saved_on = DateTime::<Local>::from(modified).date_naive();
        let records: Vec<Record> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        debug!(path = %path.display(), records = records.len(), %saved_on, "Loaded cached profile");

        Ok(Some(CachedProfile { records, saved_on }))
    }

    /// Write a profile, replacing any previous copy.
    pub fn store(&self, bai: &str, records: &[Record]) -> Result<PathBuf> {
        let path = self.path(bai)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_string_pretty(records)?)?;
        info!(path = %path.display(), records = records.len(), "Saved profile");
        Ok(path)
    }
}

/// Return an author's profile from the cache, downloading it when missing.
///
/// A copy saved today is used as is. For an older copy `refresh` is asked,
/// with the date it was saved, whether to download a new one. `on_page`
/// follows the download as in [`download_profile`].
pub async fn load_profile<F, P>(
    client: &InspireClient,
    cache: &ProfileCache,
    bai: &str,
    refresh: F,
    on_page: P,
) -> Result<Vec<Record>>
where
    F: FnOnce(NaiveDate) -> bool,
    P: FnMut(u32, u32),
{
    let today = Local::now().date_naive();

    if let Some(cached) = cache.load(bai)? {
        if cached.saved_on == today || !refresh(cached.saved_on) {
            return Ok(cached.records);
        }
    }

    download_profile(client, cache, bai, on_page).await
}

/// Download an author's profile and replace the cached copy.
///
/// `on_page` is called after every page with the pages fetched so far and the
/// expected total.
pub async fn download_profile<P>(
    client: &InspireClient,
    cache: &ProfileCache,
    bai: &str,
    on_page: P,
) -> Result<Vec<Record>>
where
    P: FnMut(u32, u32),
{
    let records = client.fetch_profile_with_progress(bai, on_page).await?;
    if records.is_empty() {
        return Err(MetricsError::EmptyInput(format!(
            "no literature found for {}; nothing saved",
            bai
        )));
    }
    cache.store(bai, &records)?;
    Ok(records)
}
