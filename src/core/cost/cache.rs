use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::cost::names::AccountNameLookup;

/// Entries at or beyond this age are treated as absent.
pub const CACHE_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub name: String,
    /// Unix timestamp (seconds) of the lookup that produced `name`.
    pub fetched_at: i64,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: i64) -> bool {
        now - self.fetched_at < CACHE_TTL_SECS
    }
}

/// Default location of the account name cache, respecting XDG_CACHE_HOME.
pub fn default_cache_dir() -> PathBuf {
    let base = std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join(".cache")
        });
    base.join("costwatch").join("account-names")
}

/// On-disk account id → display name cache, one JSON file per account.
#[derive(Debug, Clone)]
pub struct NameCache {
    dir: PathBuf,
}

impl NameCache {
    /// Open the cache at `dir`, creating it owner-only if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        create_private_dir(&dir)
            .with_context(|| format!("Failed to create cache directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ids become file names, so anything outside `[A-Za-z0-9_-]` is not cached.
    fn entry_path(&self, account_id: &str) -> Option<PathBuf> {
        let safe = !account_id.is_empty()
            && account_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        safe.then(|| self.dir.join(format!("{}.json", account_id)))
    }

    /// Read an entry regardless of age. Unreadable or corrupt entries are absent.
    pub fn load(&self, account_id: &str) -> Option<CacheEntry> {
        let path = self.entry_path(account_id)?;
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// The cached name, if present and younger than [`CACHE_TTL_SECS`].
    pub fn get(&self, account_id: &str, now: i64) -> Option<String> {
        self.load(account_id)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.name)
    }

    /// Save the cache entry for an account, overwriting any previous one.
    pub fn store(&self, account_id: &str, name: &str, now: i64) -> Result<()> {
        let path = self
            .entry_path(account_id)
            .with_context(|| format!("Account id not cacheable: {}", account_id))?;
        let entry = CacheEntry {
            name: name.to_string(),
            fetched_at: now,
        };
        let json = serde_json::to_string(&entry).context("Failed to serialize cache entry")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write cache to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Resolve an account's display name, best effort.
///
/// With a cache, a fresh entry is returned without calling `lookup`, and a
/// successful lookup is written back. Without one (`--no-cache` or a cache
/// that could not be created) persisted state is neither read nor written.
/// A failed lookup yields the raw account id.
pub async fn resolve<L: AccountNameLookup>(
    cache: Option<&NameCache>,
    lookup: &L,
    account_id: &str,
) -> String {
    let now = Utc::now().timestamp();

    if let Some(name) = cache.and_then(|c| c.get(account_id, now)) {
        tracing::debug!(account_id, "name cache hit");
        return name;
    }

    match lookup.lookup(account_id).await {
        Some(name) => {
            if let Some(cache) = cache {
                if let Err(e) = cache.store(account_id, &name, now) {
                    tracing::warn!(account_id, error = %format!("{:#}", e), "could not cache account name");
                }
            }
            name
        }
        None => account_id.to_string(),
    }
}
