//! Memoized loading keyed by content hash
//!
//! Holds at most one loaded export: the most recent upload. Loading the same
//! bytes again returns the cached transactions; loading anything else
//! replaces the entry.

use log::debug;
use sha2::{Digest, Sha256};

use super::loader::{LoadedData, Loader};
use crate::error::SankeyResult;

/// SHA-256 of the raw upload, hex encoded
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone)]
struct CacheEntry {
    key: String,
    data: LoadedData,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-entry load cache
#[derive(Debug, Clone, Default)]
pub struct LoadCache {
    loader: Loader,
    entry: Option<CacheEntry>,
    stats: CacheStats,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that loads with a specific loader
    pub fn with_loader(loader: Loader) -> Self {
        Self {
            loader,
            ..Self::default()
        }
    }

    /// Load an upload, reusing the cached result when the content is unchanged.
    ///
    /// Any previous entry is dropped before a new load, so a failed load
    /// leaves the cache empty.
    pub fn load(&mut self, bytes: &[u8]) -> SankeyResult<&LoadedData> {
        let key = content_hash(bytes);

        let entry = match self.entry.take() {
            Some(entry) if entry.key == key => {
                self.stats.hits += 1;
                debug!("load cache hit ({})", &key[..12]);
                entry
            }
            _ => {
                self.stats.misses += 1;
                debug!("load cache miss ({}), parsing upload", &key[..12]);
                let data = self.loader.load_bytes(bytes)?;
                CacheEntry { key, data }
            }
        };

        Ok(&self.entry.insert(entry).data)
    }

    /// Currently cached data, if any
    pub fn get(&self) -> Option<&LoadedData> {
        self.entry.as_ref().map(|e| &e.data)
    }

    /// Content hash of the cached upload
    pub fn current_key(&self) -> Option<&str> {
        self.entry.as_ref().map(|e| e.key.as_str())
    }

    /// Drop the cached entry
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
