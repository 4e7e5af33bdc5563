//! Tile image cache
//!
//! Bounded in-memory cache over decoded tile images with
//! least-recently-used eviction. Entries are scoped by tile source, so a
//! layer switch never serves imagery fetched for another source, and the
//! previous source's tiles survive for switching back.

use crate::coord::TileKey;
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Shared handle to one decoded tile image.
pub type ImageHandle = Arc<RgbaImage>;

/// Default cache budget, sized for watch-class memory.
pub const DEFAULT_MAX_BYTES: usize = 64 * 1024 * 1024;

/// Cache identity: a tile key scoped by the source it was fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Layer id the tile belongs to
    pub layer: String,
    /// Tile identity within that layer
    pub tile: TileKey,
}

impl CacheKey {
    pub fn new(layer: impl Into<String>, tile: TileKey) -> Self {
        Self {
            layer: layer.into(),
            tile,
        }
    }
}

/// Cache effectiveness counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entry_count: usize,
    pub size_bytes: usize,
}

struct CacheEntry {
    image: ImageHandle,
    bytes: usize,
    /// LRU clock value at the last access
    last_used: u64,
}

struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    used_bytes: usize,
    /// Monotonic access counter; newer accesses get larger values
    clock: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Bounded in-memory tile cache with LRU eviction.
///
/// Entries are replace-only: a `put` for an existing key swaps the whole
/// image handle, never edits pixels in place. A miss is an ordinary
/// outcome, not an error; callers re-fetch.
pub struct TileCache {
    inner: Mutex<CacheInner>,
    max_size_bytes: usize,
}

impl TileCache {
    /// Creates a cache bounded to `max_size_bytes` of decoded image data.
    pub fn new(max_size_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                used_bytes: 0,
                clock: 0,
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
            max_size_bytes,
        }
    }

    /// Looks up a tile image, refreshing its LRU position on a hit.
    pub fn get(&self, key: &CacheKey) -> Option<ImageHandle> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        inner.clock += 1;
        let clock = inner.clock;
        match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.last_used = clock;
                let image = Arc::clone(&entry.image);
                inner.hits += 1;
                Some(image)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Stores a tile image, evicting least-recently-used entries until
    /// the cache fits its budget. The entry just inserted is never the
    /// one evicted, so an oversized single image still caches.
    pub fn put(&self, key: CacheKey, image: ImageHandle) {
        let bytes = image.as_raw().len();
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        inner.clock += 1;
        let clock = inner.clock;
        if let Some(old) = inner.entries.insert(
            key,
            CacheEntry {
                image,
                bytes,
                last_used: clock,
            },
        ) {
            inner.used_bytes -= old.bytes;
        }
        inner.used_bytes += bytes;
        Self::evict_locked(inner, self.max_size_bytes);
    }

    /// True when the key is cached. Does not refresh LRU position.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.inner.lock().unwrap().entries.contains_key(key)
    }

    /// Number of cached tiles.
    pub fn entry_count(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    /// Decoded bytes currently held.
    pub fn size_bytes(&self) -> usize {
        self.inner.lock().unwrap().used_bytes
    }

    /// The configured byte budget.
    pub fn max_size_bytes(&self) -> usize {
        self.max_size_bytes
    }

    /// Drops every entry. Counters are preserved.
    pub fn clear(&self) {
        let mut guard = self.inner.lock().unwrap();
        guard.entries.clear();
        guard.used_bytes = 0;
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let guard = self.inner.lock().unwrap();
        CacheStats {
            hits: guard.hits,
            misses: guard.misses,
            evictions: guard.evictions,
            entry_count: guard.entries.len(),
            size_bytes: guard.used_bytes,
        }
    }

    fn evict_locked(inner: &mut CacheInner, max_size_bytes: usize) {
        while inner.used_bytes > max_size_bytes && inner.entries.len() > 1 {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            let Some(key) = oldest else {
                break;
            };
            if let Some(entry) = inner.entries.remove(&key) {
                inner.used_bytes -= entry.bytes;
                inner.evictions += 1;
                debug!(
                    layer = %key.layer,
                    tile = %key.tile,
                    bytes = entry.bytes,
                    "evicted least recently used tile"
                );
            }
        }
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BYTES)
    }
}
