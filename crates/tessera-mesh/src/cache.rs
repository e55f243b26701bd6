//! Content-addressed cache of built chunk geometry.
//!
//! Geometry is a pure function of its key, so an entry is never mutated after
//! insertion. Entries are only dropped wholesale, when their key stops being
//! live or the configuration hash changes.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tessera_terrain::ChunkCoord;
use tracing::debug;

use crate::frame::ChunkFrame;
use crate::geometry::ChunkGeometry;
use crate::stitching::EdgeStitch;

/// Everything a chunk mesh depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    pub coord: ChunkCoord,
    pub segments: u32,
    pub span: u32,
    /// Coarser neighbour segment counts per edge, 0 where unconstrained.
    pub edge_segments: [u32; 4],
    /// [`TerrainConfig::geometry_hash`](tessera_config::TerrainConfig::geometry_hash)
    /// of the snapshot the mesh was built from.
    pub config_hash: u64,
}

impl GeometryKey {
    pub fn new(frame: &ChunkFrame, stitch: &EdgeStitch, config_hash: u64) -> Self {
        Self {
            coord: frame.coord,
            segments: frame.segments,
            span: frame.span,
            edge_segments: stitch.key(),
            config_hash,
        }
    }
}

/// Hit/miss counters since the cache was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Map from [`GeometryKey`] to shared, immutable geometry.
#[derive(Default)]
pub struct GeometryCache {
    entries: FxHashMap<GeometryKey, Arc<ChunkGeometry>>,
    stats: CacheStats,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &GeometryKey) -> Option<Arc<ChunkGeometry>> {
        self.entries.get(key).cloned()
    }

    /// Return the cached geometry for `key`, building and inserting it on a miss.
    ///
    /// The second tuple element is `true` when `build` ran.
    pub fn get_or_build(
        &mut self,
        key: GeometryKey,
        build: impl FnOnce() -> ChunkGeometry,
    ) -> (Arc<ChunkGeometry>, bool) {
        if let Some(existing) = self.entries.get(&key) {
            self.stats.hits += 1;
            return (Arc::clone(existing), false);
        }
        self.stats.misses += 1;
        let geometry = Arc::new(build());
        self.entries.insert(key, Arc::clone(&geometry));
        (geometry, true)
    }

    /// Drop every entry for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&GeometryKey) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| keep(key));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            self.stats.evictions += evicted as u64;
            debug!(evicted, remaining = self.entries.len(), "geometry cache evicted");
        }
        evicted
    }

    /// Keep only the keys that are still live this frame.
    pub fn retain_keys(&mut self, live: &FxHashSet<GeometryKey>) -> usize {
        self.retain(|key| live.contains(key))
    }

    /// Drop entries built from any other configuration.
    pub fn retain_config(&mut self, config_hash: u64) -> usize {
        self.retain(|key| key.config_hash == config_hash)
    }

    pub fn clear(&mut self) {
        let evicted = self.entries.len();
        self.entries.clear();
        self.stats.evictions += evicted as u64;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
