//! Terrain configuration snapshot and the values derived from it.
//!
//! A [`TerrainConfig`] is treated as immutable for the duration of a frame. Any
//! change is observed by comparing snapshots, and geometry caches are keyed by
//! [`TerrainConfig::geometry_hash`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Smallest chunk edge length accepted, in world units.
pub const MIN_CHUNK_SIZE: f64 = 1.0;

/// Tier-0 segment count floor. Coarser counts produce degenerate geometry.
pub const MIN_SEGMENTS_PER_CHUNK: u32 = 10;

/// Upper bound on tier-0 segments per chunk edge.
pub const MAX_SEGMENTS_PER_CHUNK: u32 = 256;

/// Upper bound on chunks along one side of the world. Chunk size grows to honour it.
pub const MAX_CHUNKS_PER_SIDE: u32 = 64;

/// Elevations with a larger magnitude are treated as numerical garbage.
pub const MAX_ELEVATION: f64 = 10_000.0;

/// Terrain generation and chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Edge length of the square world, in world units.
    pub world_size: f64,
    /// Edge length of one chunk, in world units.
    pub chunk_size: f64,
    /// Segment count the whole world would have if meshed as a single grid.
    pub base_segments: u32,
    /// Vertical multiplier applied to the shaped noise sum.
    pub height_scale: f64,
    /// Seed of the base noise field. Secondary and tertiary fields use fixed offsets.
    pub seed: i64,
    /// Chunks whose nearest edge is at least this far from the camera are culled.
    pub view_distance: f64,
    /// Level-of-detail thresholds and update throttling.
    pub lod: LodConfig,
    /// Split the world into independently meshed chunks.
    pub enable_chunking: bool,
    /// Reduce tessellation with distance. When off every chunk uses tier 0.
    pub enable_lod: bool,
    /// Drop chunks beyond `view_distance`.
    pub enable_view_culling: bool,
    /// Height-to-colour ramp baked into vertex colours.
    pub color_gradient: ColorGradient,
    /// Optional grayscale image used instead of the procedural height field.
    pub heightmap: Option<PathBuf>,
}

/// Distance thresholds for LOD tiers, ordered near < medium < far.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Below this distance chunks use full resolution (tier 0).
    pub near: f64,
    /// Below this distance chunks use half resolution (tier 1).
    pub medium: f64,
    /// Nominal end of the quarter-resolution band (tier 2). Tier 2 is the coarsest.
    pub far: f64,
    /// Minimum time between visibility re-evaluations, in seconds.
    pub update_interval_secs: f64,
    /// Camera movement that forces a re-evaluation inside the throttle window.
    pub camera_move_threshold: f64,
    /// Refine chunks so edge-adjacent neighbours differ by at most one tier.
    pub limit_neighbor_delta: bool,
    /// Snap finer chunk edges onto a coarser neighbour's edge.
    pub stitch_edges: bool,
}

/// Three-stop colour ramp keyed by normalised elevation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorGradient {
    /// When false vertices are white and shading comes from the material alone.
    pub enabled: bool,
    pub low_color: [f32; 3],
    pub mid_color: [f32; 3],
    pub high_color: [f32; 3],
    /// Elevation mapped to normalised 0.
    pub low_height: f64,
    /// Elevation mapped to normalised 1.
    pub high_height: f64,
    /// Normalised elevation where the low->mid ramp hands over to mid->high.
    pub mid_point: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            world_size: 2000.0,
            chunk_size: 500.0,
            base_segments: 256,
            height_scale: 75.0,
            seed: 18871,
            view_distance: 1000.0,
            lod: LodConfig::default(),
            enable_chunking: true,
            enable_lod: true,
            enable_view_culling: true,
            color_gradient: ColorGradient::default(),
            heightmap: None,
        }
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            near: 400.0,
            medium: 800.0,
            far: 1200.0,
            update_interval_secs: 0.1,
            camera_move_threshold: 1.0,
            limit_neighbor_delta: true,
            stitch_edges: true,
        }
    }
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self {
            enabled: true,
            low_color: [0.20, 0.36, 0.14],
            mid_color: [0.46, 0.39, 0.28],
            high_color: [0.95, 0.95, 0.97],
            low_height: -50.0,
            high_height: 150.0,
            mid_point: 0.45,
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

impl LodConfig {
    /// Thresholds as `[near, medium, far]`, made non-negative and ascending.
    pub fn sorted_thresholds(&self) -> [f64; 3] {
        let near = finite_or(self.near, 0.0).max(0.0);
        let medium = finite_or(self.medium, near).max(near);
        let far = finite_or(self.far, medium).max(medium);
        [near, medium, far]
    }
}

impl TerrainConfig {
    /// Chunk edge length after clamping to [`MIN_CHUNK_SIZE`] and the chunk-count cap.
    pub fn effective_chunk_size(&self) -> f64 {
        let world = finite_or(self.world_size, Self::default().world_size).max(0.0);
        let chunk = finite_or(self.chunk_size, Self::default().chunk_size);
        chunk
            .max(MIN_CHUNK_SIZE)
            .max(world / MAX_CHUNKS_PER_SIDE as f64)
    }

    /// World edge length, never smaller than one chunk.
    pub fn effective_world_size(&self) -> f64 {
        let world = finite_or(self.world_size, Self::default().world_size);
        world.max(self.effective_chunk_size())
    }

    /// Number of chunks along one side of the world grid.
    pub fn chunks_per_side(&self) -> u32 {
        let per_side = (self.effective_world_size() / self.effective_chunk_size()).ceil();
        (per_side as u32).clamp(1, MAX_CHUNKS_PER_SIDE)
    }

    /// Chunk indices along either axis. The grid is centred on the world origin.
    pub fn chunk_range(&self) -> Range<i32> {
        let n = self.chunks_per_side() as i32;
        let start = -(n / 2);
        start..start + n
    }

    /// Minimum and maximum world coordinate covered by the chunk grid along either axis.
    pub fn grid_extent(&self) -> (f64, f64) {
        let range = self.chunk_range();
        let size = self.effective_chunk_size();
        (range.start as f64 * size, range.end as f64 * size)
    }

    /// Tier-0 segment count per chunk edge.
    ///
    /// `floor(base_segments * chunk / world)`, floored at [`MIN_SEGMENTS_PER_CHUNK`]
    /// and rounded up to a multiple of four so the half and quarter tiers share
    /// every one of their vertices with the full-resolution grid.
    pub fn segments_per_chunk(&self) -> u32 {
        let ratio = self.effective_chunk_size() / self.effective_world_size();
        let raw = (self.base_segments as f64 * ratio).floor() as u32;
        let clamped = raw.clamp(MIN_SEGMENTS_PER_CHUNK, MAX_SEGMENTS_PER_CHUNK);
        clamped.div_ceil(4) * 4
    }

    /// Segment count used for the synthetic whole-world chunk when chunking is off.
    pub fn full_resolution_segments(&self) -> u32 {
        self.base_segments
            .clamp(MIN_SEGMENTS_PER_CHUNK, MAX_SEGMENTS_PER_CHUNK * 4)
    }

    /// Stable hash of every field that changes generated geometry.
    ///
    /// Visibility-only fields (view distance, LOD thresholds, throttling, culling
    /// flags) are excluded so a threshold tweak never invalidates cached meshes.
    pub fn geometry_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        self.height_scale.to_bits().hash(&mut hasher);
        self.effective_world_size().to_bits().hash(&mut hasher);
        self.effective_chunk_size().to_bits().hash(&mut hasher);
        self.base_segments.hash(&mut hasher);
        self.enable_chunking.hash(&mut hasher);
        self.heightmap.hash(&mut hasher);

        let g = &self.color_gradient;
        g.enabled.hash(&mut hasher);
        for channel in g.low_color.iter().chain(&g.mid_color).chain(&g.high_color) {
            channel.to_bits().hash(&mut hasher);
        }
        g.low_height.to_bits().hash(&mut hasher);
        g.high_height.to_bits().hash(&mut hasher);
        g.mid_point.to_bits().hash(&mut hasher);
        hasher.finish()
    }
}
