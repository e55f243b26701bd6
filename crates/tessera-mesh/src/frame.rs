//! Placement of a chunk's vertex grid in world space.

use glam::DVec2;
use tessera_config::TerrainConfig;
use tessera_terrain::ChunkCoord;

/// World coordinate of global lattice index `index` on a grid with `segments`
/// cells per `chunk_size`.
///
/// Every world-space vertex coordinate goes through this one expression. Two
/// chunks that share an edge address the shared vertices by the same global
/// index and therefore get bit-identical coordinates. Halving `segments` and
/// `index` together yields the same bits too, which keeps coarser LOD tiers
/// aligned with the full-resolution grid.
#[inline]
pub fn lattice_coordinate(index: i64, chunk_size: f64, segments: u32) -> f64 {
    index as f64 * chunk_size / segments as f64
}

/// Where a chunk's `(segments + 1)²` vertex grid sits in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkFrame {
    /// Minimum-corner chunk.
    pub coord: ChunkCoord,
    /// Edge length of one chunk cell.
    pub chunk_size: f64,
    /// Grid cells along each edge of the frame.
    pub segments: u32,
    /// Chunk cells covered along each axis. 1 for regular chunks.
    pub span: u32,
}

impl ChunkFrame {
    /// A regular chunk tessellated with `segments` cells per edge.
    pub fn chunk(coord: ChunkCoord, chunk_size: f64, segments: u32) -> Self {
        Self {
            coord,
            chunk_size,
            segments: segments.max(1),
            span: 1,
        }
    }

    /// The single synthetic chunk covering the whole grid when chunking is off.
    pub fn whole_world(config: &TerrainConfig) -> Self {
        let start = config.chunk_range().start;
        Self {
            coord: ChunkCoord::new(start, start),
            chunk_size: config.effective_chunk_size(),
            segments: config.full_resolution_segments(),
            span: config.chunks_per_side(),
        }
    }

    /// World-space minimum corner.
    pub fn origin(&self) -> DVec2 {
        self.coord.origin(self.chunk_size)
    }

    /// Edge length in world units.
    pub fn size(&self) -> f64 {
        self.chunk_size * self.span as f64
    }

    fn axis(&self, chunk: i32, i: u32) -> f64 {
        let index = chunk as i64 * self.segments as i64 + i as i64 * self.span as i64;
        lattice_coordinate(index, self.chunk_size, self.segments)
    }

    /// World `x` of grid column `i`.
    pub fn world_x(&self, i: u32) -> f64 {
        self.axis(self.coord.x, i)
    }

    /// World `z` of grid row `j`.
    pub fn world_z(&self, j: u32) -> f64 {
        self.axis(self.coord.z, j)
    }

    /// Vertices along one edge.
    pub fn vertices_per_edge(&self) -> usize {
        self.segments as usize + 1
    }
}
