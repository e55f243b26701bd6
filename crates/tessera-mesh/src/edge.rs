//! The four edges of a square chunk.

use tessera_terrain::ChunkCoord;

/// One side of a chunk on the horizontal plane.
///
/// The `repr(u8)` discriminant indexes per-edge arrays and matches the order of
/// [`ChunkCoord::edge_neighbors`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChunkEdge {
    /// Side at the chunk's minimum x (`i == 0`).
    NegX = 0,
    /// Side at the chunk's maximum x (`i == segments`).
    PosX = 1,
    /// Side at the chunk's minimum z (`j == 0`).
    NegZ = 2,
    /// Side at the chunk's maximum z (`j == segments`).
    PosZ = 3,
}

impl ChunkEdge {
    pub const ALL: [ChunkEdge; 4] = [Self::NegX, Self::PosX, Self::NegZ, Self::PosZ];

    /// The edge a neighbour across this edge sees.
    pub fn opposite(self) -> Self {
        match self {
            Self::NegX => Self::PosX,
            Self::PosX => Self::NegX,
            Self::NegZ => Self::PosZ,
            Self::PosZ => Self::NegZ,
        }
    }

    /// Coordinate of the chunk across this edge.
    pub fn neighbor(self, coord: ChunkCoord) -> ChunkCoord {
        coord.edge_neighbors()[self as usize]
    }

    /// Grid index `(i, j)` of the `k`th vertex along this edge, walking toward +x / +z.
    pub fn grid_index(self, k: u32, segments: u32) -> (u32, u32) {
        match self {
            Self::NegX => (0, k),
            Self::PosX => (segments, k),
            Self::NegZ => (k, 0),
            Self::PosZ => (k, segments),
        }
    }
}
