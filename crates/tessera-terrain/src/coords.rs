//! Chunk-grid coordinates and their world-space bounds.

use glam::{DVec2, DVec3};

/// Integer position of a chunk in the chunk grid.
///
/// Maps to a world-space origin of `(x, z) * chunk_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World-space `(x, z)` of the chunk's minimum corner.
    pub fn origin(self, chunk_size: f64) -> DVec2 {
        DVec2::new(self.x as f64 * chunk_size, self.z as f64 * chunk_size)
    }

    /// Axis-aligned world bounds on the horizontal plane.
    pub fn bounds(self, chunk_size: f64) -> ChunkBounds {
        let min = self.origin(chunk_size);
        ChunkBounds {
            min,
            max: min + DVec2::splat(chunk_size),
        }
    }

    /// Chunk at the given grid offset.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// The four edge-adjacent neighbours: -X, +X, -Z, +Z.
    pub fn edge_neighbors(self) -> [Self; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }
}

/// Horizontal bounds of a chunk in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkBounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl ChunkBounds {
    /// Horizontal distance from `camera` to the nearest point of the bounds.
    ///
    /// Zero when the camera is above the chunk. Measuring to the nearest point
    /// rather than the centre keeps chunks the camera flies alongside from being
    /// culled or coarsened too early.
    pub fn distance_to(&self, camera: DVec3) -> f64 {
        let point = DVec2::new(camera.x, camera.z);
        let nearest = point.clamp(self.min, self.max);
        point.distance(nearest)
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }
}
