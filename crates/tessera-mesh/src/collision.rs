//! Static collision geometry for the physics collaborator.
//!
//! Always sampled at full tier-0 density over the whole chunk grid, whatever
//! LOD the visual chunks are using, so the walkable surface never depends on
//! where the camera is.

use glam::DVec2;
use tessera_config::TerrainConfig;
use tessera_terrain::HeightField;

use crate::builder::grid_indices;
use crate::frame::lattice_coordinate;

/// Uniform height grid covering the world.
///
/// `heights` is row-major, `(resolution + 1)²` samples, index `j * (resolution + 1) + i`
/// with `i` along x and `j` along z. `lattice` holds the world coordinate of
/// each grid line, identical for both axes.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionHeightfield {
    pub resolution: u32,
    pub cell_size: f64,
    pub lattice: Vec<f64>,
    pub heights: Vec<f32>,
}

/// Indexed triangle mesh form of a [`CollisionHeightfield`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionMesh {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

impl CollisionHeightfield {
    /// Sample the whole grid at `chunks_per_side * segments_per_chunk` cells per side.
    ///
    /// Samples use the same lattice as tier-0 chunks, so every collision vertex
    /// coincides with a full-resolution visual vertex.
    pub fn build<H: HeightField + ?Sized>(height: &H, config: &TerrainConfig) -> Self {
        let segments = config.segments_per_chunk();
        let chunk_size = config.effective_chunk_size();
        let resolution = config.chunks_per_side() * segments;
        let start = config.chunk_range().start as i64 * segments as i64;

        let lattice: Vec<f64> = (0..=resolution as i64)
            .map(|i| lattice_coordinate(start + i, chunk_size, segments))
            .collect();

        let mut heights = Vec::with_capacity(lattice.len() * lattice.len());
        for &z in &lattice {
            heights.extend(lattice.iter().map(|&x| height.height_at(x, z) as f32));
        }

        Self {
            resolution,
            cell_size: chunk_size / segments as f64,
            lattice,
            heights,
        }
    }

    /// World-space corner with the smallest x and z.
    pub fn origin(&self) -> DVec2 {
        DVec2::splat(self.lattice.first().copied().unwrap_or_default())
    }

    pub fn samples_per_side(&self) -> usize {
        self.resolution as usize + 1
    }

    /// Height at grid sample `(i, j)`, `None` outside the grid.
    pub fn height_at_grid(&self, i: u32, j: u32) -> Option<f32> {
        if i > self.resolution || j > self.resolution {
            return None;
        }
        self.heights
            .get(j as usize * self.samples_per_side() + i as usize)
            .copied()
    }

    /// Triangulate with the same diagonal split as the visual chunks.
    pub fn to_trimesh(&self) -> CollisionMesh {
        let row = self.samples_per_side();
        let vertices = self
            .heights
            .iter()
            .enumerate()
            .map(|(n, &h)| {
                let x = self.lattice[n % row];
                let z = self.lattice[n / row];
                [x as f32, h, z as f32]
            })
            .collect();

        let triangles = grid_indices(self.resolution)
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();

        CollisionMesh {
            vertices,
            triangles,
        }
    }
}
