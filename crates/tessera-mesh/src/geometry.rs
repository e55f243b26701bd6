//! Built chunk geometry handed to the rendering host.

use crate::edge::ChunkEdge;
use crate::frame::ChunkFrame;
use crate::vertex::TerrainVertex;

/// A chunk's triangle mesh in world space.
///
/// Immutable once built. Vertices are row-major: index `j * (segments + 1) + i`
/// with `i` along x and `j` along z.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkGeometry {
    pub frame: ChunkFrame,
    pub vertices: Vec<TerrainVertex>,
    /// Triangle list, 3 indices per triangle.
    pub indices: Vec<u32>,
}

impl ChunkGeometry {
    pub fn segments(&self) -> u32 {
        self.frame.segments
    }

    pub fn vertex_index(&self, i: u32, j: u32) -> usize {
        j as usize * self.frame.vertices_per_edge() + i as usize
    }

    pub fn vertex(&self, i: u32, j: u32) -> &TerrainVertex {
        &self.vertices[self.vertex_index(i, j)]
    }

    /// Positions along one edge, walking toward +x / +z.
    pub fn edge_positions(&self, edge: ChunkEdge) -> Vec<[f32; 3]> {
        let segments = self.segments();
        (0..=segments)
            .map(|k| {
                let (i, j) = edge.grid_index(k, segments);
                self.vertex(i, j).position
            })
            .collect()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as raw bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Minimum and maximum vertex elevation.
    pub fn height_range(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.position[1]), hi.max(v.position[1]))
            })
    }
}
