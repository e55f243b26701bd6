//! World-space grid meshing of a single chunk.

use tessera_config::ColorGradient;
use tessera_terrain::HeightField;

use crate::coloring::gradient_color;
use crate::frame::ChunkFrame;
use crate::geometry::ChunkGeometry;
use crate::normals::compute_smooth_normals;
use crate::stitching::EdgeStitch;
use crate::vertex::TerrainVertex;

/// Builds chunk meshes from a height field.
///
/// Heights are always sampled at absolute world coordinates (see
/// [`crate::lattice_coordinate`]), never chunk-local ones, so chunks meshed
/// independently agree on their shared edges. The builder only reads its
/// inputs; output depends on nothing but the frame, stitch, height field and
/// gradient.
pub struct ChunkMeshBuilder<'a, H: HeightField + ?Sized> {
    height: &'a H,
    gradient: Option<&'a ColorGradient>,
}

impl<'a, H: HeightField + ?Sized> ChunkMeshBuilder<'a, H> {
    pub fn new(height: &'a H, gradient: Option<&'a ColorGradient>) -> Self {
        Self { height, gradient }
    }

    /// Sample the `(segments + 1)²` height grid for `frame`, row-major.
    pub fn sample_heights(&self, frame: &ChunkFrame) -> Vec<f64> {
        let row = frame.vertices_per_edge();
        let xs: Vec<f64> = (0..=frame.segments).map(|i| frame.world_x(i)).collect();
        let mut heights = Vec::with_capacity(row * row);
        for j in 0..=frame.segments {
            let z = frame.world_z(j);
            heights.extend(xs.iter().map(|&x| self.height.height_at(x, z)));
        }
        heights
    }

    /// Build the chunk mesh.
    ///
    /// Each grid quad is split along the same diagonal (from `(i+1, j)` to
    /// `(i, j+1)`), wound so faces point up.
    pub fn build(&self, frame: &ChunkFrame, stitch: &EdgeStitch) -> ChunkGeometry {
        let segments = frame.segments;
        let row = frame.vertices_per_edge();

        let mut heights = self.sample_heights(frame);
        if !stitch.is_empty() {
            stitch.apply(&mut heights, segments);
        }

        let mut positions = Vec::with_capacity(row * row);
        for j in 0..=segments {
            let z = frame.world_z(j) as f32;
            for i in 0..=segments {
                let y = heights[j as usize * row + i as usize] as f32;
                positions.push([frame.world_x(i) as f32, y, z]);
            }
        }

        let indices = grid_indices(segments);
        let normals = compute_smooth_normals(&positions, &indices);
        let span = segments as f32;

        let vertices = positions
            .iter()
            .zip(&normals)
            .zip(&heights)
            .enumerate()
            .map(|(n, ((&position, &normal), &h))| {
                let i = (n % row) as f32;
                let j = (n / row) as f32;
                TerrainVertex {
                    position,
                    normal,
                    uv: [i / span, j / span],
                    color: gradient_color(self.gradient, h),
                }
            })
            .collect();

        ChunkGeometry {
            frame: *frame,
            vertices,
            indices,
        }
    }
}

/// Triangle indices for a `segments × segments` quad grid.
pub fn grid_indices(segments: u32) -> Vec<u32> {
    let row = segments + 1;
    let mut indices = Vec::with_capacity(segments as usize * segments as usize * 6);
    for j in 0..segments {
        for i in 0..segments {
            let a = j * row + i;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::ChunkEdge;
    use tessera_config::TerrainConfig;
    use tessera_terrain::{ChunkCoord, TerrainHeight};

    fn terrain() -> TerrainHeight {
        TerrainHeight::procedural(&TerrainConfig::default())
    }

    #[test]
    fn test_grid_counts() {
        let flat = |_x: f64, _z: f64| 0.0;
        let geometry = ChunkMeshBuilder::new(&flat, None).build(
            &ChunkFrame::chunk(ChunkCoord::new(0, 0), 100.0, 4),
            &EdgeStitch::NONE,
        );
        assert_eq!(geometry.vertices.len(), 25);
        assert_eq!(geometry.triangle_count(), 32);
        assert!(geometry.indices.iter().all(|&i| (i as usize) < geometry.vertices.len()));
    }

    #[test]
    fn test_flat_ground_faces_up_and_is_white() {
        let flat = |_x: f64, _z: f64| 2.5;
        let geometry = ChunkMeshBuilder::new(&flat, None).build(
            &ChunkFrame::chunk(ChunkCoord::new(1, -1), 50.0, 8),
            &EdgeStitch::NONE,
        );
        for v in &geometry.vertices {
            assert_eq!(v.position[1], 2.5);
            assert!((v.normal[1] - 1.0).abs() < 1e-6);
            assert_eq!(v.color, [1.0, 1.0, 1.0]);
        }
    }

    #[test]
    fn test_vertices_in_world_space() {
        let flat = |_x: f64, _z: f64| 0.0;
        let geometry = ChunkMeshBuilder::new(&flat, None).build(
            &ChunkFrame::chunk(ChunkCoord::new(2, -1), 500.0, 10),
            &EdgeStitch::NONE,
        );
        assert_eq!(geometry.vertex(0, 0).position, [1000.0, 0.0, -500.0]);
        assert_eq!(geometry.vertex(10, 10).position, [1500.0, 0.0, 0.0]);
        assert_eq!(geometry.vertex(10, 10).uv, [1.0, 1.0]);
    }

    #[test]
    fn test_heights_come_from_world_coordinates() {
        let sloped = |x: f64, z: f64| x * 0.01 + z * 0.02;
        let geometry = ChunkMeshBuilder::new(&sloped, None).build(
            &ChunkFrame::chunk(ChunkCoord::new(3, 1), 100.0, 4),
            &EdgeStitch::NONE,
        );
        let v = geometry.vertex(2, 1);
        let expected = (350.0 * 0.01 + 125.0 * 0.02) as f32;
        assert_eq!(v.position, [350.0, expected, 125.0]);
    }

    #[test]
    fn test_gradient_colours_vertices() {
        let config = TerrainConfig::default();
        let high = |_x: f64, _z: f64| 10_000.0;
        let geometry = ChunkMeshBuilder::new(&high, Some(&config.color_gradient)).build(
            &ChunkFrame::chunk(ChunkCoord::new(0, 0), 10.0, 2),
            &EdgeStitch::NONE,
        );
        let color = geometry.vertices[0].color;
        for (got, want) in color.iter().zip(config.color_gradient.high_color) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn test_seam_between_equal_lod_chunks_is_exact() {
        let terrain = terrain();
        let builder = ChunkMeshBuilder::new(&terrain, None);
        let left = builder.build(
            &ChunkFrame::chunk(ChunkCoord::new(0, 0), 500.0, 64),
            &EdgeStitch::NONE,
        );
        let right = builder.build(
            &ChunkFrame::chunk(ChunkCoord::new(1, 0), 500.0, 64),
            &EdgeStitch::NONE,
        );

        let a = left.edge_positions(ChunkEdge::PosX);
        let b = right.edge_positions(ChunkEdge::NegX);
        assert_eq!(a.len(), 65);
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa[0], 500.0);
            for axis in 0..3 {
                assert_eq!(pa[axis].to_bits(), pb[axis].to_bits());
            }
        }
    }

    #[test]
    fn test_stitched_edge_lies_on_coarse_edge() {
        let terrain = terrain();
        let builder = ChunkMeshBuilder::new(&terrain, None);
        let coarse = builder.build(
            &ChunkFrame::chunk(ChunkCoord::new(0, 1), 500.0, 32),
            &EdgeStitch::NONE,
        );
        let stitch = EdgeStitch::from_neighbors(64, [None, None, None, Some(32)]);
        let fine = builder.build(&ChunkFrame::chunk(ChunkCoord::new(0, 0), 500.0, 64), &stitch);

        let fine_edge = fine.edge_positions(ChunkEdge::PosZ);
        let coarse_edge = coarse.edge_positions(ChunkEdge::NegZ);

        for (k, c) in coarse_edge.iter().enumerate() {
            let f = fine_edge[2 * k];
            for axis in 0..3 {
                assert_eq!(f[axis].to_bits(), c[axis].to_bits(), "vertex {k}");
            }
        }
        for k in 0..32 {
            let (c0, c1) = (coarse_edge[k], coarse_edge[k + 1]);
            let mid = fine_edge[2 * k + 1];
            let expected = (c0[1] + c1[1]) * 0.5;
            assert!((mid[1] - expected).abs() < 1e-3, "midpoint {k}");
        }
    }

    #[test]
    fn test_build_is_pure() {
        let terrain = terrain();
        let config = TerrainConfig::default();
        let builder = ChunkMeshBuilder::new(&terrain, Some(&config.color_gradient));
        let frame = ChunkFrame::chunk(ChunkCoord::new(-1, 0), 500.0, 16);
        assert_eq!(
            builder.build(&frame, &EdgeStitch::NONE),
            builder.build(&frame, &EdgeStitch::NONE)
        );
    }
}
