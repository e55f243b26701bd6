//! LOD seam stitching between neighbouring chunks of different resolution.
//!
//! Tier segment counts nest (each coarser tier halves the finer one), so every
//! vertex on a coarse chunk's edge is also a vertex on its finer neighbour's
//! edge, at bit-identical world coordinates. What remains is the finer edge's
//! in-between vertices, which sample the height field where the coarse edge
//! only interpolates. Constraining those vertices onto the coarse edge's
//! straight segments removes the T-junction cracks.

use crate::edge::ChunkEdge;

/// Per-edge segment counts of coarser neighbours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EdgeStitch {
    coarse_segments: [Option<u32>; 4],
}

impl EdgeStitch {
    /// No edge needs constraining.
    pub const NONE: Self = Self {
        coarse_segments: [None; 4],
    };

    /// Build from the segment counts of the four edge neighbours, indexed by
    /// [`ChunkEdge`]. Neighbours that are absent, equal or finer are ignored, as
    /// are counts that do not divide `segments` (no shared lattice to snap to).
    pub fn from_neighbors(segments: u32, neighbors: [Option<u32>; 4]) -> Self {
        let coarse_segments = neighbors.map(|n| {
            n.filter(|&c| c > 0 && c < segments && segments % c == 0)
        });
        Self { coarse_segments }
    }

    /// Segment count of the coarser neighbour across `edge`, if any.
    pub fn coarse_segments(&self, edge: ChunkEdge) -> Option<u32> {
        self.coarse_segments[edge as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.coarse_segments.iter().all(Option::is_none)
    }

    /// Cache-key form: one count per edge, 0 for unconstrained edges.
    pub fn key(&self) -> [u32; 4] {
        self.coarse_segments.map(|c| c.unwrap_or(0))
    }

    /// Constrain a `(segments + 1)²` row-major height grid (`j * (segments + 1) + i`).
    ///
    /// Vertices on the coarse lattice are left untouched, so the order in which
    /// edges are processed does not matter and shared corners never move.
    pub fn apply(&self, heights: &mut [f64], segments: u32) {
        let row = segments as usize + 1;
        debug_assert_eq!(heights.len(), row * row);

        for edge in ChunkEdge::ALL {
            let Some(coarse) = self.coarse_segments(edge) else {
                continue;
            };
            let ratio = segments / coarse;
            let at = |k: u32| {
                let (i, j) = edge.grid_index(k, segments);
                j as usize * row + i as usize
            };

            for k in 0..=segments {
                let offset = k % ratio;
                if offset == 0 {
                    continue;
                }
                let k0 = k - offset;
                let k1 = k0 + ratio;
                let t = offset as f64 / ratio as f64;
                let (h0, h1) = (heights[at(k0)], heights[at(k1)]);
                heights[at(k)] = h0 + (h1 - h0) * t;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_coarser_dividing_neighbors_kept() {
        let stitch = EdgeStitch::from_neighbors(16, [Some(8), Some(16), Some(32), Some(6)]);
        assert_eq!(stitch.coarse_segments(ChunkEdge::NegX), Some(8));
        assert_eq!(stitch.coarse_segments(ChunkEdge::PosX), None);
        assert_eq!(stitch.coarse_segments(ChunkEdge::NegZ), None);
        assert_eq!(stitch.coarse_segments(ChunkEdge::PosZ), None);
        assert_eq!(stitch.key(), [8, 0, 0, 0]);
    }

    #[test]
    fn test_none_is_empty() {
        assert!(EdgeStitch::NONE.is_empty());
        assert!(EdgeStitch::from_neighbors(8, [None; 4]).is_empty());
    }

    #[test]
    fn test_constrained_edge_is_linear_between_coarse_vertices() {
        let segments = 8;
        let row = segments as usize + 1;
        // Heights = i^2 + j so every vertex differs.
        let mut heights: Vec<f64> = (0..row * row)
            .map(|n| ((n % row) * (n % row) + n / row) as f64)
            .collect();
        let original = heights.clone();

        let stitch = EdgeStitch::from_neighbors(segments, [None, None, Some(2), None]);
        stitch.apply(&mut heights, segments);

        // NegZ edge is row j == 0, coarse vertices at i = 0, 4, 8.
        for &i in &[0, 4, 8] {
            assert_eq!(heights[i], original[i]);
        }
        for i in 1..4 {
            let expected = original[0] + (original[4] - original[0]) * i as f64 / 4.0;
            assert!((heights[i] - expected).abs() < 1e-12);
        }
        // Interior untouched.
        assert_eq!(heights[row + 3], original[row + 3]);
    }
}
