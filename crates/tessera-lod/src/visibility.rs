//! Per-frame chunk visibility and LOD assignment.
//!
//! Each tick walks the chunk grid, culls chunks beyond the view distance and
//! assigns a tier from the distance between the camera and the nearest point
//! of each chunk's bounds. The previous frame's assignment is owned here and
//! replaced only when the new one differs, so a static camera never reports a
//! change.

use std::collections::BTreeMap;

use glam::DVec3;
use tessera_config::TerrainConfig;
use tessera_terrain::ChunkCoord;
use tracing::{debug, trace};

use crate::selector::{LodSelector, segments_for_tier};

/// How one visible chunk is to be meshed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LodAssignment {
    pub tier: u8,
    /// Quads along each chunk edge.
    pub segments: u32,
    /// Chunk widths covered along each axis. 1 except for the whole-world chunk.
    pub span: u32,
}

/// Result of [`ChunkVisibilityManager::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityUpdate {
    /// The chunk set or a tier changed; downstream geometry must be refreshed.
    Changed,
    /// Same assignment as the previous frame, or the evaluation was throttled.
    Unchanged,
}

impl VisibilityUpdate {
    pub fn is_changed(self) -> bool {
        self == Self::Changed
    }
}

/// Camera, time and configuration of the last full evaluation.
#[derive(Clone, Debug)]
struct Evaluation {
    camera: DVec3,
    time: f64,
    config: TerrainConfig,
}

/// Tracks which chunks are visible and at which tier.
#[derive(Debug, Default)]
pub struct ChunkVisibilityManager {
    assignments: BTreeMap<ChunkCoord, LodAssignment>,
    last: Option<Evaluation>,
    evaluations: u64,
}

impl ChunkVisibilityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current assignment, ordered by chunk coordinate.
    pub fn assignments(&self) -> &BTreeMap<ChunkCoord, LodAssignment> {
        &self.assignments
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&LodAssignment> {
        self.assignments.get(&coord)
    }

    /// Number of full evaluations performed (throttled ticks excluded).
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Forget the previous assignment so the next tick evaluates and reports a change.
    pub fn reset(&mut self) {
        self.assignments.clear();
        self.last = None;
    }

    /// Advance one frame. `time` is the host clock in seconds.
    pub fn tick(&mut self, camera: DVec3, config: &TerrainConfig, time: f64) -> VisibilityUpdate {
        if !self.should_evaluate(camera, config, time) {
            trace!(time, "visibility evaluation throttled");
            return VisibilityUpdate::Unchanged;
        }

        let next = Self::assign(camera, config);
        self.evaluations += 1;
        self.last = Some(Evaluation {
            camera,
            time,
            config: config.clone(),
        });

        if next == self.assignments {
            return VisibilityUpdate::Unchanged;
        }
        debug!(
            visible = next.len(),
            previous = self.assignments.len(),
            "chunk assignment changed"
        );
        self.assignments = next;
        VisibilityUpdate::Changed
    }

    fn should_evaluate(&self, camera: DVec3, config: &TerrainConfig, time: f64) -> bool {
        let Some(last) = &self.last else {
            return true;
        };
        if last.config != *config {
            return true;
        }
        let elapsed = time - last.time;
        if !(0.0..config.lod.update_interval_secs).contains(&elapsed) {
            return true;
        }
        camera.distance(last.camera) > config.lod.camera_move_threshold
    }

    /// Compute the assignment for `camera` under `config` with no throttling or state.
    pub fn assign(camera: DVec3, config: &TerrainConfig) -> BTreeMap<ChunkCoord, LodAssignment> {
        let full_segments = config.segments_per_chunk();

        if !config.enable_chunking {
            let start = config.chunk_range().start;
            return BTreeMap::from([(
                ChunkCoord::new(start, start),
                LodAssignment {
                    tier: 0,
                    segments: config.full_resolution_segments(),
                    span: config.chunks_per_side(),
                },
            )]);
        }

        let chunk_size = config.effective_chunk_size();
        let selector = LodSelector::new(&config.lod);
        let range = config.chunk_range();

        let mut tiers = BTreeMap::new();
        for z in range.clone() {
            for x in range.clone() {
                let coord = ChunkCoord::new(x, z);
                let distance = coord.bounds(chunk_size).distance_to(camera);
                if config.enable_view_culling && distance >= config.view_distance {
                    continue;
                }
                let tier = if config.enable_lod {
                    selector.select_tier(distance)
                } else {
                    0
                };
                tiers.insert(coord, tier);
            }
        }

        if config.enable_lod && config.lod.limit_neighbor_delta {
            limit_neighbor_delta(&mut tiers);
        }

        tiers
            .into_iter()
            .map(|(coord, tier)| {
                let assignment = LodAssignment {
                    tier,
                    segments: segments_for_tier(full_segments, tier),
                    span: 1,
                };
                (coord, assignment)
            })
            .collect()
    }
}

/// Refine tiers until no two edge-adjacent visible chunks differ by more than one.
///
/// Tiers only ever decrease, so the loop terminates.
fn limit_neighbor_delta(tiers: &mut BTreeMap<ChunkCoord, u8>) {
    let coords: Vec<ChunkCoord> = tiers.keys().copied().collect();
    loop {
        let mut refined = false;
        for &coord in &coords {
            let finest_neighbor = coord
                .edge_neighbors()
                .iter()
                .filter_map(|n| tiers.get(n).copied())
                .min();
            let Some(finest_neighbor) = finest_neighbor else {
                continue;
            };
            if let Some(tier) = tiers.get_mut(&coord)
                && *tier > finest_neighbor + 1
            {
                *tier = finest_neighbor + 1;
                refined = true;
            }
        }
        if !refined {
            break;
        }
    }
}
