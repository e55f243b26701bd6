//! Distance-based LOD tier selection.

use tessera_config::LodConfig;

/// Tier index of the coarsest (quarter resolution) level.
pub const COARSEST_TIER: u8 = 2;

/// Segment count for `tier`, halving the tier-0 count once per tier.
pub fn segments_for_tier(full_segments: u32, tier: u8) -> u32 {
    (full_segments >> tier.min(COARSEST_TIER)).max(1)
}

/// Selects LOD tiers based on distance from the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodSelector {
    thresholds: [f64; 3],
}

impl LodSelector {
    /// Create a selector from the configured thresholds, sanitised to ascend.
    pub fn new(config: &LodConfig) -> Self {
        Self {
            thresholds: config.sorted_thresholds(),
        }
    }

    /// Tier for a chunk whose nearest point is `distance` away.
    ///
    /// Tier 0 below `near`, tier 1 below `medium`, tier 2 otherwise. `far`
    /// only marks the nominal end of tier 2; nothing is coarser.
    pub fn select_tier(&self, distance: f64) -> u8 {
        let [near, medium, _far] = self.thresholds;
        if distance < near {
            0
        } else if distance < medium {
            1
        } else {
            COARSEST_TIER
        }
    }

    pub fn thresholds(&self) -> [f64; 3] {
        self.thresholds
    }
}
