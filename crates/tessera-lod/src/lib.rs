//! Level-of-detail management: distance-based tier selection and the per-frame
//! chunk visibility manager.

mod selector;
mod visibility;

#[cfg(test)]
mod visibility_tests;

pub use selector::{COARSEST_TIER, LodSelector, segments_for_tier};
pub use visibility::{ChunkVisibilityManager, LodAssignment, VisibilityUpdate};
