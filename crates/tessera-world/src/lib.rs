//! Terrain orchestration: owns the height field, drives visibility and meshing
//! once per frame, and publishes geometry, collision data and readiness to the host.

mod readiness;
mod terrain_system;


pub use readiness::ReadySignal;
pub use terrain_system::{ChunkDraw, FrameOutput, TerrainSystem};
