//! Procedural terrain: seeded gradient noise, the layered elevation function,
//! chunk coordinates, and optional height-map image sources.

mod coords;
mod error;
mod height;
mod heightmap;
mod loader;
mod noise_field;

pub use coords::{ChunkBounds, ChunkCoord};
pub use error::HeightmapError;
pub use height::{
    HeightField, HeightSource, TerrainFields, TerrainHeight, elevation, SECONDARY_SEED_OFFSET,
    TERTIARY_SEED_OFFSET,
};
pub use heightmap::HeightmapImage;
pub use loader::AsyncHeightmapLoader;
pub use noise_field::{NoiseField, PERMUTATION_LEN};
