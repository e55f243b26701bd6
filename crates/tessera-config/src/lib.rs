//! Configuration system for tessera.
//!
//! Holds the immutable [`TerrainConfig`] snapshot consumed by the terrain core,
//! persists settings to disk as RON, and supports CLI overrides via clap plus
//! hot-reload detection.

mod cli;
mod config;
mod error;
mod terrain;

pub use cli::CliArgs;
pub use config::{AppConfig, Config, DebugConfig};
pub use error::ConfigError;
pub use terrain::{
    ColorGradient, LodConfig, MAX_CHUNKS_PER_SIDE, MAX_ELEVATION, MAX_SEGMENTS_PER_CHUNK,
    MIN_CHUNK_SIZE, MIN_SEGMENTS_PER_CHUNK, TerrainConfig,
};
