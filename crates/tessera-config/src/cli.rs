//! Command-line argument parsing for the tessera demo driver.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// tessera command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "tessera", about = "Procedural chunked terrain with distance-based LOD")]
pub struct CliArgs {
    /// Terrain seed.
    #[arg(long)]
    pub seed: Option<i64>,

    /// World edge length in world units.
    #[arg(long)]
    pub world_size: Option<f64>,

    /// Chunk edge length in world units.
    #[arg(long)]
    pub chunk_size: Option<f64>,

    /// Vertical scale of the height field.
    #[arg(long)]
    pub height_scale: Option<f64>,

    /// Chunks beyond this distance are culled.
    #[arg(long)]
    pub view_distance: Option<f64>,

    /// Grayscale height-map image to use instead of procedural noise.
    #[arg(long)]
    pub heightmap: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Mesh every chunk at full resolution.
    #[arg(long)]
    pub no_lod: bool,

    /// Mesh the world as a single chunk.
    #[arg(long)]
    pub no_chunking: bool,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let terrain = &mut self.terrain;
        if let Some(seed) = args.seed {
            terrain.seed = seed;
        }
        if let Some(size) = args.world_size {
            terrain.world_size = size;
        }
        if let Some(size) = args.chunk_size {
            terrain.chunk_size = size;
        }
        if let Some(scale) = args.height_scale {
            terrain.height_scale = scale;
        }
        if let Some(distance) = args.view_distance {
            terrain.view_distance = distance;
        }
        if let Some(ref path) = args.heightmap {
            terrain.heightmap = Some(path.clone());
        }
        if args.no_lod {
            terrain.enable_lod = false;
        }
        if args.no_chunking {
            terrain.enable_chunking = false;
        }
        if let Some(frames) = args.frames {
            self.app.frames = frames;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(42),
            view_distance: Some(1500.0),
            no_lod: true,
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.terrain.seed, 42);
        assert_eq!(config.terrain.view_distance, 1500.0);
        assert!(!config.terrain.enable_lod);
        // Non-overridden fields retain defaults
        assert_eq!(config.terrain.chunk_size, 500.0);
        assert!(config.terrain.enable_chunking);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "tessera",
            "--seed",
            "7",
            "--heightmap",
            "valley.png",
            "--no-chunking",
        ]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.heightmap, Some(PathBuf::from("valley.png")));
        assert!(args.no_chunking);
        assert!(!args.no_lod);
    }
}
