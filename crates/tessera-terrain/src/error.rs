//! Height-map asset errors.

use std::path::PathBuf;

/// Failures while loading a height-map image.
///
/// None of these are fatal: the terrain system logs them and keeps using the
/// procedural height field.
#[derive(Debug, thiserror::Error)]
pub enum HeightmapError {
    #[error("failed to read height map {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode height map {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image or raw sample buffer has no usable pixels.
    #[error("height map is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },

    /// The loader thread exited without delivering a result.
    #[error("height map loader thread disconnected")]
    LoaderDisconnected,
}
