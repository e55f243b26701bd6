//! Grayscale height-map images stretched over the chunk grid.

use std::path::Path;

use crate::error::HeightmapError;

/// Normalised height samples decoded from an image, row-major, `v` in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapImage {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl HeightmapImage {
    /// Build from raw samples. Values are clamped into `[0, 1]`; NaN becomes 0.
    pub fn from_samples(width: u32, height: u32, samples: Vec<f32>) -> Result<Self, HeightmapError> {
        if width == 0 || height == 0 || samples.len() != (width as usize) * (height as usize) {
            return Err(HeightmapError::Empty { width, height });
        }
        let samples = samples
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
            .collect();
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Decode an image file, using 16-bit luminance when available.
    pub fn load(path: &Path) -> Result<Self, HeightmapError> {
        let bytes = std::fs::read(path).map_err(|source| HeightmapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|source| HeightmapError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let luma = decoded.into_luma16();
        let (width, height) = luma.dimensions();
        let samples = luma
            .into_raw()
            .into_iter()
            .map(|v| v as f32 / u16::MAX as f32)
            .collect();
        Self::from_samples(width, height, samples)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn texel(&self, x: u32, y: u32) -> f64 {
        self.samples[(y as usize) * (self.width as usize) + x as usize] as f64
    }

    /// Bilinear sample at normalised `(u, v)`, clamped to the image edge.
    pub fn sample_uv(&self, u: f64, v: f64) -> f64 {
        let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
        let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };

        let fx = u * (self.width - 1) as f64;
        let fy = v * (self.height - 1) as f64;
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f64;
        let ty = fy - y0 as f64;

        let top = self.texel(x0, y0) * (1.0 - tx) + self.texel(x1, y0) * tx;
        let bottom = self.texel(x0, y1) * (1.0 - tx) + self.texel(x1, y1) * tx;
        top * (1.0 - ty) + bottom * ty
    }

    /// Sample at world `(x, z)` where the image spans `[min, max]²`.
    pub fn sample_world(&self, x: f64, z: f64, (min, max): (f64, f64)) -> f64 {
        let span = max - min;
        if span <= 0.0 {
            return self.sample_uv(0.0, 0.0);
        }
        self.sample_uv((x - min) / span, (z - min) / span)
    }
}
