//! Layered terrain elevation.
//!
//! [`elevation`] combines three noise fields into a single height at a world
//! `(x, z)`. It is evaluated at absolute world coordinates everywhere, which is
//! what keeps chunk boundaries seamless: two chunks asking for the same point get
//! the same bits back.

use tessera_config::{MAX_ELEVATION, TerrainConfig};

use crate::heightmap::HeightmapImage;
use crate::noise_field::NoiseField;

/// Seed offset of the secondary field relative to the user-facing seed.
pub const SECONDARY_SEED_OFFSET: i64 = 1000;
/// Seed offset of the tertiary field relative to the user-facing seed.
pub const TERTIARY_SEED_OFFSET: i64 = 2000;

const BASE_FREQUENCY: f64 = 0.0012;
const BASE_WEIGHTS: (f64, f64) = (0.6, 0.4);
const BASE_GAIN: f64 = 1.8;

const MOUNTAIN_FREQUENCY: f64 = 0.002;

const HILL_FREQUENCY: f64 = 0.005;
const HILL_OFFSET: f64 = 100.0;
const HILL_WEIGHT: f64 = 0.6;

const DETAIL_FREQUENCY: f64 = 0.015;
const DETAIL_OFFSET: f64 = 50.0;
const DETAIL_WEIGHT: f64 = 0.25;

const SHAPING_EXPONENT: f64 = 1.4;

/// Anything that can answer "how high is the ground at world `(x, z)`".
///
/// Mesh building and collision sampling are written against this trait so they
/// never depend on where the heights come from.
pub trait HeightField {
    fn height_at(&self, x: f64, z: f64) -> f64;
}

impl<F: Fn(f64, f64) -> f64> HeightField for F {
    fn height_at(&self, x: f64, z: f64) -> f64 {
        self(x, z)
    }
}

/// The three decorrelated noise fields derived from one seed.
#[derive(Clone, Debug)]
pub struct TerrainFields {
    pub base: NoiseField,
    pub secondary: NoiseField,
    pub tertiary: NoiseField,
}

impl TerrainFields {
    /// Seed `seed`, `seed + 1000` and `seed + 2000`.
    pub fn from_seed(seed: i64) -> Self {
        Self {
            base: NoiseField::new(seed),
            secondary: NoiseField::new(seed.wrapping_add(SECONDARY_SEED_OFFSET)),
            tertiary: NoiseField::new(seed.wrapping_add(TERTIARY_SEED_OFFSET)),
        }
    }
}

/// Terrain elevation at world `(x, z)`.
///
/// 1. base: `0.6 * base + 0.4 * secondary` at 0.0012, scaled by 1.8
/// 2. mountains: tertiary at 0.002, cubed, negative excursions dropped
/// 3. hills: base at 0.005 offset by +100, weight 0.6
/// 4. detail: secondary at 0.015 offset by +50, weight 0.25
/// 5. `sign(h) * |h|^1.4`, then multiplied by `height_scale`
///
/// Returns 0 when the result is non-finite or its magnitude exceeds
/// [`MAX_ELEVATION`].
pub fn elevation(x: f64, z: f64, fields: &TerrainFields, height_scale: f64) -> f64 {
    let (bx, bz) = (x * BASE_FREQUENCY, z * BASE_FREQUENCY);
    let base = (fields.base.evaluate(bx, bz) * BASE_WEIGHTS.0
        + fields.secondary.evaluate(bx, bz) * BASE_WEIGHTS.1)
        * BASE_GAIN;

    let mountain = fields
        .tertiary
        .evaluate(x * MOUNTAIN_FREQUENCY, z * MOUNTAIN_FREQUENCY);
    let mountain = (mountain * mountain * mountain).max(0.0);

    let hills = fields.base.evaluate(
        x * HILL_FREQUENCY + HILL_OFFSET,
        z * HILL_FREQUENCY + HILL_OFFSET,
    ) * HILL_WEIGHT;

    let detail = fields.secondary.evaluate(
        x * DETAIL_FREQUENCY + DETAIL_OFFSET,
        z * DETAIL_FREQUENCY + DETAIL_OFFSET,
    ) * DETAIL_WEIGHT;

    let sum = base + mountain + hills + detail;
    let shaped = sum.signum() * libm::pow(sum.abs(), SHAPING_EXPONENT);
    sanitize_elevation(shaped * height_scale)
}

/// Clamp degenerate elevations to zero.
#[inline]
pub(crate) fn sanitize_elevation(value: f64) -> f64 {
    if value.is_finite() && value.abs() <= MAX_ELEVATION {
        value
    } else {
        0.0
    }
}

/// Where elevations come from.
#[derive(Clone, Debug)]
pub enum HeightSource {
    /// The layered noise function.
    Procedural(TerrainFields),
    /// A grayscale image stretched over the chunk grid.
    Image(HeightmapImage),
}

/// The height-lookup capability handed to collaborators.
///
/// Wraps a [`HeightSource`] with the snapshot values it needs. Points outside the
/// chunk grid are clamped to its edge, so any finite query is answered.
#[derive(Clone, Debug)]
pub struct TerrainHeight {
    source: HeightSource,
    height_scale: f64,
    extent: (f64, f64),
}

impl TerrainHeight {
    /// Procedural height field for the given snapshot.
    pub fn procedural(config: &TerrainConfig) -> Self {
        Self::with_source(HeightSource::Procedural(TerrainFields::from_seed(config.seed)), config)
    }

    pub fn with_source(source: HeightSource, config: &TerrainConfig) -> Self {
        Self {
            source,
            height_scale: config.height_scale,
            extent: config.grid_extent(),
        }
    }

    pub fn source(&self) -> &HeightSource {
        &self.source
    }

    pub fn height_scale(&self) -> f64 {
        self.height_scale
    }

    /// Height at world `(x, z)`; identical to [`elevation`] inside the chunk grid.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        let (min, max) = self.extent;
        let x = x.clamp(min, max);
        let z = z.clamp(min, max);
        match &self.source {
            HeightSource::Procedural(fields) => elevation(x, z, fields, self.height_scale),
            HeightSource::Image(image) => {
                let v = image.sample_world(x, z, self.extent);
                sanitize_elevation((v * 2.0 - 1.0) * self.height_scale)
            }
        }
    }
}

impl HeightField for TerrainHeight {
    fn height_at(&self, x: f64, z: f64) -> f64 {
        TerrainHeight::height_at(self, x, z)
    }
}
