//! Seeded 2D gradient noise.
//!
//! A [`NoiseField`] owns a permutation table shuffled once from an integer seed
//! and is immutable afterwards, so evaluation is a pure function of `(x, y)` and
//! can be shared freely between threads.

use noise::NoiseFn;

/// Length of the doubled permutation table.
pub const PERMUTATION_LEN: usize = 512;

const LCG_MULTIPLIER: i64 = 9301;
const LCG_INCREMENT: i64 = 49297;
const LCG_MODULUS: i64 = 233_280;

/// Linear-congruential generator used to shuffle the permutation table.
///
/// `next = (next * 9301 + 49297) mod 233280`, yielding `next / 233280` in `[0, 1)`.
struct SeededLcg {
    state: i64,
}

impl SeededLcg {
    fn new(seed: i64) -> Self {
        // Reducing first keeps the multiply in range for any i64 seed and gives
        // the same sequence as the unreduced recurrence for non-negative seeds.
        Self {
            state: seed.rem_euclid(LCG_MODULUS),
        }
    }

    fn next_fraction(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT).rem_euclid(LCG_MODULUS);
        self.state as f64 / LCG_MODULUS as f64
    }
}

/// Deterministic 2D gradient noise seeded by an integer.
///
/// Output lies roughly in `[-1, 1]`. The same seed always produces the same
/// table and therefore the same field.
#[derive(Clone)]
pub struct NoiseField {
    seed: i64,
    perm: [u8; PERMUTATION_LEN],
}

impl NoiseField {
    /// Build the permutation table for `seed`.
    ///
    /// Fills `0..=255`, Fisher-Yates shuffles it with [`SeededLcg`], then
    /// duplicates it so corner lookups never need to wrap.
    pub fn new(seed: i64) -> Self {
        let mut base: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = SeededLcg::new(seed);
        for i in (1..base.len()).rev() {
            let j = ((rng.next_fraction() * (i + 1) as f64) as usize).min(i);
            base.swap(i, j);
        }

        let perm = std::array::from_fn(|i| base[i & 255]);
        Self { seed, perm }
    }

    /// Seed this field was built from.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// The doubled permutation table.
    pub fn permutation(&self) -> &[u8; PERMUTATION_LEN] {
        &self.perm
    }

    /// Evaluate the field at `(x, y)`.
    ///
    /// Non-finite inputs do not panic; they produce a non-finite or arbitrary
    /// sample which callers are expected to clamp.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let x_floor = libm::floor(x);
        let y_floor = libm::floor(y);
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;
        let xf = x - x_floor;
        let yf = y - y_floor;

        let u = fade(xf);
        let v = fade(yf);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let b = p[xi + 1] as usize + yi;

        let bottom = lerp(u, grad(p[a], xf, yf), grad(p[b], xf - 1.0, yf));
        let top = lerp(
            u,
            grad(p[a + 1], xf, yf - 1.0),
            grad(p[b + 1], xf - 1.0, yf - 1.0),
        );
        lerp(v, bottom, top)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl NoiseFn<f64, 2> for NoiseField {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.evaluate(point[0], point[1])
    }
}

/// Quintic fade curve `t^3 (t (6t - 15) + 10)`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Pick one of four diagonal gradients from the low hash bits and dot it with `(x, y)`.
#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 3;
    let (u, v) = if h < 2 { (x, y) } else { (y, x) };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}
