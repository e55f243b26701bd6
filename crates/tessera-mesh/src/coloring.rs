//! Height-to-colour ramp for terrain vertices.

use tessera_config::ColorGradient;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// How the host should shade a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Multiply the material by baked vertex colours.
    VertexColor,
    /// Vertices are white; the material alone decides the look.
    Material,
}

impl ColorMode {
    pub fn for_gradient(gradient: Option<&ColorGradient>) -> Self {
        match gradient {
            Some(g) if g.enabled => Self::VertexColor,
            _ => Self::Material,
        }
    }
}

fn mix(a: [f32; 3], b: [f32; 3], t: f64) -> [f32; 3] {
    let t = t as f32;
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Colour for elevation `height`.
///
/// The elevation is normalised between `low_height` and `high_height`, then
/// interpolated low->mid below `mid_point` and mid->high above it. A disabled or
/// missing gradient yields white.
pub fn gradient_color(gradient: Option<&ColorGradient>, height: f64) -> [f32; 3] {
    let Some(g) = gradient.filter(|g| g.enabled) else {
        return WHITE;
    };

    let range = g.high_height - g.low_height;
    let t = if range.is_finite() && range > 0.0 {
        ((height - g.low_height) / range).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let t = if t.is_nan() { 0.0 } else { t };

    let mid = if g.mid_point.is_finite() {
        g.mid_point.clamp(1e-6, 1.0 - 1e-6)
    } else {
        0.5
    };

    if t < mid {
        mix(g.low_color, g.mid_color, t / mid)
    } else {
        mix(g.mid_color, g.high_color, (t - mid) / (1.0 - mid))
    }
}
