//! GPU-ready vertex layout for terrain chunks.

/// One terrain vertex, laid out for direct upload.
///
/// Layout (44 bytes, tightly packed `f32`s):
///   - `[0..12]`  position: world space
///   - `[12..24]` normal: unit length, smooth-shaded
///   - `[24..32]` uv: `[0, 1]` across the chunk
///   - `[32..44]` color: linear RGB from the height gradient, white when disabled
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 3],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 44]);

impl TerrainVertex {
    /// Byte offsets of each attribute, in declaration order.
    pub const ATTRIBUTE_OFFSETS: [usize; 4] = [0, 12, 24, 32];

    /// Distance between consecutive vertices in a vertex buffer.
    pub const STRIDE: usize = std::mem::size_of::<Self>();
}
