//! Chunk meshing: world-space grid meshes, vertex colouring, LOD edge stitching,
//! a content-addressed geometry cache, and full-resolution collision geometry.

pub mod builder;
pub mod cache;
pub mod coloring;
pub mod collision;
pub mod edge;
pub mod frame;
pub mod geometry;
pub mod normals;
pub mod stitching;
pub mod vertex;

pub use builder::ChunkMeshBuilder;
pub use cache::{CacheStats, GeometryCache, GeometryKey};
pub use coloring::{ColorMode, gradient_color};
pub use collision::{CollisionHeightfield, CollisionMesh};
pub use edge::ChunkEdge;
pub use frame::{ChunkFrame, lattice_coordinate};
pub use geometry::ChunkGeometry;
pub use normals::compute_smooth_normals;
pub use stitching::EdgeStitch;
pub use vertex::TerrainVertex;
