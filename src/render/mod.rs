//! Rendering-side modules
//! Contains mesh batching, bounds and the render surface the streamer attaches to.

pub mod bounds;
pub mod mesh;
pub mod surface;

// Re-export commonly used types
pub use bounds::AABB;
pub use mesh::ChunkMesh;
pub use surface::{ObjectKind, RenderSurface, SceneObject, SceneSurface};
