// Core module with fundamental types
pub mod core;

// Render module with meshes and the render surface seam
pub mod render;

// World module with generation, caching and streaming
pub mod world;

// Configuration
pub mod utils;

// Constants and error types
pub mod constants;
pub mod error;

// Re-exports
pub use constants::*;
pub use crate::core::{Chunk, GridCoordinate, Vertex};
pub use error::{CoordinateParseError, SettingsError};
pub use render::{AABB, ChunkMesh, ObjectKind, RenderSurface, SceneObject, SceneSurface};
pub use utils::StreamSettings;
pub use world::{
    ChunkGenerator, ChunkStore, EvictionPolicy, HeightOracle, SimplexOracle, TickReport,
    WorldStreamer, chunk_of,
};
