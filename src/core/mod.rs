//! Core data structures for the streamer
//! Contains grid coordinates, chunks and vertices.

pub mod chunk;
pub mod coord;
pub mod vertex;

// Re-export commonly used types
pub use chunk::Chunk;
pub use coord::GridCoordinate;
pub use vertex::Vertex;
