//! World generation and streaming modules
//! Contains the height oracle, chunk generation, the chunk cache and the streamer.

pub mod generator;
pub mod noise;
pub mod store;
pub mod streamer;

// Re-export commonly used types
pub use generator::ChunkGenerator;
pub use noise::{HeightOracle, SimplexOracle};
pub use store::{ChunkStore, EvictionPolicy};
pub use streamer::{TickReport, WorldStreamer, chunk_of};
