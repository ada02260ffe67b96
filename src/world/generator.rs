//! Terrain chunk generation
//!
//! Turns a grid coordinate into a single merged mesh of unit cubes, one per
//! column of the chunk footprint. Generation is pure: the same coordinate and
//! seed always give the same geometry, and nothing is attached or cached here.

use glam::Vec3;

use crate::constants::*;
use crate::core::chunk::Chunk;
use crate::core::coord::GridCoordinate;
use crate::render::mesh::ChunkMesh;
use crate::world::noise::{HeightOracle, SimplexOracle};

pub struct ChunkGenerator<O: HeightOracle = SimplexOracle> {
    oracle: O,
}

impl ChunkGenerator<SimplexOracle> {
    /// Create a new ChunkGenerator with the specified seed
    pub fn new(seed: u32) -> Self {
        ChunkGenerator {
            oracle: SimplexOracle::new(seed),
        }
    }
}

impl<O: HeightOracle> ChunkGenerator<O> {
    pub fn with_oracle(oracle: O) -> Self {
        ChunkGenerator { oracle }
    }

    /// Surface cube height of world column `(col, row)`.
    pub fn column_height(&self, col: i32, row: i32) -> i32 {
        let n = self
            .oracle
            .sample(col as f32 / NOISE_SCALE, row as f32 / NOISE_SCALE);
        // Halves round toward +inf, not away from zero
        (n * HEIGHT_SCALE + 0.5).floor() as i32
    }

    /// Generate a complete chunk at the given coordinate
    pub fn generate(&self, coordinate: GridCoordinate) -> Chunk {
        let (sx, sz) = coordinate.footprint_origin();
        let mut heights = [0i32; CHUNK_AREA];
        let mut mesh = ChunkMesh::with_capacity(coordinate.key(), CHUNK_AREA);

        for lz in 0..CHUNK_SIZE {
            for lx in 0..CHUNK_SIZE {
                let col = sx.saturating_add(lx);
                let row = sz.saturating_add(lz);
                let height = self.column_height(col, row);
                heights[(lz * CHUNK_SIZE + lx) as usize] = height;
                mesh.add_cube(Vec3::new(col as f32, height as f32, row as f32));
            }
        }

        tracing::trace!(
            "Generated chunk {} ({} cubes, {} bytes)",
            coordinate,
            mesh.cube_count(),
            mesh.byte_size()
        );

        Chunk::new(coordinate, mesh, heights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let a = ChunkGenerator::new(42);
        let b = ChunkGenerator::new(42);
        let coord = GridCoordinate::new(503, 0, 497);
        let first = a.generate(coord);
        let second = b.generate(coord);
        assert_eq!(first.heights, second.heights);
        assert_eq!(first.mesh.vertices, second.mesh.vertices);
        assert_eq!(first.mesh.indices, second.mesh.indices);
    }

    #[test]
    fn test_footprint_and_naming() {
        let generator = ChunkGenerator::with_oracle(|_: f32, _: f32| 0.0_f32);
        let chunk = generator.generate(GridCoordinate::ORIGIN);
        assert_eq!(chunk.mesh.name, "500/0/500");
        assert_eq!(chunk.mesh.cube_count(), CHUNK_AREA);
        assert!(chunk.mesh.cast_shadow);
        assert!(!chunk.attached);
        // Origin chunk is centred on world (0, 0): cubes -8..=7
        assert_eq!(chunk.mesh.bounds.min, Vec3::new(-8.5, -0.5, -8.5));
        assert_eq!(chunk.mesh.bounds.max, Vec3::new(7.5, 0.5, 7.5));
    }

    #[test]
    fn test_adjacent_chunks_tile() {
        let generator = ChunkGenerator::with_oracle(|_: f32, _: f32| 0.0_f32);
        let west = generator.generate(GridCoordinate::new(500, 0, 500));
        let east = generator.generate(GridCoordinate::new(501, 0, 500));
        assert_eq!(west.mesh.bounds.max.x, east.mesh.bounds.min.x);
        assert_eq!(west.mesh.bounds.min.z, east.mesh.bounds.min.z);
    }

    #[test]
    fn test_heights_follow_oracle() {
        let generator = ChunkGenerator::with_oracle(|x: f32, _: f32| x.clamp(-1.0, 1.0));
        let coord = GridCoordinate::new(500, 0, 500);
        let chunk = generator.generate(coord);
        let (sx, sz) = coord.footprint_origin();
        for lx in 0..CHUNK_SIZE {
            let col = sx + lx;
            let expected = ((col as f32 / NOISE_SCALE) * HEIGHT_SCALE + 0.5).floor() as i32;
            assert_eq!(chunk.height_at(lx, 0), Some(expected));
            assert_eq!(chunk.height_at_world(col, sz + 3), Some(expected));
        }
        assert_eq!(chunk.height_at(CHUNK_SIZE, 0), None);
    }

    #[test]
    fn test_half_rounds_up() {
        let generator = ChunkGenerator::with_oracle(|_: f32, _: f32| -0.25_f32);
        assert_eq!(generator.column_height(0, 0), -2);
        let generator = ChunkGenerator::with_oracle(|_: f32, _: f32| 0.25_f32);
        assert_eq!(generator.column_height(0, 0), 3);
    }
}
