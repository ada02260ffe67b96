use std::sync::Arc;

use crate::constants::*;
use crate::core::coord::GridCoordinate;
use crate::render::mesh::ChunkMesh;

/// Generated terrain for one grid cell. Immutable once built, apart from the
/// attachment flag the store keeps in sync with the render surface.
pub struct Chunk {
    pub coordinate: GridCoordinate,
    pub mesh: Arc<ChunkMesh>,
    /// Cube heights, row-major (`row * CHUNK_SIZE + col`) in footprint-local space.
    pub heights: [i32; CHUNK_AREA],
    pub attached: bool,
}

impl Chunk {
    pub fn new(coordinate: GridCoordinate, mesh: ChunkMesh, heights: [i32; CHUNK_AREA]) -> Self {
        Chunk {
            coordinate,
            mesh: Arc::new(mesh),
            heights,
            attached: false,
        }
    }

    pub fn key(&self) -> String {
        self.coordinate.key()
    }

    /// Height of the cube at footprint-local `(col, row)`.
    pub fn height_at(&self, col: i32, row: i32) -> Option<i32> {
        if col >= 0 && col < CHUNK_SIZE && row >= 0 && row < CHUNK_SIZE {
            Some(self.heights[(row * CHUNK_SIZE + col) as usize])
        } else {
            None
        }
    }

    /// Height of the cube in world column `(col, row)`, if this chunk owns it.
    pub fn height_at_world(&self, col: i32, row: i32) -> Option<i32> {
        let (sx, sz) = self.coordinate.footprint_origin();
        self.height_at(col.checked_sub(sx)?, row.checked_sub(sz)?)
    }
}
