//! Chunk grid coordinates and their canonical `"x/y/z"` keys.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::CoordinateParseError;

/// Integer position of a chunk in chunk units. `y` is always 0 for now,
/// terrain is a heightfield extruded vertically.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCoordinate {
    /// Sentinel the streamer starts from before the first observer sample.
    pub const ORIGIN: GridCoordinate = GridCoordinate::new(GRID_OFFSET, 0, GRID_OFFSET);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        GridCoordinate { x, y, z }
    }

    /// Chunk containing a world-space position. Saturates at the edges of
    /// the `i32` grid.
    pub fn containing(position: Vec3) -> Self {
        let x = ((position.x / CHUNK_SIZE as f32).floor() as i32).saturating_add(GRID_OFFSET);
        let z = ((position.z / CHUNK_SIZE as f32).floor() as i32).saturating_add(GRID_OFFSET);
        GridCoordinate::new(x, 0, z)
    }

    /// Canonical map key, e.g. `"500/0/500"`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn chebyshev_distance(&self, other: &GridCoordinate) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }

    /// All coordinates within `radius` on the horizontal plane, center included.
    /// Ordered by dx then dz. Near the grid edge saturated duplicates are dropped.
    pub fn neighborhood(&self, radius: i32) -> Vec<GridCoordinate> {
        let radius = radius.max(0);
        let side = (2 * radius as usize) + 1;
        let mut coords = Vec::with_capacity(side * side);
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let coord = GridCoordinate::new(
                    self.x.saturating_add(dx),
                    self.y,
                    self.z.saturating_add(dz),
                );
                if !coords.contains(&coord) {
                    coords.push(coord);
                }
            }
        }
        coords
    }

    /// World-space column of the footprint's first cube (min x, min z).
    pub fn footprint_origin(&self) -> (i32, i32) {
        let origin = |c: i32| {
            c.saturating_sub(GRID_OFFSET)
                .saturating_mul(CHUNK_SIZE)
                .saturating_sub(HALF_CHUNK_SIZE)
        };
        (origin(self.x), origin(self.z))
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.x, self.y, self.z)
    }
}

impl FromStr for GridCoordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 3 {
            return Err(CoordinateParseError::WrongArity(s.to_string()));
        }
        let parse = |part: &str| {
            part.parse::<i32>()
                .map_err(|_| CoordinateParseError::BadComponent(part.to_string()))
        };
        Ok(GridCoordinate::new(
            parse(parts[0])?,
            parse(parts[1])?,
            parse(parts[2])?,
        ))
    }
}
