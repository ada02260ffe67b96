//! Neighborhood streaming around a moving observer
//!
//! Every tick the streamer works out which chunk the observer stands in,
//! makes sure every chunk of the surrounding neighborhood is on the render
//! surface (reusing cached chunks, generating missing ones) and takes
//! everything else off. Taking a chunk off the surface keeps it cached.

use std::collections::HashSet;

use glam::Vec3;

use crate::constants::*;
use crate::core::coord::GridCoordinate;
use crate::render::surface::RenderSurface;
use crate::utils::settings::StreamSettings;
use crate::world::generator::ChunkGenerator;
use crate::world::noise::{HeightOracle, SimplexOracle};
use crate::world::store::ChunkStore;

/// What a single tick did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub generated: usize,
    pub reattached: usize,
    pub detached: usize,
    /// Generated chunks the store declined to cache.
    pub rejected: usize,
    pub evicted: usize,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        *self == TickReport::default()
    }

    pub fn accumulate(&mut self, other: &TickReport) {
        self.generated += other.generated;
        self.reattached += other.reattached;
        self.detached += other.detached;
        self.rejected += other.rejected;
        self.evicted += other.evicted;
    }
}

pub struct WorldStreamer<O: HeightOracle = SimplexOracle> {
    generator: ChunkGenerator<O>,
    store: ChunkStore,
    current_chunk: GridCoordinate,
    last_chunk: GridCoordinate,
    view_radius: i32,
}

/// Chunk coordinate of a world-space observer position.
pub fn chunk_of(position: Vec3) -> GridCoordinate {
    GridCoordinate::containing(position)
}

impl WorldStreamer<SimplexOracle> {
    pub fn from_settings<S: RenderSurface + ?Sized>(
        settings: &StreamSettings,
        seed: u32,
        initial_position: Vec3,
        surface: &mut S,
    ) -> Self {
        WorldStreamer::new(
            ChunkGenerator::new(seed),
            ChunkStore::new(settings.max_chunks, settings.eviction),
            settings.view_radius,
            initial_position,
            surface,
        )
    }
}

impl<O: HeightOracle> WorldStreamer<O> {
    /// Starts from the sentinel chunk and generates the chunk under
    /// `initial_position` right away, so the observer never spawns over a void.
    pub fn new<S: RenderSurface + ?Sized>(
        generator: ChunkGenerator<O>,
        store: ChunkStore,
        view_radius: i32,
        initial_position: Vec3,
        surface: &mut S,
    ) -> Self {
        let mut streamer = WorldStreamer {
            generator,
            store,
            current_chunk: GridCoordinate::ORIGIN,
            last_chunk: GridCoordinate::ORIGIN,
            view_radius: view_radius.max(0),
        };

        let spawn = chunk_of(initial_position);
        let chunk = streamer.generator.generate(spawn);
        if !streamer.store.try_insert(chunk, surface) {
            tracing::warn!("Spawn chunk {} could not be cached", spawn);
        }
        tracing::info!("World streamer ready, spawn chunk {}", spawn);

        streamer
    }

    pub fn current_chunk(&self) -> GridCoordinate {
        self.current_chunk
    }

    pub fn last_chunk(&self) -> GridCoordinate {
        self.last_chunk
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    pub fn generator(&self) -> &ChunkGenerator<O> {
        &self.generator
    }

    pub fn view_radius(&self) -> i32 {
        self.view_radius
    }

    /// Record the observer's chunk. Bookkeeping only.
    pub fn update_current_chunk(&mut self, position: Vec3) -> bool {
        let chunk = chunk_of(position);
        if chunk == self.current_chunk {
            return false;
        }
        tracing::debug!("Observer moved {} -> {}", self.current_chunk, chunk);
        self.last_chunk = self.current_chunk;
        self.current_chunk = chunk;
        true
    }

    /// Coordinates that must be on the surface for the current chunk.
    pub fn neighborhood(&self) -> Vec<GridCoordinate> {
        self.current_chunk.neighborhood(self.view_radius)
    }

    /// One observer sample: update bookkeeping, then refresh the neighborhood.
    pub fn on_tick<S: RenderSurface + ?Sized>(&mut self, position: Vec3, surface: &mut S) -> TickReport {
        self.update_current_chunk(position);
        self.refresh_neighborhood(surface)
    }

    /// Attach every neighborhood chunk and detach every other chunk mesh.
    ///
    /// Stale chunks are detached first and every cached neighbor is
    /// reattached before anything is generated. Eviction only ever takes
    /// detached chunks, so by the time an insert needs a slot the whole
    /// resident part of the neighborhood is pinned on the surface.
    pub fn refresh_neighborhood<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> TickReport {
        let mut report = TickReport::default();
        let evictions_before = self.store.eviction_count();
        let neighborhood = self.neighborhood();

        report.detached = self.prune(&neighborhood, surface);

        let mut missing = Vec::new();
        for coordinate in &neighborhood {
            let key = coordinate.key();
            if surface.find_by_key(&key).is_some() {
                continue;
            }
            if self.store.reattach(coordinate, surface) {
                tracing::debug!("Reattached cached chunk {}", key);
                report.reattached += 1;
            } else {
                missing.push(*coordinate);
            }
        }

        for coordinate in missing {
            let chunk = self.generator.generate(coordinate);
            report.generated += 1;
            if !self.store.try_insert(chunk, surface) {
                report.rejected += 1;
            }
        }

        report.evicted = self.store.eviction_count() - evictions_before;

        if !report.is_idle() {
            tracing::debug!(
                "Tick at {}: {:?}, {} resident",
                self.current_chunk,
                report,
                self.store.count()
            );
        }
        report
    }

    fn prune<S: RenderSurface + ?Sized>(&mut self, keep: &[GridCoordinate], surface: &mut S) -> usize {
        let keep: HashSet<String> = keep.iter().map(GridCoordinate::key).collect();
        let mut detached = 0;

        for name in surface.attached_chunk_keys() {
            if keep.contains(&name) {
                continue;
            }
            if surface.detach(&name) {
                detached += 1;
            }
            match name.parse::<GridCoordinate>() {
                Ok(coordinate) => {
                    self.store.set_attached(&coordinate, false);
                    self.store.touch(&coordinate);
                }
                Err(e) => tracing::warn!("Detached chunk mesh with unreadable key: {}", e),
            }
        }
        detached
    }

    /// Top face of the terrain column under `(x, z)` among resident chunks.
    pub fn ground_height(&self, x: f32, z: f32) -> Option<f32> {
        let col = (x + 0.5).floor() as i32;
        let row = (z + 0.5).floor() as i32;

        self.store
            .active_objects()
            .filter(|chunk| chunk.mesh.bounds.contains_xz(x, z))
            .find_map(|chunk| chunk.height_at_world(col, row))
            .map(|height| height as f32 + 0.5)
    }

    /// Eye height for an observer standing on the ground below `position`,
    /// if the ground lies within reach of a short downward ray.
    pub fn snap_to_ground(&self, position: Vec3) -> Option<f32> {
        let ground = self.ground_height(position.x, position.z)?;
        let drop = position.y - ground;
        if (0.0..=GROUND_RAY_LENGTH).contains(&drop) {
            Some(ground + EYE_OFFSET)
        } else {
            None
        }
    }
}
