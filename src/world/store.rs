//! Bounded chunk cache
//!
//! The store is the only owner of chunk geometry. Render surfaces get weak
//! handles on attach, so detaching never frees anything; memory goes away
//! only when a chunk is removed or evicted here.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_CHUNKS;
use crate::core::chunk::Chunk;
use crate::core::coord::GridCoordinate;
use crate::render::surface::{RenderSurface, SceneObject};

/// What to do with a new chunk once the store is full.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Decline the insertion. New terrain past the cap is not cached.
    Reject,
    /// Drop the least recently used detached chunk to make room.
    #[default]
    LeastRecentlyUsed,
}

struct Entry {
    chunk: Chunk,
    last_used: u64,
}

pub struct ChunkStore {
    chunks: FxHashMap<GridCoordinate, Entry>,
    // Resident chunks in insertion order, used as collision targets
    objects: Vec<GridCoordinate>,
    capacity: usize,
    policy: EvictionPolicy,
    clock: u64,
    evictions: usize,
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new(MAX_CHUNKS, EvictionPolicy::default())
    }
}

impl ChunkStore {
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Self {
        ChunkStore {
            chunks: FxHashMap::default(),
            objects: Vec::new(),
            capacity,
            policy,
            clock: 0,
            evictions: 0,
        }
    }

    /// Insert and attach `chunk`. Returns false without side effects when the
    /// key is already resident or no slot can be made.
    pub fn try_insert<S: RenderSurface + ?Sized>(&mut self, mut chunk: Chunk, surface: &mut S) -> bool {
        let coordinate = chunk.coordinate;
        if self.chunks.contains_key(&coordinate) {
            tracing::debug!("Chunk {} already resident, skipping insert", coordinate);
            return false;
        }

        if self.chunks.len() >= self.capacity && !self.make_room(surface) {
            tracing::debug!(
                "Chunk store full ({}/{}), not caching {}",
                self.chunks.len(),
                self.capacity,
                coordinate
            );
            return false;
        }

        surface.attach(SceneObject::chunk(&chunk.mesh));
        chunk.attached = true;
        self.clock += 1;
        self.chunks.insert(
            coordinate,
            Entry {
                chunk,
                last_used: self.clock,
            },
        );
        self.objects.push(coordinate);
        true
    }

    fn make_room<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.policy == EvictionPolicy::Reject {
            return false;
        }

        let victim = self
            .chunks
            .iter()
            .filter(|(_, entry)| !entry.chunk.attached)
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(coordinate, _)| *coordinate);

        match victim {
            Some(coordinate) => {
                tracing::debug!("Evicting least recently used chunk {}", coordinate);
                self.remove(&coordinate, surface);
                self.evictions += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, coordinate: &GridCoordinate) -> Option<&Chunk> {
        self.chunks.get(coordinate).map(|entry| &entry.chunk)
    }

    pub fn contains(&self, coordinate: &GridCoordinate) -> bool {
        self.chunks.contains_key(coordinate)
    }

    /// Detach (if attached) and drop a resident chunk. Absent keys are ignored.
    pub fn remove<S: RenderSurface + ?Sized>(
        &mut self,
        coordinate: &GridCoordinate,
        surface: &mut S,
    ) -> bool {
        let Some(entry) = self.chunks.remove(coordinate) else {
            return false;
        };
        if entry.chunk.attached {
            surface.detach(&entry.chunk.mesh.name);
        }
        self.objects.retain(|c| c != coordinate);
        true
    }

    /// Put a cached chunk back on the surface. Returns false if not resident.
    pub fn reattach<S: RenderSurface + ?Sized>(
        &mut self,
        coordinate: &GridCoordinate,
        surface: &mut S,
    ) -> bool {
        let Some(entry) = self.chunks.get_mut(coordinate) else {
            return false;
        };
        self.clock += 1;
        surface.attach(SceneObject::chunk(&entry.chunk.mesh));
        entry.chunk.attached = true;
        entry.last_used = self.clock;
        true
    }

    /// Mark a chunk as used now, for LRU ordering.
    pub fn touch(&mut self, coordinate: &GridCoordinate) {
        if let Some(entry) = self.chunks.get_mut(coordinate) {
            self.clock += 1;
            entry.last_used = self.clock;
        }
    }

    pub fn set_attached(&mut self, coordinate: &GridCoordinate, attached: bool) {
        if let Some(entry) = self.chunks.get_mut(coordinate) {
            entry.chunk.attached = attached;
        }
    }

    pub fn count(&self) -> usize {
        self.chunks.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Total chunks dropped to make room since creation.
    pub fn eviction_count(&self) -> usize {
        self.evictions
    }

    pub fn attached_count(&self) -> usize {
        self.chunks.values().filter(|e| e.chunk.attached).count()
    }

    /// Resident chunks in insertion order.
    pub fn active_objects(&self) -> impl Iterator<Item = &Chunk> {
        self.objects
            .iter()
            .filter_map(|coordinate| self.chunks.get(coordinate).map(|entry| &entry.chunk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::SceneSurface;
    use crate::world::generator::ChunkGenerator;
    use crate::world::noise::HeightOracle;
    use std::collections::HashSet;

    fn flat() -> ChunkGenerator<impl HeightOracle> {
        ChunkGenerator::with_oracle(|_: f32, _: f32| 0.0_f32)
    }

    fn coord(i: i32) -> GridCoordinate {
        GridCoordinate::new(500 + i % 20, 0, 500 + i / 20)
    }

    #[test]
    fn test_insert_attaches() {
        let generator = flat();
        let mut store = ChunkStore::default();
        let mut surface = SceneSurface::new();
        assert!(store.try_insert(generator.generate(coord(0)), &mut surface));
        assert_eq!(store.count(), 1);
        assert!(store.get(&coord(0)).unwrap().attached);
        assert!(surface.find_by_key("500/0/500").is_some());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let generator = flat();
        let mut store = ChunkStore::default();
        let mut surface = SceneSurface::new();
        assert!(store.try_insert(generator.generate(coord(0)), &mut surface));
        assert!(!store.try_insert(generator.generate(coord(0)), &mut surface));
        assert_eq!(store.count(), 1);
        assert_eq!(surface.attach_count, 1);
    }

    #[test]
    fn test_reject_policy_caps_at_capacity() {
        let generator = flat();
        let mut store = ChunkStore::new(MAX_CHUNKS, EvictionPolicy::Reject);
        let mut surface = SceneSurface::new();
        for i in 0..MAX_CHUNKS as i32 {
            assert!(store.try_insert(generator.generate(coord(i)), &mut surface));
        }
        assert_eq!(store.count(), MAX_CHUNKS);

        let extra = coord(MAX_CHUNKS as i32);
        assert!(!store.try_insert(generator.generate(extra), &mut surface));
        assert_eq!(store.count(), MAX_CHUNKS);
        assert!(store.get(&extra).is_none());
        assert!(surface.find_by_key(&extra.key()).is_none());
    }

    #[test]
    fn test_lru_evicts_oldest_detached() {
        let generator = flat();
        let mut store = ChunkStore::new(3, EvictionPolicy::LeastRecentlyUsed);
        let mut surface = SceneSurface::new();
        for i in 0..3 {
            store.try_insert(generator.generate(coord(i)), &mut surface);
        }
        // Everything attached: nothing can go
        assert!(!store.try_insert(generator.generate(coord(3)), &mut surface));

        for i in 0..3 {
            surface.detach(&coord(i).key());
            store.set_attached(&coord(i), false);
        }
        store.touch(&coord(0));

        assert!(store.try_insert(generator.generate(coord(3)), &mut surface));
        assert_eq!(store.count(), 3);
        assert!(!store.contains(&coord(1)));
        assert!(store.contains(&coord(0)));
        assert_eq!(store.eviction_count(), 1);
    }

    #[test]
    fn test_invariants_hold_under_any_sequence() {
        let generator = flat();
        for policy in [EvictionPolicy::Reject, EvictionPolicy::LeastRecentlyUsed] {
            let mut store = ChunkStore::new(MAX_CHUNKS, policy);
            let mut surface = SceneSurface::new();
            for step in 0..400 {
                let c = coord((step * 37) % 240);
                store.try_insert(generator.generate(c), &mut surface);
                if step % 3 == 0 {
                    surface.detach(&c.key());
                    store.set_attached(&c, false);
                }
                assert!(store.count() <= MAX_CHUNKS);
            }
            let keys: HashSet<String> = store.active_objects().map(|c| c.key()).collect();
            assert_eq!(keys.len(), store.count());
        }
    }

    #[test]
    fn test_remove_detaches_and_frees() {
        let generator = flat();
        let mut store = ChunkStore::default();
        let mut surface = SceneSurface::new();
        store.try_insert(generator.generate(coord(0)), &mut surface);
        let weak = surface.find_by_key("500/0/500").unwrap().mesh.clone();

        assert!(store.remove(&coord(0), &mut surface));
        assert!(!store.remove(&coord(0), &mut surface));
        assert_eq!(store.count(), 0);
        assert_eq!(store.active_objects().count(), 0);
        assert!(surface.is_empty());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_reattach() {
        let generator = flat();
        let mut store = ChunkStore::default();
        let mut surface = SceneSurface::new();
        store.try_insert(generator.generate(coord(0)), &mut surface);
        surface.detach("500/0/500");
        store.set_attached(&coord(0), false);

        assert!(store.reattach(&coord(0), &mut surface));
        assert!(store.get(&coord(0)).unwrap().attached);
        assert!(surface.find_by_key("500/0/500").is_some());
    }

    #[test]
    fn test_missing_keys_leave_lru_clock_alone() {
        let generator = flat();
        let mut store = ChunkStore::default();
        let mut surface = SceneSurface::new();
        store.try_insert(generator.generate(coord(0)), &mut surface);
        let clock = store.clock;

        assert!(!store.reattach(&coord(1), &mut surface));
        store.touch(&coord(2));
        assert_eq!(store.clock, clock);
        assert_eq!(surface.attach_count, 1);
    }
}
