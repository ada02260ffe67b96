//! Render surface seam
//!
//! The streamer never owns the scene it draws into. It hands the surface
//! non-owning handles to chunk meshes and takes them back when chunks leave
//! the neighborhood. Mesh memory stays with the chunk store.

use std::sync::{Arc, Weak};

use crate::render::mesh::ChunkMesh;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    /// Terrain batch produced by the chunk generator. Only these are pruned.
    ChunkMesh,
    /// Anything else in the scene (lights, player model, ...).
    Other,
}

/// Entry of a render surface. Holds a weak reference to its geometry.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub mesh: Weak<ChunkMesh>,
}

impl SceneObject {
    pub fn chunk(mesh: &Arc<ChunkMesh>) -> Self {
        SceneObject {
            name: mesh.name.clone(),
            kind: ObjectKind::ChunkMesh,
            mesh: Arc::downgrade(mesh),
        }
    }

    pub fn other(name: impl Into<String>) -> Self {
        SceneObject {
            name: name.into(),
            kind: ObjectKind::Other,
            mesh: Weak::new(),
        }
    }
}

pub trait RenderSurface {
    /// Add an object. Attaching a name that is already present is a no-op.
    fn attach(&mut self, object: SceneObject);
    /// Remove the object with this name. Returns whether anything was removed.
    fn detach(&mut self, name: &str) -> bool;
    fn find_by_key(&self, name: &str) -> Option<&SceneObject>;
    /// Names of attached objects tagged as chunk meshes.
    fn attached_chunk_keys(&self) -> Vec<String>;
}

/// Headless scene: a flat child list, like a scene graph root.
#[derive(Default)]
pub struct SceneSurface {
    children: Vec<SceneObject>,
    pub attach_count: usize,
    pub detach_count: usize,
}

impl SceneSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Attached chunk meshes whose geometry has already been freed by the store.
    pub fn dangling_count(&self) -> usize {
        self.children
            .iter()
            .filter(|o| o.kind == ObjectKind::ChunkMesh && o.mesh.upgrade().is_none())
            .count()
    }
}

impl RenderSurface for SceneSurface {
    fn attach(&mut self, object: SceneObject) {
        if self.find_by_key(&object.name).is_some() {
            return;
        }
        self.children.push(object);
        self.attach_count += 1;
    }

    fn detach(&mut self, name: &str) -> bool {
        match self.children.iter().position(|o| o.name == name) {
            Some(idx) => {
                self.children.remove(idx);
                self.detach_count += 1;
                true
            }
            None => false,
        }
    }

    fn find_by_key(&self, name: &str) -> Option<&SceneObject> {
        self.children.iter().find(|o| o.name == name)
    }

    fn attached_chunk_keys(&self) -> Vec<String> {
        self.children
            .iter()
            .filter(|o| o.kind == ObjectKind::ChunkMesh)
            .map(|o| o.name.clone())
            .collect()
    }
}
