use glam::Vec3;

use crate::constants::*;
use crate::core::vertex::Vertex;
use crate::render::bounds::AABB;

/// A merged static mesh batch: one drawable object per chunk.
pub struct ChunkMesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub bounds: AABB,
}

impl ChunkMesh {
    pub fn with_capacity(name: String, cubes: usize) -> Self {
        ChunkMesh {
            name,
            vertices: Vec::with_capacity(cubes * VERTICES_PER_CUBE),
            indices: Vec::with_capacity(cubes * INDICES_PER_CUBE),
            cast_shadow: true,
            receive_shadow: true,
            bounds: AABB::empty(),
        }
    }

    pub fn cube_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_CUBE
    }

    /// Raw vertex data as uploaded to a GPU buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn byte_size(&self) -> usize {
        self.vertex_bytes().len() + self.index_bytes().len()
    }

    /// Merge a unit cube centred on `center` into the batch.
    pub fn add_cube(&mut self, center: Vec3) {
        let h = 0.5;
        let corners = [
            (-h, -h, -h),
            (h, -h, -h),
            (h, h, -h),
            (-h, h, -h),
            (-h, -h, h),
            (h, -h, h),
            (h, h, h),
            (-h, h, h),
        ];
        let transformed: Vec<[f32; 3]> = corners
            .iter()
            .map(|&(dx, dy, dz)| [center.x + dx, center.y + dy, center.z + dz])
            .collect();

        // Grass cube: top face, dirt bottom, sides in between
        let faces = [
            // Front (+Z)
            ([4, 5, 6, 7], [0.0, 0.0, 1.0], MATERIAL_SIDE),
            // Back (-Z)
            ([1, 0, 3, 2], [0.0, 0.0, -1.0], MATERIAL_SIDE),
            // Right (+X)
            ([5, 1, 2, 6], [1.0, 0.0, 0.0], MATERIAL_SIDE),
            // Left (-X)
            ([0, 4, 7, 3], [-1.0, 0.0, 0.0], MATERIAL_SIDE),
            // Top (+Y)
            ([7, 6, 2, 3], [0.0, 1.0, 0.0], MATERIAL_TOP),
            // Bottom (-Y)
            ([0, 1, 5, 4], [0.0, -1.0, 0.0], MATERIAL_BOTTOM),
        ];

        for (face, normal, material) in faces {
            add_quad(
                &mut self.vertices,
                &mut self.indices,
                transformed[face[0]],
                transformed[face[1]],
                transformed[face[2]],
                transformed[face[3]],
                normal,
                material,
            );
        }

        self.bounds.extend(center - Vec3::splat(h));
        self.bounds.extend(center + Vec3::splat(h));
    }
}

fn add_quad(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
    v0: [f32; 3],
    v1: [f32; 3],
    v2: [f32; 3],
    v3: [f32; 3],
    normal: [f32; 3],
    material: f32,
) {
    let base_idx = vertices.len() as u32;
    vertices.push(Vertex {
        position: v0,
        normal,
        uv: [0.0, 1.0],
        material,
    });
    vertices.push(Vertex {
        position: v1,
        normal,
        uv: [1.0, 1.0],
        material,
    });
    vertices.push(Vertex {
        position: v2,
        normal,
        uv: [1.0, 0.0],
        material,
    });
    vertices.push(Vertex {
        position: v3,
        normal,
        uv: [0.0, 0.0],
        material,
    });
    indices.extend_from_slice(&[
        base_idx,
        base_idx + 1,
        base_idx + 2,
        base_idx,
        base_idx + 2,
        base_idx + 3,
    ]);
}
