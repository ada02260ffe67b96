use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    /// Inverted box that any `extend` call replaces.
    pub fn empty() -> Self {
        AABB {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Whether the vertical line through `(x, z)` crosses the box.
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.z && z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_and_contains() {
        let mut aabb = AABB::empty();
        assert!(!aabb.contains_xz(0.0, 0.0));
        aabb.extend(Vec3::new(-8.5, -1.0, -8.5));
        aabb.extend(Vec3::new(7.5, 3.0, 7.5));
        assert_eq!(aabb.max - aabb.min, Vec3::new(16.0, 4.0, 16.0));
        assert!(aabb.contains_xz(0.0, 0.0));
        assert!(aabb.contains_xz(7.5, -8.5));
        assert!(!aabb.contains_xz(7.6, 0.0));
    }
}
