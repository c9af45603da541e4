pub mod proximity;

use cgmath::{Point3, Vector2};

/// A position in the world. Y is height above the water
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPos(pub Point3<f32>);

impl WorldPos {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Point3::new(x, y, z))
    }

    /// A position on the water plane
    pub fn on_plane(x: f32, z: f32) -> Self {
        Self::new(x, 0., z)
    }

    /// Horizontal projection, height is dropped
    pub fn planar(&self) -> Vector2<f32> {
        Vector2::new(self.0.x, self.0.z)
    }

    /// Euclidean distance over x and z, height is ignored
    pub fn planar_distance(&self, other: &WorldPos) -> f32 {
        let dx = self.0.x - other.0.x;
        let dz = self.0.z - other.0.z;
        (dx * dx + dz * dz).sqrt()
    }
}
