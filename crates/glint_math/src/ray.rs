use crate::Vec3;

/// A ray in 3D space with origin and direction.
///
/// The direction is not required to be normalized; code that depends on unit
/// length normalizes it where needed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Per-axis reciprocal of the direction, 0 where the component is 0.
    pub fn inverse_direction(&self) -> Vec3 {
        let inv = |d: f32| if d != 0.0 { 1.0 / d } else { 0.0 };
        Vec3::new(
            inv(self.direction.x),
            inv(self.direction.y),
            inv(self.direction.z),
        )
    }

    /// Per-axis sign flags. A zero component counts as negative.
    pub fn direction_is_negative(&self) -> [bool; 3] {
        [
            !(self.direction.x > 0.0),
            !(self.direction.y > 0.0),
            !(self.direction.z > 0.0),
        ]
    }
}
