//! Intersection record and the `Hittable` seam between the BVH and primitives.

use glint_core::{Primitive, Shape};
use glint_math::{Ray, Vec3};

use crate::{sphere, triangle};

/// Smallest accepted hit distance. Rejects hits at the ray origin so that
/// shadow and reflection rays leaving a surface do not re-hit it.
pub const EPSILON: f32 = 1e-5;

/// Result of a nearest-hit query.
///
/// A miss is encoded as `t <= 0` with no primitive, so the value can be
/// compared and combined without unwrapping.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Parameter t along the ray; `<= 0` means no hit
    pub t: f32,
    /// World-space hit point
    pub position: Vec3,
    /// World-space unit shading normal
    pub normal: Vec3,
    /// The primitive that was hit
    pub primitive: Option<&'a Primitive>,
}

impl<'a> Intersection<'a> {
    pub fn miss() -> Self {
        Self {
            t: -1.0,
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
            primitive: None,
        }
    }

    /// True for a positive hit distance. NaN counts as a miss.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.t > 0.0 && self.primitive.is_some()
    }

    /// Pick the nearer of two results; ties go to `self`.
    pub fn closer(self, other: Self) -> Self {
        match (self.is_hit(), other.is_hit()) {
            (true, true) if other.t < self.t => other,
            (true, _) => self,
            _ => other,
        }
    }
}

impl Default for Intersection<'_> {
    fn default() -> Self {
        Self::miss()
    }
}

/// Ray queries against a single primitive.
pub trait Hittable {
    /// Cheap test: hit distance of the accepted root, if any.
    fn intersect(&self, ray: &Ray, vertices: &[Vec3]) -> Option<f32>;

    /// Build the full record for a distance previously returned by `intersect`.
    fn hit_at(&self, ray: &Ray, t: f32, vertices: &[Vec3]) -> Intersection<'_>;

    /// `intersect` followed by `hit_at`, or a miss.
    fn nearest_hit(&self, ray: &Ray, vertices: &[Vec3]) -> Intersection<'_> {
        match self.intersect(ray, vertices) {
            Some(t) => self.hit_at(ray, t, vertices),
            None => Intersection::miss(),
        }
    }
}

impl Hittable for Primitive {
    fn intersect(&self, ray: &Ray, vertices: &[Vec3]) -> Option<f32> {
        match self.shape {
            Shape::Sphere { center, radius } => {
                let inverse = self.inverse_transform.as_ref()?;
                sphere::intersect(center, radius, inverse, ray)
            }
            Shape::Triangle { .. } => triangle::intersect(self.world_vertices(vertices)?, ray),
        }
    }

    fn hit_at(&self, ray: &Ray, t: f32, vertices: &[Vec3]) -> Intersection<'_> {
        let surface = match self.shape {
            Shape::Sphere { center, .. } => self
                .inverse_transform
                .map(|inverse| sphere::surface_at(center, &self.transform, &inverse, ray, t)),
            Shape::Triangle { .. } => self
                .world_vertices(vertices)
                .map(|corners| triangle::surface_at(corners, ray, t)),
        };

        match surface {
            Some((position, normal)) => Intersection {
                t,
                position,
                normal,
                primitive: Some(self),
            },
            None => Intersection::miss(),
        }
    }
}
