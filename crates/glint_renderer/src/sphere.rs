//! Ray-sphere intersection.
//!
//! Spheres are intersected in object space: the ray is carried through the
//! inverse transform, so scaled and rotated spheres (ellipsoids) come for free.

use glint_math::{Mat4, Mat4Ext, Ray, Vec3};

use crate::intersection::EPSILON;

/// Nearest accepted hit distance of `ray` against a sphere in object space.
///
/// Only the smaller root is considered, so a ray starting inside the sphere
/// misses. Grazing (zero discriminant) rays miss, as do degenerate spheres
/// and zero-length directions.
pub fn intersect(center: Vec3, radius: f32, inverse: &Mat4, ray: &Ray) -> Option<f32> {
    if !(radius > 0.0) {
        return None;
    }

    let origin = inverse.transform_point3(ray.origin);
    let direction = inverse.transform_vector3(ray.direction);

    let a = direction.dot(direction);
    if !(a > 0.0) {
        return None;
    }

    let oc = origin - center;
    let b = 2.0 * direction.dot(oc);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if !(discriminant > 0.0) {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (t > EPSILON).then_some(t)
}

/// World-space position and unit normal at parameter `t`.
pub fn surface_at(center: Vec3, transform: &Mat4, inverse: &Mat4, ray: &Ray, t: f32) -> (Vec3, Vec3) {
    let origin = inverse.transform_point3(ray.origin);
    let direction = inverse.transform_vector3(ray.direction);

    let local_hit = origin + t * direction;
    let local_normal = local_hit - center;

    let position = transform.transform_point3(local_hit);
    let normal = inverse.transform_normal(local_normal).normalize_or_zero();
    (position, normal)
}
