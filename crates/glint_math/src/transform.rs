// Transform utilities for Mat4
//
// Extends glam::Mat4 with the affine helpers the ray tracer needs.
// Note: glam::Mat4 already provides transform_point3(), transform_vector3() and inverse()

use glam::{Mat4, Vec3};
use crate::Aabb;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a surface normal with the transpose of this matrix.
    ///
    /// Call on the *inverse* of an object-to-world matrix to move an
    /// object-space normal into world space. The result is not normalized.
    fn transform_normal(&self, normal: Vec3) -> Vec3;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;

    /// Inverse of the matrix, or `None` when it is singular or not finite.
    fn try_inverse(&self) -> Option<Mat4>;
}

impl Mat4Ext for Mat4 {
    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        self.transpose().transform_vector3(normal)
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        Aabb::from_points(aabb.corners().map(|corner| self.transform_point3(corner)))
    }

    fn try_inverse(&self) -> Option<Mat4> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = self.inverse();
        inv.is_finite().then_some(inv)
    }
}

/// Rotation about an arbitrary axis by an angle in degrees.
///
/// A zero axis yields the identity.
pub fn rotation_degrees(axis: Vec3, degrees: f32) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, degrees.to_radians()),
        None => Mat4::IDENTITY,
    }
}

/// Re-orthogonalize an up vector against a viewing direction.
///
/// Returns the unit vector perpendicular to `forward` that lies in the plane
/// spanned by `up` and `forward`.
pub fn orthogonal_up(up: Vec3, forward: Vec3) -> Vec3 {
    let x = up.cross(forward);
    forward.cross(x).normalize_or_zero()
}
