//! Ray-triangle intersection.
//!
//! Plane intersection followed by an inside test built from cross products
//! of the edges. Corners are expected in world space.

use glint_math::{Ray, Vec3};

use crate::intersection::EPSILON;

/// Hit distance of `ray` against the triangle `[a, b, c]`.
///
/// Zero-area triangles and rays parallel to the plane miss.
pub fn intersect([a, b, c]: [Vec3; 3], ray: &Ray) -> Option<f32> {
    let ac = c - a;
    let ab = b - a;

    let ac_x_ab = ac.cross(ab);
    let normal = ac_x_ab.try_normalize()?;

    let denom = ray.direction.dot(normal);
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }

    let t = (a.dot(normal) - ray.origin.dot(normal)) / denom;
    if !(t > EPSILON) || !t.is_finite() {
        return None;
    }

    let ap = ray.at(t) - a;
    let ac_x_ap = ac.cross(ap);
    let ab_x_ac = -ac_x_ab;
    let ab_x_ap = ab.cross(ap);

    // Both cross products must agree in orientation with the face
    if ac_x_ab.dot(ac_x_ap) < 0.0 || ab_x_ac.dot(ab_x_ap) < 0.0 {
        return None;
    }

    let beta = ac_x_ap.length() / ac_x_ab.length();
    let gamma = ab_x_ap.length() / ab_x_ac.length();

    (beta + gamma <= 1.0).then_some(t)
}

/// World-space position and counter-clockwise unit normal at parameter `t`.
pub fn surface_at([a, b, c]: [Vec3; 3], ray: &Ray, t: f32) -> (Vec3, Vec3) {
    let normal = (b - a).cross(c - a).normalize_or_zero();
    (ray.at(t), normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_triangle(z: f32) -> [Vec3; 3] {
        [
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        ]
    }

    #[test]
    fn test_triangle_hit() {
        // Triangle in XY plane at z=-1
        let tri = xy_triangle(-1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = intersect(tri, &ray).unwrap();
        assert!((t - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_triangle_hit_through_centroid_along_normal() {
        let tri = [
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(3.0, 2.0, -1.0),
            Vec3::new(0.5, 1.0, 0.0),
        ];
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize();
        let ray = Ray::new(centroid + normal * 4.0, -normal);

        let t = intersect(tri, &ray).unwrap();
        assert!((t - 4.0).abs() < 1e-4);

        let (position, shading_normal) = surface_at(tri, &ray, t);
        assert!((position - centroid).length() < 1e-4);
        assert!((shading_normal - normal).length() < 1e-5);
    }

    #[test]
    fn test_triangle_hit_from_behind() {
        let tri = xy_triangle(0.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);

        let t = intersect(tri, &ray).unwrap();
        assert!((t - 2.0).abs() < 1e-5);

        // Shading normal is fixed by winding, not by the ray
        let (_, normal) = surface_at(tri, &ray, t);
        assert_eq!(normal, Vec3::Z);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = xy_triangle(-1.0);

        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(intersect(tri, &ray).is_none());

        // Outside the projected extent
        for origin in [
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(0.0, -1.5, 1.0),
            Vec3::new(0.9, 0.9, 1.0),
            Vec3::new(-0.9, 0.9, 1.0),
        ] {
            let ray = Ray::new(origin, Vec3::NEG_Z);
            assert!(intersect(tri, &ray).is_none(), "origin {origin:?}");
        }
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        let tri = xy_triangle(0.0);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);

        assert!(intersect(tri, &ray).is_none());
    }

    #[test]
    fn test_degenerate_triangle_misses() {
        let collinear = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let ray = Ray::new(Vec3::new(0.5, 0.0, 1.0), Vec3::NEG_Z);
        assert!(intersect(collinear, &ray).is_none());

        let point = [Vec3::ONE; 3];
        assert!(intersect(point, &ray).is_none());
    }

    #[test]
    fn test_triangle_near_origin_rejected() {
        let tri = xy_triangle(0.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(intersect(tri, &ray).is_none());
    }
}
