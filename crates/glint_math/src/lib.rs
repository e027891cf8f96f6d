// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{orthogonal_up, rotation_degrees, Mat4Ext};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
    }

    #[test]
    fn test_vec4_w_marks_direction() {
        let direction = Vec4::new(0.0, 0.0, 1.0, 0.0);
        let point = Vec4::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(direction.truncate(), point.truncate());
        assert_ne!(direction.w, point.w);
    }
}
