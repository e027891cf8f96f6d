use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// Stored as its two extreme corners. A box built from points or from the
/// union of boxes always satisfies `min <= max` per axis; [`Aabb::EMPTY`] is
/// inverted on purpose so that it acts as the identity for [`Aabb::union`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two corner points.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a degenerate AABB holding a single point.
    pub fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box enclosing all given points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(Aabb::EMPTY, |acc, p| acc.union_point(p))
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the box to include a point.
    pub fn union_point(&self, p: Vec3) -> Aabb {
        Aabb {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Overlap of two boxes.
    ///
    /// Built with the two-point form, so disjoint boxes produce the box spanned
    /// by the facing corners rather than an empty one.
    pub fn intersect(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Inclusive point-in-box test.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Corner by index: 0 is `min`, anything else is `max`.
    pub fn corner(&self, i: usize) -> Vec3 {
        if i == 0 {
            self.min
        } else {
            self.max
        }
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    pub fn diagonal(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    ///
    /// Ties prefer X over Y over Z.
    pub fn max_extent(&self) -> usize {
        let d = self.diagonal();
        if d.x >= d.y && d.x >= d.z {
            0
        } else if d.y >= d.z {
            1
        } else {
            2
        }
    }

    pub fn surface_area(&self) -> f32 {
        let d = self.diagonal();
        2.0 * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        0.5 * self.min + 0.5 * self.max
    }

    /// Entry and exit distances of a ray through the box slabs.
    ///
    /// `inv_dir` and `dir_is_neg` come from [`Ray::inverse_direction`] and
    /// [`Ray::direction_is_negative`] so they can be computed once per ray.
    /// An axis whose direction component is zero adds no constraint, which
    /// means a ray parallel to a slab is never rejected by that slab.
    pub fn slab_interval(&self, ray: &Ray, inv_dir: Vec3, dir_is_neg: [bool; 3]) -> Interval {
        let mut span = Interval::UNIVERSE;

        for axis in 0..3 {
            if inv_dir[axis] == 0.0 {
                continue;
            }

            let mut near = (self.min[axis] - ray.origin[axis]) * inv_dir[axis];
            let mut far = (self.max[axis] - ray.origin[axis]) * inv_dir[axis];
            if dir_is_neg[axis] {
                std::mem::swap(&mut near, &mut far);
            }

            span.min = span.min.max(near);
            span.max = span.max.min(far);
        }

        span
    }

    /// Slab test: true if the ray enters the box at or ahead of its origin.
    #[inline]
    pub fn hit(&self, ray: &Ray, inv_dir: Vec3, dir_is_neg: [bool; 3]) -> bool {
        let span = self.slab_interval(ray, inv_dir, dir_is_neg);
        !span.is_empty() && span.max >= 0.0
    }

    /// An empty AABB (contains nothing); identity element for union.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    fn slab_hit(aabb: &Aabb, ray: &Ray) -> bool {
        aabb.hit(ray, ray.inverse_direction(), ray.direction_is_negative())
    }

    #[test]
    fn test_aabb_two_point_form() {
        let aabb = Aabb::new(Vec3::new(10.0, 0.0, 3.0), Vec3::new(0.0, 10.0, -3.0));

        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 10.0, 3.0));
    }

    #[test]
    fn test_aabb_union() {
        let box1 = Aabb::new(Vec3::ZERO, Vec3::splat(5.0));
        let box2 = Aabb::new(Vec3::splat(3.0), Vec3::splat(10.0));
        let union = box1.union(&box2);

        assert_eq!(union.min, Vec3::ZERO);
        assert_eq!(union.max, Vec3::splat(10.0));
        assert_eq!(Aabb::EMPTY.union(&box1), box1);
    }

    #[test]
    fn test_aabb_union_point() {
        let aabb = Aabb::from_point(Vec3::ONE).union_point(Vec3::new(-1.0, 2.0, 0.0));

        assert_eq!(aabb.min, Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_aabb_intersect() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(4.0));
        let b = Aabb::new(Vec3::splat(2.0), Vec3::splat(6.0));

        assert_eq!(a.intersect(&b), Aabb::new(Vec3::splat(2.0), Vec3::splat(4.0)));
    }

    #[test]
    fn test_aabb_contains() {
        let aabb = unit_box();
        assert!(aabb.contains(Vec3::ZERO));
        assert!(aabb.contains(Vec3::splat(1.0)));
        assert!(!aabb.contains(Vec3::new(0.0, 1.5, 0.0)));
    }

    #[test]
    fn test_aabb_derived_quantities() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(aabb.diagonal(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.surface_area(), 22.0);
        assert_eq!(aabb.centroid(), Vec3::new(0.5, 1.0, 1.5));
        assert_eq!(aabb.corner(0), aabb.min);
        assert_eq!(aabb.corner(1), aabb.max);
    }

    #[test]
    fn test_aabb_max_extent() {
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0)).max_extent(), 0);
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0)).max_extent(), 1);
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0)).max_extent(), 2);

        // Ties prefer X, then Y
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(5.0, 5.0, 1.0)).max_extent(), 0);
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(5.0, 1.0, 5.0)).max_extent(), 0);
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 5.0, 5.0)).max_extent(), 1);
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::splat(3.0)).max_extent(), 0);
        assert_eq!(Aabb::from_point(Vec3::ONE).max_extent(), 0);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = unit_box();

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(slab_hit(&aabb, &ray));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!slab_hit(&aabb, &ray));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, -5.0), Vec3::new(0.1, 0.1, 1.0));
        assert!(!slab_hit(&aabb, &ray));

        // Diagonal ray through a corner region
        let ray = Ray::new(Vec3::splat(-3.0), Vec3::ONE);
        assert!(slab_hit(&aabb, &ray));
    }

    #[test]
    fn test_aabb_hit_axis_parallel_is_unconstrained() {
        let aabb = unit_box();

        // Travels along Z, far outside the X slab. The zero X and Y components
        // impose no constraint, so this still reports a hit.
        let ray = Ray::new(Vec3::new(10.0, 0.0, -5.0), Vec3::Z);
        assert!(slab_hit(&aabb, &ray));

        // Zero direction: every slab is skipped.
        let ray = Ray::new(Vec3::splat(50.0), Vec3::ZERO);
        assert!(slab_hit(&aabb, &ray));
    }

    #[test]
    fn test_aabb_slab_interval_distances() {
        let aabb = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.1, 0.1, 1.0));
        let span = aabb.slab_interval(&ray, ray.inverse_direction(), ray.direction_is_negative());

        assert!((span.min - 4.0).abs() < 1e-5);
        assert!((span.max - 6.0).abs() < 1e-5);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.1, -0.1, -1.0));
        let span = aabb.slab_interval(&ray, ray.inverse_direction(), ray.direction_is_negative());

        assert!((span.min - 4.0).abs() < 1e-5);
        assert!((span.max - 6.0).abs() < 1e-5);
    }

    fn vec3_strategy() -> impl Strategy<Value = Vec3> {
        prop::array::uniform3(-100.0f32..100.0).prop_map(Vec3::from_array)
    }

    fn aabb_strategy() -> impl Strategy<Value = Aabb> {
        (vec3_strategy(), vec3_strategy()).prop_map(|(a, b)| Aabb::new(a, b))
    }

    proptest! {
        #[test]
        fn union_is_commutative(a in aabb_strategy(), b in aabb_strategy()) {
            prop_assert_eq!(a.union(&b), b.union(&a));
        }

        #[test]
        fn union_is_associative(a in aabb_strategy(), b in aabb_strategy(), c in aabb_strategy()) {
            prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        }

        #[test]
        fn union_is_idempotent(a in aabb_strategy()) {
            prop_assert_eq!(a.union(&a), a);
        }

        #[test]
        fn union_contains_all_corners(a in aabb_strategy(), b in aabb_strategy()) {
            let u = a.union(&b);
            for corner in a.corners().into_iter().chain(b.corners()) {
                prop_assert!(u.contains(corner));
            }
        }

        #[test]
        fn ray_from_inside_always_hits(
            (lo, size) in (vec3_strategy(), prop::array::uniform3(1.0f32..50.0)),
            frac in prop::array::uniform3(0.05f32..0.95),
            dir in vec3_strategy(),
        ) {
            let size = Vec3::from_array(size);
            let aabb = Aabb::new(lo, lo + size);
            let origin = lo + size * Vec3::from_array(frac);
            let ray = Ray::new(origin, dir);

            let span = aabb.slab_interval(&ray, ray.inverse_direction(), ray.direction_is_negative());
            prop_assert!(span.min <= 0.0 && 0.0 <= span.max, "{:?}", span);
            prop_assert!(slab_hit(&aabb, &ray));
        }
    }
}
