//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over the scene's primitives with exactly one primitive per
//! leaf. Built once per render and immutable afterwards; nodes borrow the
//! primitives from the [`Scene`] instead of owning them.

use std::time::Instant;

use glint_core::{Primitive, Scene};
use glint_math::{Aabb, Ray, Vec3};

use crate::intersection::{Hittable, Intersection};

/// Strategy used to partition primitives at interior nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitMethod {
    /// Sort by centroid along the widest axis and split at the median.
    #[default]
    ObjectMedian,
    /// Surface area heuristic. Not implemented; builds fall back to
    /// `ObjectMedian`.
    Sah,
}

/// BVH node - either an interior node with two children or a single-primitive leaf.
#[derive(Debug)]
pub enum BvhNode<'a> {
    Interior {
        left: Box<BvhNode<'a>>,
        right: Box<BvhNode<'a>>,
        /// Union of both children's bounds
        bbox: Aabb,
        /// Axis the primitives were sorted along (0 = X, 1 = Y, 2 = Z)
        split_axis: usize,
    },
    Leaf {
        primitive: &'a Primitive,
        bbox: Aabb,
    },
}

/// Primitive plus the values the build sorts and bounds by.
#[derive(Clone, Copy)]
struct BuildItem<'a> {
    primitive: &'a Primitive,
    bbox: Aabb,
    centroid: Vec3,
}

impl<'a> BvhNode<'a> {
    /// Recursive object-median build. `items` must not be empty.
    fn build(items: &mut [BuildItem<'a>]) -> Self {
        match items.len() {
            1 => Self::leaf(&items[0]),
            2 => {
                let left = Self::leaf(&items[0]);
                let right = Self::leaf(&items[1]);
                Self::interior(left, right, 0)
            }
            _ => {
                let centroid_bounds = items
                    .iter()
                    .fold(Aabb::EMPTY, |acc, item| acc.union_point(item.centroid));
                let axis = centroid_bounds.max_extent();

                items.sort_unstable_by(|a, b| a.centroid[axis].total_cmp(&b.centroid[axis]));

                let mid = items.len() / 2;
                let (lower, upper) = items.split_at_mut(mid);
                let left = Self::build(lower);
                let right = Self::build(upper);
                Self::interior(left, right, axis)
            }
        }
    }

    fn leaf(item: &BuildItem<'a>) -> Self {
        BvhNode::Leaf {
            primitive: item.primitive,
            bbox: item.bbox,
        }
    }

    fn interior(left: Self, right: Self, split_axis: usize) -> Self {
        let bbox = left.bounds().union(&right.bounds());
        BvhNode::Interior {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
            split_axis,
        }
    }

    /// Bounding box of everything below this node.
    pub fn bounds(&self) -> Aabb {
        match self {
            BvhNode::Interior { bbox, .. } | BvhNode::Leaf { bbox, .. } => *bbox,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }

    /// Total number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        match self {
            BvhNode::Interior { left, right, .. } => 1 + left.node_count() + right.node_count(),
            BvhNode::Leaf { .. } => 1,
        }
    }

    /// Number of levels in this subtree; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Interior { left, right, .. } => 1 + left.depth().max(right.depth()),
            BvhNode::Leaf { .. } => 1,
        }
    }

    fn intersect(
        &self,
        ray: &Ray,
        inv_dir: Vec3,
        dir_is_neg: [bool; 3],
        vertices: &[Vec3],
    ) -> Intersection<'a> {
        if !self.bounds().hit(ray, inv_dir, dir_is_neg) {
            return Intersection::miss();
        }

        match self {
            BvhNode::Leaf { primitive, .. } => Hittable::nearest_hit(*primitive, ray, vertices),
            BvhNode::Interior { left, right, .. } => {
                // Both children are always visited; the nearer hit wins
                let left_hit = left.intersect(ray, inv_dir, dir_is_neg, vertices);
                let right_hit = right.intersect(ray, inv_dir, dir_is_neg, vertices);
                left_hit.closer(right_hit)
            }
        }
    }
}

/// BVH over a scene's primitives.
#[derive(Debug)]
pub struct Bvh<'a> {
    root: Option<BvhNode<'a>>,
    vertices: &'a [Vec3],
    primitive_count: usize,
    node_count: usize,
}

impl<'a> Bvh<'a> {
    /// Build with the default split method.
    pub fn new(scene: &'a Scene) -> Self {
        Self::from_scene(scene, SplitMethod::default())
    }

    pub fn from_scene(scene: &'a Scene, split_method: SplitMethod) -> Self {
        Self::build(&scene.primitives, &scene.vertices, split_method)
    }

    /// Build over `primitives`, whose triangles index into `vertices`.
    ///
    /// An empty primitive list yields an empty tree that misses every ray.
    pub fn build(primitives: &'a [Primitive], vertices: &'a [Vec3], split_method: SplitMethod) -> Self {
        let start = Instant::now();

        if split_method == SplitMethod::Sah {
            log::warn!("SAH split is not implemented, using object median");
        }

        let mut items: Vec<BuildItem<'a>> = primitives
            .iter()
            .map(|primitive| {
                let bbox = primitive.bounding_box(vertices);
                BuildItem {
                    primitive,
                    bbox,
                    centroid: bbox.centroid(),
                }
            })
            .collect();

        let root = (!items.is_empty()).then(|| BvhNode::build(&mut items));
        let node_count = root.as_ref().map_or(0, BvhNode::node_count);

        log::info!(
            "Built BVH: {} primitives, {} nodes in {:.2?}",
            primitives.len(),
            node_count,
            start.elapsed()
        );

        Self {
            root,
            vertices,
            primitive_count: primitives.len(),
            node_count,
        }
    }

    /// Nearest hit along `ray`, or a miss.
    pub fn intersect(&self, ray: &Ray) -> Intersection<'a> {
        let Some(root) = &self.root else {
            return Intersection::miss();
        };

        let inv_dir = ray.inverse_direction();
        let dir_is_neg = ray.direction_is_negative();
        root.intersect(ray, inv_dir, dir_is_neg, self.vertices)
    }

    pub fn root(&self) -> Option<&BvhNode<'a>> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Bounds of the whole tree; `Aabb::EMPTY` for an empty tree.
    pub fn bounds(&self) -> Aabb {
        self.root.as_ref().map_or(Aabb::EMPTY, BvhNode::bounds)
    }

    pub fn primitive_count(&self) -> usize {
        self.primitive_count
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, BvhNode::depth)
    }
}
