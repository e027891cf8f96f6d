//! Glint Renderer - CPU Whitted ray tracing
//!
//! Turns a [`glint_core::Scene`] into an image:
//!
//! - **BVH**: binary tree over primitive bounds for nearest-hit queries
//! - **Intersection**: analytic ray-sphere and ray-triangle tests
//! - **Shader**: direct lighting with hard shadows and mirror reflection
//! - **Frame driver**: pinhole camera, bucketed parallel rendering, 8-bit output

mod bucket;
mod bvh;
mod camera;
mod intersection;
mod renderer;
mod shader;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::{Bvh, BvhNode, SplitMethod};
pub use camera::Camera;
pub use intersection::{Hittable, Intersection, EPSILON};
pub use renderer::{color_to_rgb, render, render_pixel, render_with, ImageBuffer, RenderConfig};
pub use shader::{Shader, BACKGROUND};

/// Re-export common math types from glint_math
pub use glint_math::{Aabb, Interval, Ray, Vec3};
