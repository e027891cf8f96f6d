//! Frame driver.
//!
//! Casts one camera ray per pixel, shades it and collects the clamped
//! colors into an [`ImageBuffer`]. Buckets are rendered either on the
//! rayon thread pool or sequentially; the result is the same either way.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use glint_core::{Color, Scene};
use glint_math::Interval;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::bvh::{Bvh, SplitMethod};
use crate::camera::Camera;
use crate::shader::Shader;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Edge length of a square bucket in pixels
    pub bucket_size: u32,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
    /// BVH partitioning strategy
    pub split_method: SplitMethod,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
            split_method: SplitMethod::ObjectMedian,
        }
    }
}

/// Convert a color to 8-bit RGB.
///
/// Channels are clamped to [0, 1] and truncated, so only exactly 1.0 maps
/// to 255.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (Interval::UNIT.clamp(c) * 255.0) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Shade the ray through the center of pixel (x, y).
pub fn render_pixel(camera: &Camera, shader: &Shader<'_>, x: u32, y: u32) -> Color {
    let ray = camera.ray_through_pixel(x, y);
    shader.trace(&ray)
}

/// Image buffer of clamped linear colors, row-major with row 0 at the top.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), clamping each channel to [0, 1].
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let unit = Interval::UNIT;
        let clamped = Color::new(unit.clamp(color.x), unit.clamp(color.y), unit.clamp(color.z));
        let index = self.index(x, y);
        self.pixels[index] = clamped;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        let row = bucket.width.max(1) as usize;
        for (i, color) in result.pixels.iter().enumerate() {
            let (dx, dy) = ((i % row) as u32, (i / row) as u32);
            self.set(bucket.x + dx, bucket.y + dy, *color);
        }
    }

    /// Quantize to tightly packed 8-bit RGB.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().map(|c| color_to_rgb(*c)).collect()
    }

    /// Write the image; the format is picked from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let rgb = self.to_rgb8();
        image::save_buffer(
            path,
            bytemuck::cast_slice(&rgb),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
    }
}

/// Build the BVH for `scene` and render every pixel.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let shader = Shader::new(scene, Bvh::from_scene(scene, config.split_method));
    let camera = Camera::from_scene(scene);
    render_with(&camera, &shader, config)
}

/// Render with an existing camera and shader.
pub fn render_with(camera: &Camera, shader: &Shader<'_>, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let (width, height) = (camera.image_width, camera.image_height);
    let buckets = generate_buckets(width, height, config.bucket_size);
    let total = buckets.len();

    log::info!(
        "Rendering {}x{} in {} buckets ({})",
        width,
        height,
        total,
        if config.parallel { "parallel" } else { "sequential" }
    );

    let finished = AtomicUsize::new(0);
    let progress_step = (total / 20).max(1);

    let render_one = |bucket: &Bucket| {
        let result = BucketResult::new(*bucket, render_bucket(bucket, camera, shader));

        let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
        if done % progress_step == 0 || done == total {
            log::info!("Progress: {}% ({}/{} buckets)", done * 100 / total, done, total);
        }
        result
    };

    let results: Vec<BucketResult> = if config.parallel {
        buckets.par_iter().map(render_one).collect()
    } else {
        buckets.iter().map(render_one).collect()
    };

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
