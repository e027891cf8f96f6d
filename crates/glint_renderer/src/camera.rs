//! Pinhole camera for primary ray generation.

use glint_core::{CameraSettings, Scene};
use glint_math::{Ray, Vec3};

/// Pinhole camera producing one ray through the center of each pixel.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    eye: Vec3,

    // Orthonormal basis; w points from the look-at target back to the eye
    u: Vec3,
    v: Vec3,
    w: Vec3,

    /// tan(fovy / 2)
    half_height: f32,
}

impl Camera {
    /// Create a camera looking from `eye` toward `center`.
    ///
    /// `fovy` is the vertical field of view in degrees.
    pub fn new(eye: Vec3, center: Vec3, up: Vec3, fovy: f32, width: u32, height: u32) -> Self {
        let w = (eye - center).normalize_or_zero();
        let u = up.cross(w).normalize_or_zero();
        let v = w.cross(u);

        Self {
            image_width: width,
            image_height: height,
            eye,
            u,
            v,
            w,
            half_height: (fovy.to_radians() / 2.0).tan(),
        }
    }

    pub fn from_settings(settings: &CameraSettings, width: u32, height: u32) -> Self {
        Self::new(
            settings.eye,
            settings.center,
            settings.up,
            settings.fovy,
            width,
            height,
        )
    }

    pub fn from_scene(scene: &Scene) -> Self {
        Self::from_settings(&scene.camera, scene.width, scene.height)
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Ray through the center of pixel (x, y); row 0 is the top of the image.
    pub fn ray_through_pixel(&self, x: u32, y: u32) -> Ray {
        let width = self.image_width as f32;
        let height = self.image_height as f32;

        let alpha = self.half_height * (2.0 * (x as f32 + 0.5) - width) / height;
        let beta = self.half_height * (height - 2.0 * (y as f32 + 0.5)) / height;

        let direction = (alpha * self.u + beta * self.v - self.w).normalize_or_zero();
        Ray::new(self.eye, direction)
    }
}
