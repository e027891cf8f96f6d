//! Recursive Whitted-style shading.
//!
//! Direct lighting from every light with hard shadows, plus a mirror
//! reflection weighted by the specular color. Recursion stops at the scene's
//! `max_depth`.

use glint_core::{Color, Light, Material, Scene};
use glint_math::{Ray, Vec3};

use crate::bvh::Bvh;
use crate::intersection::Intersection;

/// Color returned for rays that leave the scene.
pub const BACKGROUND: Color = Color::ZERO;

/// Maps rays to radiance for one scene.
pub struct Shader<'a> {
    scene: &'a Scene,
    bvh: Bvh<'a>,
}

impl<'a> Shader<'a> {
    pub fn new(scene: &'a Scene, bvh: Bvh<'a>) -> Self {
        Self { scene, bvh }
    }

    /// Build the BVH with the default split method and wrap it.
    pub fn from_scene(scene: &'a Scene) -> Self {
        Self::new(scene, Bvh::new(scene))
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    pub fn bvh(&self) -> &Bvh<'a> {
        &self.bvh
    }

    /// Radiance along a primary ray.
    pub fn trace(&self, ray: &Ray) -> Color {
        self.shade(ray, 0)
    }

    /// Radiance along `ray` at recursion level `depth`.
    ///
    /// The result is not clamped; the frame driver clamps to [0, 1].
    pub fn shade(&self, ray: &Ray, depth: u32) -> Color {
        if depth >= self.scene.max_depth {
            return Color::ZERO;
        }

        let hit = self.bvh.intersect(ray);
        let Some(primitive) = hit.primitive.filter(|_| hit.is_hit()) else {
            return BACKGROUND;
        };
        let material = &primitive.material;

        let view = ray.direction.normalize_or_zero();
        let mut color = material.emission + material.ambient;

        for light in &self.scene.lights {
            color += self.direct_light(light, &hit, view, material);
        }

        if material.specular != Color::ZERO {
            let reflected = (view - 2.0 * hit.normal.dot(view) * hit.normal).normalize_or_zero();
            let bounce = Ray::new(hit.position, reflected);
            color += self.shade(&bounce, depth + 1) * material.specular;
        }

        color
    }

    /// Diffuse and Blinn-Phong highlight from one light, zero when shadowed.
    fn direct_light(&self, light: &Light, hit: &Intersection<'_>, view: Vec3, material: &Material) -> Color {
        let (to_light, light_distance, attenuation) = if light.is_directional() {
            (light.position.truncate().normalize_or_zero(), None, 1.0)
        } else {
            let offset = light.position.truncate() - hit.position;
            let distance = offset.length();
            (
                offset.normalize_or_zero(),
                Some(distance),
                self.scene.attenuation.factor(distance),
            )
        };

        if self.is_occluded(hit.position, to_light, light_distance) {
            return Color::ZERO;
        }

        let n_dot_l = hit.normal.dot(to_light).max(0.0);
        let half = (to_light - view).normalize_or_zero();
        let n_dot_h = hit.normal.dot(half).max(0.0);

        let diffuse = material.diffuse * light.color * n_dot_l;
        let specular = material.specular * light.color * n_dot_h.powf(material.shininess);

        attenuation * (diffuse + specular)
    }

    /// Shadow test from `origin` toward a light.
    ///
    /// For point lights (`light_distance` is set) only blockers closer than
    /// the light count; any hit blocks a directional light.
    fn is_occluded(&self, origin: Vec3, to_light: Vec3, light_distance: Option<f32>) -> bool {
        let blocker = self.bvh.intersect(&Ray::new(origin, to_light));
        if !blocker.is_hit() {
            return false;
        }

        match light_distance {
            Some(distance) => (blocker.position - origin).length() < distance,
            None => true,
        }
    }
}
