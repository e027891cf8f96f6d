//! Scene description types for Glint.
//!
//! A [`Scene`] is built once (usually by the scene-file loader) and is then
//! shared read-only by the BVH, the shader and the frame driver.

use std::path::PathBuf;

use glint_math::{Aabb, Mat4, Mat4Ext, Vec3, Vec4};

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Default image file written when the scene does not name one.
pub const DEFAULT_OUTPUT: &str = "RayTraceImage.png";

/// Default recursion cap for reflection rays.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Local illumination parameters of a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Light emitted by the surface itself
    pub emission: Color,
    /// Lambertian reflectance
    pub diffuse: Color,
    /// Highlight color; also weights the mirror reflection
    pub specular: Color,
    /// Flat term added regardless of lighting
    pub ambient: Color,
    /// Highlight exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            emission: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            ambient: Color::splat(0.2),
            shininess: 0.0,
        }
    }
}

/// A point or directional light.
///
/// The position is homogeneous: `w == 0` marks a directional light whose
/// `xyz` points *toward* the light, any other `w` is a point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec4,
    pub color: Color,
}

impl Light {
    pub fn directional(toward_light: Vec3, color: Color) -> Self {
        Self {
            position: toward_light.extend(0.0),
            color,
        }
    }

    pub fn point(position: Vec3, color: Color) -> Self {
        Self {
            position: position.extend(1.0),
            color,
        }
    }

    #[inline]
    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }
}

/// Distance falloff for point lights: `1 / (constant + linear*d + quadratic*d^2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// Intensity multiplier at the given distance.
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

/// Geometry of a primitive, in object space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { center: Vec3, radius: f32 },
    /// Indices into the scene's shared vertex buffer.
    Triangle { indices: [usize; 3] },
}

/// A renderable object: shape, object-to-world transform and material.
#[derive(Clone, Debug)]
pub struct Primitive {
    pub shape: Shape,
    pub transform: Mat4,
    /// Inverse of `transform`, `None` if the transform is singular.
    pub inverse_transform: Option<Mat4>,
    pub material: Material,
}

impl Primitive {
    pub fn new(shape: Shape, transform: Mat4, material: Material) -> Self {
        Self {
            shape,
            transform,
            inverse_transform: transform.try_inverse(),
            material,
        }
    }

    pub fn sphere(center: Vec3, radius: f32, transform: Mat4, material: Material) -> Self {
        Self::new(Shape::Sphere { center, radius }, transform, material)
    }

    pub fn triangle(indices: [usize; 3], transform: Mat4, material: Material) -> Self {
        Self::new(Shape::Triangle { indices }, transform, material)
    }

    /// World-space triangle corners, or `None` for spheres and for indices
    /// outside the vertex buffer.
    pub fn world_vertices(&self, vertices: &[Vec3]) -> Option<[Vec3; 3]> {
        match self.shape {
            Shape::Triangle { indices: [a, b, c] } => {
                let a = vertices.get(a)?;
                let b = vertices.get(b)?;
                let c = vertices.get(c)?;
                Some([
                    self.transform.transform_point3(*a),
                    self.transform.transform_point3(*b),
                    self.transform.transform_point3(*c),
                ])
            }
            Shape::Sphere { .. } => None,
        }
    }

    /// World-space bounding box, derived from transform and geometry on every call.
    pub fn bounding_box(&self, vertices: &[Vec3]) -> Aabb {
        match self.shape {
            Shape::Sphere { center, radius } => {
                let r = Vec3::splat(radius.max(0.0));
                self.transform
                    .transform_aabb(&Aabb::new(center - r, center + r))
            }
            Shape::Triangle { .. } => self
                .world_vertices(vertices)
                .map(Aabb::from_points)
                .unwrap_or(Aabb::EMPTY),
        }
    }
}

/// Camera placement as described by the scene file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 45.0,
        }
    }
}

/// Everything needed to render one image.
#[derive(Clone, Debug)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub camera: CameraSettings,
    pub output: PathBuf,
    /// Reflection recursion cap, at least 1
    pub max_depth: u32,
    pub attenuation: Attenuation,
    pub lights: Vec<Light>,
    pub vertices: Vec<Vec3>,
    pub primitives: Vec<Primitive>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            width: 540,
            height: 540,
            camera: CameraSettings::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            max_depth: DEFAULT_MAX_DEPTH,
            attenuation: Attenuation::default(),
            lights: Vec::new(),
            vertices: Vec::new(),
            primitives: Vec::new(),
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recursion cap. Zero is coerced to one.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, vertex: Vec3) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// World-space bounds of every primitive.
    pub fn world_bounds(&self) -> Aabb {
        self.primitives
            .iter()
            .fold(Aabb::EMPTY, |acc, p| acc.union(&p.bounding_box(&self.vertices)))
    }
}
