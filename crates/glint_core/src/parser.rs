//! Scene description file parser.
//!
//! The format is line oriented: one command per line followed by
//! whitespace-separated arguments. Blank lines and lines starting with `#`
//! are ignored.
//!
//! # Supported Commands
//!
//! - `size w h`, `camera ex ey ez cx cy cz ux uy uz fovy`, `output file`, `maxdepth n`
//! - `directional x y z r g b`, `point x y z r g b`, `attenuation c l q`
//! - `ambient r g b`, `diffuse r g b`, `specular r g b`, `emission r g b`, `shininess s`
//! - `vertex x y z`, `tri i j k`, `sphere x y z r`
//! - `translate x y z`, `scale x y z`, `rotate ax ay az degrees`
//! - `pushTransform`, `popTransform`
//! - `maxverts n`, `maxvertnorms n` (accepted, ignored)
//!
//! Geometry picks up the material state and the top of the transform stack
//! current at the line where it is declared. Transform commands right-multiply
//! the top of the stack, so the last transform written is applied first.

use std::path::PathBuf;

use glint_math::{orthogonal_up, rotation_degrees, Mat4, Vec3};
use thiserror::Error;

use crate::scene::{Attenuation, CameraSettings, Color, Light, Material, Primitive, Scene};

/// Errors that can occur while parsing a scene description.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Line {line}: '{command}' expects {expected} argument(s), found {found}")]
    MissingArguments {
        line: usize,
        command: String,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("Line {line}: invalid vertex index '{token}'")]
    InvalidIndex { line: usize, token: String },

    #[error("Line {line}: vertex index {index} out of range ({count} vertices defined)")]
    VertexIndexOutOfRange {
        line: usize,
        index: usize,
        count: usize,
    },

    #[error("Line {0}: popTransform without a matching pushTransform")]
    UnbalancedPop(usize),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Scene file parser.
///
/// Holds the state that commands accumulate: the scene under construction,
/// the transform stack and the current material.
pub struct SceneParser {
    scene: Scene,
    transforms: Vec<Mat4>,
    material: Material,
    current_line: usize,
}

impl Default for SceneParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneParser {
    pub fn new() -> Self {
        Self {
            scene: Scene::default(),
            transforms: vec![Mat4::IDENTITY],
            material: Material::default(),
            current_line: 0,
        }
    }

    /// Parse the whole document and return the finished scene.
    pub fn parse(mut self, content: &str) -> ParseResult<Scene> {
        for (index, line) in content.lines().enumerate() {
            self.current_line = index + 1;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            if let Some(command) = tokens.next() {
                let args: Vec<&str> = tokens.collect();
                self.apply(command, &args)?;
            }
        }

        self.scene.max_depth = self.scene.max_depth.max(1);
        if self.transforms.len() > 1 {
            log::warn!(
                "{} pushTransform(s) left unmatched at end of file",
                self.transforms.len() - 1
            );
        }

        log::debug!(
            "Parsed scene: {} primitives, {} lights, {} vertices",
            self.scene.primitives.len(),
            self.scene.lights.len(),
            self.scene.vertices.len()
        );

        Ok(self.scene)
    }

    fn apply(&mut self, command: &str, args: &[&str]) -> ParseResult<()> {
        match command {
            "size" => {
                let [w, h] = self.floats::<2>(command, args)?;
                self.scene.width = w as u32;
                self.scene.height = h as u32;
            }
            "camera" => {
                let v = self.floats::<10>(command, args)?;
                let eye = Vec3::new(v[0], v[1], v[2]);
                let center = Vec3::new(v[3], v[4], v[5]);
                let up = Vec3::new(v[6], v[7], v[8]).normalize_or_zero();
                self.scene.camera = CameraSettings {
                    eye,
                    center,
                    up: orthogonal_up(up, center - eye),
                    fovy: v[9],
                };
            }
            "output" => {
                let file = args.first().ok_or_else(|| self.missing(command, 1, 0))?;
                self.scene.output = PathBuf::from(file);
            }
            "maxdepth" => {
                let [depth] = self.floats::<1>(command, args)?;
                self.scene.max_depth = depth as u32;
            }
            "directional" | "point" => {
                let [x, y, z, r, g, b] = self.floats::<6>(command, args)?;
                let color = Color::new(r, g, b);
                let light = if command == "directional" {
                    Light::directional(Vec3::new(x, y, z), color)
                } else {
                    Light::point(Vec3::new(x, y, z), color)
                };
                self.scene.add_light(light);
            }
            "attenuation" => {
                let [c, l, q] = self.floats::<3>(command, args)?;
                self.scene.attenuation = Attenuation::new(c, l, q);
            }
            "ambient" => self.material.ambient = self.color(command, args)?,
            "diffuse" => self.material.diffuse = self.color(command, args)?,
            "specular" => self.material.specular = self.color(command, args)?,
            "emission" => self.material.emission = self.color(command, args)?,
            "shininess" => {
                let [s] = self.floats::<1>(command, args)?;
                self.material.shininess = s;
            }
            "vertex" => {
                let [x, y, z] = self.floats::<3>(command, args)?;
                self.scene.add_vertex(Vec3::new(x, y, z));
            }
            "tri" => {
                let indices = self.indices(command, args)?;
                let primitive = Primitive::triangle(indices, self.top(), self.material);
                self.scene.add_primitive(primitive);
            }
            "sphere" => {
                let [x, y, z, radius] = self.floats::<4>(command, args)?;
                let primitive =
                    Primitive::sphere(Vec3::new(x, y, z), radius, self.top(), self.material);
                self.scene.add_primitive(primitive);
            }
            "translate" => {
                let [x, y, z] = self.floats::<3>(command, args)?;
                self.right_multiply(Mat4::from_translation(Vec3::new(x, y, z)));
            }
            "scale" => {
                let [x, y, z] = self.floats::<3>(command, args)?;
                self.right_multiply(Mat4::from_scale(Vec3::new(x, y, z)));
            }
            "rotate" => {
                let [x, y, z, degrees] = self.floats::<4>(command, args)?;
                self.right_multiply(rotation_degrees(Vec3::new(x, y, z), degrees));
            }
            "pushTransform" => {
                let top = self.top();
                self.transforms.push(top);
            }
            "popTransform" => {
                if self.transforms.len() <= 1 {
                    return Err(ParseError::UnbalancedPop(self.current_line));
                }
                self.transforms.pop();
            }
            "maxverts" | "maxvertnorms" => {}
            _ => log::warn!(
                "Line {}: unknown command '{}', skipping",
                self.current_line,
                command
            ),
        }
        Ok(())
    }

    fn top(&self) -> Mat4 {
        self.transforms.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    fn right_multiply(&mut self, m: Mat4) {
        if let Some(top) = self.transforms.last_mut() {
            *top *= m;
        }
    }

    fn missing(&self, command: &str, expected: usize, found: usize) -> ParseError {
        ParseError::MissingArguments {
            line: self.current_line,
            command: command.to_string(),
            expected,
            found,
        }
    }

    /// Parse exactly `N` leading float arguments. Extra arguments are ignored.
    fn floats<const N: usize>(&self, command: &str, args: &[&str]) -> ParseResult<[f32; N]> {
        if args.len() < N {
            return Err(self.missing(command, N, args.len()));
        }
        if args.len() > N {
            log::warn!(
                "Line {}: ignoring {} extra argument(s) to '{}'",
                self.current_line,
                args.len() - N,
                command
            );
        }

        let mut values = [0.0; N];
        for (value, token) in values.iter_mut().zip(args) {
            *value = token.parse().map_err(|_| ParseError::InvalidNumber {
                line: self.current_line,
                token: token.to_string(),
            })?;
        }
        Ok(values)
    }

    fn color(&self, command: &str, args: &[&str]) -> ParseResult<Color> {
        let [r, g, b] = self.floats::<3>(command, args)?;
        Ok(Color::new(r, g, b))
    }

    /// Triangle corner indices; each must name an already declared vertex.
    ///
    /// Indices may be written as numbers with a fraction (`0.0`); the
    /// fraction is truncated. Negative or non-finite values are rejected.
    fn indices(&self, command: &str, args: &[&str]) -> ParseResult<[usize; 3]> {
        if args.len() < 3 {
            return Err(self.missing(command, 3, args.len()));
        }

        let count = self.scene.vertices.len();
        let mut indices = [0; 3];
        for (index, token) in indices.iter_mut().zip(args) {
            let invalid = || ParseError::InvalidIndex {
                line: self.current_line,
                token: token.to_string(),
            };
            let value: f32 = token.parse().map_err(|_| invalid())?;
            if !value.is_finite() || value < 0.0 {
                return Err(invalid());
            }
            *index = value as usize;
            if *index >= count {
                return Err(ParseError::VertexIndexOutOfRange {
                    line: self.current_line,
                    index: *index,
                    count,
                });
            }
        }
        Ok(indices)
    }
}

/// Parse a scene description string.
pub fn parse_scene(content: &str) -> ParseResult<Scene> {
    SceneParser::new().parse(content)
}
