//! Glint Core - scene description and loading.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Primitive`, `Shape`, `Material`, `Light`
//! - **Scene files**: line-oriented scene description parsing and loading
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scene.test")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.lights.len());
//! ```

pub mod loader;
pub mod parser;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_string, LoadError, LoadResult};
pub use parser::{parse_scene, ParseError, ParseResult, SceneParser};
pub use scene::{
    Attenuation, CameraSettings, Color, Light, Material, Primitive, Scene, Shape,
    DEFAULT_MAX_DEPTH, DEFAULT_OUTPUT,
};
