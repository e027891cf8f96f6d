//! High-level scene loading.
//!
//! Entry points for reading a scene description from disk or from a string.

use std::path::Path;

use thiserror::Error;

use crate::parser::{parse_scene, ParseError};
use crate::scene::Scene;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene description file.
///
/// # Example
///
/// ```ignore
/// use glint_core::load_scene;
///
/// let scene = load_scene("scenes/cornell.test")?;
/// println!("{} primitives", scene.primitive_count());
/// ```
pub fn load_scene(path: impl AsRef<Path>) -> LoadResult<Scene> {
    let path = path.as_ref();
    log::info!("Loading scene: {}", path.display());

    let content = std::fs::read_to_string(path)?;
    load_scene_from_string(&content)
}

/// Load a scene from an in-memory description.
pub fn load_scene_from_string(content: &str) -> LoadResult<Scene> {
    let scene = parse_scene(content)?;

    log::info!(
        "Loaded scene: {} primitives, {} lights, {} vertices, {}x{}, max depth {}",
        scene.primitive_count(),
        scene.lights.len(),
        scene.vertices.len(),
        scene.width,
        scene.height,
        scene.max_depth
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_scene_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "size 32 16").unwrap();
        writeln!(file, "sphere 0 0 0 1").unwrap();
        file.flush().unwrap();

        let scene = load_scene(file.path()).unwrap();
        assert_eq!((scene.width, scene.height), (32, 16));
        assert_eq!(scene.primitive_count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scene(dir.path().join("missing.test")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_load_parse_error() {
        let err = load_scene_from_string("sphere 0 0").unwrap_err();
        assert!(matches!(err, LoadError::Parse(ParseError::MissingArguments { .. })));
        assert!(err.to_string().starts_with("Parse error: Line 1"));
    }
}
