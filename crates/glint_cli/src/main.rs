//! Glint - render a scene description file to an image.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use glint_renderer::{RenderConfig, SplitMethod, DEFAULT_BUCKET_SIZE};

/// Parsed command line for a render.
#[derive(Debug, Clone, PartialEq)]
struct RenderArgs {
    scene: PathBuf,
    /// Overrides the scene file's `output` command
    output: Option<PathBuf>,
    bucket_size: u32,
    parallel: bool,
    split_method: SplitMethod,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Render(RenderArgs),
    Help,
}

fn print_help() {
    println!("glint - Whitted ray tracer");
    println!();
    println!("Usage: glint <scene-file> [options]");
    println!();
    println!("Options:");
    println!("  -o, --output <path>    Image file to write (overrides the scene)");
    println!("  --bucket-size <n>      Tile edge length in pixels (default {DEFAULT_BUCKET_SIZE})");
    println!("  --sequential           Render on the calling thread only");
    println!("  --sah                  Request SAH BVH splits (falls back to object median)");
    println!("  -h, --help             Show this help");
    println!();
    println!("Set RUST_LOG=debug for more detail.");
}

/// Parse everything after the program name.
fn parse_args(args: &[String]) -> Result<Command> {
    let mut scene = None;
    let mut output = None;
    let mut bucket_size = DEFAULT_BUCKET_SIZE;
    let mut parallel = true;
    let mut split_method = SplitMethod::ObjectMedian;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-o" | "--output" => {
                let path = iter.next().context("missing value for --output")?;
                output = Some(PathBuf::from(path));
            }
            "--bucket-size" => {
                let value = iter.next().context("missing value for --bucket-size")?;
                bucket_size = value
                    .parse()
                    .with_context(|| format!("invalid bucket size '{value}'"))?;
                if bucket_size == 0 {
                    bail!("bucket size must be at least 1");
                }
            }
            "--sequential" => parallel = false,
            "--sah" => split_method = SplitMethod::Sah,
            flag if flag.starts_with('-') => bail!("unknown option '{flag}'"),
            path => {
                if scene.is_some() {
                    bail!("unexpected argument '{path}'");
                }
                scene = Some(PathBuf::from(path));
            }
        }
    }

    let Some(scene) = scene else {
        bail!("missing scene file");
    };

    Ok(Command::Render(RenderArgs {
        scene,
        output,
        bucket_size,
        parallel,
        split_method,
    }))
}

fn run(args: RenderArgs) -> Result<()> {
    let start = Instant::now();

    let mut scene = glint_core::load_scene(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;
    if let Some(output) = args.output {
        scene.output = output;
    }

    let config = RenderConfig {
        bucket_size: args.bucket_size,
        parallel: args.parallel,
        split_method: args.split_method,
    };
    let image = glint_renderer::render(&scene, &config);

    image
        .save(&scene.output)
        .with_context(|| format!("failed to write image {}", scene.output.display()))?;

    log::info!(
        "Saved {} ({:.2?} total)",
        scene.output.display(),
        start.elapsed()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Render(render_args) => run(render_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn render_args(list: &[&str]) -> RenderArgs {
        match parse_args(&args(list)).unwrap() {
            Command::Render(render) => render,
            Command::Help => panic!("expected a render command"),
        }
    }

    #[test]
    fn test_scene_only_uses_defaults() {
        let parsed = render_args(&["scene.test"]);
        assert_eq!(parsed.scene, PathBuf::from("scene.test"));
        assert_eq!(parsed.output, None);
        assert_eq!(parsed.bucket_size, DEFAULT_BUCKET_SIZE);
        assert!(parsed.parallel);
        assert_eq!(parsed.split_method, SplitMethod::ObjectMedian);
    }

    #[test]
    fn test_all_options() {
        let parsed = render_args(&[
            "--sequential",
            "-o",
            "out.png",
            "scene.test",
            "--bucket-size",
            "16",
            "--sah",
        ]);
        assert_eq!(parsed.output, Some(PathBuf::from("out.png")));
        assert_eq!(parsed.bucket_size, 16);
        assert!(!parsed.parallel);
        assert_eq!(parsed.split_method, SplitMethod::Sah);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(&args(&["-h"])).unwrap(), Command::Help);
        assert_eq!(parse_args(&args(&["scene.test", "--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["a.test", "b.test"])).is_err());
        assert!(parse_args(&args(&["a.test", "--bogus"])).is_err());
        assert!(parse_args(&args(&["a.test", "--output"])).is_err());
        assert!(parse_args(&args(&["a.test", "--bucket-size", "ten"])).is_err());
        assert!(parse_args(&args(&["a.test", "--bucket-size", "0"])).is_err());
    }

    #[test]
    fn test_run_writes_image() {
        let dir = tempfile::tempdir().unwrap();
        let scene_path = dir.path().join("sphere.test");
        let output = dir.path().join("sphere.png");
        std::fs::write(
            &scene_path,
            "size 24 16\ncamera 0 0 5 0 0 0 0 1 0 45\ndiffuse 0.8 0.2 0.2\nsphere 0 0 0 1\ndirectional 0 0 1 1 1 1\n",
        )
        .unwrap();

        run(RenderArgs {
            scene: scene_path,
            output: Some(output.clone()),
            bucket_size: 8,
            parallel: false,
            split_method: SplitMethod::ObjectMedian,
        })
        .unwrap();

        assert!(output.exists());
    }

    #[test]
    fn test_run_reports_missing_scene() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(RenderArgs {
            scene: dir.path().join("missing.test"),
            output: None,
            bucket_size: 8,
            parallel: false,
            split_method: SplitMethod::ObjectMedian,
        })
        .unwrap_err();

        assert!(err.to_string().starts_with("failed to load scene"));
    }
}
