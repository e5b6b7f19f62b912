use anyhow::{Context, Result};
use clap::Parser;
use ember_renderer::{render, save, Background, RenderConfig};
use log::info;
use std::fs;
use std::path::Path;

mod cli;
mod scenes;

use cli::Args;

/// Install env_logger. An explicit level wins over `RUST_LOG`, which in turn
/// falls back to `info`.
fn init_logger(level: Option<cli::LogLevel>) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    );
    if let Some(level) = level {
        builder.filter_level(level.into());
    }
    builder.init();
}

fn load_settings(path: &Path) -> Result<RenderConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))
}

/// Settings file (if any), then command line overrides. Without a settings
/// file the scene's own background is used.
fn resolve_config(args: &Args, scene_background: Background) -> Result<RenderConfig> {
    let mut config = match &args.settings {
        Some(path) => load_settings(path)?,
        None => RenderConfig {
            background: scene_background,
            ..RenderConfig::default()
        },
    };

    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level);

    info!("Ember {}", env!("CARGO_PKG_VERSION"));

    let scene_seed = args.seed.unwrap_or_default();
    let scene = scenes::build(args.scene, args.width, args.height, &args.texture, scene_seed);
    let config = resolve_config(&args, scene.background)?;

    let image = render(&scene.camera, &scene.world, &config);

    save(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_math::Color;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ember").chain(extra.iter().copied()))
            .expect("valid flags")
    }

    #[test]
    fn test_scene_background_without_settings() {
        let config = resolve_config(&args(&[]), Background::SkyGradient).expect("no file to read");

        assert_eq!(config.background, Background::SkyGradient);
        assert_eq!(config.samples_per_pixel, 100);
        assert_eq!(config.max_depth, 50);
    }

    #[test]
    fn test_flags_override_settings_file() {
        let path = std::env::temp_dir().join(format!("ember_settings_{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{ "samples_per_pixel": 10, "max_depth": 7, "background": { "solid": [1.0, 0.0, 0.0] } }"#,
        )
        .expect("temp file is writable");

        let settings = path.to_string_lossy().into_owned();
        let config = resolve_config(
            &args(&["--settings", &settings, "--samples", "3", "--seed", "5"]),
            Background::SkyGradient,
        )
        .expect("settings parse");
        let _ = fs::remove_file(&path);

        assert_eq!(config.samples_per_pixel, 3);
        assert_eq!(config.max_depth, 7);
        assert_eq!(config.seed, 5);
        assert_eq!(config.background, Background::Solid(Color::X));
    }

    #[test]
    fn test_missing_settings_file_is_an_error() {
        let result = resolve_config(
            &args(&["--settings", "no/such/settings.json"]),
            Background::default(),
        );

        let message = format!("{:#}", result.expect_err("file is missing"));
        assert!(message.contains("Failed to read settings file"), "{message}");
    }
}
