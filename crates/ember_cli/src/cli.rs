use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneName {
    /// Ground plane covered in small random spheres plus three large ones
    RandomSpheres,
    /// Two checkered spheres
    TwoSpheres,
    /// Marble ground and sphere from Perlin turbulence
    TwoPerlinSpheres,
    /// Image-textured globe (see --texture)
    Earth,
    /// Marble spheres lit by a rectangle and a glowing sphere
    SimpleLight,
    /// Cornell box holding two fog spheres
    CornellSmoke,
}

#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "Offline CPU path tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "random-spheres")]
    pub scene: SceneName,

    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 225)]
    pub height: u32,

    /// Samples per pixel (overrides the settings file)
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounces per path (overrides the settings file)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for scene generation and sampling (overrides the settings file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with render settings
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Image used by the earth scene
    #[arg(long, default_value = "earthmap.jpg")]
    pub texture: PathBuf,

    /// Output file (.ppm, .png, or any format the image crate can encode)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Logging level; RUST_LOG is used when omitted
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["ember"]).expect("defaults parse");

        assert_eq!(args.scene, SceneName::RandomSpheres);
        assert_eq!((args.width, args.height), (400, 225));
        assert!(args.samples.is_none());
        assert_eq!(args.output, PathBuf::from("image.ppm"));
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "ember",
            "--scene",
            "cornell-smoke",
            "-s",
            "16",
            "--max-depth",
            "8",
            "--log-level",
            "debug",
            "-o",
            "out.png",
        ])
        .expect("flags parse");

        assert_eq!(args.scene, SceneName::CornellSmoke);
        assert_eq!(args.samples, Some(16));
        assert_eq!(args.max_depth, Some(8));
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
        assert_eq!(args.output, PathBuf::from("out.png"));
    }

    #[test]
    fn test_unknown_scene_is_rejected() {
        assert!(Args::try_parse_from(["ember", "--scene", "teapot"]).is_err());
    }
}
