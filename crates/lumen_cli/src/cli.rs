use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::Acceleration;
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

/// Built-in demo scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    TwoSpheres,
    Materials,
    SimpleLight,
    CornellBox,
}

/// Acceleration structure for the scene root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccelChoice {
    List,
    Bvh,
}

impl From<AccelChoice> for Acceleration {
    fn from(choice: AccelChoice) -> Self {
        match choice {
            AccelChoice::List => Acceleration::List,
            AccelChoice::Bvh => Acceleration::Bvh,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Render a built-in scene with a CPU path tracer and write a PPM image")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneChoice::Materials)]
    pub scene: SceneChoice,

    /// JSON render settings; flags given here take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounce depth per path
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// Seed for scene building and sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Acceleration structure for the scene root
    #[arg(long, value_enum, default_value_t = AccelChoice::Bvh)]
    pub accel: AccelChoice,

    /// Render on the calling thread instead of the rayon pool
    #[arg(long)]
    pub single_thread: bool,

    /// Output PPM path
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Logging level (RUST_LOG overrides it)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

/// Initialize the logger at `level`, letting RUST_LOG override.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
