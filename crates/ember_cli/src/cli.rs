use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels usable with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
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

/// Command line arguments using clap derive macros
///
/// The frame is always `IMAGE_WIDTH` x `IMAGE_HEIGHT`: every built-in scene
/// bakes that aspect ratio into its camera, so resizing the accumulator
/// without re-deriving the cameras would distort the image.
#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "A progressive CPU path tracer")]
pub struct Args {
    /// Scene to render (see --list-scenes)
    #[arg(long, default_value = "random_spheres")]
    pub scene: String,

    /// Print the available scene names and exit
    #[arg(long)]
    pub list_scenes: bool,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = ember_renderer::DEFAULT_SAMPLES, help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Number of worker threads (defaults to the available parallelism)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Gamma applied when resolving the image
    #[arg(long, default_value_t = 2.0)]
    pub gamma: f32,

    /// Output file path (8-bit PNG with gamma correction)
    #[arg(short, long, default_value = "output.png", help = "Output file path")]
    pub output: String,
}
