use clap::Parser;
use std::path::PathBuf;

use crate::core::scroll::DEFAULT_PAGE_FACTOR;
use crate::entities::sequence::{DEFAULT_FRAME_COUNT, DEFAULT_PATTERN, MissingFramePolicy};

// Build version with decoder info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Decode: image 0.25 (webp, png, jpeg)\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Scroll-driven image sequence presentation
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Directory holding the frame images
    #[arg(value_name = "FRAMES_DIR", default_value = "sequence")]
    pub frames_dir: PathBuf,

    /// Number of frames in the sequence
    #[arg(short = 'n', long = "count", value_name = "N", default_value_t = DEFAULT_FRAME_COUNT)]
    pub count: usize,

    /// Frame file name pattern; {i} is the 0-based frame index
    #[arg(long = "pattern", value_name = "PATTERN", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Scene JSON (captions, accents, hotspots); built-in scene if omitted
    #[arg(short = 's', long = "scene", value_name = "FILE")]
    pub scene: Option<PathBuf>,

    /// Page height in viewports
    #[arg(long = "page-factor", value_name = "F", default_value_t = DEFAULT_PAGE_FACTOR)]
    pub page_factor: f32,

    /// Give up on frames still loading after this many milliseconds (0 = wait forever)
    #[arg(long = "load-timeout-ms", value_name = "MS")]
    pub load_timeout_ms: Option<u64>,

    /// What to do when frames fail to load
    #[arg(long = "on-missing", value_enum, value_name = "POLICY")]
    pub on_missing: Option<MissingFramePolicy>,

    /// Start in immersive mode
    #[arg(short = 'i', long = "immersive")]
    pub immersive: bool,

    /// Start in fullscreen mode
    #[arg(short = 'F', long = "fullscreen")]
    pub fullscreen: bool,

    /// Enable debug logging to file (default: scrollreel.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Decode worker threads (default: CPU count)
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<usize>,
}
