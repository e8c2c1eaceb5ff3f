//! Command-line argument groups

use clap::Args;

use crate::domain::model::FilterFragment;
use crate::domain::rules::{parse_crop_fragment, parse_fps, parse_zone_filter};

/// Filter fragments; the three flags may be mixed and repeated
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Crop input to a given ratio (at most 16:9)
    #[arg(short, long, value_name = "W:H", value_parser = parse_crop_fragment)]
    pub crop: Vec<FilterFragment>,

    /// Arbitrary filter on a specific zone
    #[arg(short, long, value_name = "X:Y:W:H:SPEC", value_parser = parse_zone_filter)]
    pub filter: Vec<FilterFragment>,

    /// Change the frame rate
    #[arg(short = 's', long, value_name = "FPS", value_parser = parse_fps)]
    pub fps: Vec<FilterFragment>,
}

/// Encoder settings; unset values fall back to the config file, then defaults
#[derive(Args, Debug, Clone, Default)]
pub struct EncodeArgs {
    /// Constant rate factor passed to the encoder [default: 15]
    #[arg(short, long, value_name = "CRF", env = "FFMPEG_CUT_QUALITY")]
    pub quality: Option<u32>,

    /// Video encoder; `libx265` compresses better but plays in fewer places [default: libx264]
    #[arg(short, long, env = "FFMPEG_CUT_ENCODER")]
    pub encoder: Option<String>,

    /// ffmpeg program to run [default: ffmpeg]
    #[arg(long, value_name = "PROGRAM", env = "FFMPEG_CUT_FFMPEG")]
    pub ffmpeg: Option<String>,
}
