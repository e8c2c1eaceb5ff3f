//! Filter-graph construction
//!
//! Turns the ordered filter fragments of a run into one `-filter_complex`
//! expression. Fragments are pipelined: fragment `n` reads the `[step_{n-1}]`
//! pad written by fragment `n - 1`, the first reads `[0:v]`, and the last
//! one leaves its output unlabelled so ffmpeg maps it as the primary video
//! output. Pads internal to a fragment are prefixed with `s{n}_` so that
//! repeating a fragment kind never produces duplicate labels.
//!
//! A zone fragment splits the stream it receives and overlays the filtered
//! zone back onto that same stream. It never overlays onto the raw `[0:v]`
//! input, so whatever earlier fragments produced stays in the picture and
//! the zone lands on top of it.

use crate::domain::model::FilterFragment;
use crate::domain::rules::{CROP_MAX_WIDTH, CROP_TARGET_HEIGHT};

/// Fixed source regions of the game-capture HUD recomposed by a crop
pub mod hud {
    /// (width, height, x, y)
    pub type Region = (u32, u32, u32, u32);

    pub const KILLS: Region = (225, 34, 1625, 42);
    pub const MAP: Region = (270, 270, 36, 24);
    pub const WORLD_CLOCK: Region = (255, 275, 35, 775);
}

/// Geometry of a crop-to-ratio fragment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropGeometry {
    pub width: f64,
    pub height: u32,
    pub side_crop: i64,
}

impl CropGeometry {
    pub fn for_ratio(width_ratio: u32, height_ratio: u32) -> Self {
        let height = CROP_TARGET_HEIGHT;
        let width = f64::from(height) * f64::from(width_ratio) / f64::from(height_ratio);
        // Truncated toward zero.
        let side_crop = ((f64::from(CROP_MAX_WIDTH) - width) / 2.0) as i64;
        Self {
            width,
            height,
            side_crop,
        }
    }
}

/// Builder for the `-filter_complex` stage of an invocation
#[derive(Debug, Clone, Default)]
pub struct FilterChain<'a> {
    fragments: &'a [FilterFragment],
}

impl<'a> FilterChain<'a> {
    pub fn new(fragments: &'a [FilterFragment]) -> Self {
        Self { fragments }
    }

    /// The filter graph expression, or `None` when there are no fragments
    pub fn expression(&self) -> Option<String> {
        if self.fragments.is_empty() {
            return None;
        }

        let last_step = self.fragments.len() - 1;
        let stages: Vec<String> = self
            .fragments
            .iter()
            .enumerate()
            .map(|(step, fragment)| {
                let input = if step == 0 {
                    "[0:v]".to_string()
                } else {
                    format!("[step_{}]", step - 1)
                };
                let output = if step == last_step {
                    String::new()
                } else {
                    format!("[step_{}]", step)
                };
                render_fragment(fragment, step, &input, &output)
            })
            .collect();

        Some(stages.join(";"))
    }

    /// `["-filter_complex", <expression>]`, or nothing at all
    pub fn to_args(&self) -> Vec<String> {
        match self.expression() {
            Some(expression) => vec!["-filter_complex".to_string(), expression],
            None => Vec::new(),
        }
    }
}

fn render_fragment(fragment: &FilterFragment, step: usize, input: &str, output: &str) -> String {
    let pad = |name: &str| format!("[s{}_{}]", step, name);

    match fragment {
        FilterFragment::CropToRatio {
            width_ratio,
            height_ratio,
        } => {
            let geometry = CropGeometry::for_ratio(*width_ratio, *height_ratio);
            let crop = |(w, h, x, y): hud::Region| format!("crop={}:{}:{}:{}", w, h, x, y);
            [
                format!("{}scale=-1:{}:flags=lanczos{}", input, geometry.height, pad("tmp1")),
                format!("{}split{}{}", pad("tmp1"), pad("a"), pad("tmp2")),
                format!("{}split{}{}", pad("tmp2"), pad("b"), pad("tmp3")),
                format!("{}split{}{}", pad("tmp3"), pad("c"), pad("d")),
                format!(
                    "{}crop={}:{}:{}:0{}",
                    pad("a"),
                    geometry.width,
                    geometry.height,
                    geometry.side_crop,
                    pad("base")
                ),
                format!("{}{}{}", pad("b"), crop(hud::KILLS), pad("kills")),
                format!("{}{}{}", pad("c"), crop(hud::MAP), pad("map")),
                format!("{}{}{}", pad("d"), crop(hud::WORLD_CLOCK), pad("wc")),
                format!("{}{}overlay=0:0{}", pad("base"), pad("map"), pad("out1")),
                format!(
                    "{}{}overlay=0:main_h-overlay_h{}",
                    pad("out1"),
                    pad("wc"),
                    pad("out2")
                ),
                format!(
                    "{}{}overlay=main_w-overlay_w:0{}",
                    pad("out2"),
                    pad("kills"),
                    output
                ),
            ]
            .join(";")
        }
        FilterFragment::Zone { x, y, w, h, spec } => [
            format!("{}split{}{}", input, pad("base"), pad("src")),
            format!("{}crop={}:{}:{}:{},{}{}", pad("src"), w, h, x, y, spec, pad("zone")),
            format!("{}{}overlay={}:{}{}", pad("base"), pad("zone"), x, y, output),
        ]
        .join(";"),
        FilterFragment::Fps(fps) => format!("{}fps={}{}", input, fps, output),
    }
}
