// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use crate::utils::path::clip_path;
use crate::utils::shell;

/// Timestamp of the form `HH:MM:SS.mmm` or `MM:SS.mmm`, kept verbatim
///
/// Only constructed through [`crate::domain::rules::parse_timestamp`] or the
/// cut-range grammar, so the inner string is always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    pub(crate) fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Time range to extract from an input
///
/// `start` is expected to precede `end`, but this is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cut {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Cut {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Cut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl std::str::FromStr for Cut {
    type Err = crate::domain::errors::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::domain::rules::parse_cut_range(s)
    }
}

/// One unit of a chained video transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterFragment {
    /// Crop to `width_ratio:height_ratio` at 1080p, recomposing the HUD zones
    CropToRatio { width_ratio: u32, height_ratio: u32 },
    /// Apply `spec` to the `w`x`h` rectangle at `(x, y)` only
    Zone {
        x: i64,
        y: i64,
        w: u32,
        h: u32,
        spec: String,
    },
    /// Frame-rate conversion
    Fps(u32),
}

/// One input path plus the cuts to extract from it, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub input: PathBuf,
    pub cuts: Vec<Cut>,
}

impl Instruction {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            cuts: Vec::new(),
        }
    }

    pub fn with_cuts(input: impl Into<PathBuf>, cuts: Vec<Cut>) -> Self {
        Self {
            input: input.into(),
            cuts,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.input.display())?;
        for cut in &self.cuts {
            write!(f, " {}", cut)?;
        }
        Ok(())
    }
}

/// A produced intermediate artifact and its provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub input: PathBuf,
    pub cut: Cut,
    pub output: PathBuf,
}

/// Ordered, append-only list of the clips produced in a run
///
/// The order is the concatenation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipLedger {
    clips: Vec<Clip>,
}

impl ClipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, input: impl Into<PathBuf>, cut: Cut, output: impl Into<PathBuf>) {
        self.clips.push(Clip {
            input: input.into(),
            cut,
            output: output.into(),
        });
    }

    /// Path the next clip for `output` will be written to
    pub fn next_clip_path(&self, output: &Path) -> PathBuf {
        clip_path(output, self.clips.len())
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn outputs(&self) -> Vec<&Path> {
        self.clips.iter().map(|clip| clip.output.as_path()).collect()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// How the positional input is to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// A media file
    #[default]
    Plain,
    /// A text cut list
    Text,
    /// A clips manifest whose provenance comments are re-cut
    Clips,
    /// A clips manifest whose artifacts are only concatenated
    Join,
}

/// Run configuration, built once and passed to every component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub cuts: Vec<Cut>,
    pub filters: Vec<FilterFragment>,
    pub encoder: String,
    pub quality: u32,
    pub input_kind: InputKind,
    pub dry_run: bool,
    pub retain: bool,
    pub no_join: bool,
    pub ffmpeg: String,
}

impl RunConfig {
    pub const DEFAULT_ENCODER: &'static str = "libx264";
    pub const DEFAULT_QUALITY: u32 = 15;
    pub const DEFAULT_FFMPEG: &'static str = "ffmpeg";

    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            cuts: Vec::new(),
            filters: Vec::new(),
            encoder: Self::DEFAULT_ENCODER.to_string(),
            quality: Self::DEFAULT_QUALITY,
            input_kind: InputKind::Plain,
            dry_run: false,
            retain: false,
            no_join: false,
            ffmpeg: Self::DEFAULT_FFMPEG.to_string(),
        }
    }

    /// Whether intermediates survive finalization
    pub fn keeps_intermediates(&self) -> bool {
        self.retain || self.no_join || self.input_kind == InputKind::Join
    }
}

/// Run mode, decided once from a validated [`RunConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    DirectFilterOnly,
    SingleCut,
    MultiCutSequence,
    TextInterpreted,
    ClipsInterpreted,
    JoinOnly,
}

/// Fully formed external tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell::quote_if_needed(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell::quote_if_needed(arg))?;
        }
        Ok(())
    }
}
