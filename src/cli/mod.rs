//! CLI module for ffmpeg-cut
//!
//! This module defines the command line surface. Parsing goes through
//! [`Cli::parse_ordered`] so that crop, zone and fps filters keep the order
//! they were given in, even when the flags are interleaved.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};

use crate::domain::model::{Cut, FilterFragment};
use crate::domain::rules::parse_cut_range;

pub mod args;

pub use args::{EncodeArgs, FilterArgs};

const TEXT_FORMAT_HELP: &str = "\
If you use --text then the input file must contain instructions in the form:

    path/to/video.mkv
    HH:MM:SS.mmm-HH:MM:SS.mmm
    HH:MM:SS.mmm-HH:MM:SS.mmm

    path/to/another/video.mp4
    HH:MM:SS.mmm-HH:MM:SS.mmm
    HH:MM:SS.mmm-HH:MM:SS.mmm
    HH:MM:SS.mmm-HH:MM:SS.mmm";

/// ffmpeg wrapper
///
/// Cuts one or more time ranges out of videos, optionally cropping and
/// filtering them, and joins the pieces into a single output.
#[derive(Parser, Debug)]
#[command(name = "ffmpeg-cut")]
#[command(version)]
#[command(after_help = TEXT_FORMAT_HELP)]
pub struct Cli {
    /// Input file
    pub input: PathBuf,

    /// Output file
    pub output: PathBuf,

    /// Pair of timestamps to cut
    #[arg(value_name = "CUT", value_parser = parse_cut_range)]
    pub cuts: Vec<Cut>,

    /// Input file is an ffmpeg concat instruction file; only join it
    #[arg(
        short,
        long,
        conflicts_with_all = ["crop", "filter", "no_join", "text", "clips", "cuts"]
    )]
    pub join: bool,

    /// Only produce the intermediate clips and the concat instruction file
    #[arg(short, long)]
    pub no_join: bool,

    /// Input file is a text file with cuts
    #[arg(short, long, conflicts_with_all = ["clips", "cuts"])]
    pub text: bool,

    /// Input file is a clips file whose cuts are redone
    #[arg(short = 'l', long, conflicts_with = "cuts")]
    pub clips: bool,

    /// Print what would be run without touching anything
    #[arg(short, long)]
    pub dry_run: bool,

    /// Keep the intermediate clips
    #[arg(short = 'r', long)]
    pub dirty: bool,

    #[command(flatten)]
    pub filter_args: FilterArgs,

    #[command(flatten)]
    pub encode_args: EncodeArgs,

    /// Configuration file [default: ./ffmpeg-cut.toml when present]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, env = "FFMPEG_CUT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// All filter fragments in command-line order
    #[arg(skip)]
    pub filters: Vec<FilterFragment>,
}

impl Cli {
    /// Parse the process arguments, exiting with clap's message on error
    pub fn parse_ordered() -> Self {
        Self::try_parse_ordered_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    pub fn try_parse_ordered_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let mut cli = Self::from_arg_matches(&matches)?;
        cli.filters = ordered_filters(&matches);
        Ok(cli)
    }
}

/// Merge the crop, filter and fps values back into their command-line order
fn ordered_filters(matches: &ArgMatches) -> Vec<FilterFragment> {
    let mut indexed: Vec<(usize, FilterFragment)> = Vec::new();
    for id in ["crop", "filter", "fps"] {
        if let (Some(indices), Some(values)) =
            (matches.indices_of(id), matches.get_many::<FilterFragment>(id))
        {
            indexed.extend(indices.zip(values.cloned()));
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, fragment)| fragment).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_ordered_from(std::iter::once("ffmpeg-cut").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_cuts() {
        let cli = parse(&["a.mp4", "b.mp4", "00:10.000-00:20.000", "01:00:00.000-01:00:05.000"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("a.mp4"));
        assert_eq!(cli.output, PathBuf::from("b.mp4"));
        assert_eq!(
            cli.cuts.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["00:10.000-00:20.000", "01:00:00.000-01:00:05.000"]
        );
        assert!(cli.filters.is_empty());
    }

    #[test]
    fn test_filters_keep_command_line_order() {
        let cli = parse(&["-s", "30", "-c", "9:16", "-f", "0:0:10:10:boxblur=5", "-s", "60", "a.mp4", "b.mp4"]).unwrap();
        assert_eq!(cli.filters.len(), 4);
        assert_eq!(cli.filters[0], FilterFragment::Fps(30));
        assert!(matches!(cli.filters[1], FilterFragment::CropToRatio { width_ratio: 9, height_ratio: 16 }));
        assert!(matches!(cli.filters[2], FilterFragment::Zone { .. }));
        assert_eq!(cli.filters[3], FilterFragment::Fps(60));
    }

    #[test]
    fn test_bad_values_are_rejected_before_running() {
        assert_eq!(parse(&["-c", "21:9", "a.mp4", "b.mp4"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse(&["a.mp4", "b.mp4", "10-20"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse(&["-s", "0", "a.mp4", "b.mp4"]).unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_conflicting_modes() {
        let conflicts = [
            vec!["-j", "-c", "9:16", "a.clips", "b.mp4"],
            vec!["-j", "-n", "a.clips", "b.mp4"],
            vec!["-j", "-t", "a.clips", "b.mp4"],
            vec!["-j", "a.clips", "b.mp4", "00:10.000-00:20.000"],
            vec!["-t", "-l", "a.txt", "b.mp4"],
            vec!["-t", "a.txt", "b.mp4", "00:10.000-00:20.000"],
        ];
        for args in conflicts {
            assert_eq!(parse(&args).unwrap_err().kind(), ErrorKind::ArgumentConflict, "{:?}", args);
        }
    }

    #[test]
    fn test_mode_flags() {
        let cli = parse(&["-j", "-d", "-q", "20", "a.clips", "b.mp4"]).unwrap();
        assert!(cli.join && cli.dry_run);
        assert_eq!(cli.encode_args.quality, Some(20));

        let cli = parse(&["--text", "--no-join", "--dirty", "-e", "libx265", "list.txt", "b.mp4"]).unwrap();
        assert!(cli.text && cli.no_join && cli.dirty);
        assert_eq!(cli.encode_args.encoder.as_deref(), Some("libx265"));
    }
}
