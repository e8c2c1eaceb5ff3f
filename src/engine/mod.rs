//! FFmpeg command construction
//!
//! Every argument vector the tool runs is built here:
//!
//! - cut:    `ffmpeg [-n] -ss S -to E -i IN [-filter_complex G] -c:v ENC -crf Q OUT`
//! - filter: `ffmpeg -i IN [-filter_complex G] -c:v ENC -crf Q OUT`
//! - concat: `ffmpeg -f concat -i MANIFEST -c copy OUT`

use std::path::Path;

use crate::domain::model::{Cut, Invocation, RunConfig};
use crate::filters::FilterChain;

/// Whether the tool may replace an existing output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Leave the decision to ffmpeg (it prompts)
    Default,
    /// Pass `-n` so an existing artifact is never clobbered
    Never,
}

/// Builds invocations from the run configuration
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    config: &'a RunConfig,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Extract `cut` from `input` into `output`, re-encoding through the filters
    pub fn cut(&self, input: &Path, cut: &Cut, output: &Path, overwrite: Overwrite) -> Invocation {
        let mut invocation = Invocation::new(&self.config.ffmpeg);
        if overwrite == Overwrite::Never {
            invocation = invocation.arg("-n");
        }
        let invocation = invocation
            .arg("-ss")
            .arg(cut.start.as_str())
            .arg("-to")
            .arg(cut.end.as_str())
            .arg("-i")
            .path_arg(input);
        self.encode_into(invocation, output)
    }

    /// Run the filters over the whole of `input`
    pub fn filter(&self, input: &Path, output: &Path) -> Invocation {
        let invocation = Invocation::new(&self.config.ffmpeg).arg("-i").path_arg(input);
        self.encode_into(invocation, output)
    }

    /// Stream-copy every file listed in `manifest` into `output`
    pub fn concat(&self, manifest: &Path, output: &Path) -> Invocation {
        Invocation::new(&self.config.ffmpeg)
            .args(["-f", "concat", "-i"])
            .path_arg(manifest)
            .args(["-c", "copy"])
            .path_arg(output)
    }

    fn encode_into(&self, invocation: Invocation, output: &Path) -> Invocation {
        invocation
            .args(FilterChain::new(&self.config.filters).to_args())
            .arg("-c:v")
            .arg(self.config.encoder.as_str())
            .arg("-crf")
            .arg(self.config.quality.to_string())
            .path_arg(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FilterFragment;
    use crate::domain::rules::parse_cut_range;

    fn args(invocation: &Invocation) -> Vec<&str> {
        invocation.args.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_cut_without_filters() {
        let config = RunConfig::new("a.mp4", "b.mp4");
        let cut = parse_cut_range("00:00:10.000-00:00:20.000").unwrap();
        let invocation =
            CommandBuilder::new(&config).cut(Path::new("a.mp4"), &cut, Path::new("b.mp4"), Overwrite::Default);
        assert_eq!(invocation.program, "ffmpeg");
        assert_eq!(
            args(&invocation),
            vec![
                "-ss", "00:00:10.000", "-to", "00:00:20.000", "-i", "a.mp4", "-c:v", "libx264", "-crf",
                "15", "b.mp4"
            ]
        );
    }

    #[test]
    fn test_cut_never_overwrite_with_filters() {
        let mut config = RunConfig::new("a.mp4", "b.mp4");
        config.filters = vec![FilterFragment::Fps(30)];
        config.encoder = "libx265".to_string();
        config.quality = 22;
        config.ffmpeg = "/usr/local/bin/ffmpeg".to_string();
        let cut = parse_cut_range("00:10.000-00:20.000").unwrap();
        let invocation = CommandBuilder::new(&config).cut(
            Path::new("a.mp4"),
            &cut,
            Path::new("b-000.mp4"),
            Overwrite::Never,
        );
        assert_eq!(invocation.program, "/usr/local/bin/ffmpeg");
        assert_eq!(
            args(&invocation),
            vec![
                "-n", "-ss", "00:10.000", "-to", "00:20.000", "-i", "a.mp4", "-filter_complex",
                "[0:v]fps=30", "-c:v", "libx265", "-crf", "22", "b-000.mp4"
            ]
        );
    }

    #[test]
    fn test_filter_only() {
        let mut config = RunConfig::new("a.mp4", "b.mp4");
        config.filters = vec![FilterFragment::Fps(24)];
        let invocation = CommandBuilder::new(&config).filter(Path::new("a.mp4"), Path::new("b.mp4"));
        assert_eq!(
            args(&invocation),
            vec!["-i", "a.mp4", "-filter_complex", "[0:v]fps=24", "-c:v", "libx264", "-crf", "15", "b.mp4"]
        );
    }

    #[test]
    fn test_concat() {
        let config = RunConfig::new("a.mp4", "b.mp4");
        let invocation = CommandBuilder::new(&config).concat(Path::new("b.clips"), Path::new("b.mp4"));
        assert_eq!(
            args(&invocation),
            vec!["-f", "concat", "-i", "b.clips", "-c", "copy", "b.mp4"]
        );
    }
}
