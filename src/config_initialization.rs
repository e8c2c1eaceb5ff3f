//! Configuration initialization and hierarchy management
//!
//! Precedence is CLI > environment > config file > built-in defaults. Clap
//! already folds the environment into the CLI values, so this module only
//! layers the file and the defaults underneath.

use tracing::{debug, info};

use crate::adapters::toml_config::FileConfig;
use crate::adapters::tracing_log::LogLevel;
use crate::cli::Cli;
use crate::domain::errors::*;
use crate::domain::model::*;

/// Resolve the log level: CLI / `FFMPEG_CUT_LOG_LEVEL`, then file, then `info`
pub fn resolve_log_level(cli: &Cli, file: &FileConfig) -> DomainResult<LogLevel> {
    match cli.log_level.as_deref().or(file.log_level.as_deref()) {
        Some(level) => LogLevel::parse(level),
        None => Ok(LogLevel::Info),
    }
}

/// Build the run configuration for this invocation
pub fn build_run_config(cli: &Cli, file: &FileConfig) -> DomainResult<RunConfig> {
    info!("Initializing run configuration");

    let input_kind = if cli.join {
        InputKind::Join
    } else if cli.text {
        InputKind::Text
    } else if cli.clips {
        InputKind::Clips
    } else {
        InputKind::Plain
    };

    let encoder = layered(&cli.encode_args.encoder, &file.encoder, "encoder")
        .unwrap_or_else(|| RunConfig::DEFAULT_ENCODER.to_string());
    let quality = layered(&cli.encode_args.quality, &file.quality, "quality")
        .unwrap_or(RunConfig::DEFAULT_QUALITY);
    let ffmpeg = layered(&cli.encode_args.ffmpeg, &file.ffmpeg, "ffmpeg")
        .unwrap_or_else(|| RunConfig::DEFAULT_FFMPEG.to_string());

    if encoder.trim().is_empty() {
        return Err(DomainError::Config("encoder must not be empty".to_string()));
    }
    if ffmpeg.trim().is_empty() {
        return Err(DomainError::Config("ffmpeg program must not be empty".to_string()));
    }

    let config = RunConfig {
        input: cli.input.clone(),
        output: cli.output.clone(),
        cuts: cli.cuts.clone(),
        filters: cli.filters.clone(),
        encoder,
        quality,
        input_kind,
        dry_run: cli.dry_run,
        retain: cli.dirty || cli.no_join,
        no_join: cli.no_join,
        ffmpeg,
    };
    debug!("Run configuration: {:?}", config);
    Ok(config)
}

fn layered<T: Clone + std::fmt::Debug>(cli: &Option<T>, file: &Option<T>, key: &str) -> Option<T> {
    if let Some(value) = cli {
        debug!("{} = {:?} (command line or environment)", key, value);
        return Some(value.clone());
    }
    if let Some(value) = file {
        debug!("{} = {:?} (config file)", key, value);
        return Some(value.clone());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_ordered_from(std::iter::once("ffmpeg-cut").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = build_run_config(&cli(&["a.mp4", "b.mp4", "00:10.000-00:20.000"]), &FileConfig::default()).unwrap();
        assert_eq!(config.input, PathBuf::from("a.mp4"));
        assert_eq!(config.output, PathBuf::from("b.mp4"));
        assert_eq!(config.cuts.len(), 1);
        assert_eq!(config.encoder, "libx264");
        assert_eq!(config.quality, 15);
        assert_eq!(config.ffmpeg, "ffmpeg");
        assert_eq!(config.input_kind, InputKind::Plain);
        assert!(!config.retain && !config.no_join && !config.dry_run);
    }

    #[test]
    fn test_file_fills_gaps_and_cli_wins() {
        let file = FileConfig {
            encoder: Some("libx265".to_string()),
            quality: Some(28),
            ffmpeg: Some("/opt/ffmpeg".to_string()),
            log_level: None,
        };
        let config = build_run_config(&cli(&["-q", "18", "a.mp4", "b.mp4"]), &file).unwrap();
        assert_eq!(config.quality, 18);
        assert_eq!(config.encoder, "libx265");
        assert_eq!(config.ffmpeg, "/opt/ffmpeg");
    }

    #[test]
    fn test_no_join_implies_retain() {
        let config = build_run_config(&cli(&["-n", "a.mp4", "b.mp4"]), &FileConfig::default()).unwrap();
        assert!(config.no_join && config.retain);
        assert!(config.keeps_intermediates());
    }

    #[test]
    fn test_input_kinds() {
        let file = FileConfig::default();
        assert_eq!(build_run_config(&cli(&["-j", "a.clips", "b.mp4"]), &file).unwrap().input_kind, InputKind::Join);
        assert_eq!(build_run_config(&cli(&["-t", "a.txt", "b.mp4"]), &file).unwrap().input_kind, InputKind::Text);
        assert_eq!(build_run_config(&cli(&["-l", "a.clips", "b.mp4"]), &file).unwrap().input_kind, InputKind::Clips);
    }

    #[test]
    fn test_empty_encoder_is_rejected() {
        let file = FileConfig {
            encoder: Some(" ".to_string()),
            ..FileConfig::default()
        };
        assert!(matches!(
            build_run_config(&cli(&["a.mp4", "b.mp4"]), &file),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_log_level_resolution() {
        let file = FileConfig {
            log_level: Some("debug".to_string()),
            ..FileConfig::default()
        };
        assert_eq!(resolve_log_level(&cli(&["a.mp4", "b.mp4"]), &file).unwrap(), LogLevel::Debug);
        assert_eq!(
            resolve_log_level(&cli(&["--log-level", "warn", "a.mp4", "b.mp4"]), &file).unwrap(),
            LogLevel::Warn
        );
        assert_eq!(resolve_log_level(&cli(&["a.mp4", "b.mp4"]), &FileConfig::default()).unwrap(), LogLevel::Info);
        assert!(resolve_log_level(&cli(&["--log-level", "loud", "a.mp4", "b.mp4"]), &file).is_err());
    }
}
