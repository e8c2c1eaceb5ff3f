//! ffmpeg-cut
//!
//! Cuts, crops, filters and joins video clips by driving ffmpeg.
//!
//! # Usage
//!
//! ```bash
//! ffmpeg-cut input.mkv out.mp4 00:28:30.550-00:28:35.718 00:28:57.711-00:29:03.068
//! ffmpeg-cut --crop 9:16 input.mkv vertical.mp4
//! ffmpeg-cut --text cuts.txt out.mp4
//! ffmpeg-cut --join out.clips joined.mp4
//! ```

use anyhow::{Context, Result};
use tracing::{error, info};

use ffmpeg_cut::adapters::toml_config::TomlConfigAdapter;
use ffmpeg_cut::adapters::tracing_log::init_logging;
use ffmpeg_cut::app::{AppContainer, DefaultAppContainer};
use ffmpeg_cut::cli::Cli;
use ffmpeg_cut::config_initialization::{build_run_config, resolve_log_level};

/// Main entry point for ffmpeg-cut
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_ordered();

    let file_config =
        TomlConfigAdapter::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    let level = resolve_log_level(&cli, &file_config).context("Invalid log level")?;
    init_logging(level, cli.log_json);

    info!("Starting ffmpeg-cut");

    let config = build_run_config(&cli, &file_config).context("Invalid configuration")?;
    let container = DefaultAppContainer::new();

    match container.run_interactor().run(&config).await {
        Ok(mode) => {
            info!("ffmpeg-cut completed successfully ({:?})", mode);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e).with_context(|| format!("Failed to produce {}", config.output.display()))
        }
    }
}
