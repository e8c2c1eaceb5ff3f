// Join interactor - Writes the manifest, concatenates clips and cleans up

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::CommandBuilder;
use crate::manifest::{self, ParsedManifest};
use crate::ports::*;
use crate::utils::path::{manifest_dir, manifest_path};

/// Interactor for the concat and cleanup use case
pub struct JoinInteractor {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    console: Arc<dyn ConsolePort>,
}

impl JoinInteractor {
    /// Create new join interactor with injected ports
    pub fn new(
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        console: Arc<dyn ConsolePort>,
    ) -> Self {
        Self {
            execute_port,
            fs_port,
            console,
        }
    }

    /// Write `<output>.clips`, concatenate into the output, then delete the clips
    ///
    /// Concatenation is skipped with `--no-join`; deletion is skipped when the
    /// configuration keeps intermediates and never happens in a dry run.
    pub async fn finalize(&self, ledger: &ClipLedger, config: &RunConfig) -> DomainResult<()> {
        let manifest_file = manifest_path(&config.output);
        let contents = manifest::render(ledger, manifest_dir(&manifest_file));

        if config.dry_run {
            self.console
                .print(&format!("would write to {}:", manifest_file.display()));
            self.console.print(&indent(&contents));
            self.console.print("would run:");
        } else {
            self.fs_port.write_text(&manifest_file, &contents).await?;
            info!(
                "Wrote {} clips to {}",
                ledger.len(),
                manifest_file.display()
            );
        }

        if config.no_join {
            info!("Not joining; clips are listed in {}", manifest_file.display());
            return Ok(());
        }

        let invocation = CommandBuilder::new(config).concat(&manifest_file, &config.output);
        self.execute_port.execute(&invocation, config.dry_run).await?;

        if !config.dry_run && !config.keeps_intermediates() {
            for clip in ledger.outputs() {
                debug!("Removing {}", clip.display());
                self.fs_port.delete_file(clip).await?;
            }
            info!("Removed {} intermediate clips", ledger.len());
        }

        Ok(())
    }

    /// Re-read an existing manifest and concatenate whatever it still points at
    ///
    /// Stale entries are dropped. Referenced clips are never deleted.
    pub async fn join_manifest(&self, config: &RunConfig) -> DomainResult<ParsedManifest> {
        let text = self.fs_port.read_text(&config.input).await?;
        let parsed =
            manifest::parse(&text, manifest_dir(&config.input), self.fs_port.as_ref()).await?;

        if parsed.ledger.is_empty() {
            return Err(DomainError::Usage(format!(
                "{} lists no existing clips to join",
                config.input.display()
            )));
        }

        let join_config = RunConfig {
            input_kind: InputKind::Join,
            retain: true,
            no_join: false,
            ..config.clone()
        };
        self.finalize(&parsed.ledger, &join_config).await?;
        Ok(parsed)
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
