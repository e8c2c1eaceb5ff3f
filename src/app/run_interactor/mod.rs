// Run interactor - Picks the run mode and drives the other interactors

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::clip_interactor::ClipInteractor;
use crate::app::join_interactor::JoinInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::RunModeSelector;
use crate::engine::{CommandBuilder, Overwrite};
use crate::instructions;
use crate::ports::*;

/// Interactor for a whole invocation of the tool
pub struct RunInteractor {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    console: Arc<dyn ConsolePort>,
    clip_interactor: Arc<ClipInteractor>,
    join_interactor: Arc<JoinInteractor>,
}

impl RunInteractor {
    /// Create new run interactor with injected ports and sub-interactors
    pub fn new(
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        console: Arc<dyn ConsolePort>,
        clip_interactor: Arc<ClipInteractor>,
        join_interactor: Arc<JoinInteractor>,
    ) -> Self {
        Self {
            execute_port,
            fs_port,
            console,
            clip_interactor,
            join_interactor,
        }
    }

    /// Execute the run described by `config` and report the mode it took
    pub async fn run(&self, config: &RunConfig) -> DomainResult<RunMode> {
        let mode = RunModeSelector::select(config)?;
        info!("Run mode: {:?}", mode);

        if !config.dry_run {
            let program = self.execute_port.locate(&config.ffmpeg)?;
            debug!("Using {}", program.display());
        }

        match mode {
            RunMode::DirectFilterOnly => {
                let invocation = CommandBuilder::new(config).filter(&config.input, &config.output);
                self.announce(config);
                self.execute_port.execute(&invocation, config.dry_run).await?;
            }
            RunMode::SingleCut => {
                let invocation = CommandBuilder::new(config).cut(
                    &config.input,
                    &config.cuts[0],
                    &config.output,
                    Overwrite::Default,
                );
                self.announce(config);
                self.execute_port.execute(&invocation, config.dry_run).await?;
            }
            RunMode::MultiCutSequence => {
                let instruction = Instruction::with_cuts(config.input.clone(), config.cuts.clone());
                self.announce(config);
                self.sequence(&[instruction], config).await?;
            }
            RunMode::TextInterpreted | RunMode::ClipsInterpreted => {
                let text = self.fs_port.read_text(&config.input).await?;
                let instructions = if mode == RunMode::TextInterpreted {
                    instructions::interpret_text(&text, config.dry_run, self.fs_port.as_ref()).await?
                } else {
                    instructions::interpret_clips(&text, config.dry_run, self.fs_port.as_ref()).await?
                };
                self.console.print(&instructions::describe(&instructions));
                self.announce(config);
                self.sequence(&instructions, config).await?;
            }
            RunMode::JoinOnly => {
                let parsed = self.join_interactor.join_manifest(config).await?;
                info!(
                    "Joined {} clips into {} ({} manifest warnings)",
                    parsed.ledger.len(),
                    config.output.display(),
                    parsed.warnings.len()
                );
            }
        }

        Ok(mode)
    }

    async fn sequence(&self, instructions: &[Instruction], config: &RunConfig) -> DomainResult<()> {
        let mut ledger = ClipLedger::new();
        for instruction in instructions {
            self.clip_interactor.run_cuts(&mut ledger, instruction, config).await?;
        }
        self.join_interactor.finalize(&ledger, config).await
    }

    fn announce(&self, config: &RunConfig) {
        if config.dry_run {
            self.console.print("would run:");
        }
    }
}
