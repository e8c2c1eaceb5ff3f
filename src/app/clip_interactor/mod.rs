// Clip interactor - Produces one intermediate clip per cut

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::{CommandBuilder, Overwrite};
use crate::ports::*;

/// What happened to a single cut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutOutcome {
    /// The tool was invoked (or echoed, in a dry run)
    Produced,
    /// A non-empty artifact from an earlier run was reused
    Reused,
}

/// Interactor for the clip sequencing use case
pub struct ClipInteractor {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
}

impl ClipInteractor {
    /// Create new clip interactor with injected ports
    pub fn new(execute_port: Arc<dyn ExecutePort>, fs_port: Arc<dyn FsPort>) -> Self {
        Self {
            execute_port,
            fs_port,
        }
    }

    /// Append one clip per cut of `instruction` to `ledger`, in order
    ///
    /// Clip numbering continues from the current ledger length. The first
    /// failed invocation aborts the sequence; clips already produced stay on
    /// disk and in the ledger.
    pub async fn run_cuts(
        &self,
        ledger: &mut ClipLedger,
        instruction: &Instruction,
        config: &RunConfig,
    ) -> DomainResult<Vec<CutOutcome>> {
        let commands = CommandBuilder::new(config);
        let mut outcomes = Vec::with_capacity(instruction.cuts.len());

        for cut in &instruction.cuts {
            let clip = ledger.next_clip_path(&config.output);
            ledger.append(&instruction.input, cut.clone(), &clip);

            if !config.dry_run && self.fs_port.file_exists(&clip).await? {
                if self.fs_port.file_size(&clip).await? > 0 {
                    info!("Reusing existing clip {}", clip.display());
                    outcomes.push(CutOutcome::Reused);
                    continue;
                }
                warn!("Removing empty clip {} left by an earlier run", clip.display());
                self.fs_port.delete_file(&clip).await?;
            }

            debug!("Cutting {} from {} into {}", cut, instruction.input.display(), clip.display());
            let invocation = commands.cut(&instruction.input, cut, &clip, Overwrite::Never);
            self.execute_port.execute(&invocation, config.dry_run).await?;
            outcomes.push(CutOutcome::Produced);
        }

        Ok(outcomes)
    }
}
