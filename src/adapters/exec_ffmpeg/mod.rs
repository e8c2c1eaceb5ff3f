//! FFmpeg execution adapter
//!
//! Runs the external tool as a blocking child process, one at a time. Real
//! invocations are framed by a banner on the console; dry-run invocations
//! are only echoed.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    console: Arc<dyn ConsolePort>,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(console: Arc<dyn ConsolePort>) -> Self {
        Self { console }
    }

    fn banner(&self, pretty: &str) {
        let rule = "=".repeat(pretty.len() + 8);
        self.console.print(&rule);
        self.console.print(&format!("    {}", pretty));
        self.console.print(&rule);
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    fn locate(&self, program: &str) -> DomainResult<PathBuf> {
        which::which(program).map_err(|e| {
            debug!("lookup of {} failed: {}", program, e);
            DomainError::ToolNotFound {
                program: program.to_string(),
            }
        })
    }

    async fn execute(&self, invocation: &Invocation, dry_run: bool) -> DomainResult<()> {
        let pretty = invocation.to_string();
        if dry_run {
            self.console.print(&format!("    {}", pretty));
            return Ok(());
        }

        self.banner(&pretty);
        let started = Instant::now();
        let status = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| DomainError::io(&invocation.program, e))?;

        if !status.success() {
            error!("{} exited with {}", invocation.program, status);
            return Err(DomainError::InvocationFailure {
                program: invocation.program.clone(),
                command: pretty,
                status: status.to_string(),
            });
        }

        info!(
            "{} finished in {:.2}s",
            invocation.program,
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::recording::BufferConsole;

    #[tokio::test]
    async fn test_dry_run_only_echoes() {
        let console = Arc::new(BufferConsole::default());
        let adapter = FFmpegAdapter::new(console.clone());
        let invocation = Invocation::new("definitely-not-a-real-ffmpeg")
            .args(["-i", "a b.mp4", "out.mp4"]);

        adapter.execute(&invocation, true).await.unwrap();
        assert_eq!(
            console.lines(),
            vec!["    definitely-not-a-real-ffmpeg -i 'a b.mp4' out.mp4".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let adapter = FFmpegAdapter::new(Arc::new(BufferConsole::default()));
        let invocation = Invocation::new("definitely-not-a-real-ffmpeg").arg("-version");
        assert!(adapter.execute(&invocation, false).await.is_err());
        assert!(matches!(
            adapter.locate("definitely-not-a-real-ffmpeg"),
            Err(DomainError::ToolNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_invocation_failure() {
        let adapter = FFmpegAdapter::new(Arc::new(BufferConsole::default()));
        let invocation = Invocation::new("false");
        assert!(matches!(
            adapter.execute(&invocation, false).await,
            Err(DomainError::InvocationFailure { .. })
        ));
        assert!(adapter.execute(&Invocation::new("true"), false).await.is_ok());
    }
}
