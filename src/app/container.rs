use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, FsLocalAdapter, StdoutConsole};
use crate::app::{
    clip_interactor::ClipInteractor, join_interactor::JoinInteractor,
    run_interactor::RunInteractor,
};
use crate::ports::{ConsolePort, ExecutePort, FsPort};

pub trait AppContainer: Send + Sync {
    fn clip_interactor(&self) -> Arc<ClipInteractor>;
    fn join_interactor(&self) -> Arc<JoinInteractor>;
    fn run_interactor(&self) -> Arc<RunInteractor>;
}

pub struct DefaultAppContainer {
    clip_interactor: Arc<ClipInteractor>,
    join_interactor: Arc<JoinInteractor>,
    run_interactor: Arc<RunInteractor>,
}

impl DefaultAppContainer {
    /// Wire the real adapters: ffmpeg subprocesses, the local disk and stdout
    pub fn new() -> Self {
        let console: Arc<dyn ConsolePort> = Arc::new(StdoutConsole);
        Self::with_ports(
            Arc::new(FFmpegAdapter::new(Arc::clone(&console))),
            Arc::new(FsLocalAdapter::new()),
            console,
        )
    }

    /// Wire the interactors over arbitrary port implementations
    pub fn with_ports(
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        console: Arc<dyn ConsolePort>,
    ) -> Self {
        let clip_interactor = Arc::new(ClipInteractor::new(
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
        ));

        let join_interactor = Arc::new(JoinInteractor::new(
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
            Arc::clone(&console),
        ));

        let run_interactor = Arc::new(RunInteractor::new(
            execute_port,
            fs_port,
            console,
            Arc::clone(&clip_interactor),
            Arc::clone(&join_interactor),
        ));

        Self {
            clip_interactor,
            join_interactor,
            run_interactor,
        }
    }
}

impl Default for DefaultAppContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContainer for DefaultAppContainer {
    fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }

    fn join_interactor(&self) -> Arc<JoinInteractor> {
        Arc::clone(&self.join_interactor)
    }

    fn run_interactor(&self) -> Arc<RunInteractor> {
        Arc::clone(&self.run_interactor)
    }
}
