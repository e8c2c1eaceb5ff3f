// In-memory adapters - Deterministic stand-ins for ffmpeg, the disk and stdout

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// File system kept in a map of path to contents
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used to seed fixtures
    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: &str) {
        lock(&self.files).insert(path.into(), contents.to_string());
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        lock(&self.files).contains_key(path.as_ref())
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        lock(&self.files).get(path.as_ref()).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        lock(&self.files).keys().cloned().collect()
    }

    fn not_found(path: &Path) -> DomainError {
        DomainError::io(path, std::io::Error::from(std::io::ErrorKind::NotFound))
    }
}

#[async_trait]
impl FsPort for MemoryFs {
    async fn file_exists(&self, path: &Path) -> DomainResult<bool> {
        Ok(self.contains(path))
    }

    async fn file_size(&self, path: &Path) -> DomainResult<u64> {
        self.contents(path)
            .map(|contents| contents.len() as u64)
            .ok_or_else(|| Self::not_found(path))
    }

    async fn delete_file(&self, path: &Path) -> DomainResult<()> {
        lock(&self.files)
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(path))
    }

    async fn read_text(&self, path: &Path) -> DomainResult<String> {
        self.contents(path).ok_or_else(|| Self::not_found(path))
    }

    async fn write_text(&self, path: &Path, contents: &str) -> DomainResult<()> {
        self.insert(path, contents);
        Ok(())
    }
}

/// Executor that records every invocation instead of spawning a process
///
/// When given a [`MemoryFs`], each real invocation writes a non-empty file at
/// its last argument, the way ffmpeg leaves its output behind.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<(Invocation, bool)>>,
    fs: Option<Arc<MemoryFs>>,
    fail_at: Option<usize>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn producing_into(fs: Arc<MemoryFs>) -> Self {
        Self {
            fs: Some(fs),
            ..Self::default()
        }
    }

    /// Make the `index`-th real invocation (zero-based) fail
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// All invocations seen, with their dry-run flag
    pub fn calls(&self) -> Vec<(Invocation, bool)> {
        lock(&self.calls).clone()
    }

    /// Invocations that would have spawned a process
    pub fn executed(&self) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|(_, dry_run)| !dry_run)
            .map(|(invocation, _)| invocation)
            .collect()
    }
}

#[async_trait]
impl ExecutePort for RecordingExecutor {
    fn locate(&self, program: &str) -> DomainResult<PathBuf> {
        Ok(PathBuf::from(program))
    }

    async fn execute(&self, invocation: &Invocation, dry_run: bool) -> DomainResult<()> {
        let real_index = {
            let mut calls = lock(&self.calls);
            let earlier_real = calls.iter().filter(|(_, dry)| !dry).count();
            calls.push((invocation.clone(), dry_run));
            earlier_real
        };
        if dry_run {
            return Ok(());
        }

        if self.fail_at == Some(real_index) {
            return Err(DomainError::InvocationFailure {
                program: invocation.program.clone(),
                command: invocation.to_string(),
                status: "exit status: 1".to_string(),
            });
        }

        if let (Some(fs), Some(output)) = (&self.fs, invocation.args.last()) {
            fs.insert(output, "media");
        }
        Ok(())
    }
}

/// Console that keeps printed lines in memory
#[derive(Debug, Default)]
pub struct BufferConsole {
    lines: Mutex<Vec<String>>,
}

impl BufferConsole {
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

impl ConsolePort for BufferConsole {
    fn print(&self, text: &str) {
        lock(&self.lines).extend(text.lines().map(str::to_string));
    }
}
