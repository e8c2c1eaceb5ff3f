// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for invoking the external media tool
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Resolve the program that real invocations will run
    fn locate(&self, program: &str) -> DomainResult<PathBuf>;

    /// Run `invocation` to completion, or only echo it when `dry_run` is set
    ///
    /// A non-zero exit status is a [`DomainError::InvocationFailure`].
    async fn execute(&self, invocation: &Invocation, dry_run: bool) -> DomainResult<()>;
}

/// Port for the file system operations the core needs
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, path: &Path) -> DomainResult<bool>;

    /// Get file size
    async fn file_size(&self, path: &Path) -> DomainResult<u64>;

    /// Delete file
    async fn delete_file(&self, path: &Path) -> DomainResult<()>;

    /// Read a UTF-8 text file
    async fn read_text(&self, path: &Path) -> DomainResult<String>;

    /// Write a UTF-8 text file, replacing any previous content
    async fn write_text(&self, path: &Path, contents: &str) -> DomainResult<()>;
}

/// Port for operator-facing echo (parsed input, planned commands)
pub trait ConsolePort: Send + Sync {
    fn print(&self, text: &str);
}
