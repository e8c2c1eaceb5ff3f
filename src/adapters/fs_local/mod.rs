// Local filesystem adapter - File system operations through tokio::fs

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default)]
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn file_exists(&self, path: &Path) -> DomainResult<bool> {
        tokio::fs::try_exists(path)
            .await
            .map_err(|e| DomainError::io(path, e))
    }

    async fn file_size(&self, path: &Path) -> DomainResult<u64> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| DomainError::io(path, e))?;
        Ok(metadata.len())
    }

    async fn delete_file(&self, path: &Path) -> DomainResult<()> {
        debug!("deleting {}", path.display());
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| DomainError::io(path, e))
    }

    async fn read_text(&self, path: &Path) -> DomainResult<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::io(path, e))
    }

    async fn write_text(&self, path: &Path, contents: &str) -> DomainResult<()> {
        debug!("writing {} bytes to {}", contents.len(), path.display());
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| DomainError::io(path, e))
    }
}
