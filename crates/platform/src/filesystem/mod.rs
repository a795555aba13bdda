//! Filesystem operations used while staging an installation

use async_trait::async_trait;
use std::path::Path;
use xibao_errors::PlatformError;

use crate::core::PlatformContext;

/// Trait for filesystem operations
#[async_trait]
pub trait FilesystemOperations: Send + Sync {
    /// Create directory and all parent directories; existing directories are fine
    async fn create_dir_all(&self, ctx: &PlatformContext, path: &Path)
        -> Result<(), PlatformError>;

    /// Check if a path exists (without following a final symlink)
    async fn exists(&self, ctx: &PlatformContext, path: &Path) -> bool;

    /// Check if a path points to a directory
    async fn is_dir(&self, ctx: &PlatformContext, path: &Path) -> bool;

    /// Whether `path` resolves to a regular file, following symlinks
    async fn is_file(&self, ctx: &PlatformContext, path: &Path) -> bool;

    /// Copy one file, overwriting `dst`. Returns the number of bytes copied.
    async fn copy_file(
        &self,
        ctx: &PlatformContext,
        src: &Path,
        dst: &Path,
    ) -> Result<u64, PlatformError>;

    /// Recursively copy a directory tree to `dst`, which must not exist yet.
    /// Returns the number of files copied.
    async fn copy_directory(
        &self,
        ctx: &PlatformContext,
        src: &Path,
        dst: &Path,
    ) -> Result<usize, PlatformError>;

    /// Rename `src` over `dst` in one step
    async fn atomic_rename(
        &self,
        ctx: &PlatformContext,
        src: &Path,
        dst: &Path,
    ) -> Result<(), PlatformError>;

    /// Remove a single file
    async fn remove_file(&self, ctx: &PlatformContext, path: &Path) -> Result<(), PlatformError>;
}
