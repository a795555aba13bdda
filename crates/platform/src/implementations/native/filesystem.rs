//! Native filesystem operations

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use xibao_errors::PlatformError;
use xibao_events::{PlatformOperationContext, PlatformOperationKind};

use crate::core::PlatformContext;
use crate::filesystem::FilesystemOperations;

/// Filesystem operations backed by `tokio::fs`
pub struct NativeFilesystemOperations;

impl NativeFilesystemOperations {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeFilesystemOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn filesystem_context(
    operation: &str,
    source: Option<&Path>,
    target: &Path,
) -> PlatformOperationContext {
    PlatformOperationContext {
        kind: PlatformOperationKind::Filesystem,
        operation: operation.to_string(),
        target: Some(target.to_path_buf()),
        source: source.map(Path::to_path_buf),
        command: None,
    }
}

/// Copy the contents of `src` into the already created directory `dst`.
async fn copy_tree_into(src: &Path, dst: &Path) -> Result<usize, PlatformError> {
    let mut copied = 0;
    let mut entries = fs::read_dir(src)
        .await
        .map_err(|e| PlatformError::from_io("read_dir", src, &e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PlatformError::from_io("read_dir", src, &e))?
    {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        // Follows symlinks: linked files are copied by content.
        let metadata = fs::metadata(&src_path)
            .await
            .map_err(|e| PlatformError::from_io("metadata", &src_path, &e))?;

        if metadata.is_dir() {
            fs::create_dir(&dst_path)
                .await
                .map_err(|e| PlatformError::from_io("create_dir", &dst_path, &e))?;
            copied += Box::pin(copy_tree_into(&src_path, &dst_path)).await?;
        } else {
            fs::copy(&src_path, &dst_path)
                .await
                .map_err(|e| PlatformError::from_io("copy", &src_path, &e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[async_trait]
impl FilesystemOperations for NativeFilesystemOperations {
    async fn create_dir_all(
        &self,
        ctx: &PlatformContext,
        path: &Path,
    ) -> Result<(), PlatformError> {
        ctx.execute_with_events(filesystem_context("create_dir_all", None, path), async {
            fs::create_dir_all(path)
                .await
                .map_err(|e| PlatformError::from_io("create_dir_all", path, &e))
        })
        .await
    }

    async fn exists(&self, _ctx: &PlatformContext, path: &Path) -> bool {
        fs::symlink_metadata(path).await.is_ok()
    }

    async fn is_dir(&self, _ctx: &PlatformContext, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_dir())
    }

    async fn is_file(&self, _ctx: &PlatformContext, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_file())
    }

    async fn copy_file(
        &self,
        ctx: &PlatformContext,
        src: &Path,
        dst: &Path,
    ) -> Result<u64, PlatformError> {
        ctx.execute_with_events(filesystem_context("copy_file", Some(src), dst), async {
            fs::copy(src, dst)
                .await
                .map_err(|e| PlatformError::from_io("copy_file", src, &e))
        })
        .await
    }

    async fn copy_directory(
        &self,
        ctx: &PlatformContext,
        src: &Path,
        dst: &Path,
    ) -> Result<usize, PlatformError> {
        ctx.execute_with_events(filesystem_context("copy_directory", Some(src), dst), async {
            let metadata = fs::metadata(src)
                .await
                .map_err(|e| PlatformError::from_io("copy_directory", src, &e))?;
            if !metadata.is_dir() {
                return Err(PlatformError::FilesystemOperationFailed {
                    operation: "copy_directory".to_string(),
                    message: format!("{}: not a directory", src.display()),
                });
            }

            // create_dir (not create_dir_all) so an existing destination is
            // reported as AlreadyExists instead of being merged into.
            fs::create_dir(dst)
                .await
                .map_err(|e| PlatformError::from_io("copy_directory", dst, &e))?;

            copy_tree_into(src, dst).await
        })
        .await
    }

    async fn atomic_rename(
        &self,
        ctx: &PlatformContext,
        src: &Path,
        dst: &Path,
    ) -> Result<(), PlatformError> {
        ctx.execute_with_events(filesystem_context("atomic_rename", Some(src), dst), async {
            fs::rename(src, dst)
                .await
                .map_err(|e| PlatformError::from_io("atomic_rename", src, &e))
        })
        .await
    }

    async fn remove_file(&self, ctx: &PlatformContext, path: &Path) -> Result<(), PlatformError> {
        ctx.execute_with_events(filesystem_context("remove_file", None, path), async {
            fs::remove_file(path)
                .await
                .map_err(|e| PlatformError::from_io("remove_file", path, &e))
        })
        .await
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ops() -> (NativeFilesystemOperations, PlatformContext) {
        (NativeFilesystemOperations::new(), PlatformContext::default())
    }

    #[tokio::test]
    async fn create_dir_all_is_idempotent() {
        let (fs_ops, ctx) = ops();
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");

        fs_ops.create_dir_all(&ctx, &nested).await.unwrap();
        fs_ops.create_dir_all(&ctx, &nested).await.unwrap();

        assert!(fs_ops.is_dir(&ctx, &nested).await);
    }

    #[tokio::test]
    async fn copy_directory_mirrors_the_tree() {
        let (fs_ops, ctx) = ops();
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("resource");
        std::fs::create_dir_all(src.join("fonts/extra")).unwrap();
        std::fs::create_dir_all(src.join("empty")).unwrap();
        std::fs::write(src.join("bg.png"), b"png").unwrap();
        std::fs::write(src.join("fonts/a.ttf"), b"font-a").unwrap();
        std::fs::write(src.join("fonts/extra/b.ttf"), b"font-b").unwrap();

        let dst = temp.path().join("share/app");
        std::fs::create_dir_all(temp.path().join("share")).unwrap();

        let copied = fs_ops.copy_directory(&ctx, &src, &dst).await.unwrap();

        assert_eq!(copied, 3);
        assert_eq!(std::fs::read(dst.join("bg.png")).unwrap(), b"png");
        assert_eq!(std::fs::read(dst.join("fonts/a.ttf")).unwrap(), b"font-a");
        assert_eq!(
            std::fs::read(dst.join("fonts/extra/b.ttf")).unwrap(),
            b"font-b"
        );
        assert!(dst.join("empty").is_dir());
        assert!(fs_ops.is_file(&ctx, &dst.join("fonts/extra/b.ttf")).await);
        assert!(!fs_ops.is_file(&ctx, &dst.join("fonts")).await);
    }

    #[tokio::test]
    async fn copy_directory_refuses_existing_destination() {
        let (fs_ops, ctx) = ops();
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("resource");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("new.txt"), b"new").unwrap();

        let dst = temp.path().join("dst");
        std::fs::create_dir_all(&dst).unwrap();
        std::fs::write(dst.join("old.txt"), b"old").unwrap();

        let err = fs_ops.copy_directory(&ctx, &src, &dst).await.unwrap_err();

        assert!(matches!(err, PlatformError::AlreadyExists { .. }));
        assert!(!dst.join("new.txt").exists());
        assert_eq!(std::fs::read(dst.join("old.txt")).unwrap(), b"old");
    }

    #[tokio::test]
    async fn copy_file_overwrites_and_reports_missing_sources() {
        let (fs_ops, ctx) = ops();
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.bin");
        let dst = temp.path().join("dst.bin");
        std::fs::write(&src, b"fresh").unwrap();
        std::fs::write(&dst, b"stale contents").unwrap();

        let bytes = fs_ops.copy_file(&ctx, &src, &dst).await.unwrap();
        assert_eq!(bytes, 5);
        assert_eq!(std::fs::read(&dst).unwrap(), b"fresh");

        let missing = temp.path().join("missing.bin");
        let err = fs_ops.copy_file(&ctx, &missing, &dst).await.unwrap_err();
        assert!(matches!(
            err,
            PlatformError::FilesystemOperationFailed { .. }
        ));
    }

    #[tokio::test]
    async fn operations_emit_platform_events() {
        let (tx, mut rx) = xibao_events::channel();
        let ctx = PlatformContext::new(Some(tx));
        let fs_ops = NativeFilesystemOperations::new();
        let temp = TempDir::new().unwrap();

        fs_ops
            .create_dir_all(&ctx, &temp.path().join("x"))
            .await
            .unwrap();

        let started = rx.recv().await.unwrap();
        let completed = rx.recv().await.unwrap();
        assert!(matches!(
            started.event,
            xibao_events::AppEvent::Platform(xibao_events::PlatformEvent::OperationStarted { .. })
        ));
        assert!(matches!(
            completed.event,
            xibao_events::AppEvent::Platform(
                xibao_events::PlatformEvent::OperationCompleted { .. }
            )
        ));
    }
}
