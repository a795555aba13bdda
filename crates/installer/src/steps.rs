//! The individual installation steps

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use xibao_config::InstallConfig;
use xibao_errors::{BuildError, InstallError, PlatformError, Result};
use xibao_events::{AppEvent, BuildEvent, EventEmitter, FailureContext, InstallEvent};
use xibao_platform::{FilesystemOperations, Platform, PlatformContext};

/// Create `prefix`, `prefix/bin` and `prefix/share` where missing.
///
/// Returns the directories that were actually created.
pub(crate) async fn ensure_directories(
    platform: &Platform,
    ctx: &PlatformContext,
    config: &InstallConfig,
) -> Result<Vec<PathBuf>> {
    let fs = platform.filesystem();
    let mut created = Vec::new();

    for dir in config.directories() {
        if fs.exists(ctx, &dir).await {
            if !fs.is_dir(ctx, &dir).await {
                return Err(InstallError::NotADirectory {
                    path: dir.display().to_string(),
                }
                .into());
            }
            debug!(path = %dir.display(), "directory already present");
            continue;
        }

        fs.create_dir_all(ctx, &dir)
            .await
            .map_err(|e| InstallError::filesystem("create_dir_all", &dir, &e))?;
        ctx.emit(AppEvent::Install(InstallEvent::DirectoryCreated { path: dir.clone() }));
        created.push(dir);
    }

    Ok(created)
}

/// Run the release build and wait for it to exit.
///
/// Returns the build's exit code on success.
pub(crate) async fn run_build(
    platform: &Platform,
    ctx: &PlatformContext,
    config: &InstallConfig,
) -> Result<Option<i32>> {
    let mut cmd = platform.command(&config.build.program);
    cmd.args(&config.build.args)
        .current_dir(&config.project_dir)
        .inherit_stdio(true);
    let command = cmd.display();

    ctx.emit(AppEvent::Build(BuildEvent::Started {
        command: command.clone(),
        working_dir: config.project_dir.clone(),
    }));
    info!(%command, dir = %config.project_dir.display(), "running release build");

    let start = Instant::now();
    let output = match platform.execute_command(ctx, cmd).await {
        Ok(output) => output,
        Err(e) => {
            ctx.emit(AppEvent::Build(BuildEvent::Failed {
                command,
                exit_code: None,
                failure: FailureContext::from_error(&e),
            }));
            return Err(e.into());
        }
    };

    let code = output.status.code();
    if !output.status.success() {
        let err = BuildError::Failed {
            command: command.clone(),
            code,
        };
        debug!(%command, ?code, "release build failed");
        ctx.emit(AppEvent::Build(BuildEvent::Failed {
            command,
            exit_code: code,
            failure: FailureContext::from_error(&err),
        }));
        return Err(err.into());
    }

    ctx.emit(AppEvent::Build(BuildEvent::Completed {
        command,
        duration: start.elapsed(),
    }));
    Ok(code)
}

/// Name of the scratch file the binary is copied to before being renamed
/// into place.
fn partial_path(destination: &Path, app_name: &str) -> PathBuf {
    destination.with_file_name(format!(".{app_name}.partial"))
}

async fn discard_partial(fs: &dyn FilesystemOperations, ctx: &PlatformContext, partial: &Path) {
    if fs.exists(ctx, partial).await {
        if let Err(e) = fs.remove_file(ctx, partial).await {
            warn!(path = %partial.display(), error = %e, "failed to remove partial copy");
        }
    }
}

/// Copy the built executable to `prefix/bin/<app>`, replacing any previous
/// copy. Returns the number of bytes staged.
pub(crate) async fn stage_binary(
    platform: &Platform,
    ctx: &PlatformContext,
    config: &InstallConfig,
) -> Result<u64> {
    let fs = platform.filesystem();
    let source = config.binary_source();
    let destination = config.binary_destination();

    if !fs.is_file(ctx, &source).await {
        return Err(BuildError::ArtifactMissing {
            path: source.display().to_string(),
        }
        .into());
    }

    // Copy next to the destination and rename over it, so an interrupted
    // copy never leaves a truncated executable at the final path.
    let partial = partial_path(&destination, &config.app_name);
    let bytes = match fs.copy_file(ctx, &source, &partial).await {
        Ok(bytes) => bytes,
        Err(e) => {
            discard_partial(fs, ctx, &partial).await;
            return Err(InstallError::filesystem("copy_file", &source, &e).into());
        }
    };

    if let Err(e) = fs.atomic_rename(ctx, &partial, &destination).await {
        discard_partial(fs, ctx, &partial).await;
        return Err(InstallError::filesystem("rename", &destination, &e).into());
    }

    info!(path = %destination.display(), bytes, "binary staged");
    Ok(bytes)
}

/// Copy the resource tree to `prefix/share/<app>`. An existing destination is
/// an error; nothing is merged or overwritten. Returns the number of files
/// copied.
pub(crate) async fn stage_resources(
    platform: &Platform,
    ctx: &PlatformContext,
    config: &InstallConfig,
) -> Result<usize> {
    let fs = platform.filesystem();
    let source = config.resource_source();
    let destination = config.resource_destination();

    if !fs.is_dir(ctx, &source).await {
        return Err(InstallError::FilesystemError {
            operation: "copy_directory".to_string(),
            path: source.display().to_string(),
            message: "resource directory not found".to_string(),
        }
        .into());
    }

    if fs.exists(ctx, &destination).await {
        return Err(InstallError::DestinationExists {
            path: destination.display().to_string(),
        }
        .into());
    }

    let files = fs
        .copy_directory(ctx, &source, &destination)
        .await
        .map_err(|e| match e {
            PlatformError::AlreadyExists { .. } => InstallError::DestinationExists {
                path: destination.display().to_string(),
            },
            other => InstallError::filesystem("copy_directory", &source, &other),
        })?;

    info!(path = %destination.display(), files, "resources staged");
    Ok(files)
}
