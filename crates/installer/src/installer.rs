//! Main installer implementation

use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;
use xibao_config::InstallConfig;
use xibao_errors::Result;
use xibao_events::{
    AppEvent, EventEmitter, EventSender, FailureContext, InstallEvent, InstallStep,
};
use xibao_platform::{Platform, PlatformContext};

use crate::steps;
use crate::InstallReport;

/// Installs the application described by an [`InstallConfig`]
pub struct Installer {
    config: InstallConfig,
    platform: Platform,
    event_sender: Option<EventSender>,
    run_id: String,
}

impl Installer {
    /// Create an installer for `config` that performs its side effects
    /// through `platform`
    #[must_use]
    pub fn new(config: InstallConfig, platform: Platform) -> Self {
        Self {
            config,
            platform,
            event_sender: None,
            run_id: Uuid::new_v4().to_string(),
        }
    }

    /// Set the event sender for progress reporting
    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    #[must_use]
    pub fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Identifier stamped on every event of this installer's runs
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// Nothing is rolled back: directories created and files copied before a
    /// failing step stay on disk.
    ///
    /// # Errors
    ///
    /// - [`xibao_errors::ConfigError`] if the configuration is unusable
    /// - [`xibao_errors::BuildError::Failed`] if the build exits unsuccessfully
    /// - [`xibao_errors::InstallError::DestinationExists`] if the resource
    ///   directory is already installed
    /// - a filesystem or platform error from any step
    #[instrument(skip(self), fields(app = %self.config.app_name, prefix = %self.config.prefix.display()))]
    pub async fn install(&self) -> Result<InstallReport> {
        self.config.validate()?;

        let start = Instant::now();
        let ctx = PlatformContext::new(self.event_sender.clone())
            .with_correlation_id(self.run_id.clone());

        self.emit(AppEvent::Install(InstallEvent::Started {
            app: self.config.app_name.clone(),
            prefix: self.config.prefix.clone(),
        }));

        let created_directories = self
            .run_step(
                InstallStep::Directories,
                steps::ensure_directories(&self.platform, &ctx, &self.config),
            )
            .await?;
        let build_exit_code = self
            .run_step(
                InstallStep::Build,
                steps::run_build(&self.platform, &ctx, &self.config),
            )
            .await?;
        let binary_bytes = self
            .run_step(
                InstallStep::Binary,
                steps::stage_binary(&self.platform, &ctx, &self.config),
            )
            .await?;
        let resource_files = self
            .run_step(
                InstallStep::Resources,
                steps::stage_resources(&self.platform, &ctx, &self.config),
            )
            .await?;

        let report = InstallReport {
            app: self.config.app_name.clone(),
            prefix: self.config.prefix.clone(),
            created_directories,
            build_exit_code,
            binary_path: self.config.binary_destination(),
            binary_bytes,
            resource_path: self.config.resource_destination(),
            resource_files,
            duration: start.elapsed(),
        };

        self.emit(AppEvent::Install(InstallEvent::Completed {
            app: report.app.clone(),
            binary_path: report.binary_path.clone(),
            resource_path: report.resource_path.clone(),
            resource_files: report.resource_files,
            duration: report.duration,
        }));
        info!(duration = ?report.duration, "installation complete");

        Ok(report)
    }

    async fn run_step<T, F>(&self, step: InstallStep, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        self.emit(AppEvent::Install(InstallEvent::StepStarted { step }));

        match fut.await {
            Ok(value) => {
                self.emit(AppEvent::Install(InstallEvent::StepCompleted {
                    step,
                    duration: start.elapsed(),
                }));
                Ok(value)
            }
            Err(err) => {
                debug!(%step, error = %err, "installation step failed");
                let failure = FailureContext::from_error(&err);
                self.emit(AppEvent::Install(InstallEvent::StepFailed {
                    step,
                    failure: failure.clone(),
                }));
                self.emit(AppEvent::Install(InstallEvent::Failed {
                    app: self.config.app_name.clone(),
                    step,
                    failure,
                }));
                Err(err)
            }
        }
    }
}

impl EventEmitter for Installer {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }

    fn correlation_id(&self) -> Option<&str> {
        Some(&self.run_id)
    }
}

impl std::fmt::Debug for Installer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("config", &self.config)
            .field("run_id", &self.run_id)
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::os::unix::process::ExitStatusExt;
    use std::path::PathBuf;
    use std::process::ExitStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use xibao_errors::{Error, PlatformError};
    use xibao_platform::implementations::native::filesystem::NativeFilesystemOperations;
    use xibao_platform::{CommandOutput, PlatformCommand, ProcessOperations};

    /// Stands in for the release build: checks the prefix layout, then
    /// either writes the artifact or exits with `exit_code`.
    struct FakeBuild {
        prefix: PathBuf,
        exit_code: i32,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ProcessOperations for FakeBuild {
        async fn execute_command(
            &self,
            _ctx: &PlatformContext,
            cmd: PlatformCommand,
        ) -> std::result::Result<CommandOutput, PlatformError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(cmd.display(), "cargo build --release");
            for dir in ["", "bin", "share"] {
                assert!(self.prefix.join(dir).is_dir(), "{dir:?} missing at build time");
            }

            if self.exit_code == 0 {
                let project = cmd.get_current_dir().expect("build runs in the project");
                let release = project.join("target/release");
                std::fs::create_dir_all(&release).unwrap();
                std::fs::write(release.join("xibao-gen"), b"binary").unwrap();
            }

            Ok(CommandOutput {
                status: ExitStatus::from_raw(self.exit_code << 8),
                stdout: Vec::new(),
                stderr: Vec::new(),
            })
        }
    }

    fn setup(exit_code: i32) -> (tempfile::TempDir, Installer, Arc<AtomicUsize>) {
        let temp = tempfile::TempDir::new().unwrap();
        let project = temp.path().join("project");
        let prefix = temp.path().join("deep/prefix");
        std::fs::create_dir_all(project.join("resource")).unwrap();
        std::fs::write(project.join("resource/font.ttf"), b"font").unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let platform = Platform::new(
            Box::new(NativeFilesystemOperations::new()),
            Box::new(FakeBuild {
                prefix: prefix.clone(),
                exit_code,
                calls: Arc::clone(&calls),
            }),
        );
        let installer = Installer::new(InstallConfig::new(prefix, project), platform);
        (temp, installer, calls)
    }

    #[tokio::test]
    async fn runs_the_default_release_build_once() {
        let (_temp, installer, calls) = setup(0);

        let report = installer.install().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.binary_bytes, 6);
        assert_eq!(report.resource_files, 1);
        assert_eq!(report.created_directories.len(), 3);
    }

    #[tokio::test]
    async fn build_exit_status_is_carried_in_the_error() {
        let (_temp, installer, calls) = setup(101);

        let err = installer.install().await.unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        match err {
            Error::Build(build) => assert_eq!(build.exit_code(), Some(101)),
            other => panic!("expected build failure, got {other:?}"),
        }
        assert!(!installer.config().binary_destination().exists());
    }
}
