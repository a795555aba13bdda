//! Core platform abstractions and context management

use std::future::Future;
use std::time::{Duration, Instant};
use xibao_errors::PlatformError;
use xibao_events::{
    AppEvent, EventEmitter, EventSender, FailureContext, PlatformEvent, PlatformOperationContext,
    PlatformOperationMetrics,
};

use crate::filesystem::FilesystemOperations;
use crate::process::ProcessOperations;

/// Context for platform operations, providing event emission
#[derive(Debug, Clone, Default)]
pub struct PlatformContext {
    event_sender: Option<EventSender>,
    correlation_id: Option<String>,
}

impl PlatformContext {
    /// Create a new platform context with event emission capabilities
    pub fn new(event_sender: Option<EventSender>) -> Self {
        Self {
            event_sender,
            correlation_id: None,
        }
    }

    /// Stamp every event emitted through this context with `id`
    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Emit a platform event if an event sender is available
    pub fn emit_platform(&self, event: PlatformEvent) {
        self.emit(AppEvent::Platform(event));
    }

    /// Run `f`, reporting it as started, then completed or failed
    pub async fn execute_with_events<T, F>(
        &self,
        context: PlatformOperationContext,
        f: F,
    ) -> Result<T, PlatformError>
    where
        F: Future<Output = Result<T, PlatformError>>,
    {
        let start = Instant::now();
        self.emit_platform(PlatformEvent::OperationStarted {
            context: context.clone(),
        });

        let result = f.await;
        let metrics = Some(duration_metrics(start.elapsed()));

        match &result {
            Ok(_) => self.emit_platform(PlatformEvent::OperationCompleted { context, metrics }),
            Err(e) => self.emit_platform(PlatformEvent::OperationFailed {
                context,
                failure: FailureContext::from_error(e),
                metrics,
            }),
        }

        result
    }
}

impl EventEmitter for PlatformContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }

    fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

pub(crate) fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub(crate) fn duration_metrics(duration: Duration) -> PlatformOperationMetrics {
    PlatformOperationMetrics {
        duration_ms: Some(duration_to_millis(duration)),
        ..PlatformOperationMetrics::default()
    }
}

/// Main platform abstraction providing access to all platform operations
pub struct Platform {
    filesystem_ops: Box<dyn FilesystemOperations>,
    process_ops: Box<dyn ProcessOperations>,
}

impl Platform {
    /// Create a new platform instance with the specified implementations
    pub fn new(
        filesystem_ops: Box<dyn FilesystemOperations>,
        process_ops: Box<dyn ProcessOperations>,
    ) -> Self {
        Self {
            filesystem_ops,
            process_ops,
        }
    }

    /// Platform backed by the host operating system
    pub fn current() -> Self {
        crate::implementations::native::NativePlatform::new()
    }

    /// Access filesystem operations
    pub fn filesystem(&self) -> &dyn FilesystemOperations {
        &*self.filesystem_ops
    }

    /// Access process operations
    pub fn process(&self) -> &dyn ProcessOperations {
        &*self.process_ops
    }

    /// Convenience method: Create a new command builder
    pub fn command(&self, program: &str) -> crate::process::PlatformCommand {
        self.process().create_command(program)
    }

    /// Convenience method: Execute a command and get output
    pub async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: crate::process::PlatformCommand,
    ) -> Result<crate::process::CommandOutput, PlatformError> {
        self.process().execute_command(ctx, cmd).await
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}
