//! Structured logging integration for events
//!
//! Converts install events into tracing records with structured fields.
//! Failures are recorded at debug level; `main` reports them to the user.

use tracing::{debug, info};
use xibao_events::{AppEvent, BuildEvent, EventMessage, InstallEvent, PlatformEvent};

/// Log an event using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    let source = meta.source.as_str();
    let run = meta.correlation_id.as_deref().unwrap_or("-");

    match &message.event {
        AppEvent::Install(event) => match event {
            InstallEvent::Started { app, prefix } => {
                info!(source, run, app = %app, prefix = %prefix.display(), "Installation started");
            }
            InstallEvent::StepStarted { step } => {
                info!(source, run, step = %step, "Step started");
            }
            InstallEvent::DirectoryCreated { path } => {
                info!(source, run, path = %path.display(), "Directory created");
            }
            InstallEvent::StepCompleted { step, duration } => {
                info!(source, run, step = %step, duration = ?duration, "Step completed");
            }
            InstallEvent::StepFailed { step, failure } => {
                debug!(
                    source,
                    run,
                    step = %step,
                    code = ?failure.code,
                    reason = %failure.message,
                    hint = ?failure.hint,
                    "Step failed"
                );
            }
            InstallEvent::Completed {
                app,
                binary_path,
                resource_path,
                resource_files,
                duration,
            } => {
                info!(
                    source,
                    run,
                    app = %app,
                    binary = %binary_path.display(),
                    resources = %resource_path.display(),
                    resource_files,
                    duration = ?duration,
                    "Installation completed"
                );
            }
            InstallEvent::Failed { app, step, failure } => {
                debug!(
                    source,
                    run,
                    app = %app,
                    step = %step,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    reason = %failure.message,
                    "Installation failed"
                );
            }
        },

        AppEvent::Build(event) => match event {
            BuildEvent::Started {
                command,
                working_dir,
            } => {
                info!(source, run, command = %command, dir = %working_dir.display(), "Build started");
            }
            BuildEvent::Completed { command, duration } => {
                info!(source, run, command = %command, duration = ?duration, "Build completed");
            }
            BuildEvent::Failed {
                command,
                exit_code,
                failure,
            } => {
                debug!(
                    source,
                    run,
                    command = %command,
                    exit_code = ?exit_code,
                    reason = %failure.message,
                    "Build failed"
                );
            }
        },

        AppEvent::Platform(event) => match event {
            PlatformEvent::OperationStarted { context } => {
                debug!(
                    source,
                    run,
                    operation = %context.operation,
                    target = ?context.target,
                    "Platform operation started"
                );
            }
            PlatformEvent::OperationCompleted { context, metrics } => {
                debug!(
                    source,
                    run,
                    operation = %context.operation,
                    target = ?context.target,
                    duration_ms = ?metrics.as_ref().and_then(|m| m.duration_ms),
                    exit_code = ?metrics.as_ref().and_then(|m| m.exit_code),
                    "Platform operation completed"
                );
            }
            PlatformEvent::OperationFailed {
                context, failure, ..
            } => {
                debug!(
                    source,
                    run,
                    operation = %context.operation,
                    target = ?context.target,
                    reason = %failure.message,
                    "Platform operation failed"
                );
            }
        },
    }

    tracing::trace!(event = %message.to_json(), "raw event");
}
