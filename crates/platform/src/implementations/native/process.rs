//! Native process operations on top of `tokio::process`

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use xibao_errors::PlatformError;
use xibao_events::{
    FailureContext, PlatformEvent, PlatformOperationContext, PlatformOperationKind,
    PlatformOperationMetrics, ProcessCommandDescriptor,
};

use crate::core::{duration_to_millis, PlatformContext};
use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};

/// Process operations backed by `tokio::process`
pub struct NativeProcessOperations;

impl NativeProcessOperations {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeProcessOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn process_context(descriptor: ProcessCommandDescriptor) -> PlatformOperationContext {
    PlatformOperationContext {
        kind: PlatformOperationKind::Process,
        operation: "execute_command".to_string(),
        target: None,
        source: None,
        command: Some(descriptor),
    }
}

async fn run(cmd: &PlatformCommand) -> Result<CommandOutput, std::io::Error> {
    let mut command = Command::new(cmd.program());
    command.args(cmd.get_args());

    if let Some(dir) = cmd.get_current_dir() {
        command.current_dir(dir);
    }

    if cmd.inherits_stdio() {
        let status = command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;
        Ok(CommandOutput {
            status,
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    } else {
        let output = command.output().await?;
        Ok(CommandOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[async_trait]
impl ProcessOperations for NativeProcessOperations {
    async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, PlatformError> {
        let start = Instant::now();
        let descriptor = ProcessCommandDescriptor {
            program: cmd.program().to_string(),
            args: cmd.get_args().to_vec(),
            cwd: cmd.get_current_dir().cloned(),
        };

        ctx.emit_platform(PlatformEvent::OperationStarted {
            context: process_context(descriptor.clone()),
        });
        tracing::debug!(command = %cmd.display(), cwd = ?cmd.get_current_dir(), "spawning process");

        // No timeout: the caller waits for as long as the child runs.
        let result = run(&cmd)
            .await
            .map_err(|e| PlatformError::ProcessExecutionFailed {
                command: cmd.display(),
                message: e.to_string(),
            });

        let duration_ms = Some(duration_to_millis(start.elapsed()));

        match &result {
            Ok(output) => ctx.emit_platform(PlatformEvent::OperationCompleted {
                context: process_context(descriptor),
                metrics: Some(PlatformOperationMetrics {
                    duration_ms,
                    exit_code: output.status.code(),
                    changes: None,
                }),
            }),
            Err(e) => ctx.emit_platform(PlatformEvent::OperationFailed {
                context: process_context(descriptor),
                failure: FailureContext::from_error(e),
                metrics: Some(PlatformOperationMetrics {
                    duration_ms,
                    ..PlatformOperationMetrics::default()
                }),
            }),
        }

        result
    }
}
