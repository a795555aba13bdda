//! Platform operation events

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of platform operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformOperationKind {
    Filesystem,
    Process,
}

/// Descriptor of a spawned command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessCommandDescriptor {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

/// What a platform operation acted on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformOperationContext {
    pub kind: PlatformOperationKind,
    pub operation: String,
    pub target: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub command: Option<ProcessCommandDescriptor>,
}

/// Measurements collected once an operation ends
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformOperationMetrics {
    pub duration_ms: Option<u64>,
    pub exit_code: Option<i32>,
    pub changes: Option<Vec<String>>,
}

/// Platform operation events for filesystem and process primitives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PlatformEvent {
    OperationStarted {
        context: PlatformOperationContext,
    },
    OperationCompleted {
        context: PlatformOperationContext,
        metrics: Option<PlatformOperationMetrics>,
    },
    OperationFailed {
        context: PlatformOperationContext,
        failure: super::FailureContext,
        metrics: Option<PlatformOperationMetrics>,
    },
}
