//! Platform operation errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors raised by the filesystem and process primitives
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    #[error("filesystem operation failed: {operation} - {message}")]
    FilesystemOperationFailed { operation: String, message: String },

    #[error("destination already exists: {path}")]
    AlreadyExists { path: String },

    #[error("process execution failed: {command} - {message}")]
    ProcessExecutionFailed { command: String, message: String },

    #[error("permission denied: {operation} - {message}")]
    PermissionDenied { operation: String, message: String },
}

impl PlatformError {
    /// Classify an I/O error raised while performing `operation` on `path`.
    pub fn from_io(operation: &str, path: &std::path::Path, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                operation: operation.to_string(),
                message: format!("{}: {err}", path.display()),
            },
            _ => Self::FilesystemOperationFailed {
                operation: operation.to_string(),
                message: format!("{}: {err}", path.display()),
            },
        }
    }
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ProcessExecutionFailed { .. } => {
                Some("Make sure the build tool is installed and on PATH.")
            }
            Self::PermissionDenied { .. } => {
                Some("Re-run with sufficient privileges or choose a writable --prefix.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::FilesystemOperationFailed { .. } => "platform.filesystem_operation_failed",
            Self::AlreadyExists { .. } => "platform.already_exists",
            Self::ProcessExecutionFailed { .. } => "platform.process_execution_failed",
            Self::PermissionDenied { .. } => "platform.permission_denied",
        };
        Some(code)
    }
}
