//! Installation error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum InstallError {
    /// The resource tree is never merged into an existing directory.
    #[error("destination already exists: {path}")]
    DestinationExists { path: String },

    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    #[error("filesystem operation failed: {operation} on {path}: {message}")]
    FilesystemError {
        operation: String,
        path: String,
        message: String,
    },
}

impl InstallError {
    /// Build a [`InstallError::FilesystemError`] for `operation` on `path`.
    pub fn filesystem(
        operation: impl Into<String>,
        path: &std::path::Path,
        err: &impl std::fmt::Display,
    ) -> Self {
        Self::FilesystemError {
            operation: operation.into(),
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl UserFacingError for InstallError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::DestinationExists { .. } => Some(
                "Remove the existing resource directory (or choose another --prefix) and retry.",
            ),
            Self::NotADirectory { .. } => {
                Some("Move the conflicting file out of the way or choose another --prefix.")
            }
            Self::FilesystemError { .. } => {
                Some("Check that the paths exist and that you have write permission.")
            }
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::FilesystemError { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::DestinationExists { .. } => "install.destination_exists",
            Self::NotADirectory { .. } => "install.not_a_directory",
            Self::FilesystemError { .. } => "install.filesystem_error",
        };
        Some(code)
    }
}
