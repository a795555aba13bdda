//! Build step error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The build process ran but exited unsuccessfully. `code` is `None`
    /// when the process was terminated by a signal.
    #[error("build failed: `{command}` {}", describe_exit(.code))]
    Failed { command: String, code: Option<i32> },

    #[error("build artifact not found: {path}")]
    ArtifactMissing { path: String },
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl BuildError {
    /// Exit status carried by a failed build, if any.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Failed { code, .. } => *code,
            Self::ArtifactMissing { .. } => None,
        }
    }
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Failed { .. } => {
                Some("Fix the build errors shown above, then run the installer again.")
            }
            Self::ArtifactMissing { .. } => {
                Some("Make sure the release build produces the application binary.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Failed { .. } => "build.failed",
            Self::ArtifactMissing { .. } => "build.artifact_missing",
        };
        Some(code)
    }
}
