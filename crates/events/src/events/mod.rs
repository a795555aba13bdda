use serde::{Deserialize, Serialize};

use crate::EventSource;
use xibao_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code, when the error has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod build;
pub mod install;
pub mod platform;

pub use build::*;
pub use install::*;
pub use platform::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Release build of the companion project
    Build(BuildEvent),

    /// Installation steps
    Install(InstallEvent),

    /// Filesystem and process primitives
    Platform(PlatformEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::Build(_) => EventSource::BUILD,
            Self::Install(_) => EventSource::INSTALL,
            Self::Platform(_) => EventSource::PLATFORM,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Build(BuildEvent::Failed { .. })
            | Self::Install(InstallEvent::StepFailed { .. } | InstallEvent::Failed { .. })
            | Self::Platform(PlatformEvent::OperationFailed { .. }) => Level::ERROR,

            Self::Platform(
                PlatformEvent::OperationStarted { .. } | PlatformEvent::OperationCompleted { .. },
            ) => Level::DEBUG,

            _ => Level::INFO,
        }
    }
}
