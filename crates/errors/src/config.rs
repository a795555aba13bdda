//! Configuration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("cannot determine working directory: {message}")]
    WorkingDirectory { message: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidValue { field, .. } => Some(match field.as_str() {
                "prefix" => "Pass a non-empty directory to --prefix.",
                _ => "Fix the configuration value and retry.",
            }),
            Self::WorkingDirectory { .. } => {
                Some("Run the installer from the root of the project checkout.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::InvalidValue { .. } => "config.invalid_value",
            Self::WorkingDirectory { .. } => "config.working_directory",
        };
        Some(code)
    }
}
