#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the xibao-gen installer
//!
//! Errors are grouped by domain (configuration, build, installation,
//! platform primitives) and folded into a single [`Error`] at crate
//! boundaries.

use std::borrow::Cow;

use thiserror::Error;

pub mod build;
pub mod config;
pub mod install;
pub mod platform;

pub use build::BuildError;
pub use config::ConfigError;
pub use install::InstallError;
pub use platform::PlatformError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("install error: {0}")]
    Install(#[from] InstallError),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Result type alias for installer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Config(err) => err.user_message(),
            Error::Build(err) => err.user_message(),
            Error::Install(err) => err.user_message(),
            Error::Platform(err) => err.user_message(),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_hint(),
            Error::Build(err) => err.user_hint(),
            Error::Install(err) => err.user_hint(),
            Error::Platform(err) => err.user_hint(),
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Install(err) => err.is_retryable(),
            Error::Config(err) => err.is_retryable(),
            Error::Build(err) => err.is_retryable(),
            Error::Platform(err) => err.is_retryable(),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_code(),
            Error::Build(err) => err.user_code(),
            Error::Install(err) => err.user_code(),
            Error::Platform(err) => err.user_code(),
        }
    }
}
