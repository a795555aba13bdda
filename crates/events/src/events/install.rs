use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// The ordered steps of an installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStep {
    Directories,
    Build,
    Binary,
    Resources,
}

impl InstallStep {
    /// All steps in execution order.
    pub const ALL: [InstallStep; 4] = [
        InstallStep::Directories,
        InstallStep::Build,
        InstallStep::Binary,
        InstallStep::Resources,
    ];

    /// Short human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Directories => "prepare directories",
            Self::Build => "release build",
            Self::Binary => "stage binary",
            Self::Resources => "stage resources",
        }
    }
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Installation domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InstallEvent {
    /// Installation started
    Started { app: String, prefix: PathBuf },

    /// One step started
    StepStarted { step: InstallStep },

    /// A missing directory was created
    DirectoryCreated { path: PathBuf },

    /// One step completed
    StepCompleted { step: InstallStep, duration: Duration },

    /// One step failed; later steps do not run
    StepFailed {
        step: InstallStep,
        failure: super::FailureContext,
    },

    /// Installation completed successfully
    Completed {
        app: String,
        binary_path: PathBuf,
        resource_path: PathBuf,
        resource_files: usize,
        duration: Duration,
    },

    /// Installation aborted
    Failed {
        app: String,
        step: InstallStep,
        failure: super::FailureContext,
    },
}
