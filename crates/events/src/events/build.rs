use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Events for the release build of the companion project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildEvent {
    /// Build process spawned
    Started {
        command: String,
        working_dir: PathBuf,
    },

    /// Build process exited successfully
    Completed { command: String, duration: Duration },

    /// Build process exited unsuccessfully or could not be spawned
    Failed {
        command: String,
        exit_code: Option<i32>,
        failure: super::FailureContext,
    },
}
