use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a successful installation
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub app: String,
    pub prefix: PathBuf,
    /// Directories that did not exist before this run
    pub created_directories: Vec<PathBuf>,
    pub build_exit_code: Option<i32>,
    pub binary_path: PathBuf,
    pub binary_bytes: u64,
    pub resource_path: PathBuf,
    pub resource_files: usize,
    pub duration: Duration,
}
