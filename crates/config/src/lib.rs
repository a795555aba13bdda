#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration for the xibao-gen installer
//!
//! The whole run is driven by one [`InstallConfig`] value, built from
//! defaults plus the `--prefix` flag and handed explicitly to the installer.

pub mod constants;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use xibao_errors::ConfigError;

/// External command that produces the release build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl BuildCommand {
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self::new(constants::BUILD_PROGRAM, constants::BUILD_ARGS.iter().copied())
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Everything one install run needs to know
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Root under which `bin/` and `share/` are populated.
    pub prefix: PathBuf,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Project checkout the build runs in.
    pub project_dir: PathBuf,
    #[serde(default = "default_resource_dir")]
    pub resource_dir: PathBuf,
    #[serde(default = "default_release_dir")]
    pub release_dir: PathBuf,
    #[serde(default)]
    pub build: BuildCommand,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            prefix: PathBuf::from(constants::DEFAULT_PREFIX),
            app_name: default_app_name(),
            project_dir: PathBuf::from("."),
            resource_dir: default_resource_dir(),
            release_dir: default_release_dir(),
            build: BuildCommand::default(),
        }
    }
}

impl InstallConfig {
    /// Configuration for installing the project checked out in `project_dir`.
    #[must_use]
    pub fn new(prefix: impl Into<PathBuf>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            project_dir: project_dir.into(),
            ..Self::default()
        }
    }

    /// Configuration for the project in the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current working directory cannot be read.
    pub fn from_current_dir(prefix: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::WorkingDirectory {
            message: e.to_string(),
        })?;
        Ok(Self::new(prefix, cwd))
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    #[must_use]
    pub fn with_project_dir(mut self, project_dir: impl Into<PathBuf>) -> Self {
        self.project_dir = project_dir.into();
        self
    }

    #[must_use]
    pub fn with_resource_dir(mut self, resource_dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = resource_dir.into();
        self
    }

    #[must_use]
    pub fn with_release_dir(mut self, release_dir: impl Into<PathBuf>) -> Self {
        self.release_dir = release_dir.into();
        self
    }

    #[must_use]
    pub fn with_build_command(mut self, build: BuildCommand) -> Self {
        self.build = build;
        self
    }

    /// `prefix/bin`
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.prefix.join(constants::BIN_DIR)
    }

    /// `prefix/share`
    #[must_use]
    pub fn share_dir(&self) -> PathBuf {
        self.prefix.join(constants::SHARE_DIR)
    }

    /// Directories that must exist before anything is staged, in creation order.
    #[must_use]
    pub fn directories(&self) -> [PathBuf; 3] {
        [self.prefix.clone(), self.bin_dir(), self.share_dir()]
    }

    /// Executable produced by the release build.
    #[must_use]
    pub fn binary_source(&self) -> PathBuf {
        self.project_dir.join(&self.release_dir).join(&self.app_name)
    }

    #[must_use]
    pub fn binary_destination(&self) -> PathBuf {
        self.bin_dir().join(&self.app_name)
    }

    #[must_use]
    pub fn resource_source(&self) -> PathBuf {
        self.project_dir.join(&self.resource_dir)
    }

    #[must_use]
    pub fn resource_destination(&self) -> PathBuf {
        self.share_dir().join(&self.app_name)
    }

    /// Reject values that would make the derived paths escape the prefix or
    /// leave nothing to run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.as_os_str().is_empty() {
            return Err(invalid("prefix", &self.prefix.display().to_string()));
        }
        if !is_plain_file_name(&self.app_name) {
            return Err(invalid("app_name", &self.app_name));
        }
        if self.build.program.trim().is_empty() {
            return Err(invalid("build.program", &self.build.program));
        }
        tracing::debug!(prefix = %self.prefix.display(), app = %self.app_name, "configuration validated");
        Ok(())
    }
}

fn invalid(field: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    ) && !name.contains('/')
}

fn default_app_name() -> String {
    constants::APP_NAME.to_string()
}

fn default_resource_dir() -> PathBuf {
    PathBuf::from(constants::RESOURCE_DIR)
}

fn default_release_dir() -> PathBuf {
    PathBuf::from(constants::RELEASE_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_layout() {
        let config = InstallConfig::default();
        assert_eq!(config.prefix, PathBuf::from("/usr/local/"));
        assert_eq!(config.bin_dir(), PathBuf::from("/usr/local/bin"));
        assert_eq!(config.share_dir(), PathBuf::from("/usr/local/share"));
        assert_eq!(
            config.binary_destination(),
            PathBuf::from("/usr/local/bin/xibao-gen")
        );
        assert_eq!(
            config.resource_destination(),
            PathBuf::from("/usr/local/share/xibao-gen")
        );
        assert_eq!(config.build.to_string(), "cargo build --release");
    }

    #[test]
    fn derived_directories_stay_under_the_prefix() {
        let config = InstallConfig::new("/tmp/x", "/src/xibao-gen");
        for dir in config.directories() {
            assert!(dir.starts_with(&config.prefix), "{} escaped", dir.display());
        }
        assert_eq!(
            config.directories(),
            [
                PathBuf::from("/tmp/x"),
                PathBuf::from("/tmp/x/bin"),
                PathBuf::from("/tmp/x/share")
            ]
        );
        assert_eq!(
            config.binary_source(),
            PathBuf::from("/src/xibao-gen/target/release/xibao-gen")
        );
        assert_eq!(
            config.resource_source(),
            PathBuf::from("/src/xibao-gen/resource")
        );
    }

    #[test]
    fn validation_rejects_unusable_values() {
        assert!(InstallConfig::default().validate().is_ok());

        let empty_prefix = InstallConfig::default().with_prefix("");
        assert!(matches!(
            empty_prefix.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "prefix"
        ));

        for name in ["", "..", ".", "a/b", "/abs"] {
            let config = InstallConfig::default().with_app_name(name);
            assert!(config.validate().is_err(), "accepted app name {name:?}");
        }

        let no_program = InstallConfig::default()
            .with_build_command(BuildCommand::new(" ", Vec::<String>::new()));
        assert!(no_program.validate().is_err());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: InstallConfig =
            serde_json::from_str(r#"{"prefix":"/opt/xg","project_dir":"/src"}"#).unwrap();
        assert_eq!(config.app_name, "xibao-gen");
        assert_eq!(config.build, BuildCommand::default());
        assert_eq!(config.resource_dir, PathBuf::from("resource"));
    }
}
