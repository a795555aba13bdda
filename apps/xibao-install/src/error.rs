//! CLI error handling

use std::fmt;

use xibao_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(xibao_errors::ConfigError),
    /// Installation error
    Install(xibao_errors::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => {
                write!(f, "Configuration error: ")?;
                write_user_facing(f, e)
            }
            CliError::Install(e) => write_user_facing(f, e),
        }
    }
}

fn write_user_facing(f: &mut fmt::Formatter<'_>, e: &dyn UserFacingError) -> fmt::Result {
    write!(f, "{}", e.user_message())?;
    if let Some(code) = e.user_code() {
        write!(f, "\n  Code: {code}")?;
    }
    if let Some(hint) = e.user_hint() {
        write!(f, "\n  Hint: {hint}")?;
    }
    Ok(())
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Install(e) => Some(e),
        }
    }
}

impl From<xibao_errors::ConfigError> for CliError {
    fn from(e: xibao_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<xibao_errors::Error> for CliError {
    fn from(e: xibao_errors::Error) -> Self {
        match e {
            xibao_errors::Error::Config(e) => CliError::Config(e),
            other => CliError::Install(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xibao_errors::{BuildError, InstallError};

    #[test]
    fn install_errors_render_code_and_hint() {
        let err = CliError::from(xibao_errors::Error::from(InstallError::DestinationExists {
            path: "/usr/local/share/xibao-gen".into(),
        }));
        let rendered = err.to_string();
        assert!(rendered.starts_with("destination already exists: /usr/local/share/xibao-gen"));
        assert!(rendered.contains("Code: install.destination_exists"));
        assert!(rendered.contains("Hint: "));
    }

    #[test]
    fn build_failures_mention_the_exit_status() {
        let err = CliError::from(xibao_errors::Error::from(BuildError::Failed {
            command: "cargo build --release".into(),
            code: Some(101),
        }));
        assert!(err.to_string().contains("exited with status 101"));
    }

    #[test]
    fn config_errors_are_unwrapped() {
        let err = CliError::from(xibao_errors::Error::from(
            xibao_errors::ConfigError::InvalidValue {
                field: "prefix".into(),
                value: String::new(),
            },
        ));
        assert!(matches!(err, CliError::Config(_)));
        let rendered = err.to_string();
        assert!(rendered.starts_with("Configuration error: invalid value for prefix"));
        assert!(rendered.contains("\n  Code: config.invalid_value"));
        assert!(rendered.contains("\n  Hint: Pass a non-empty directory to --prefix."));
    }
}
