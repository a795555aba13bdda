//! Integration tests for config

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use xibao_config::constants::DEFAULT_PREFIX;
    use xibao_config::*;
    use xibao_errors::ConfigError;

    #[test]
    fn test_from_current_dir_builds_in_cwd() {
        let config = InstallConfig::from_current_dir(DEFAULT_PREFIX).unwrap();

        assert_eq!(config.project_dir, std::env::current_dir().unwrap());
        assert_eq!(
            config.binary_source(),
            config.project_dir.join("target/release/xibao-gen")
        );
        assert_eq!(config.resource_source(), config.project_dir.join("resource"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = InstallConfig::new("/opt/x", "/src/project")
            .with_app_name("demo")
            .with_resource_dir("assets")
            .with_release_dir("out")
            .with_build_command(BuildCommand::new("make", ["all"]));

        assert_eq!(config.binary_source(), PathBuf::from("/src/project/out/demo"));
        assert_eq!(config.binary_destination(), PathBuf::from("/opt/x/bin/demo"));
        assert_eq!(config.resource_source(), PathBuf::from("/src/project/assets"));
        assert_eq!(
            config.resource_destination(),
            PathBuf::from("/opt/x/share/demo")
        );
        assert_eq!(config.build.to_string(), "make all");
    }

    #[test]
    fn test_invalid_prefix_names_the_field() {
        let err = InstallConfig::new("", ".").validate().unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "prefix"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_config_serializes_for_logging() {
        let config = InstallConfig::new("/opt/x", "/src/project");
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["prefix"], "/opt/x");
        assert_eq!(json["app_name"], "xibao-gen");
        assert_eq!(json["build"]["program"], "cargo");
        assert_eq!(json["build"]["args"][0], "build");
    }
}
