//! Fixed names and defaults shared by the installer

/// Install prefix used when `--prefix` is not given.
pub const DEFAULT_PREFIX: &str = "/usr/local/";

/// Name of the installed application; names both the executable and its
/// resource directory under `share/`.
pub const APP_NAME: &str = "xibao-gen";

pub const BIN_DIR: &str = "bin";
pub const SHARE_DIR: &str = "share";

/// Resource tree shipped next to the sources, relative to the project root.
pub const RESOURCE_DIR: &str = "resource";

/// Where the release build leaves its artifacts, relative to the project root.
pub const RELEASE_DIR: &str = "target/release";

pub const BUILD_PROGRAM: &str = "cargo";
pub const BUILD_ARGS: &[&str] = &["build", "--release"];
