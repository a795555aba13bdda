//! Shared fixtures for installer tests

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use xibao_config::{BuildCommand, InstallConfig};

pub const BINARY_PAYLOAD: &str = "#!/bin/sh\necho xibao\n";

/// A throwaway project checkout plus a prefix to install into
pub struct Fixture {
    pub root: TempDir,
    pub project: PathBuf,
    pub prefix: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let project = root.path().join("project");
        let prefix = root.path().join("prefix");

        let resource = project.join("resource");
        std::fs::create_dir_all(resource.join("fonts")).unwrap();
        std::fs::create_dir_all(resource.join("images/bg")).unwrap();
        std::fs::write(resource.join("fonts/title.ttf"), b"ttf-bytes").unwrap();
        std::fs::write(resource.join("images/bg/red.png"), [0x89, b'P', b'N', b'G']).unwrap();
        std::fs::write(resource.join("README"), "resources for xibao-gen").unwrap();

        Self {
            root,
            project,
            prefix,
        }
    }

    /// Build script that produces the release artifact
    pub fn successful_build() -> String {
        format!(
            "mkdir -p target/release && printf '{}' > target/release/xibao-gen && chmod 755 target/release/xibao-gen",
            BINARY_PAYLOAD.replace('\n', "\\n")
        )
    }

    pub fn config_with_script(&self, script: &str) -> InstallConfig {
        InstallConfig::new(&self.prefix, &self.project)
            .with_build_command(BuildCommand::new("sh", ["-c", script]))
    }

    pub fn config(&self) -> InstallConfig {
        self.config_with_script(&Self::successful_build())
    }

    pub fn artifact(&self) -> PathBuf {
        self.project.join("target/release/xibao-gen")
    }
}

/// Relative path -> contents for every file under `root`
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                out.insert(rel, std::fs::read(&path).unwrap());
            }
        }
    }

    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}
