//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;
use xibao_config::constants::DEFAULT_PREFIX;

/// Installer script for xibao-gen
#[derive(Parser, Debug)]
#[command(name = "xibao-install")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build xibao-gen and install it with its resources")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory to install into
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PREFIX)]
    pub prefix: PathBuf,
}
