//! xibao-install - builds xibao-gen and stages it under an install prefix
//!
//! Runs the release build in the current directory, then copies the binary
//! to `<prefix>/bin` and the resource tree to `<prefix>/share/xibao-gen`.

mod cli;
mod error;
mod events;
mod logging;

use crate::cli::Cli;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use std::process;
use tokio::select;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xibao_config::InstallConfig;
use xibao_events::EventReceiver;
use xibao_installer::{InstallReport, Installer};
use xibao_platform::Platform;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing();

    if let Err(e) = run(cli).await {
        eprintln!("Fatal error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting xibao-install v{}", env!("CARGO_PKG_VERSION"));

    let config = InstallConfig::from_current_dir(cli.prefix)?;
    debug!(
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "Resolved install configuration"
    );

    let (event_sender, event_receiver) = xibao_events::channel();
    let installer = Installer::new(config, Platform::current()).with_event_sender(event_sender);

    let mut event_handler = EventHandler::new();
    let report = install_with_events(installer, event_receiver, &mut event_handler).await?;

    println!(
        "Installed {} to {} ({} resource files in {})",
        report.app,
        report.binary_path.display(),
        report.resource_files,
        report.resource_path.display()
    );

    info!("Installation completed successfully");
    Ok(())
}

/// Drive the installer while rendering its events as they arrive
async fn install_with_events(
    installer: Installer,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler<std::io::Stderr>,
) -> Result<InstallReport, CliError> {
    let mut install_future = Box::pin(async move { installer.install().await });
    let mut channel_open = true;

    loop {
        select! {
            result = &mut install_future => {
                while let Ok(message) = event_receiver.try_recv() {
                    event_handler.handle_event(&message);
                }
                return result.map_err(CliError::from);
            }

            message = event_receiver.recv(), if channel_open => {
                match message {
                    Some(message) => event_handler.handle_event(&message),
                    None => channel_open = false,
                }
            }
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
