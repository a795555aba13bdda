//! Progress display for install events

use std::io::Write;
use xibao_events::{AppEvent, EventMessage, InstallEvent};

/// Renders install progress to stderr and mirrors every event into tracing
pub struct EventHandler<W: Write> {
    out: W,
}

impl EventHandler<std::io::Stderr> {
    pub fn new() -> Self {
        Self {
            out: std::io::stderr(),
        }
    }
}

impl Default for EventHandler<std::io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> EventHandler<W> {
    #[cfg(test)]
    fn with_writer(out: W) -> Self {
        Self { out }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: &EventMessage) {
        crate::logging::log_event_with_tracing(message);

        if let Some(line) = status_line(&message.event) {
            // A closed stderr is not worth failing the install over.
            let _ = writeln!(self.out, "{line}");
        }
    }
}

fn status_line(event: &AppEvent) -> Option<String> {
    match event {
        AppEvent::Install(InstallEvent::Started { app, prefix }) => Some(format!(
            "Installing {app} into {}",
            prefix.display()
        )),
        AppEvent::Install(InstallEvent::StepStarted { step }) => Some(format!("==> {step}")),
        AppEvent::Install(InstallEvent::DirectoryCreated { path }) => {
            Some(format!("    created {}", path.display()))
        }
        AppEvent::Install(InstallEvent::StepFailed { step, .. }) => {
            Some(format!("    {step} failed"))
        }
        _ => None,
    }
}
