#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for the xibao-gen installer
//!
//! Library crates never print. They report what they do as [`AppEvent`]s on
//! an unbounded channel; the CLI decides how to render and log them.

pub mod meta;
pub use meta::{EventLevel, EventMeta, EventSource};

pub mod events;
pub use events::{
    AppEvent, BuildEvent, FailureContext, InstallEvent, InstallStep,
    PlatformEvent, PlatformOperationContext, PlatformOperationKind, PlatformOperationMetrics,
    ProcessCommandDescriptor,
};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// An event together with its metadata, as carried over the channel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventMessage {
    pub meta: EventMeta,
    pub event: AppEvent,
}

impl EventMessage {
    /// Wrap an event, deriving level and source from the event itself.
    #[must_use]
    pub fn from_event(event: AppEvent) -> Self {
        let meta = EventMeta::new(event.log_level(), event.event_source());
        Self { meta, event }
    }

    /// Serialize for structured log output.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }
}

/// Sending half of the event channel
pub type EventSender = UnboundedSender<EventMessage>;

/// Receiving half of the event channel
pub type EventReceiver = UnboundedReceiver<EventMessage>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Single API for emitting events from anything that may hold a sender
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Correlation id stamped on every emitted event, if any
    fn correlation_id(&self) -> Option<&str> {
        None
    }

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            let mut message = EventMessage::from_event(event);
            if let Some(id) = self.correlation_id() {
                message.meta = message.meta.with_correlation_id(id);
            }
            // Receiver may already be gone; nothing to do then.
            let _ = sender.send(message);
        }
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

impl EventEmitter for Option<EventSender> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tagged {
        tx: EventSender,
    }

    impl EventEmitter for Tagged {
        fn event_sender(&self) -> Option<&EventSender> {
            Some(&self.tx)
        }

        fn correlation_id(&self) -> Option<&str> {
            Some("install-1")
        }
    }

    #[tokio::test]
    async fn emitted_events_carry_derived_metadata() {
        let (tx, mut rx) = channel();
        let emitter = Tagged { tx };

        emitter.emit(AppEvent::Install(InstallEvent::StepStarted {
            step: InstallStep::Build,
        }));
        emitter.emit(AppEvent::Install(InstallEvent::StepFailed {
            step: InstallStep::Build,
            failure: FailureContext::new(None::<String>, "careful", None::<String>, false),
        }));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.meta.source, EventSource::INSTALL);
        assert_eq!(first.meta.level, EventLevel::Info);
        assert_eq!(first.meta.correlation_id.as_deref(), Some("install-1"));

        let second = rx.recv().await.unwrap();
        assert_eq!(second.meta.level, EventLevel::Error);
        assert!(second.to_json().contains("careful"));
    }

    #[test]
    fn emitting_without_a_sender_is_a_no_op() {
        let none: Option<EventSender> = None;
        none.emit(AppEvent::Install(InstallEvent::StepStarted {
            step: InstallStep::Directories,
        }));
    }

    #[test]
    fn failures_map_to_error_level() {
        let event = AppEvent::Build(BuildEvent::Failed {
            command: "cargo build --release".into(),
            exit_code: Some(101),
            failure: FailureContext::new(Some("build.failed"), "boom", None::<String>, false),
        });
        assert_eq!(event.log_level(), tracing::Level::ERROR);
        assert_eq!(event.event_source(), EventSource::BUILD);
    }

    #[test]
    fn steps_run_in_declared_order() {
        assert_eq!(
            InstallStep::ALL,
            [
                InstallStep::Directories,
                InstallStep::Build,
                InstallStep::Binary,
                InstallStep::Resources
            ]
        );
        assert_eq!(InstallStep::Resources.to_string(), "stage resources");
    }
}
