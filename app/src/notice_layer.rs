//! Tracing layer that mirrors log events into the notice buffer
//!
//! Events at INFO and above from the atlas itself are forwarded; Dioxus and
//! networking internals are skipped.

use crate::state::{NoticeBuffer, NoticeLevel};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Prefixes of targets to ignore (Dioxus internals, etc.)
const IGNORED_TARGET_PREFIXES: &[&str] = &[
    "dioxus",
    "tao::",
    "wry::",
    "mio::",
    "tokio",
    "hyper",
    "reqwest",
    "rustls",
    "tracing",
];

/// A tracing layer that captures events into a NoticeBuffer
pub struct NoticeLayer {
    buffer: NoticeBuffer,
}

impl NoticeLayer {
    pub fn new(buffer: NoticeBuffer) -> Self {
        Self { buffer }
    }

    fn should_ignore_target(target: &str) -> bool {
        IGNORED_TARGET_PREFIXES
            .iter()
            .any(|prefix| target.starts_with(prefix))
    }
}

impl<S: Subscriber> Layer<S> for NoticeLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let Some(level) = NoticeLevel::from_tracing(*event.metadata().level()) else {
            return;
        };
        if Self::should_ignore_target(event.metadata().target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.buffer.push(level, visitor.message);
    }
}

/// Visitor to extract the message from a tracing event
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else if self.message.is_empty() {
            self.message = format!("{}: {:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else if self.message.is_empty() {
            self.message = format!("{}: {}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tracing_subscriber::prelude::*;

    #[test]
    fn test_forwards_atlas_events() {
        let buffer = NoticeBuffer::new();
        let subscriber = tracing_subscriber::registry().with(NoticeLayer::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden");
            tracing::warn!("Could not show {}: {}", "C9", "missing");
        });

        let line = buffer.latest_line().unwrap();
        assert_eq!(line.level, NoticeLevel::Warn);
        assert_eq!(line.message, "Could not show C9: missing");
        assert_eq!(buffer.snapshot().len(), 1);
    }

    #[test]
    fn test_ignores_framework_targets() {
        assert!(NoticeLayer::should_ignore_target("dioxus_core::diff"));
        assert!(NoticeLayer::should_ignore_target("reqwest::connect"));
        assert!(!NoticeLayer::should_ignore_target("sharn_core::session"));
    }
}
