//! Notice buffer
//!
//! Collects user-facing messages: blocking notices raised by the atlas (load
//! and parse failures) and log lines forwarded by the tracing layer. Shared
//! between threads, so the subscriber can push while the UI reads.

use parking_lot::RwLock;
use std::sync::Arc;

/// Maximum number of notices to retain
pub const MAX_NOTICES: usize = 200;

/// Severity of a notice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

impl NoticeLevel {
    /// CSS class name for styling
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "notice-info",
            Self::Warn => "notice-warn",
            Self::Error => "notice-error",
        }
    }

    /// Map a tracing level; debug and trace are not shown to users
    pub fn from_tracing(level: tracing::Level) -> Option<Self> {
        match level {
            tracing::Level::ERROR => Some(Self::Error),
            tracing::Level::WARN => Some(Self::Warn),
            tracing::Level::INFO => Some(Self::Info),
            _ => None,
        }
    }
}

/// A single message
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    /// Increasing identifier, unique within a buffer
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    /// Whether this notice needs the user's attention
    pub blocking: bool,
}

#[derive(Default)]
struct Entries {
    notices: Vec<Notice>,
    next_id: u64,
    /// Highest blocking notice id the user has dismissed
    dismissed: u64,
}

/// Thread-safe notice buffer
#[derive(Clone, Default)]
pub struct NoticeBuffer {
    entries: Arc<RwLock<Entries>>,
}

impl NoticeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a log line
    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        self.push_notice(level, message.into(), false);
    }

    /// Add a notice the user must see
    pub fn alert(&self, message: impl Into<String>) {
        self.push_notice(NoticeLevel::Error, message.into(), true);
    }

    fn push_notice(&self, level: NoticeLevel, message: String, blocking: bool) {
        let mut entries = self.entries.write();
        entries.next_id += 1;
        let id = entries.next_id;
        entries.notices.push(Notice {
            id,
            level,
            message,
            blocking,
        });

        // Trim oldest entries if over limit, keeping alerts not yet dismissed
        if entries.notices.len() > MAX_NOTICES {
            let mut excess = entries.notices.len() - MAX_NOTICES;
            let dismissed = entries.dismissed;
            entries.notices.retain(|n| {
                if excess > 0 && !(n.blocking && n.id > dismissed) {
                    excess -= 1;
                    false
                } else {
                    true
                }
            });
        }
    }

    /// Id of the newest notice; changes whenever something is pushed
    pub fn version(&self) -> u64 {
        self.entries.read().next_id
    }

    /// Newest blocking notice that has not been dismissed
    pub fn pending_alert(&self) -> Option<Notice> {
        let entries = self.entries.read();
        entries
            .notices
            .iter()
            .rev()
            .find(|n| n.blocking && n.id > entries.dismissed)
            .cloned()
    }

    /// Dismiss a blocking notice and every one before it
    pub fn dismiss(&self, id: u64) {
        let mut entries = self.entries.write();
        entries.dismissed = entries.dismissed.max(id);
    }

    /// Newest non-blocking line, for the status bar
    pub fn latest_line(&self) -> Option<Notice> {
        self.entries
            .read()
            .notices
            .iter()
            .rev()
            .find(|n| !n.blocking)
            .cloned()
    }

    /// Get a snapshot of all entries
    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<Notice> {
        self.entries.read().notices.clone()
    }
}
