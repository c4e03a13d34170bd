//! Toast notifications as a message-passing sink.
//!
//! The quiz loop writes notices to a sink instead of calling into the UI,
//! which keeps the session machine testable. The UI end drains a channel;
//! tests use the recording sink.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// One short-lived notification for the toast strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

impl Notice {
    #[must_use]
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            body: body.into(),
        }
    }
}

pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Sink backed by an unbounded channel; the UI owns the receiving end.
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<Notice>,
}

impl ChannelSink {
    #[must_use]
    pub fn channel() -> (Arc<Self>, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { sender }), receiver)
    }
}

impl NoticeSink for ChannelSink {
    fn notify(&self, notice: Notice) {
        // A closed receiver means the UI is gone; nothing to show.
        let _ = self.sender.send(notice);
    }
}

/// Sink that drops everything, for flows that do not surface toasts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NoticeSink for NullSink {
    fn notify(&self, _notice: Notice) {}
}

/// Sink that keeps every notice, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        }
    }
}

impl NoticeSink for RecordingSink {
    fn notify(&self, notice: Notice) {
        if let Ok(mut guard) = self.notices.lock() {
            guard.push(notice);
        }
    }
}
