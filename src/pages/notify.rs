//! Toast notifications
//!
//! One notice is visible at a time; showing a new one replaces it.

use std::time::{Duration, Instant};

/// How long a notice stays on screen
pub const NOTICE_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeKind::Success => "✓",
            NoticeKind::Error => "✗",
            NoticeKind::Warning => "⚠",
            NoticeKind::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub shown_at: Instant,
}

impl Notice {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < NOTICE_DURATION
    }
}

/// Notice state of one page
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notice>,
    history: Vec<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NoticeKind) {
        let notice = Notice {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        };
        tracing::debug!(kind = ?notice.kind, message = %notice.message, "Notice");
        self.history.push(notice.clone());
        self.current = Some(notice);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, NoticeKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, NoticeKind::Error);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.show(message, NoticeKind::Warning);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.show(message, NoticeKind::Info);
    }

    /// Most recent notice, expired or not
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Notice still on screen at `now`
    pub fn visible_at(&self, now: Instant) -> Option<&Notice> {
        self.current.as_ref().filter(|n| n.is_visible_at(now))
    }

    /// Every notice shown so far, oldest first
    pub fn history(&self) -> &[Notice] {
        &self.history
    }

    /// Messages of every notice shown so far
    pub fn messages(&self) -> Vec<&str> {
        self.history.iter().map(|n| n.message.as_str()).collect()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
