//! Page Controllers
//!
//! One controller per page, constructed at page initialization and owning
//! all of that page's state. Event handlers are methods on the controller;
//! `view()` renders the current state into a plain view value, so the
//! state → screen mapping is testable without a document.
//!
//! - **dashboard**: generator, feature cards, nav, progress and activity
//! - **profile**: profile form with live preview
//! - **feedback**: star rating, counter, attachment, mock submission
//!
//! Controllers only share the `theme` key of the local store.

pub mod dashboard;
pub mod feedback;
pub mod notify;
pub mod profile;
pub mod theme;

pub use dashboard::{DashboardController, DashboardView, GenerateOutcome};
pub use feedback::{FeedbackController, FeedbackRecord, FeedbackView, SubmitOutcome};
pub use notify::{Notice, NoticeKind, Notifier};
pub use profile::{ProfileController, ProfileRecord, ProfileView, SaveOutcome};
pub use theme::Theme;

/// A key press with its modifier state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl+`key` or Cmd+`key`
    pub fn is_command(&self, key: &str) -> bool {
        (self.ctrl || self.meta) && self.key == key
    }
}

/// Upper-case the first character, leave the rest untouched
pub(crate) fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
