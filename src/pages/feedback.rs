//! Feedback Page
//!
//! Star rating, feedback type, a length-limited message, and an optional
//! screenshot. Submission is simulated: after a short delay the record is
//! appended to the `edubot_feedback` list in the local store.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::pipeline::SelectedFile;
use crate::store::{get_json, keys, set_json, KeyValueStore, StoreResult};

use super::notify::{Notice, Notifier};
use super::theme::{load_theme, Theme};
use super::KeyPress;

pub const MAX_RATING: u8 = 5;
pub const MAX_MESSAGE_LEN: usize = 500;
const WARNING_LEN: usize = 450;
const MIN_MESSAGE_LEN: usize = 10;

/// Simulated network delay before a submission is stored
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

pub const DEFAULT_USER_AGENT: &str = concat!("edubot/", env!("CARGO_PKG_VERSION"));

/// Style of the character counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterState {
    #[default]
    Normal,
    Warning,
    /// Input went past the limit and was cut
    Error,
}

/// `N B`, `N.N KB` or `N.N MB`
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// Stored submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub user_id: String,
    pub rating: u8,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub file: Option<String>,
    pub timestamp: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was written
    Rejected(String),
    Submitted(FeedbackRecord),
    /// Already submitted or still sending; nothing was written
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilePreview {
    pub name: String,
    pub size_label: String,
}

/// Rendered feedback page
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackView {
    /// Highlighted stars, hover preview included
    pub stars_lit: u8,
    pub rating: u8,
    pub kind: String,
    pub message: String,
    pub char_count: usize,
    pub counter: CounterState,
    pub file_preview: Option<FilePreview>,
    pub drop_highlight: bool,
    pub loading: bool,
    pub submit_disabled: bool,
    pub form_visible: bool,
    pub success_visible: bool,
    pub theme: Theme,
    pub theme_icon: &'static str,
    pub body_class: Option<&'static str>,
    pub notice: Option<Notice>,
}

/// Controller for the feedback page
pub struct FeedbackController {
    store: Arc<dyn KeyValueStore>,
    rating: u8,
    hover: Option<u8>,
    kind: String,
    message: String,
    counter: CounterState,
    file: Option<SelectedFile>,
    drag_over: bool,
    submitting: bool,
    submitted: bool,
    theme: Theme,
    submit_delay: Duration,
    user_agent: String,
    notifier: Notifier,
}

impl FeedbackController {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let theme = load_theme(store.as_ref());
        tracing::info!(theme = %theme, "Feedback page initialized");

        Self {
            store,
            rating: 0,
            hover: None,
            kind: String::new(),
            message: String::new(),
            counter: CounterState::Normal,
            file: None,
            drag_over: false,
            submitting: false,
            submitted: false,
            theme,
            submit_delay: DEFAULT_SUBMIT_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            notifier: Notifier::new(),
        }
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Star click. Values outside 1..=5 are ignored.
    pub fn click_star(&mut self, rating: u8) {
        if (1..=MAX_RATING).contains(&rating) {
            self.rating = rating;
        }
    }

    pub fn hover_star(&mut self, rating: u8) {
        if (1..=MAX_RATING).contains(&rating) {
            self.hover = Some(rating);
        }
    }

    /// Pointer left the star row; show the selection again
    pub fn leave_stars(&mut self) {
        self.hover = None;
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn set_type(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
    }

    /// Message input. Anything past the limit is cut off.
    pub fn input_message(&mut self, value: &str) -> CounterState {
        let length = value.chars().count();

        self.counter = if length > MAX_MESSAGE_LEN {
            self.message = value.chars().take(MAX_MESSAGE_LEN).collect();
            CounterState::Error
        } else {
            self.message = value.to_string();
            if length > WARNING_LEN {
                CounterState::Warning
            } else {
                CounterState::Normal
            }
        };
        self.counter
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn attach_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
    }

    pub fn drag_enter(&mut self) {
        self.drag_over = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    /// Drop onto the upload area. Only images are taken.
    pub fn drop_file(&mut self, file: SelectedFile) -> bool {
        self.drag_over = false;
        if !file.is_image() {
            tracing::debug!(file = %file.name, "Ignoring dropped non-image file");
            return false;
        }
        self.file = Some(file);
        true
    }

    pub fn remove_file(&mut self) {
        self.file = None;
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.rating == 0 {
            return Err("Please select a star rating");
        }
        if self.kind.is_empty() {
            return Err("Please select a feedback type");
        }
        if self.message.trim().chars().count() < MIN_MESSAGE_LEN {
            return Err("Please provide at least 10 characters of feedback");
        }
        Ok(())
    }

    /// Submit the form.
    ///
    /// Rejections show an error notice and write nothing. Accepted
    /// feedback waits out the simulated delay, is appended to the stored
    /// list, and switches the page to the success panel.
    pub async fn submit(&mut self) -> StoreResult<SubmitOutcome> {
        if self.submitted || self.submitting {
            return Ok(SubmitOutcome::Ignored);
        }
        if let Err(message) = self.validate() {
            tracing::warn!(reason = message, "Feedback rejected");
            self.notifier.error(message);
            return Ok(SubmitOutcome::Rejected(message.to_string()));
        }

        let now = Utc::now();
        let record = FeedbackRecord {
            user_id: format!("user_{}", now.timestamp_millis()),
            rating: self.rating,
            kind: self.kind.clone(),
            message: self.message.trim().to_string(),
            file: self.file.as_ref().map(|f| f.name.clone()),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            user_agent: self.user_agent.clone(),
        };

        self.submitting = true;
        tokio::time::sleep(self.submit_delay).await;
        let stored = self.append(&record);
        self.submitting = false;
        let total = stored?;

        tracing::info!(
            rating = record.rating,
            kind = %record.kind,
            total,
            "Feedback submitted"
        );
        self.submitted = true;
        Ok(SubmitOutcome::Submitted(record))
    }

    fn append(&self, record: &FeedbackRecord) -> StoreResult<usize> {
        let mut list: Vec<FeedbackRecord> =
            get_json(self.store.as_ref(), keys::FEEDBACK)?.unwrap_or_default();
        list.push(record.clone());
        set_json(self.store.as_ref(), keys::FEEDBACK, &list)?;
        Ok(list.len())
    }

    /// Every stored submission, oldest first
    pub fn records(&self) -> StoreResult<Vec<FeedbackRecord>> {
        Ok(get_json(self.store.as_ref(), keys::FEEDBACK)?.unwrap_or_default())
    }

    /// "New feedback" button: back to an empty form
    pub fn new_feedback(&mut self) {
        self.rating = 0;
        self.hover = None;
        self.kind.clear();
        self.message.clear();
        self.counter = CounterState::Normal;
        self.file = None;
        self.submitting = false;
        self.submitted = false;
    }

    /// Keyboard shortcut handler. Ctrl/Cmd+Enter submits while the form
    /// is showing.
    pub async fn handle_key(&mut self, key: &KeyPress) -> StoreResult<Option<SubmitOutcome>> {
        if key.is_command("Enter") && !self.submitted {
            return self.submit().await.map(Some);
        }
        Ok(None)
    }

    pub fn view(&self) -> FeedbackView {
        FeedbackView {
            stars_lit: self.hover.unwrap_or(self.rating),
            rating: self.rating,
            kind: self.kind.clone(),
            message: self.message.clone(),
            char_count: self.message.chars().count(),
            counter: self.counter,
            file_preview: self.file.as_ref().map(|f| FilePreview {
                name: f.name.clone(),
                size_label: format_file_size(f.size()),
            }),
            drop_highlight: self.drag_over,
            loading: self.submitting,
            submit_disabled: self.submitting || self.submitted,
            form_visible: !self.submitted,
            success_visible: self.submitted,
            theme: self.theme,
            theme_icon: self.theme.icon(),
            body_class: self.theme.body_class(),
            notice: self.notifier.visible_at(Instant::now()).cloned(),
        }
    }
}
