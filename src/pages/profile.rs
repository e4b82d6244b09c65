//! Profile Page
//!
//! Editable profile form with a live preview card. The record lives as
//! JSON under `edubot_profile`; until the first save the page shows a
//! default learner.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::store::{get_json, keys, set_json, KeyValueStore, StoreResult};

use super::capitalize;
use super::notify::{Notice, Notifier};
use super::theme::Theme;
use super::KeyPress;

const MIN_NAME_LEN: usize = 2;
const SAVE_FLASH: Duration = Duration::from_millis(600);

/// Learning statistics shown on the profile card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub flashcards_completed: u32,
    pub games_played: u32,
    pub learning_streak: u32,
    pub last_session: String,
}

impl Default for ProfileStats {
    fn default() -> Self {
        Self {
            flashcards_completed: 247,
            games_played: 18,
            learning_streak: 12,
            last_session: "Today".to_string(),
        }
    }
}

/// Persisted profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub name: String,
    pub email: String,
    pub role: String,
    pub accent_color: String,
    pub theme: Theme,
    pub stats: ProfileStats,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            name: "Alex Chen".to_string(),
            email: "alex.chen@edubot.ai".to_string(),
            role: "student".to_string(),
            accent_color: "#00d4ff".to_string(),
            theme: Theme::Dark,
            stats: ProfileStats::default(),
        }
    }
}

impl ProfileRecord {
    /// Saved record, or the default one when nothing readable is stored
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match get_json::<ProfileRecord, _>(store, keys::PROFILE) {
            Ok(Some(record)) => record,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored profile unreadable, using default");
                Self::default()
            }
        }
    }
}

/// Result of a save attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Validation failed; nothing was written
    Rejected(String),
    Saved(ProfileRecord),
}

/// Rendered profile page
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub name_input: String,
    pub email_input: String,
    pub role_input: String,
    pub accent_color: String,
    pub color_label: String,
    pub display_name: String,
    pub display_role: String,
    pub theme: Theme,
    pub body_class: Option<&'static str>,
    pub dark_active: bool,
    pub light_active: bool,
    pub stats: ProfileStats,
    pub save_success: bool,
    pub notice: Option<Notice>,
}

/// Controller for the profile page
pub struct ProfileController {
    store: Arc<dyn KeyValueStore>,
    name: String,
    email: String,
    role: String,
    accent_color: String,
    theme: Theme,
    stats: ProfileStats,
    display_name: String,
    display_role: String,
    saved_at: Option<Instant>,
    notifier: Notifier,
}

impl ProfileController {
    /// Initialize the form from the stored record
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let record = ProfileRecord::load(store.as_ref());
        tracing::info!(name = %record.name, "Profile page initialized");

        Self {
            store,
            display_name: record.name.clone(),
            display_role: capitalize(&record.role),
            name: record.name,
            email: record.email,
            role: record.role,
            accent_color: record.accent_color,
            theme: record.theme,
            stats: record.stats,
            saved_at: None,
            notifier: Notifier::new(),
        }
    }

    /// Name field input; the preview follows only non-blank names
    pub fn input_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        let trimmed = self.name.trim();
        if !trimmed.is_empty() {
            self.display_name = trimmed.to_string();
        }
    }

    pub fn input_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn change_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
        self.display_role = capitalize(&self.role);
    }

    pub fn input_accent_color(&mut self, color: impl Into<String>) {
        self.accent_color = color.into();
    }

    /// Theme button click. Applied to the page but not saved.
    pub fn select_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// The shared header toggle flipped the page theme
    pub fn sync_main_toggle(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Save button click
    pub fn save(&mut self) -> StoreResult<SaveOutcome> {
        let name = self.name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            let message = "Name must be at least 2 characters";
            tracing::warn!(name = %name, "Profile save rejected");
            self.notifier.error(message);
            return Ok(SaveOutcome::Rejected(message.to_string()));
        }

        let record = ProfileRecord {
            name: name.to_string(),
            email: self.email.clone(),
            role: self.role.clone(),
            accent_color: self.accent_color.clone(),
            theme: self.theme,
            stats: self.stats.clone(),
        };
        set_json(self.store.as_ref(), keys::PROFILE, &record)?;

        tracing::info!(name = %record.name, theme = %record.theme, "Profile saved");
        self.display_name = record.name.clone();
        self.display_role = capitalize(&record.role);
        self.saved_at = Some(Instant::now());
        self.notifier.success("Profile updated successfully!");

        Ok(SaveOutcome::Saved(record))
    }

    /// Keyboard shortcut handler. Ctrl/Cmd+S saves.
    pub fn handle_key(&mut self, key: &KeyPress) -> StoreResult<Option<SaveOutcome>> {
        if key.is_command("s") {
            return self.save().map(Some);
        }
        Ok(None)
    }

    pub fn view(&self) -> ProfileView {
        let now = Instant::now();
        ProfileView {
            name_input: self.name.clone(),
            email_input: self.email.clone(),
            role_input: self.role.clone(),
            accent_color: self.accent_color.clone(),
            color_label: self.accent_color.to_uppercase(),
            display_name: self.display_name.clone(),
            display_role: self.display_role.clone(),
            theme: self.theme,
            body_class: self.theme.body_class(),
            dark_active: self.theme == Theme::Dark,
            light_active: self.theme == Theme::Light,
            stats: self.stats.clone(),
            save_success: self
                .saved_at
                .is_some_and(|at| now.saturating_duration_since(at) < SAVE_FLASH),
            notice: self.notifier.visible_at(now).cloned(),
        }
    }
}
