//! Theme preference
//!
//! Stored as the raw string `"light"` or `"dark"` under the `theme` key,
//! shared by every page.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::{keys, KeyValueStore, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Anything other than `"light"` is dark
    pub fn parse(value: &str) -> Self {
        if value == "light" {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon on the toggle button
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }

    /// Class added to the page body
    pub fn body_class(&self) -> Option<&'static str> {
        match self {
            Theme::Dark => None,
            Theme::Light => Some("light-theme"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Saved theme, dark when unset or unreadable
pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    match store.get(keys::THEME) {
        Ok(Some(value)) => Theme::parse(&value),
        Ok(None) => Theme::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read theme preference");
            Theme::default()
        }
    }
}

pub fn save_theme(store: &dyn KeyValueStore, theme: Theme) -> StoreResult<()> {
    store.set(keys::THEME, theme.as_str())
}
