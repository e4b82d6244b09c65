//! Feature selection
//!
//! Maps UI actions (feature cards, floating buttons) onto the closed set
//! of generation types the backend understands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of content the backend generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureType {
    Flashcards,
    Quiz,
    #[default]
    DeepDive,
}

impl FeatureType {
    pub const ALL: [FeatureType; 3] = [
        FeatureType::Flashcards,
        FeatureType::Quiz,
        FeatureType::DeepDive,
    ];

    /// Wire name sent as `type`
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Flashcards => "flashcards",
            FeatureType::Quiz => "quiz",
            FeatureType::DeepDive => "deep-dive",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flashcards" => Ok(FeatureType::Flashcards),
            "quiz" => Ok(FeatureType::Quiz),
            "deep-dive" => Ok(FeatureType::DeepDive),
            other => Err(format!("Unknown feature type: {}", other)),
        }
    }
}

/// Human name of a UI action; unknown actions show their id
pub fn feature_display_name(action: &str) -> &str {
    match action {
        "ai-tutor" => "AI Tutor",
        "flashcards" => "Flashcards",
        "games" => "Games",
        "summary" => "Summary",
        "avatar" => "Avatar",
        other => other,
    }
}

/// Generation type behind a UI action, `None` when not generatable
pub fn feature_type_for(action: &str) -> Option<FeatureType> {
    match action {
        "flashcards" => Some(FeatureType::Flashcards),
        "games" => Some(FeatureType::Quiz),
        "summary" | "ai-tutor" => Some(FeatureType::DeepDive),
        _ => None,
    }
}
