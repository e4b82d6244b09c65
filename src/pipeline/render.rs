//! Result rendering

use serde_json::Value;

use super::FeatureType;

/// Text shown in the result area for generated `content`.
///
/// Deep dives that carry a non-empty `markdown` string show it verbatim.
/// Everything else is pretty-printed JSON with two-space indentation.
pub fn render_content(feature: FeatureType, content: &Value) -> String {
    if feature == FeatureType::DeepDive {
        if let Some(markdown) = content
            .get("markdown")
            .and_then(Value::as_str)
            .filter(|md| !md.is_empty())
        {
            return markdown.to_string();
        }
    }

    serde_json::to_string_pretty(content).unwrap_or_else(|_| content.to_string())
}
