//! Mood → style tag hints

use once_cell::sync::Lazy;
use std::collections::HashMap;
use wardrobe_common::models::normalize_tag;

static MOOD_HINTS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let entries: &[(&str, &'static [&'static str])] = &[
        ("confident", &["bold", "statement", "tailored", "classic"]),
        ("professional", &["classic", "tailored", "minimal"]),
        ("focused", &["minimal", "classic"]),
        ("relaxed", &["casual", "comfortable", "relaxed"]),
        ("lazy", &["comfortable", "casual"]),
        ("cozy", &["cozy", "comfortable", "knit"]),
        ("energetic", &["sporty", "bright", "playful"]),
        ("happy", &["bright", "playful", "colorful"]),
        ("romantic", &["romantic", "feminine", "soft"]),
        ("edgy", &["edgy", "streetwear", "bold"]),
        ("creative", &["eclectic", "artsy", "statement"]),
        ("sad", &["cozy", "comfortable"]),
    ];
    entries.iter().copied().collect()
});

/// Style tags suggested by a mood; unknown moods suggest nothing
pub fn hints_for(mood: &str) -> &'static [&'static str] {
    MOOD_HINTS
        .get(normalize_tag(mood).as_str())
        .copied()
        .unwrap_or(&[])
}
