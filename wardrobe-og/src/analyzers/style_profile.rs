//! Style-profile affinity
//!
//! Builds a weighted set of wanted style tags from the requested style, the
//! user's recorded preferences (decayed by age) and mood hints, then scores
//! the share of that weight an item's tags cover.

use super::{ScoringAnalyzer, ScoringScope};
use crate::rules::mood;
use crate::types::{Dimension, DimensionScore};
use std::collections::BTreeMap;
use wardrobe_common::models::{normalize_tag, ClothingItem};
use wardrobe_common::time::{age_days, decay_weight};

const REQUESTED_WEIGHT: f64 = 1.0;
const MOOD_WEIGHT: f64 = 0.5;
const OCCASION_TAG_BONUS: f64 = 0.1;
const FLOOR: f64 = 0.3;
const UNTAGGED_SCORE: f64 = 0.4;

pub struct StyleProfileAnalyzer;

impl StyleProfileAnalyzer {
    /// Wanted tag → accumulated weight; ordered for deterministic notes
    fn wanted_tags(scope: &ScoringScope<'_>) -> BTreeMap<String, f64> {
        let context = scope.context;
        let mut wanted: BTreeMap<String, f64> = BTreeMap::new();

        if let Some(style) = &context.style {
            *wanted.entry(normalize_tag(style)).or_default() += REQUESTED_WEIGHT;
        }

        for pref in &context.user.style_preferences {
            let decay = pref
                .recorded_at
                .map(|at| decay_weight(age_days(context.now, at), scope.config.style_half_life_days))
                .unwrap_or(1.0);
            *wanted.entry(normalize_tag(&pref.style)).or_default() += pref.weight * decay;
        }

        if let Some(mood) = &context.mood {
            for hint in mood::hints_for(mood) {
                *wanted.entry((*hint).to_string()).or_default() += MOOD_WEIGHT;
            }
        }

        wanted.retain(|_, weight| *weight > 0.0);
        wanted
    }
}

impl ScoringAnalyzer for StyleProfileAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::Style
    }

    fn score(&self, item: &ClothingItem, scope: &ScoringScope<'_>) -> DimensionScore {
        let wanted = Self::wanted_tags(scope);
        let occasion = normalize_tag(&scope.context.occasion);
        let occasion_bonus = if item
            .metadata
            .occasion_tags
            .iter()
            .any(|t| normalize_tag(t) == occasion)
        {
            OCCASION_TAG_BONUS
        } else {
            0.0
        };

        if wanted.is_empty() {
            let mut score = DimensionScore::neutral("no style signal in request or profile");
            if occasion_bonus > 0.0 {
                score = DimensionScore::new(
                    score.value + occasion_bonus,
                    vec![format!("tagged for '{}'", occasion)],
                );
            }
            return score;
        }

        let item_tags: Vec<String> = item.metadata.style_tags.iter().map(|t| normalize_tag(t)).collect();
        if item_tags.is_empty() {
            return DimensionScore::new(UNTAGGED_SCORE + occasion_bonus, vec!["item has no style tags".to_string()]);
        }

        let total: f64 = wanted.values().sum();
        let mut matched = 0.0;
        let mut notes = Vec::new();
        for (tag, weight) in &wanted {
            if item_tags.contains(tag) {
                matched += weight;
                notes.push(format!("matches '{}' ({:.2})", tag, weight));
            }
        }

        let ratio = matched / total;
        if notes.is_empty() {
            notes.push("no overlap with wanted styles".to_string());
        }
        if occasion_bonus > 0.0 {
            notes.push(format!("tagged for '{}'", occasion));
        }
        DimensionScore::new(FLOOR + (1.0 - FLOOR) * ratio + occasion_bonus, notes)
    }
}
