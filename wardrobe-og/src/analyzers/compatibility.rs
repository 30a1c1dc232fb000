//! Metadata compatibility
//!
//! Pairs the item with every candidate it could be worn with (other
//! categories, no shared slot) and averages the best `compatibility_peers`
//! pair scores. When a base item is pinned, the pair score against it counts
//! for half.

use super::{ScoringAnalyzer, ScoringScope};
use crate::compat::scoring::score_group;
use crate::compat::Placement;
use crate::rules::layering::preferred_position;
use crate::types::{Dimension, DimensionScore};
use wardrobe_common::models::ClothingItem;

const BASE_ITEM_SHARE: f64 = 0.5;

pub struct CompatibilityAnalyzer;

fn can_pair(a: &ClothingItem, b: &ClothingItem) -> bool {
    if a.id == b.id || a.category == b.category {
        return false;
    }
    let b_slots = b.category.slots();
    !a.category.slots().iter().any(|s| b_slots.contains(s))
}

fn pair_score(a: &ClothingItem, b: &ClothingItem, scope: &ScoringScope<'_>) -> f64 {
    let group = [
        Placement::new(a, preferred_position(a)),
        Placement::new(b, preferred_position(b)),
    ];
    score_group(
        &group,
        scope.context.weather.temperature_c,
        scope.occasion.target_formality,
    )
    .combined()
}

impl ScoringAnalyzer for CompatibilityAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::Compatibility
    }

    fn score(&self, item: &ClothingItem, scope: &ScoringScope<'_>) -> DimensionScore {
        let mut pair_scores: Vec<f64> = scope
            .candidates
            .iter()
            .filter(|peer| can_pair(item, peer))
            .map(|peer| pair_score(item, peer, scope))
            .collect();
        pair_scores.sort_by(|a, b| b.total_cmp(a));
        pair_scores.truncate(scope.config.compatibility_peers);

        let mut notes = Vec::new();
        let peer_mean = if pair_scores.is_empty() {
            notes.push("no pairing candidates".to_string());
            0.5
        } else {
            let mean = pair_scores.iter().sum::<f64>() / pair_scores.len() as f64;
            notes.push(format!("best {} pairings average {:.3}", pair_scores.len(), mean));
            mean
        };

        let value = match scope.base_item {
            Some(base) if can_pair(item, base) => {
                let with_base = pair_score(item, base, scope);
                notes.push(format!("pairs with base item '{}' at {:.3}", base.id, with_base));
                (1.0 - BASE_ITEM_SHARE) * peer_mean + BASE_ITEM_SHARE * with_base
            }
            _ => peer_mean,
        };

        DimensionScore::new(value, notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::occasion::{rules_for, OccasionClass};
    use chrono::{TimeZone, Utc};
    use wardrobe_common::models::{
        Category, GenerationContext, Pattern, SleeveLength, WeatherCondition, WeatherSnapshot,
    };
    use wardrobe_common::EngineConfig;

    fn context() -> GenerationContext {
        GenerationContext::new(
            "casual",
            WeatherSnapshot::new(18.0, WeatherCondition::Clear),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    fn score(item: &ClothingItem, pool: &[ClothingItem], context: &GenerationContext) -> f64 {
        let config = EngineConfig::default();
        let scope = ScoringScope::new(context, &config, pool, rules_for(OccasionClass::Casual));
        CompatibilityAnalyzer.score(item, &scope).value
    }

    #[test]
    fn test_dress_does_not_pair_with_tops_or_bottoms() {
        let dress = ClothingItem::new("d", Category::Dress, "dress");
        let top = ClothingItem::new("t", Category::Top, "tee");
        let shoes = ClothingItem::new("s", Category::Shoes, "flats");
        assert!(!can_pair(&dress, &top));
        assert!(can_pair(&dress, &shoes));
        assert!(!can_pair(&top, &top));
    }

    #[test]
    fn test_lone_item_is_neutral() {
        let top = ClothingItem::new("t", Category::Top, "tee");
        assert_eq!(score(&top, &[top.clone()], &context()), 0.5);
    }

    #[test]
    fn test_harmonious_partner_scores_higher() {
        let top = ClothingItem::new("t", Category::Top, "tee").with_colors(&["white"], &["blue"]);
        let jeans = ClothingItem::new("j", Category::Bottom, "jeans").with_colors(&["blue"], &[]);
        let loud = ClothingItem::new("l", Category::Bottom, "skirt")
            .with_colors(&["orange"], &[])
            .with_pattern(Pattern::Floral);
        let busy_top = top.clone().with_pattern(Pattern::Plaid);

        let calm_pool = vec![top.clone(), jeans];
        let busy_pool = vec![busy_top.clone(), loud];
        assert!(score(&top, &calm_pool, &context()) > score(&busy_top, &busy_pool, &context()));
    }

    #[test]
    fn test_base_item_pairing_counts() {
        let sweater = ClothingItem::new("sw", Category::MidLayer, "sweater")
            .with_layer(wardrobe_common::models::Layer::Outer)
            .with_sleeve(SleeveLength::Short);
        let long = ClothingItem::new("long", Category::Top, "shirt").with_sleeve(SleeveLength::Long);
        let short = ClothingItem::new("short", Category::Top, "t-shirt").with_sleeve(SleeveLength::Short);
        let pool = vec![sweater, long.clone(), short.clone()];
        let ctx = context().with_base_item("sw");
        assert!(score(&short, &pool, &ctx) > score(&long, &pool, &ctx));
    }
}
