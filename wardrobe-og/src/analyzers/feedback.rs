//! User feedback and history
//!
//! Sums decayed like/dislike/wear signals for the item and, at reduced
//! weight, for similar items (same type sharing a dominant color). Similar
//! items are looked up in the whole inventory, so feedback on an item the
//! occasion filter removed still informs its lookalikes. Liked
//! outfits and the item's own wear history add positive signal. The signed
//! total is squashed into [0, 1] and blended with the favorite score.

use super::{ScoringAnalyzer, ScoringScope};
use crate::types::{Dimension, DimensionScore};
use chrono::{DateTime, Utc};
use wardrobe_common::models::{normalize_tag, ClothingItem};
use wardrobe_common::time::{age_days, decay_weight};

const SIMILAR_ITEM_WEIGHT: f64 = 0.4;
const LIKED_OUTFIT_WEIGHT: f64 = 0.6;
const WEAR_HISTORY_WEIGHT: f64 = 0.15;
const FAVORITE_BLEND: f64 = 0.2;

pub struct FeedbackAnalyzer;

fn similar(a: &ClothingItem, b: &ClothingItem) -> bool {
    if a.id == b.id || a.normalized_type() != b.normalized_type() {
        return false;
    }
    a.dominant_colors.iter().any(|ca| {
        let ca = normalize_tag(ca);
        b.dominant_colors.iter().any(|cb| normalize_tag(cb) == ca)
    })
}

impl ScoringAnalyzer for FeedbackAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::Feedback
    }

    fn score(&self, item: &ClothingItem, scope: &ScoringScope<'_>) -> DimensionScore {
        let context = scope.context;
        let half_life = scope.config.feedback_half_life_days;
        let decay = |at: DateTime<Utc>| decay_weight(age_days(context.now, at), half_life);

        let mut raw = 0.0;
        let mut direct = 0;
        let mut indirect = 0;
        for event in &context.user.feedback {
            let weight = if event.item_id == item.id {
                direct += 1;
                1.0
            } else if scope
                .inventory_item(&event.item_id)
                .is_some_and(|other| similar(item, other))
            {
                indirect += 1;
                SIMILAR_ITEM_WEIGHT
            } else {
                continue;
            };
            raw += event.signal.strength() * weight * decay(event.recorded_at);
        }

        let liked: Vec<_> = context
            .liked_outfits
            .iter()
            .filter(|o| o.item_ids.iter().any(|id| *id == item.id))
            .collect();
        for outfit in &liked {
            raw += LIKED_OUTFIT_WEIGHT * decay(outfit.liked_at);
        }

        for worn in &item.wear_history {
            raw += WEAR_HISTORY_WEIGHT * decay(*worn);
        }

        let squashed = 0.5 + 0.5 * raw / (1.0 + raw.abs());
        let value = (1.0 - FAVORITE_BLEND) * squashed + FAVORITE_BLEND * item.favorite_score;

        let mut notes = Vec::new();
        if direct + indirect > 0 {
            notes.push(format!("{} direct, {} similar-item signals", direct, indirect));
        }
        if !liked.is_empty() {
            notes.push(format!("in {} liked outfit(s)", liked.len()));
        }
        if !item.wear_history.is_empty() {
            notes.push(format!("worn {} time(s)", item.wear_history.len()));
        }
        if notes.is_empty() {
            notes.push("no history".to_string());
        }
        DimensionScore::new(value, notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::occasion::{rules_for, OccasionClass};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use wardrobe_common::models::{
        Category, FeedbackEvent, FeedbackSignal, GenerationContext, LikedOutfit, WeatherCondition,
        WeatherSnapshot,
    };
    use wardrobe_common::EngineConfig;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn context() -> GenerationContext {
        GenerationContext::new("casual", WeatherSnapshot::new(18.0, WeatherCondition::Clear), now())
    }

    fn score(item: &ClothingItem, candidates: &[ClothingItem], context: &GenerationContext) -> f64 {
        let config = EngineConfig::default();
        let scope = ScoringScope::new(context, &config, candidates, rules_for(OccasionClass::Casual));
        FeedbackAnalyzer.score(item, &scope).value
    }

    fn event(item_id: &str, signal: FeedbackSignal, days_ago: i64) -> FeedbackEvent {
        FeedbackEvent {
            item_id: item_id.to_string(),
            signal,
            recorded_at: now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_no_history_is_neutral() {
        let item = ClothingItem::new("a", Category::Top, "tee");
        assert!((score(&item, &[item.clone()], &context()) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_like_beats_dislike() {
        let a = ClothingItem::new("a", Category::Top, "tee");
        let b = ClothingItem::new("b", Category::Top, "shirt");
        let pool = vec![a.clone(), b.clone()];
        let mut ctx = context();
        ctx.user.feedback = vec![
            event("a", FeedbackSignal::Like, 1),
            event("b", FeedbackSignal::Dislike, 1),
        ];
        assert!(score(&a, &pool, &ctx) > 0.4);
        assert!(score(&b, &pool, &ctx) < 0.4);
    }

    #[test]
    fn test_recent_like_outweighs_old_like() {
        let a = ClothingItem::new("a", Category::Top, "tee");
        let pool = vec![a.clone()];
        let mut recent = context();
        recent.user.feedback = vec![event("a", FeedbackSignal::Like, 1)];
        let mut old = context();
        old.user.feedback = vec![event("a", FeedbackSignal::Like, 200)];
        assert!(score(&a, &pool, &recent) > score(&a, &pool, &old));
    }

    #[test]
    fn test_similar_item_signal_is_weaker() {
        let navy_a = ClothingItem::new("a", Category::Top, "polo").with_colors(&["navy"], &[]);
        let navy_b = ClothingItem::new("b", Category::Top, "polo").with_colors(&["Navy"], &[]);
        let pool = vec![navy_a.clone(), navy_b.clone()];
        let mut ctx = context();
        ctx.user.feedback = vec![event("a", FeedbackSignal::Like, 0)];
        let direct = score(&navy_a, &pool, &ctx);
        let indirect = score(&navy_b, &pool, &ctx);
        assert!(direct > indirect && indirect > 0.4);
    }

    #[test]
    fn test_similar_signal_from_filtered_out_item() {
        let liked = ClothingItem::new("gym", Category::Shoes, "sneakers").with_colors(&["white"], &[]);
        let kept = ClothingItem::new("kept", Category::Shoes, "sneakers").with_colors(&["white"], &[]);
        let inventory = vec![liked.clone(), kept.clone()];
        let candidates = vec![kept.clone()];
        let mut ctx = context();
        ctx.user.feedback = vec![event("gym", FeedbackSignal::Like, 0)];

        let config = EngineConfig::default();
        let narrow = ScoringScope::new(&ctx, &config, &candidates, rules_for(OccasionClass::Casual));
        let wide = ScoringScope::new(&ctx, &config, &candidates, rules_for(OccasionClass::Casual))
            .with_inventory(&inventory);
        assert!((FeedbackAnalyzer.score(&kept, &narrow).value - 0.4).abs() < 1e-9);
        assert!(FeedbackAnalyzer.score(&kept, &wide).value > 0.4);
    }

    #[test]
    fn test_liked_outfit_and_favorite() {
        let a = ClothingItem::new("a", Category::Top, "tee").with_favorite(1.0);
        let pool = vec![a.clone()];
        let mut ctx = context();
        ctx.liked_outfits = vec![LikedOutfit {
            item_ids: vec!["a".to_string()],
            liked_at: now(),
        }];
        assert!(score(&a, &pool, &ctx) > 0.7);
    }
}
