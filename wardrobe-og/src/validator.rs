//! Outfit Validator
//!
//! Re-checks a fully composed outfit as a whole. Composition only checks each
//! addition against the selection so far; this pass sees every item at once
//! and also covers softer rules that only make sense for a finished outfit.
//!
//! Severity:
//! - **Critical**: slot coverage, slot exclusivity, layer conflicts,
//!   formality spread over the limit, bold pattern overload, item count
//! - **Moderate**: occasion color bans, too many accent colors, heavy fit
//!   imbalance, no outer layer in freezing weather
//! - **Minor**: formality spread at the limit, two bold patterns, mild fit
//!   imbalance, no color harmony at all

use crate::compat::{
    bold_count, find_conflicts, formality_spread, Conflict, Placement, MAX_FORMALITY_SPREAD,
};
use crate::rules::harmony::{colors_harmonize, is_neutral};
use crate::rules::occasion::OccasionRules;
use crate::rules::weather::{BandRule, TemperatureBand};
use crate::types::{OutfitItem, Severity, ValidationResult, Violation, ViolationRule};
use std::collections::BTreeSet;
use wardrobe_common::models::{normalize_tag, Category, Fit, Layer, Slot};
use wardrobe_common::EngineConfig;

/// Distinct non-neutral colors before an outfit reads as busy
const MAX_ACCENT_COLORS: usize = 4;

pub struct OutfitValidator<'v> {
    config: &'v EngineConfig,
    occasion: &'static OccasionRules,
    band: &'static BandRule,
}

impl<'v> OutfitValidator<'v> {
    pub fn new(
        config: &'v EngineConfig,
        occasion: &'static OccasionRules,
        band: &'static BandRule,
    ) -> Self {
        Self {
            config,
            occasion,
            band,
        }
    }

    pub fn validate(&self, items: &[OutfitItem]) -> ValidationResult {
        let mut violations = Vec::new();

        self.check_coverage(items, &mut violations);
        self.check_item_count(items, &mut violations);
        self.check_constraints(items, &mut violations);
        self.check_soft_limits(items, &mut violations);
        self.check_fit_balance(items, &mut violations);
        self.check_colors(items, &mut violations);
        self.check_weather_coverage(items, &mut violations);

        let result = ValidationResult::from_violations(violations);
        tracing::debug!(
            "Validation {:?} with {} violation(s)",
            result.status,
            result.violations.len()
        );
        result
    }

    fn check_coverage(&self, items: &[OutfitItem], out: &mut Vec<Violation>) {
        for slot in Slot::MANDATORY {
            let covered = items
                .iter()
                .any(|i| i.item().category.slots().contains(&slot));
            if !covered {
                out.push(Violation::new(
                    Severity::Critical,
                    ViolationRule::MissingSlot,
                    format!("no item covers the {} slot", slot),
                ));
            }
        }
    }

    fn check_item_count(&self, items: &[OutfitItem], out: &mut Vec<Violation>) {
        let count = items.len();
        if count < self.config.min_items || count > self.config.max_items {
            out.push(Violation::new(
                Severity::Critical,
                ViolationRule::ItemCount,
                format!(
                    "{} items outside bounds {}-{}",
                    count, self.config.min_items, self.config.max_items
                ),
            ));
        }
    }

    fn check_constraints(&self, items: &[OutfitItem], out: &mut Vec<Violation>) {
        let placements: Vec<Placement<'_>> = items
            .iter()
            .map(|i| Placement::new(i.item(), i.position))
            .collect();

        for conflict in find_conflicts(&placements) {
            let (rule, ids) = match &conflict {
                Conflict::SlotTaken { holder, .. } => (ViolationRule::SlotExclusivity, vec![holder.clone()]),
                Conflict::SleeveUnderLayer { outer, inner } => {
                    (ViolationRule::LayerConflict, vec![outer.clone(), inner.clone()])
                }
                Conflict::PositionTaken { holder, .. } => (ViolationRule::LayerConflict, vec![holder.clone()]),
                Conflict::FormalitySpread { .. } => (ViolationRule::FormalitySpread, Vec::new()),
                Conflict::BoldPatternOverload { .. } => (ViolationRule::PatternOverload, Vec::new()),
            };
            out.push(Violation::new(Severity::Critical, rule, conflict.to_string()).with_items(ids));
        }
    }

    fn check_soft_limits(&self, items: &[OutfitItem], out: &mut Vec<Violation>) {
        if formality_spread(items.iter().map(OutfitItem::item)) == MAX_FORMALITY_SPREAD {
            out.push(Violation::new(
                Severity::Minor,
                ViolationRule::FormalitySpread,
                format!("formality spread at the limit of {}", MAX_FORMALITY_SPREAD),
            ));
        }

        if bold_count(items.iter().map(OutfitItem::item)) == 2 {
            let bold: Vec<&str> = items
                .iter()
                .filter(|i| i.item().is_bold_pattern())
                .map(OutfitItem::id)
                .collect();
            out.push(
                Violation::new(Severity::Minor, ViolationRule::PatternOverload, "two bold patterns compete")
                    .with_items(bold),
            );
        }
    }

    fn check_fit_balance(&self, items: &[OutfitItem], out: &mut Vec<Violation>) {
        let fits: Vec<Fit> = items
            .iter()
            .filter(|i| i.item().category.is_garment())
            .filter_map(|i| i.item().metadata.fit)
            .collect();
        if fits.len() < 2 {
            return;
        }

        let uniform = fits.iter().all(|f| *f == Fit::Loose) || fits.iter().all(|f| *f == Fit::Fitted);
        if uniform {
            let severity = if fits.len() >= 3 {
                Severity::Moderate
            } else {
                Severity::Minor
            };
            out.push(Violation::new(
                severity,
                ViolationRule::FitBalance,
                format!("all {} garments are {:?}", fits.len(), fits[0]),
            ));
        }
    }

    fn check_colors(&self, items: &[OutfitItem], out: &mut Vec<Violation>) {
        for item in items {
            let clothing = item.item();
            if let Some(color) = self.occasion.blocked_color(clothing.category, &clothing.dominant_colors) {
                out.push(
                    Violation::new(
                        Severity::Moderate,
                        ViolationRule::ColorRule,
                        format!(
                            "'{}' {} not suited to {:?} occasions",
                            color,
                            clothing.category.as_str(),
                            self.occasion.class
                        ),
                    )
                    .with_items([item.id()]),
                );
            }
        }

        let accents: BTreeSet<String> = items
            .iter()
            .flat_map(|i| i.item().dominant_colors.iter())
            .filter(|c| !is_neutral(c))
            .map(|c| normalize_tag(c))
            .collect();
        if accents.len() > MAX_ACCENT_COLORS {
            out.push(Violation::new(
                Severity::Moderate,
                ViolationRule::ColorRule,
                format!("{} accent colors in one outfit", accents.len()),
            ));
        }

        let colored: Vec<&OutfitItem> = items
            .iter()
            .filter(|i| !i.item().dominant_colors.is_empty())
            .collect();
        let all_neutral = colored
            .iter()
            .all(|i| i.item().dominant_colors.iter().all(|c| is_neutral(c)));
        if colored.len() >= 2 && !all_neutral {
            let any_harmony = colored.iter().enumerate().any(|(idx, a)| {
                colored[idx + 1..]
                    .iter()
                    .any(|b| colors_harmonize(a.item(), b.item()))
            });
            if !any_harmony {
                out.push(Violation::new(
                    Severity::Minor,
                    ViolationRule::ColorRule,
                    "no two items list each other's colors as matches",
                ));
            }
        }
    }

    fn check_weather_coverage(&self, items: &[OutfitItem], out: &mut Vec<Violation>) {
        if self.band.band != TemperatureBand::Freezing {
            return;
        }
        let has_outer = items
            .iter()
            .any(|i| i.position == Some(Layer::Outer) || i.item().category == Category::Outerwear);
        if !has_outer {
            out.push(Violation::new(
                Severity::Moderate,
                ViolationRule::WeatherCoverage,
                "no outer layer in freezing weather",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::occasion::{rules_for, OccasionClass};
    use crate::rules::weather::band_for;
    use crate::types::{DimensionScores, ScoredItem};
    use wardrobe_common::models::{ClothingItem, Pattern, SleeveLength};

    fn placed(item: ClothingItem, position: Option<Layer>) -> OutfitItem {
        OutfitItem {
            scored: ScoredItem {
                item,
                scores: DimensionScores::default(),
                composite: 0.5,
                breakdown: Vec::new(),
            },
            position,
            pinned: false,
        }
    }

    fn core() -> Vec<OutfitItem> {
        vec![
            placed(ClothingItem::new("shirt", Category::Top, "shirt"), Some(Layer::Inner)),
            placed(ClothingItem::new("pants", Category::Bottom, "chinos"), None),
            placed(ClothingItem::new("shoes", Category::Shoes, "loafers"), None),
        ]
    }

    fn validate(items: &[OutfitItem], class: OccasionClass, temperature: f64) -> ValidationResult {
        let config = EngineConfig::default();
        OutfitValidator::new(&config, rules_for(class), band_for(temperature)).validate(items)
    }

    #[test]
    fn test_clean_outfit_is_valid() {
        let result = validate(&core(), OccasionClass::Casual, 18.0);
        assert!(result.is_valid());
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_missing_shoes_is_critical() {
        let mut items = core();
        items.pop();
        let result = validate(&items, OccasionClass::Casual, 18.0);
        assert!(!result.is_valid());
        assert_eq!(result.first_critical().unwrap().rule, ViolationRule::MissingSlot);
    }

    #[test]
    fn test_sleeve_conflict_is_critical() {
        let mut items = core();
        items[0].scored.item.metadata.sleeve_length = Some(SleeveLength::Long);
        items.push(placed(
            ClothingItem::new("vest", Category::Outerwear, "jacket").with_sleeve(SleeveLength::Sleeveless),
            Some(Layer::Outer),
        ));
        let result = validate(&items, OccasionClass::Casual, 18.0);
        let critical = result.first_critical().unwrap();
        assert_eq!(critical.rule, ViolationRule::LayerConflict);
        assert_eq!(critical.item_ids, vec!["vest".to_string(), "shirt".to_string()]);
    }

    #[test]
    fn test_two_bold_patterns_is_warning_only() {
        let mut items = core();
        items[0].scored.item.metadata.pattern = Some(Pattern::Floral);
        items[1].scored.item.metadata.pattern = Some(Pattern::Plaid);
        let result = validate(&items, OccasionClass::Casual, 18.0);
        assert!(result.is_valid());
        assert_eq!(result.warnings()[0].rule, ViolationRule::PatternOverload);
    }

    #[test]
    fn test_formal_neon_shoes_is_moderate() {
        let mut items = core();
        items[2].scored.item.dominant_colors = vec!["neon-pink".to_string()];
        let result = validate(&items, OccasionClass::Formal, 18.0);
        assert!(result.is_valid());
        assert!(result
            .violations
            .iter()
            .any(|v| v.rule == ViolationRule::ColorRule && v.severity == Severity::Moderate));
    }

    #[test]
    fn test_freezing_without_outer_layer() {
        let result = validate(&core(), OccasionClass::Casual, -8.0);
        assert!(result.is_valid());
        assert_eq!(result.warnings()[0].rule, ViolationRule::WeatherCoverage);
    }

    #[test]
    fn test_too_many_items_is_critical() {
        let mut items = core();
        for i in 0..4 {
            items.push(placed(
                ClothingItem::new(format!("acc{}", i), Category::Accessory, "ring"),
                None,
            ));
        }
        let result = validate(&items, OccasionClass::Casual, 18.0);
        assert_eq!(result.first_critical().unwrap().rule, ViolationRule::ItemCount);
    }

    #[test]
    fn test_no_color_harmony_is_minor() {
        let mut items = core();
        items[0].scored.item.dominant_colors = vec!["red".to_string()];
        items[1].scored.item.dominant_colors = vec!["green".to_string()];
        let result = validate(&items, OccasionClass::Casual, 18.0);
        assert!(result.is_valid());
        assert!(result
            .warnings()
            .iter()
            .any(|v| v.rule == ViolationRule::ColorRule && v.severity == Severity::Minor));
    }
}
