//! Scored compatibility preferences
//!
//! Five sub-scores over a group of placements, combined with fixed weights.
//! The low magnitudes on combinations that also appear as hard conflicts only
//! push them down the ranking; exclusion is decided by [`super::Conflict`].

use super::{bold_count, formality_spread, sleeve_conflict, Placement, MAX_FORMALITY_SPREAD};
use crate::rules::harmony::{both_neutral, colors_harmonize, textures_clash};
use serde::{Deserialize, Serialize};
use wardrobe_common::models::Fit;

const LAYER_WEIGHT: f64 = 0.30;
const PATTERN_WEIGHT: f64 = 0.20;
const FIT_WEIGHT: f64 = 0.20;
const FORMALITY_WEIGHT: f64 = 0.15;
const COLOR_WEIGHT: f64 = 0.15;

/// Layering below this temperature earns a bonus
const LAYERING_BONUS_BELOW_C: f64 = 10.0;
/// Layering above this temperature is penalized
const LAYERING_PENALTY_ABOVE_C: f64 = 24.0;

const COLOR_BONUS_CAP: f64 = 0.4;

/// Sub-scores for one group of placements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityBreakdown {
    pub layer: f64,
    pub pattern: f64,
    pub fit: f64,
    pub formality: f64,
    pub color: f64,
}

impl CompatibilityBreakdown {
    /// Weighted combination in [0, 1]
    pub fn combined(&self) -> f64 {
        LAYER_WEIGHT * self.layer
            + PATTERN_WEIGHT * self.pattern
            + FIT_WEIGHT * self.fit
            + FORMALITY_WEIGHT * self.formality
            + COLOR_WEIGHT * self.color
    }
}

/// Score how well a group of items works together
pub fn score_group(
    placements: &[Placement<'_>],
    temperature_c: f64,
    target_formality: u8,
) -> CompatibilityBreakdown {
    CompatibilityBreakdown {
        layer: layer_score(placements, temperature_c),
        pattern: pattern_score(placements),
        fit: fit_score(placements),
        formality: formality_score(placements, target_formality),
        color: color_score(placements),
    }
}

fn pairs<'p, 'a>(
    placements: &'p [Placement<'a>],
) -> impl Iterator<Item = (Placement<'a>, Placement<'a>)> + 'p {
    placements
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| placements[i + 1..].iter().map(move |b| (*a, *b)))
}

fn layer_score(placements: &[Placement<'_>], temperature_c: f64) -> f64 {
    let mut layered = false;
    for (a, b) in pairs(placements) {
        if sleeve_conflict(a, b) || sleeve_conflict(b, a) {
            return 0.05;
        }
        match (a.position, b.position) {
            (Some(x), Some(y)) if x == y => return 0.2,
            (Some(_), Some(_)) => layered = true,
            _ => {}
        }
    }

    if !layered {
        return 0.6;
    }
    let adjustment: f64 = if temperature_c < LAYERING_BONUS_BELOW_C {
        0.3
    } else if temperature_c > LAYERING_PENALTY_ABOVE_C {
        -0.3
    } else {
        0.0
    };
    (0.6 + adjustment).clamp(0.1, 1.0)
}

fn pattern_score(placements: &[Placement<'_>]) -> f64 {
    let bold = bold_count(placements.iter().map(|p| p.item));
    let base: f64 = match bold {
        0 => 0.7,
        1 => 0.8,
        2 => 0.35,
        _ => return 0.05,
    };

    let clashes = pairs(placements)
        .filter(|(a, b)| match (a.item.metadata.texture, b.item.metadata.texture) {
            (Some(x), Some(y)) => textures_clash(x, y),
            _ => false,
        })
        .count();
    (base - 0.2 * clashes as f64).max(0.1)
}

fn fit_score(placements: &[Placement<'_>]) -> f64 {
    let fits: Vec<Fit> = placements
        .iter()
        .filter(|p| p.item.category.is_garment())
        .filter_map(|p| p.item.metadata.fit)
        .collect();
    if fits.len() < 2 {
        return 0.6;
    }

    let loose = fits.iter().filter(|f| **f == Fit::Loose).count();
    let fitted = fits.iter().filter(|f| **f == Fit::Fitted).count();
    if loose == fits.len() || fitted == fits.len() {
        0.10
    } else if loose > 0 && fitted > 0 {
        0.9
    } else {
        0.6
    }
}

fn formality_score(placements: &[Placement<'_>], target: u8) -> f64 {
    let spread = formality_spread(placements.iter().map(|p| p.item));
    if spread > MAX_FORMALITY_SPREAD {
        return 0.15;
    }
    let base: f64 = if spread == MAX_FORMALITY_SPREAD { 0.45 } else { 0.75 };

    let exact = placements
        .iter()
        .all(|p| p.item.metadata.formality == target);
    if exact {
        (base + 0.2_f64).min(1.0)
    } else {
        base
    }
}

fn color_score(placements: &[Placement<'_>]) -> f64 {
    let bonus: f64 = pairs(placements)
        .map(|(a, b)| {
            if colors_harmonize(a.item, b.item) {
                0.15
            } else if both_neutral(a.item, b.item) {
                0.05
            } else {
                0.0
            }
        })
        .sum();
    0.5 + bonus.min(COLOR_BONUS_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardrobe_common::models::{Category, ClothingItem, Layer, Pattern, SleeveLength, Texture};

    #[test]
    fn test_sleeve_conflict_scores_near_zero() {
        let sweater = ClothingItem::new("s", Category::MidLayer, "sweater")
            .with_sleeve(SleeveLength::Short);
        let shirt = ClothingItem::new("t", Category::Top, "shirt").with_sleeve(SleeveLength::Long);
        let group = [
            Placement::new(&sweater, Some(Layer::Outer)),
            Placement::new(&shirt, Some(Layer::Inner)),
        ];
        assert_eq!(score_group(&group, 15.0, 3).layer, 0.05);
    }

    #[test]
    fn test_layering_bonus_depends_on_temperature() {
        let coat = ClothingItem::new("c", Category::Outerwear, "coat");
        let shirt = ClothingItem::new("t", Category::Top, "shirt");
        let group = [
            Placement::new(&coat, Some(Layer::Outer)),
            Placement::new(&shirt, Some(Layer::Inner)),
        ];
        let cold = score_group(&group, 2.0, 3).layer;
        let mild = score_group(&group, 18.0, 3).layer;
        let hot = score_group(&group, 32.0, 3).layer;
        assert!(cold > mild && mild > hot);
    }

    #[test]
    fn test_single_bold_pattern_bonus() {
        let floral = ClothingItem::new("f", Category::Top, "blouse").with_pattern(Pattern::Floral);
        let plain = ClothingItem::new("p", Category::Bottom, "skirt").with_pattern(Pattern::Solid);
        let plaid = ClothingItem::new("q", Category::Bottom, "skirt").with_pattern(Pattern::Plaid);

        let one = score_group(&[Placement::new(&floral, None), Placement::new(&plain, None)], 18.0, 3);
        let two = score_group(&[Placement::new(&floral, None), Placement::new(&plaid, None)], 18.0, 3);
        assert!(one.pattern > two.pattern);
    }

    #[test]
    fn test_texture_clash_penalty() {
        let silk = ClothingItem::new("s", Category::Top, "blouse").with_texture(Texture::Silk);
        let fleece = ClothingItem::new("f", Category::Bottom, "joggers").with_texture(Texture::Fleece);
        let score = score_group(&[Placement::new(&silk, None), Placement::new(&fleece, None)], 18.0, 3);
        assert!((score.pattern - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fit_balance() {
        let loose = ClothingItem::new("l", Category::Top, "tee").with_fit(Fit::Loose);
        let loose2 = ClothingItem::new("l2", Category::Bottom, "wide-pants").with_fit(Fit::Loose);
        let fitted = ClothingItem::new("f", Category::Bottom, "jeans").with_fit(Fit::Fitted);
        let all_loose = score_group(&[Placement::new(&loose, None), Placement::new(&loose2, None)], 18.0, 3);
        let balanced = score_group(&[Placement::new(&loose, None), Placement::new(&fitted, None)], 18.0, 3);
        assert_eq!(all_loose.fit, 0.10);
        assert_eq!(balanced.fit, 0.9);
    }

    #[test]
    fn test_formality_exact_match_bonus() {
        let a = ClothingItem::new("a", Category::Top, "shirt").with_formality(4);
        let b = ClothingItem::new("b", Category::Bottom, "trousers").with_formality(4);
        let group = [Placement::new(&a, None), Placement::new(&b, None)];
        assert!(score_group(&group, 18.0, 4).formality > score_group(&group, 18.0, 3).formality);
    }

    #[test]
    fn test_color_bonus_is_capped() {
        let items: Vec<ClothingItem> = (0..5)
            .map(|i| {
                ClothingItem::new(format!("i{}", i), Category::Accessory, "scarf")
                    .with_colors(&["blue"], &["blue"])
            })
            .collect();
        let group: Vec<Placement<'_>> = items.iter().map(|i| Placement::new(i, None)).collect();
        assert!((score_group(&group, 18.0, 3).color - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_combined_is_in_range() {
        let a = ClothingItem::new("a", Category::Top, "shirt");
        let group = [Placement::new(&a, Some(Layer::Inner))];
        let combined = score_group(&group, 18.0, 3).combined();
        assert!((0.0..=1.0).contains(&combined));
    }
}
