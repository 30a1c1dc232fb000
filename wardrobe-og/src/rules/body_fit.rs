//! Fit recommendations per body type

use once_cell::sync::Lazy;
use std::collections::HashMap;
use wardrobe_common::models::{BodyType, Fit, Silhouette};

#[derive(Debug)]
pub struct FitRecommendation {
    pub preferred_fits: &'static [Fit],
    pub preferred_silhouettes: &'static [Silhouette],
    pub avoid_silhouettes: &'static [Silhouette],
}

static FIT_TABLE: Lazy<HashMap<BodyType, FitRecommendation>> = Lazy::new(|| {
    use Silhouette::*;
    let mut map = HashMap::new();
    map.insert(
        BodyType::Hourglass,
        FitRecommendation {
            preferred_fits: &[Fit::Fitted],
            preferred_silhouettes: &[Wrap, Bodycon, ALine, Slim],
            avoid_silhouettes: &[Boxy, Oversized],
        },
    );
    map.insert(
        BodyType::Pear,
        FitRecommendation {
            preferred_fits: &[Fit::Regular],
            preferred_silhouettes: &[ALine, Wide, Structured],
            avoid_silhouettes: &[Bodycon, Tapered],
        },
    );
    map.insert(
        BodyType::Apple,
        FitRecommendation {
            preferred_fits: &[Fit::Regular, Fit::Loose],
            preferred_silhouettes: &[ALine, Straight, Wrap],
            avoid_silhouettes: &[Bodycon, Boxy],
        },
    );
    map.insert(
        BodyType::Rectangle,
        FitRecommendation {
            preferred_fits: &[Fit::Fitted, Fit::Regular],
            preferred_silhouettes: &[Wrap, ALine, Structured],
            avoid_silhouettes: &[Boxy],
        },
    );
    map.insert(
        BodyType::InvertedTriangle,
        FitRecommendation {
            preferred_fits: &[Fit::Regular],
            preferred_silhouettes: &[ALine, Wide, Straight],
            avoid_silhouettes: &[Structured, Boxy],
        },
    );
    map
});

pub fn recommendation_for(body_type: BodyType) -> &'static FitRecommendation {
    &FIT_TABLE[&body_type]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_body_type_has_a_recommendation() {
        for body_type in [
            BodyType::Hourglass,
            BodyType::Pear,
            BodyType::Apple,
            BodyType::Rectangle,
            BodyType::InvertedTriangle,
        ] {
            let rec = recommendation_for(body_type);
            assert!(!rec.preferred_fits.is_empty());
            assert!(!rec.preferred_silhouettes.is_empty());
        }
    }

    #[test]
    fn test_preferred_and_avoided_do_not_overlap() {
        for rec in FIT_TABLE.values() {
            for s in rec.avoid_silhouettes {
                assert!(!rec.preferred_silhouettes.contains(s));
            }
        }
    }
}
