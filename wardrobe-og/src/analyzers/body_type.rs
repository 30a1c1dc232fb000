//! Body-type affinity
//!
//! Compares an item's fit and silhouette with the recommendations for the
//! user's body type.

use super::{ScoringAnalyzer, ScoringScope};
use crate::rules::body_fit::recommendation_for;
use crate::types::{Dimension, DimensionScore};
use wardrobe_common::models::ClothingItem;

const BASE_SCORE: f64 = 0.5;
const MATCH_BONUS: f64 = 0.25;
const AVOID_PENALTY: f64 = 0.25;

pub struct BodyTypeAnalyzer;

impl ScoringAnalyzer for BodyTypeAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::BodyType
    }

    fn score(&self, item: &ClothingItem, scope: &ScoringScope<'_>) -> DimensionScore {
        let Some(body_type) = scope.context.user.body_type else {
            return DimensionScore::neutral("no body type in profile");
        };
        if !item.category.is_garment() {
            return DimensionScore::neutral("fit does not apply");
        }

        let rec = recommendation_for(body_type);
        let mut value = BASE_SCORE;
        let mut notes = Vec::new();

        if let Some(fit) = item.metadata.fit {
            if rec.preferred_fits.contains(&fit) {
                value += MATCH_BONUS;
                notes.push(format!("{:?} fit suits {:?}", fit, body_type));
            }
        }

        if let Some(silhouette) = item.metadata.silhouette {
            if rec.preferred_silhouettes.contains(&silhouette) {
                value += MATCH_BONUS;
                notes.push(format!("{:?} silhouette flatters {:?}", silhouette, body_type));
            } else if rec.avoid_silhouettes.contains(&silhouette) {
                value -= AVOID_PENALTY;
                notes.push(format!("{:?} silhouette not recommended for {:?}", silhouette, body_type));
            }
        }

        if notes.is_empty() {
            notes.push("no fit or silhouette signal".to_string());
        }
        DimensionScore::new(value, notes)
    }
}
