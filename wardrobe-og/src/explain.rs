//! Explainability Report
//!
//! Per selected item: the five dimension scores, each dimension's weighted
//! contribution to the composite, the assigned position and the analyzer
//! notes. Also carries the weights and the regime that selected them.

use crate::aggregator::{DynamicWeights, WeightRegime};
use crate::types::{Dimension, DimensionScores, OutfitItem, ScoreNote};
use serde::{Deserialize, Serialize};
use wardrobe_common::models::Layer;
use wardrobe_common::WeightProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionContribution {
    pub dimension: Dimension,
    pub score: f64,
    pub weight: f64,
    /// `score * weight`
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemExplanation {
    pub item_id: String,
    pub item_type: String,
    pub position: Option<Layer>,
    pub pinned: bool,
    pub scores: DimensionScores,
    pub contributions: Vec<DimensionContribution>,
    pub composite: f64,
    pub notes: Vec<ScoreNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainabilityReport {
    pub regime: WeightRegime,
    pub weights: WeightProfile,
    pub items: Vec<ItemExplanation>,
}

impl ExplainabilityReport {
    pub fn build(items: &[OutfitItem], weights: &DynamicWeights) -> Self {
        let items = items
            .iter()
            .map(|outfit_item| {
                let scored = &outfit_item.scored;
                let contributions = Dimension::ALL
                    .iter()
                    .map(|dimension| {
                        let score = scored.scores.get(*dimension);
                        let weight = weights.weight(*dimension);
                        DimensionContribution {
                            dimension: *dimension,
                            score,
                            weight,
                            contribution: score * weight,
                        }
                    })
                    .collect();
                ItemExplanation {
                    item_id: scored.item.id.clone(),
                    item_type: scored.item.normalized_type(),
                    position: outfit_item.position,
                    pinned: outfit_item.pinned,
                    scores: scored.scores,
                    contributions,
                    composite: scored.composite,
                    notes: scored.breakdown.clone(),
                }
            })
            .collect();

        Self {
            regime: weights.regime,
            weights: weights.weights,
            items,
        }
    }

    pub fn for_item(&self, item_id: &str) -> Option<&ItemExplanation> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    /// One line per item plus a header, for logs and terminals
    pub fn summary_lines(&self) -> Vec<String> {
        let w = &self.weights;
        let mut lines = vec![format!(
            "weights ({:?}): body {:.2} style {:.2} weather {:.2} feedback {:.2} compat {:.2}",
            self.regime, w.body_type, w.style, w.weather, w.feedback, w.compatibility
        )];
        for item in &self.items {
            let s = &item.scores;
            lines.push(format!(
                "{:<16} {:<14} {:<6} composite {:.3} [body {:.2} style {:.2} weather {:.2} feedback {:.2} compat {:.2}]",
                item.item_id,
                item.item_type,
                item.position.map_or("-", Layer::as_str),
                item.composite,
                s.body_type,
                s.style,
                s.weather,
                s.feedback,
                s.compatibility
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{composite, select_weights};
    use crate::types::ScoredItem;
    use chrono::{TimeZone, Utc};
    use wardrobe_common::models::{
        Category, ClothingItem, GenerationContext, WeatherCondition, WeatherSnapshot,
    };
    use wardrobe_common::EngineConfig;

    #[test]
    fn test_contributions_sum_to_composite() {
        let context = GenerationContext::new(
            "casual",
            WeatherSnapshot::new(-2.0, WeatherCondition::Snow),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let weights = select_weights(&context, &EngineConfig::default());
        let scores = DimensionScores {
            body_type: 0.4,
            style: 0.9,
            weather: 0.7,
            feedback: 0.2,
            compatibility: 0.6,
        };
        let item = OutfitItem {
            scored: ScoredItem {
                item: ClothingItem::new("coat", Category::Outerwear, "Pea Coat"),
                scores,
                composite: composite(&scores, &weights),
                breakdown: Vec::new(),
            },
            position: Some(Layer::Outer),
            pinned: false,
        };

        let report = ExplainabilityReport::build(&[item], &weights);
        assert_eq!(report.regime, WeightRegime::ColdExtreme);
        let explanation = report.for_item("coat").unwrap();
        assert_eq!(explanation.item_type, "pea-coat");
        let total: f64 = explanation.contributions.iter().map(|c| c.contribution).sum();
        assert!((total - explanation.composite).abs() < 1e-9);
        assert_eq!(report.summary_lines().len(), 2);
    }
}
