//! Composite Score Aggregator
//!
//! Synchronization barrier between the analyzers and the composer: folds the
//! five per-dimension scores of every candidate into one weighted composite.
//! Pure functions only.

use crate::analyzers::AnalyzerOutput;
use crate::types::{Dimension, DimensionScores, ScoreNote, ScoredItem};
use serde::{Deserialize, Serialize};
use wardrobe_common::models::{ClothingItem, GenerationContext};
use wardrobe_common::{EngineConfig, WeightProfile};

/// Which weight profile applied to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightRegime {
    Balanced,
    ColdExtreme,
    HotExtreme,
}

/// Normalized weights selected for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicWeights {
    pub regime: WeightRegime,
    pub weights: WeightProfile,
}

impl DynamicWeights {
    pub fn weight(&self, dimension: Dimension) -> f64 {
        let w = &self.weights;
        match dimension {
            Dimension::BodyType => w.body_type,
            Dimension::Style => w.style,
            Dimension::Weather => w.weather,
            Dimension::Feedback => w.feedback,
            Dimension::Compatibility => w.compatibility,
        }
    }
}

/// Pick the weight profile for the request temperature
///
/// At or beyond either extreme threshold, weather and compatibility take
/// over from style and feedback.
pub fn select_weights(context: &GenerationContext, config: &EngineConfig) -> DynamicWeights {
    let temperature = context.weather.temperature_c;
    let (regime, profile) = if temperature <= config.extreme_cold_c {
        (WeightRegime::ColdExtreme, config.extreme_weights)
    } else if temperature >= config.extreme_hot_c {
        (WeightRegime::HotExtreme, config.extreme_weights)
    } else {
        (WeightRegime::Balanced, config.balanced_weights)
    };
    DynamicWeights {
        regime,
        weights: profile.normalized(),
    }
}

/// Weighted sum of the five dimension scores
pub fn composite(scores: &DimensionScores, weights: &DynamicWeights) -> f64 {
    Dimension::ALL
        .iter()
        .map(|d| scores.get(*d) * weights.weight(*d))
        .sum()
}

/// Combine analyzer outputs into scored candidates
///
/// `outputs` must be index-aligned with `candidates`. A dimension missing
/// from `outputs` contributes a neutral 0.5.
pub fn aggregate(
    candidates: &[ClothingItem],
    outputs: &[AnalyzerOutput],
    weights: &DynamicWeights,
) -> Vec<ScoredItem> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut scores = DimensionScores {
                body_type: 0.5,
                style: 0.5,
                weather: 0.5,
                feedback: 0.5,
                compatibility: 0.5,
            };
            let mut breakdown = Vec::new();

            for output in outputs {
                if let Some(score) = output.scores.get(index) {
                    scores.set(output.dimension, score.value);
                    breakdown.extend(score.notes.iter().map(|note| ScoreNote {
                        dimension: output.dimension,
                        detail: note.clone(),
                    }));
                }
            }

            ScoredItem {
                item: item.clone(),
                composite: composite(&scores, weights),
                scores,
                breakdown,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DimensionScore;
    use chrono::{TimeZone, Utc};
    use wardrobe_common::models::{Category, WeatherCondition, WeatherSnapshot};

    fn context(temperature: f64) -> GenerationContext {
        GenerationContext::new(
            "casual",
            WeatherSnapshot::new(temperature, WeatherCondition::Clear),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_regime_selection() {
        let config = EngineConfig::default();
        assert_eq!(select_weights(&context(18.0), &config).regime, WeightRegime::Balanced);
        assert_eq!(select_weights(&context(5.0), &config).regime, WeightRegime::ColdExtreme);
        assert_eq!(select_weights(&context(-10.0), &config).regime, WeightRegime::ColdExtreme);
        assert_eq!(select_weights(&context(30.0), &config).regime, WeightRegime::HotExtreme);
    }

    #[test]
    fn test_extreme_shifts_weight_to_weather_and_compatibility() {
        let config = EngineConfig::default();
        let balanced = select_weights(&context(18.0), &config);
        let extreme = select_weights(&context(-5.0), &config);
        assert!(extreme.weight(Dimension::Weather) > balanced.weight(Dimension::Weather));
        assert!(extreme.weight(Dimension::Compatibility) > balanced.weight(Dimension::Compatibility));
        assert!(extreme.weight(Dimension::Style) < balanced.weight(Dimension::Style));
        assert!(extreme.weight(Dimension::Feedback) < balanced.weight(Dimension::Feedback));
        assert!((extreme.weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_composite_is_weighted_sum() {
        let weights = select_weights(&context(18.0), &EngineConfig::default());
        let scores = DimensionScores {
            body_type: 1.0,
            style: 0.0,
            weather: 0.5,
            feedback: 0.5,
            compatibility: 1.0,
        };
        assert!((composite(&scores, &weights) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_aligns_outputs_with_candidates() {
        let candidates = vec![
            ClothingItem::new("a", Category::Top, "tee"),
            ClothingItem::new("b", Category::Shoes, "boots"),
        ];
        let outputs = vec![AnalyzerOutput {
            dimension: Dimension::Weather,
            scores: vec![
                DimensionScore::new(1.0, vec!["warm enough".to_string()]),
                DimensionScore::new(0.0, vec![]),
            ],
        }];
        let weights = select_weights(&context(18.0), &EngineConfig::default());
        let scored = aggregate(&candidates, &outputs, &weights);
        assert_eq!(scored[0].scores.weather, 1.0);
        assert_eq!(scored[1].scores.weather, 0.0);
        assert_eq!(scored[0].scores.style, 0.5);
        assert!(scored[0].composite > scored[1].composite);
        assert_eq!(scored[0].breakdown[0].dimension, Dimension::Weather);
    }
}
