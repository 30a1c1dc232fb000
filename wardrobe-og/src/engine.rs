//! Outfit Generation Engine
//!
//! Runs one request through the full pipeline:
//!
//! ```text
//! inventory + context
//!   → input validation
//!   → candidate filter → feasibility check
//!   → analyzers (parallel) → aggregation (barrier)
//!   → cancellation check
//!   → composer → validator → explainability
//! ```
//!
//! Each call is independent; the engine holds only configuration and the
//! analyzer pipeline, both read-only.

use crate::aggregator::{aggregate, select_weights};
use crate::analyzers::{AnalyzerPipeline, ScoringScope};
use crate::composer::OutfitComposer;
use crate::explain::ExplainabilityReport;
use crate::filter::CandidateFilter;
use crate::types::{
    CompositionDiagnostics, GenerationError, GenerationResult, Outfit, ValidationResult,
};
use crate::validator::OutfitValidator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wardrobe_common::models::{ClothingItem, GenerationContext, Slot};
use wardrobe_common::EngineConfig;

/// Everything produced by a successful generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub outfit: Outfit,
    pub explanation: ExplainabilityReport,
    pub diagnostics: CompositionDiagnostics,
    pub validation: ValidationResult,
}

pub struct OutfitEngine {
    config: EngineConfig,
    pipeline: AnalyzerPipeline,
}

impl Default for OutfitEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl OutfitEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_pipeline(config, AnalyzerPipeline::standard())
    }

    pub fn with_pipeline(config: EngineConfig, pipeline: AnalyzerPipeline) -> Self {
        Self { config, pipeline }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generate one outfit
    ///
    /// Returns a structured error rather than a partial outfit on any
    /// failure. `cancel` is checked once scoring has finished.
    pub fn generate(
        &self,
        inventory: &[ClothingItem],
        context: &GenerationContext,
        cancel: &CancellationToken,
    ) -> GenerationResult<GenerationReport> {
        validate_input(inventory, context)?;
        let base_item_id = context.base_item_id.as_deref();

        // Filter
        let filter = CandidateFilter::for_occasion(&context.occasion);
        let filtered = filter.apply(inventory, base_item_id);
        info!(
            "Occasion '{}' classified as {:?}: {} candidates, {} excluded",
            context.occasion,
            filter.class(),
            filtered.candidates.len(),
            filtered.excluded.len()
        );

        let empty_slots = empty_slots(&filtered.candidates);
        if !empty_slots.is_empty() {
            warn!("No candidates for slots {:?}", empty_slots);
            return Err(GenerationError::InfeasibleRequest { empty_slots });
        }

        // Score
        let scope = ScoringScope::new(context, &self.config, &filtered.candidates, filter.rules())
            .with_inventory(inventory);
        let outputs = self.pipeline.run(&scope);
        let weights = select_weights(context, &self.config);
        let scored = aggregate(&filtered.candidates, &outputs, &weights);
        debug!(
            "Aggregated {} candidates with {:?} weights",
            scored.len(),
            weights.regime
        );

        if cancel.is_cancelled() {
            info!("Generation cancelled before composition");
            return Err(GenerationError::Cancelled);
        }

        // Compose
        let composition = OutfitComposer::new(&self.config, scope.band).compose(&scored, base_item_id)?;

        // Validate
        let validation =
            OutfitValidator::new(&self.config, filter.rules(), scope.band).validate(&composition.items);
        if let Some(critical) = validation.first_critical() {
            warn!("Composed outfit failed validation: {}", critical);
            return Err(GenerationError::ValidationFailure(critical.clone()));
        }

        let explanation = ExplainabilityReport::build(&composition.items, &weights);
        let outfit = Outfit::new(composition.items, validation.warnings());
        info!(
            "Generated outfit [{}] (total {:.3}, {} warning(s))",
            outfit.item_ids().join(", "),
            outfit.total_score,
            outfit.warnings.len()
        );

        Ok(GenerationReport {
            outfit,
            explanation,
            diagnostics: CompositionDiagnostics {
                excluded: filtered.excluded,
                skipped: composition.skipped,
            },
            validation,
        })
    }
}

/// Reject malformed requests before any filtering
fn validate_input(inventory: &[ClothingItem], context: &GenerationContext) -> GenerationResult<()> {
    context.validate()?;

    let mut seen = HashSet::with_capacity(inventory.len());
    for item in inventory {
        item.validate()?;
        if !seen.insert(item.id.as_str()) {
            return Err(GenerationError::Input(format!("duplicate item id '{}'", item.id)));
        }
    }

    if let Some(base_id) = context.base_item_id.as_deref() {
        if !seen.contains(base_id) {
            return Err(GenerationError::Input(format!(
                "base item '{}' not found in inventory",
                base_id
            )));
        }
    }
    Ok(())
}

/// Mandatory slots no candidate can fill
fn empty_slots(candidates: &[ClothingItem]) -> Vec<Slot> {
    Slot::MANDATORY
        .into_iter()
        .filter(|slot| !candidates.iter().any(|c| c.category.slots().contains(slot)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wardrobe_common::models::{Category, WeatherCondition, WeatherSnapshot};

    fn context() -> GenerationContext {
        GenerationContext::new(
            "casual",
            WeatherSnapshot::new(18.0, WeatherCondition::Clear),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_empty_slots() {
        let items = vec![
            ClothingItem::new("d", Category::Dress, "dress"),
            ClothingItem::new("h", Category::Accessory, "hat"),
        ];
        assert_eq!(empty_slots(&items), vec![Slot::Shoes]);
        assert_eq!(empty_slots(&[]), Slot::MANDATORY.to_vec());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![
            ClothingItem::new("x", Category::Top, "tee"),
            ClothingItem::new("x", Category::Shoes, "boots"),
        ];
        assert!(matches!(
            validate_input(&items, &context()),
            Err(GenerationError::Input(_))
        ));
    }

    #[test]
    fn test_unknown_base_item_rejected() {
        let items = vec![ClothingItem::new("x", Category::Top, "tee")];
        let ctx = context().with_base_item("missing");
        assert!(matches!(
            validate_input(&items, &ctx),
            Err(GenerationError::Input(_))
        ));
    }
}
