//! Scoring Analyzers
//!
//! Each analyzer is an independent, read-only scorer for one dimension.
//! Analyzers see the whole candidate set and the request context through a
//! shared [`ScoringScope`] and never mutate it, so the pipeline runs them
//! concurrently without locking.
//!
//! Contract: every analyzer implements [`ScoringAnalyzer`]
//!   input: one candidate + the shared scope
//!   output: [`DimensionScore`] (value in [0, 1] + explanation notes)
//!
//! Adding a dimension means adding an implementation and registering it in
//! [`AnalyzerPipeline::standard`].

pub mod body_type;
pub mod compatibility;
pub mod feedback;
pub mod style_profile;
pub mod weather;

use crate::rules::occasion::OccasionRules;
use crate::rules::weather::{band_for, BandRule};
use crate::types::{Dimension, DimensionScore};
use rayon::prelude::*;
use std::collections::HashMap;
use wardrobe_common::models::{ClothingItem, GenerationContext};
use wardrobe_common::EngineConfig;

/// Read-only inputs shared by every analyzer within one request
pub struct ScoringScope<'a> {
    pub context: &'a GenerationContext,
    pub config: &'a EngineConfig,
    pub candidates: &'a [ClothingItem],
    /// Every inventory item by id, including those the filter removed
    pub inventory: HashMap<&'a str, &'a ClothingItem>,
    pub base_item: Option<&'a ClothingItem>,
    pub occasion: &'static OccasionRules,
    pub band: &'static BandRule,
}

impl<'a> ScoringScope<'a> {
    pub fn new(
        context: &'a GenerationContext,
        config: &'a EngineConfig,
        candidates: &'a [ClothingItem],
        occasion: &'static OccasionRules,
    ) -> Self {
        let base_item = context
            .base_item_id
            .as_deref()
            .and_then(|id| candidates.iter().find(|item| item.id == id));
        Self {
            context,
            config,
            candidates,
            inventory: index_by_id(candidates),
            base_item,
            occasion,
            band: band_for(context.weather.temperature_c),
        }
    }

    /// Widen the id lookup to the unfiltered inventory
    pub fn with_inventory(mut self, inventory: &'a [ClothingItem]) -> Self {
        self.inventory = index_by_id(inventory);
        self
    }

    pub fn inventory_item(&self, id: &str) -> Option<&'a ClothingItem> {
        self.inventory.get(id).copied()
    }
}

fn index_by_id(items: &[ClothingItem]) -> HashMap<&str, &ClothingItem> {
    items.iter().map(|item| (item.id.as_str(), item)).collect()
}

/// One scoring dimension
pub trait ScoringAnalyzer: Send + Sync {
    fn dimension(&self) -> Dimension;

    /// Score one candidate; the value must lie in [0, 1]
    fn score(&self, item: &ClothingItem, scope: &ScoringScope<'_>) -> DimensionScore;
}

/// Scores from one analyzer, index-aligned with the candidate slice
#[derive(Debug, Clone)]
pub struct AnalyzerOutput {
    pub dimension: Dimension,
    pub scores: Vec<DimensionScore>,
}

/// Fixed set of analyzers run as a fork-join
pub struct AnalyzerPipeline {
    analyzers: Vec<Box<dyn ScoringAnalyzer>>,
}

impl AnalyzerPipeline {
    /// The five standard dimensions
    pub fn standard() -> Self {
        Self {
            analyzers: vec![
                Box::new(body_type::BodyTypeAnalyzer),
                Box::new(style_profile::StyleProfileAnalyzer),
                Box::new(weather::WeatherAnalyzer),
                Box::new(feedback::FeedbackAnalyzer),
                Box::new(compatibility::CompatibilityAnalyzer),
            ],
        }
    }

    pub fn with_analyzers(analyzers: Vec<Box<dyn ScoringAnalyzer>>) -> Self {
        Self { analyzers }
    }

    pub fn dimensions(&self) -> Vec<Dimension> {
        self.analyzers.iter().map(|a| a.dimension()).collect()
    }

    /// Run every analyzer over every candidate
    ///
    /// Analyzers run in parallel; the returned vector is in registration
    /// order regardless of completion order.
    pub fn run(&self, scope: &ScoringScope<'_>) -> Vec<AnalyzerOutput> {
        self.analyzers
            .par_iter()
            .map(|analyzer| {
                let scores = scope
                    .candidates
                    .iter()
                    .map(|item| analyzer.score(item, scope))
                    .collect();
                tracing::debug!(
                    "Analyzer {} scored {} candidates",
                    analyzer.dimension().as_str(),
                    scope.candidates.len()
                );
                AnalyzerOutput {
                    dimension: analyzer.dimension(),
                    scores,
                }
            })
            .collect()
    }
}

impl Default for AnalyzerPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
