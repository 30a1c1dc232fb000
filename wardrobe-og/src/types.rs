//! Shared Types and Data Contracts
//!
//! Defines the explicit contracts between the stages of the generation
//! pipeline:
//! - **Analyzers** emit [`DimensionScore`]s per candidate
//! - **Aggregator** folds them into [`ScoredItem`]s
//! - **Composer** selects [`OutfitItem`]s and records [`SkippedItem`]s
//! - **Validator** emits a [`ValidationResult`]
//!
//! Every failure of the pipeline is a [`GenerationError`], which converts to
//! a serializable [`FailureReport`] for API rendering.

use crate::compat::Conflict;
use serde::{Deserialize, Serialize};
use std::fmt;
use wardrobe_common::models::{ClothingItem, Layer, Slot};

// ============================================================================
// Analyzer Outputs
// ============================================================================

/// One of the five scoring dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    BodyType,
    Style,
    Weather,
    Feedback,
    Compatibility,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::BodyType,
        Dimension::Style,
        Dimension::Weather,
        Dimension::Feedback,
        Dimension::Compatibility,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BodyType => "body-type",
            Self::Style => "style",
            Self::Weather => "weather",
            Self::Feedback => "feedback",
            Self::Compatibility => "compatibility",
        }
    }
}

/// Score for one item along one dimension
///
/// Contract: `value` is always within [0.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub value: f64,
    pub notes: Vec<String>,
}

impl DimensionScore {
    /// Create a score, clamping the value into range
    pub fn new(value: f64, notes: Vec<String>) -> Self {
        let value = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
        Self { value, notes }
    }

    /// Score for an item the dimension has nothing to say about
    pub fn neutral(note: impl Into<String>) -> Self {
        Self::new(0.5, vec![note.into()])
    }
}

/// Per-dimension values for one item
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub body_type: f64,
    pub style: f64,
    pub weather: f64,
    pub feedback: f64,
    pub compatibility: f64,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::BodyType => self.body_type,
            Dimension::Style => self.style,
            Dimension::Weather => self.weather,
            Dimension::Feedback => self.feedback,
            Dimension::Compatibility => self.compatibility,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::BodyType => self.body_type = value,
            Dimension::Style => self.style = value,
            Dimension::Weather => self.weather = value,
            Dimension::Feedback => self.feedback = value,
            Dimension::Compatibility => self.compatibility = value,
        }
    }
}

/// Explanation line attributed to a dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreNote {
    pub dimension: Dimension,
    pub detail: String,
}

/// Candidate with all five dimension scores and the weighted composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item: ClothingItem,
    pub scores: DimensionScores,
    pub composite: f64,
    pub breakdown: Vec<ScoreNote>,
}

// ============================================================================
// Composer Outputs
// ============================================================================

/// Item placed in an outfit, with the layer position it was assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitItem {
    pub scored: ScoredItem,
    /// Layer position for upper-body items, `None` otherwise
    pub position: Option<Layer>,
    /// True for the caller-pinned base item
    pub pinned: bool,
}

impl OutfitItem {
    pub fn id(&self) -> &str {
        &self.scored.item.id
    }

    pub fn item(&self) -> &ClothingItem {
        &self.scored.item
    }
}

/// Why the composer did not select a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    /// Adding the item would break a hard constraint
    Conflict { conflict: Conflict },
    /// The slot was already filled by a better candidate
    SlotFilled { slot: Slot },
    /// Composite score below the optional-item floor
    BelowScoreFloor { composite: f64, floor: f64 },
    /// Layer or accessory allowance already used up
    AllowanceExhausted,
    /// The outfit already holds the target item count
    TargetReached,
    /// Nothing was available to fill the slot
    NoCandidates,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { conflict } => write!(f, "{}", conflict),
            Self::SlotFilled { slot } => write!(f, "{} slot already filled", slot),
            Self::BelowScoreFloor { composite, floor } => {
                write!(f, "composite {:.3} below floor {:.3}", composite, floor)
            }
            Self::AllowanceExhausted => f.write_str("layer/accessory allowance exhausted"),
            Self::TargetReached => f.write_str("target item count reached"),
            Self::NoCandidates => f.write_str("no candidates available"),
        }
    }
}

/// Candidate the composer passed over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub item_id: String,
    pub composite: f64,
    pub reason: RejectionReason,
}

/// Item removed by the candidate filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub item_id: String,
    pub reason: String,
}

/// Item-level diagnostics for analytics/logging collaborators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionDiagnostics {
    pub excluded: Vec<Exclusion>,
    pub skipped: Vec<SkippedItem>,
}

// ============================================================================
// Validation Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Critical,
}

/// Rule a violation was raised by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationRule {
    MissingSlot,
    SlotExclusivity,
    LayerConflict,
    FormalitySpread,
    PatternOverload,
    FitBalance,
    ColorRule,
    ItemCount,
    WeatherCoverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub severity: Severity,
    pub rule: ViolationRule,
    pub message: String,
    pub item_ids: Vec<String>,
}

impl Violation {
    pub fn new(severity: Severity, rule: ViolationRule, message: impl Into<String>) -> Self {
        Self {
            severity,
            rule,
            message: message.into(),
            item_ids: Vec::new(),
        }
    }

    pub fn with_items<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.item_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.severity, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    Invalid,
}

/// Complete validation result for a composed outfit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// Derive the status from the violations: any critical one invalidates
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let status = if violations.iter().any(Violation::is_critical) {
            ValidationStatus::Invalid
        } else {
            ValidationStatus::Valid
        };
        Self { status, violations }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Valid
    }

    pub fn first_critical(&self) -> Option<&Violation> {
        self.violations.iter().find(|v| v.is_critical())
    }

    /// Non-critical violations, surfaced as outfit warnings
    pub fn warnings(&self) -> Vec<Violation> {
        self.violations
            .iter()
            .filter(|v| !v.is_critical())
            .cloned()
            .collect()
    }
}

// ============================================================================
// Final Output
// ============================================================================

/// Composed outfit, in presentation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub items: Vec<OutfitItem>,
    /// Sum of the selected items' composite scores
    pub total_score: f64,
    pub warnings: Vec<Violation>,
}

impl Outfit {
    pub fn new(items: Vec<OutfitItem>, warnings: Vec<Violation>) -> Self {
        let total_score = items.iter().map(|i| i.scored.composite).sum();
        Self {
            items,
            total_score,
            warnings,
        }
    }

    pub fn item_ids(&self) -> Vec<&str> {
        self.items.iter().map(OutfitItem::id).collect()
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|i| i.id() == item_id)
    }

    pub fn get(&self, item_id: &str) -> Option<&OutfitItem> {
        self.items.iter().find(|i| i.id() == item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn mean_score(&self) -> f64 {
        if self.items.is_empty() {
            0.0
        } else {
            self.total_score / self.items.len() as f64
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Infeasible request: no candidates for {}", join_slots(.empty_slots))]
    InfeasibleRequest { empty_slots: Vec<Slot> },

    #[error("Composition failed for {slot} slot (best attempt: {}): {reason}", .best_attempt.as_deref().unwrap_or("none"))]
    CompositionFailure {
        slot: Slot,
        best_attempt: Option<String>,
        reason: RejectionReason,
    },

    #[error("Validation failed: {0}")]
    ValidationFailure(Violation),

    #[error("Generation cancelled")]
    Cancelled,
}

impl From<wardrobe_common::Error> for GenerationError {
    fn from(err: wardrobe_common::Error) -> Self {
        match err {
            wardrobe_common::Error::InvalidInput(msg) => GenerationError::Input(msg),
            other => GenerationError::Input(other.to_string()),
        }
    }
}

fn join_slots(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// Structured failure for UI/API rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&GenerationError> for FailureReport {
    fn from(err: &GenerationError) -> Self {
        let message = err.to_string();
        match err {
            GenerationError::Input(_) => Self {
                kind: "input_error".to_string(),
                message,
                slots: Vec::new(),
                item_id: None,
                reason: None,
            },
            GenerationError::InfeasibleRequest { empty_slots } => Self {
                kind: "infeasible_request".to_string(),
                message,
                slots: empty_slots.clone(),
                item_id: None,
                reason: None,
            },
            GenerationError::CompositionFailure {
                slot,
                best_attempt,
                reason,
            } => Self {
                kind: "composition_failure".to_string(),
                message,
                slots: vec![*slot],
                item_id: best_attempt.clone(),
                reason: Some(reason.to_string()),
            },
            GenerationError::ValidationFailure(violation) => Self {
                kind: "validation_failure".to_string(),
                message,
                slots: Vec::new(),
                item_id: violation.item_ids.first().cloned(),
                reason: Some(violation.message.clone()),
            },
            GenerationError::Cancelled => Self {
                kind: "cancelled".to_string(),
                message,
                slots: Vec::new(),
                item_id: None,
                reason: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_score_is_clamped() {
        assert_eq!(DimensionScore::new(1.7, vec![]).value, 1.0);
        assert_eq!(DimensionScore::new(-0.2, vec![]).value, 0.0);
        assert_eq!(DimensionScore::new(f64::NAN, vec![]).value, 0.0);
    }

    #[test]
    fn test_dimension_scores_get_set() {
        let mut scores = DimensionScores::default();
        for (i, dim) in Dimension::ALL.iter().enumerate() {
            scores.set(*dim, i as f64 / 10.0);
        }
        assert_eq!(scores.get(Dimension::Weather), 0.2);
        assert_eq!(scores.get(Dimension::Compatibility), 0.4);
    }

    #[test]
    fn test_validation_status_from_violations() {
        let minor = Violation::new(Severity::Minor, ViolationRule::ColorRule, "no harmony");
        let result = ValidationResult::from_violations(vec![minor.clone()]);
        assert!(result.is_valid());
        assert_eq!(result.warnings(), vec![minor.clone()]);

        let critical = Violation::new(Severity::Critical, ViolationRule::MissingSlot, "no shoes");
        let result = ValidationResult::from_violations(vec![minor, critical.clone()]);
        assert!(!result.is_valid());
        assert_eq!(result.first_critical(), Some(&critical));
    }

    #[test]
    fn test_infeasible_failure_report_lists_slots() {
        let err = GenerationError::InfeasibleRequest {
            empty_slots: Slot::MANDATORY.to_vec(),
        };
        assert_eq!(
            err.to_string(),
            "Infeasible request: no candidates for top, bottom-or-dress, shoes"
        );
        let report = FailureReport::from(&err);
        assert_eq!(report.kind, "infeasible_request");
        assert_eq!(report.slots.len(), 3);
    }

    #[test]
    fn test_composition_failure_report() {
        let err = GenerationError::CompositionFailure {
            slot: Slot::Shoes,
            best_attempt: Some("boots".to_string()),
            reason: RejectionReason::NoCandidates,
        };
        let report = FailureReport::from(&err);
        assert_eq!(report.kind, "composition_failure");
        assert_eq!(report.item_id.as_deref(), Some("boots"));
        assert_eq!(report.reason.as_deref(), Some("no candidates available"));
    }
}
