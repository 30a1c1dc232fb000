//! wardrobe-og library interface
//!
//! Outfit generation core: filters an inventory for an occasion, scores every
//! candidate along five dimensions in parallel, composes an outfit greedily
//! under hard constraints, validates it and explains the result.
//!
//! Entry point is [`OutfitEngine::generate`].

pub mod aggregator;
pub mod analyzers;
pub mod compat;
pub mod composer;
pub mod engine;
pub mod explain;
pub mod filter;
pub mod rules;
pub mod types;
pub mod validator;

pub use crate::engine::{GenerationReport, OutfitEngine};
pub use crate::explain::ExplainabilityReport;
pub use crate::types::{FailureReport, GenerationError, GenerationResult, Outfit};
