//! # Wardrobe Common Library
//!
//! Shared code for the wardrobe crates including:
//! - Clothing item and generation context models
//! - Common error type
//! - Engine configuration loading
//! - Recency/decay time helpers

pub mod config;
pub mod error;
pub mod models;
pub mod time;

pub use config::{EngineConfig, LoggingConfig, WeightProfile};
pub use error::{Error, Result};
