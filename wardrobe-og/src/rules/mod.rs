//! Rule tables
//!
//! Every table is immutable data initialized once on first use and shared
//! by all requests. Each table lives in its own module with its own tests:
//! - `occasion` - occasion classes and their exclusion rules
//! - `layering` - garment type → allowed layer positions
//! - `weather` - temperature bands, warmth ranges, layer allowances
//! - `body_fit` - body type → fit/silhouette recommendations
//! - `harmony` - neutral colors, color matching, texture clashes
//! - `mood` - mood → style hints

pub mod body_fit;
pub mod harmony;
pub mod layering;
pub mod mood;
pub mod occasion;
pub mod weather;

pub use occasion::{OccasionClass, OccasionRules};
pub use weather::{BandRule, TemperatureBand};
