//! Engine configuration loading
//!
//! Resolution priority for the configuration file:
//! 1. Explicit path (command-line argument)
//! 2. `WARDROBE_CONFIG` environment variable
//! 3. `<config dir>/wardrobe/wardrobe-og.toml`
//! 4. Compiled defaults
//!
//! A missing file is not an error: the engine starts with compiled defaults
//! and logs a warning. A file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "WARDROBE_CONFIG";

const CONFIG_DIR_NAME: &str = "wardrobe";
const CONFIG_FILE_NAME: &str = "wardrobe-og.toml";

/// Relative importance of the five scoring dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub body_type: f64,
    pub style: f64,
    pub weather: f64,
    pub feedback: f64,
    pub compatibility: f64,
}

impl WeightProfile {
    /// Equal weight on every dimension
    pub const BALANCED: WeightProfile = WeightProfile {
        body_type: 0.2,
        style: 0.2,
        weather: 0.2,
        feedback: 0.2,
        compatibility: 0.2,
    };

    /// Weather and compatibility dominate when temperatures are extreme
    pub const EXTREME: WeightProfile = WeightProfile {
        body_type: 0.15,
        style: 0.10,
        weather: 0.35,
        feedback: 0.10,
        compatibility: 0.30,
    };

    pub fn sum(&self) -> f64 {
        self.body_type + self.style + self.weather + self.feedback + self.compatibility
    }

    /// Scale so the weights sum to 1.0
    ///
    /// Falls back to [`WeightProfile::BALANCED`] if the sum is not positive.
    pub fn normalized(&self) -> WeightProfile {
        let sum = self.sum();
        if !(sum.is_finite() && sum > 0.0) {
            return Self::BALANCED;
        }
        WeightProfile {
            body_type: self.body_type / sum,
            style: self.style / sum,
            weather: self.weather / sum,
            feedback: self.feedback / sum,
            compatibility: self.compatibility / sum,
        }
    }

    fn is_valid(&self) -> bool {
        let parts = [
            self.body_type,
            self.style,
            self.weather,
            self.feedback,
            self.compatibility,
        ];
        parts.iter().all(|w| w.is_finite() && *w >= 0.0) && self.sum() > 0.0
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log file path (logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Tunable engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fewest items a valid outfit may contain
    pub min_items: usize,
    /// Most items a valid outfit may contain
    pub max_items: usize,
    /// Accessories the layering pass may add
    pub max_accessories: usize,
    /// Best pair scores averaged by the compatibility analyzer
    pub compatibility_peers: usize,
    /// Optional items scoring below this composite are never added
    pub optional_score_floor: f64,
    /// At or below this temperature the extreme weight profile applies
    pub extreme_cold_c: f64,
    /// At or above this temperature the extreme weight profile applies
    pub extreme_hot_c: f64,
    pub balanced_weights: WeightProfile,
    pub extreme_weights: WeightProfile,
    /// Half-life of like/dislike/wear signals
    pub feedback_half_life_days: f64,
    /// Half-life of recorded style preferences
    pub style_half_life_days: f64,
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_items: 2,
            max_items: 6,
            max_accessories: 1,
            compatibility_peers: 3,
            optional_score_floor: 0.35,
            extreme_cold_c: 5.0,
            extreme_hot_c: 30.0,
            balanced_weights: WeightProfile::BALANCED,
            extreme_weights: WeightProfile::EXTREME,
            feedback_half_life_days: 30.0,
            style_half_life_days: 90.0,
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an existing file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolve and load configuration following the priority order
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self> {
        match ConfigResolver::new().resolve(cli_path) {
            Some(path) => {
                info!("Loading engine configuration from {}", path.display());
                Self::load(&path)
            }
            None => {
                warn!("No configuration file found, using compiled defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.min_items == 0 {
            return Err(Error::Config("min_items must be at least 1".to_string()));
        }
        if self.min_items > self.max_items {
            return Err(Error::Config(format!(
                "min_items ({}) exceeds max_items ({})",
                self.min_items, self.max_items
            )));
        }
        if self.compatibility_peers == 0 {
            return Err(Error::Config("compatibility_peers must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.optional_score_floor) {
            return Err(Error::Config(format!(
                "optional_score_floor {} outside 0.0-1.0",
                self.optional_score_floor
            )));
        }
        if self.extreme_cold_c >= self.extreme_hot_c {
            return Err(Error::Config(format!(
                "extreme_cold_c ({}) must be below extreme_hot_c ({})",
                self.extreme_cold_c, self.extreme_hot_c
            )));
        }
        if !self.balanced_weights.is_valid() || !self.extreme_weights.is_valid() {
            return Err(Error::Config(
                "weight profiles must be non-negative with a positive sum".to_string(),
            ));
        }
        if self.feedback_half_life_days <= 0.0 || self.style_half_life_days <= 0.0 {
            return Err(Error::Config("half-lives must be positive".to_string()));
        }
        Ok(())
    }
}

/// Locates the configuration file
pub struct ConfigResolver {
    env_var: String,
    default_path: Option<PathBuf>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self {
            env_var: CONFIG_ENV_VAR.to_string(),
            default_path: dirs::config_dir()
                .map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)),
        }
    }

    /// Override the platform default location (used by tests)
    pub fn with_default_path(mut self, path: Option<PathBuf>) -> Self {
        self.default_path = path;
        self
    }

    /// Pick the highest-priority configuration file that exists
    ///
    /// An explicit or environment path is returned even if missing, so the
    /// caller reports the bad path instead of silently using defaults.
    pub fn resolve(&self, cli_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = cli_path {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(&self.env_var) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        self.default_path.as_ref().filter(|p| p.exists()).cloned()
    }
}
