//! Generation context assembled by the request, weather and profile collaborators

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Snow,
    Wind,
    Storm,
}

impl WeatherCondition {
    /// Conditions where water exposure is likely
    pub fn is_wet(self) -> bool {
        matches!(self, Self::Rain | Self::Snow | Self::Storm)
    }
}

/// Weather at the time and place the outfit will be worn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    #[serde(default)]
    pub condition: WeatherCondition,
    /// Relative humidity (0.0-1.0)
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub wind_kph: f64,
}

impl WeatherSnapshot {
    pub fn new(temperature_c: f64, condition: WeatherCondition) -> Self {
        Self {
            temperature_c,
            condition,
            humidity: 0.5,
            wind_kph: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyType {
    Hourglass,
    Pear,
    Apple,
    Rectangle,
    InvertedTriangle,
}

/// A style the user has expressed interest in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylePreference {
    pub style: String,
    #[serde(default = "default_preference_weight")]
    pub weight: f64,
    /// When the preference was recorded; undated preferences never decay
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

fn default_preference_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackSignal {
    Like,
    Dislike,
    Wear,
}

impl FeedbackSignal {
    /// Signed strength of the signal before decay
    pub fn strength(self) -> f64 {
        match self {
            Self::Like => 1.0,
            Self::Dislike => -1.0,
            Self::Wear => 0.3,
        }
    }
}

/// One feedback event about a single item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub item_id: String,
    pub signal: FeedbackSignal,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub body_type: Option<BodyType>,
    pub style_preferences: Vec<StylePreference>,
    pub feedback: Vec<FeedbackEvent>,
}

/// A previously liked outfit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedOutfit {
    pub item_ids: Vec<String>,
    pub liked_at: DateTime<Utc>,
}

/// Everything the engine knows about one generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationContext {
    pub occasion: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    pub weather: WeatherSnapshot,
    #[serde(default)]
    pub user: UserProfile,
    /// Caller-pinned item that must appear in the outfit
    #[serde(default)]
    pub base_item_id: Option<String>,
    #[serde(default)]
    pub liked_outfits: Vec<LikedOutfit>,
    /// Reference time for every recency computation
    #[serde(default = "crate::time::now")]
    pub now: DateTime<Utc>,
}

impl GenerationContext {
    /// Decode a request context from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn new(occasion: impl Into<String>, weather: WeatherSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            occasion: occasion.into(),
            style: None,
            mood: None,
            weather,
            user: UserProfile::default(),
            base_item_id: None,
            liked_outfits: Vec::new(),
            now,
        }
    }

    pub fn with_base_item(mut self, id: impl Into<String>) -> Self {
        self.base_item_id = Some(id.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.user.body_type = Some(body_type);
        self
    }

    /// Reject malformed or missing context fields
    pub fn validate(&self) -> Result<()> {
        if self.occasion.trim().is_empty() {
            return Err(Error::InvalidInput("occasion must not be empty".to_string()));
        }
        let weather = &self.weather;
        if !weather.temperature_c.is_finite() {
            return Err(Error::InvalidInput(format!(
                "temperature {} is not a finite number",
                weather.temperature_c
            )));
        }
        if !weather.humidity.is_finite() || !(0.0..=1.0).contains(&weather.humidity) {
            return Err(Error::InvalidInput(format!(
                "humidity {} outside 0.0-1.0",
                weather.humidity
            )));
        }
        if !weather.wind_kph.is_finite() || weather.wind_kph < 0.0 {
            return Err(Error::InvalidInput(format!(
                "wind speed {} must be a non-negative number",
                weather.wind_kph
            )));
        }
        if let Some(pref) = self
            .user
            .style_preferences
            .iter()
            .find(|p| !p.weight.is_finite() || p.weight < 0.0)
        {
            return Err(Error::InvalidInput(format!(
                "style preference '{}' has invalid weight {}",
                pref.style, pref.weight
            )));
        }
        if matches!(&self.base_item_id, Some(id) if id.trim().is_empty()) {
            return Err(Error::InvalidInput("base item id must not be blank".to_string()));
        }
        Ok(())
    }
}
