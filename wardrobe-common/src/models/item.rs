//! Clothing item metadata model
//!
//! Items arrive with metadata already extracted by the tagging collaborator.
//! This module only describes and sanity-checks that data.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Garment category as tagged in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Top,
    Bottom,
    Dress,
    Shoes,
    MidLayer,
    Outerwear,
    Accessory,
}

impl Category {
    /// Exclusive outfit slots this category occupies
    ///
    /// A dress is one piece, so it covers both the top and the bottom slot.
    pub fn slots(self) -> &'static [Slot] {
        match self {
            Self::Top => &[Slot::Top],
            Self::Bottom => &[Slot::BottomOrDress],
            Self::Dress => &[Slot::Top, Slot::BottomOrDress],
            Self::Shoes => &[Slot::Shoes],
            Self::MidLayer | Self::Outerwear | Self::Accessory => &[],
        }
    }

    /// Whether this category is worn on the upper body and takes part in layering
    pub fn is_upper_body(self) -> bool {
        matches!(self, Self::Top | Self::Dress | Self::MidLayer | Self::Outerwear)
    }

    /// Whether fit/silhouette tags are meaningful for this category
    pub fn is_garment(self) -> bool {
        !matches!(self, Self::Shoes | Self::Accessory)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Dress => "dress",
            Self::Shoes => "shoes",
            Self::MidLayer => "mid-layer",
            Self::Outerwear => "outerwear",
            Self::Accessory => "accessory",
        }
    }
}

/// Exclusive, mandatory outfit slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    Top,
    BottomOrDress,
    Shoes,
}

impl Slot {
    /// Slots every outfit must cover, in fill order
    pub const MANDATORY: [Slot; 3] = [Slot::Top, Slot::BottomOrDress, Slot::Shoes];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::BottomOrDress => "bottom-or-dress",
            Self::Shoes => "shoes",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body-relative garment position, innermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    Base,
    Inner,
    Mid,
    Outer,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Inner => "inner",
            Self::Mid => "mid",
            Self::Outer => "outer",
        }
    }
}

/// Sleeve length, shortest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SleeveLength {
    Sleeveless,
    Short,
    ThreeQuarter,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    Solid,
    Stripes,
    Check,
    Plaid,
    Floral,
    Graphic,
    AnimalPrint,
    PolkaDot,
    Camo,
    Abstract,
}

impl Pattern {
    /// Loud patterns that compete for attention when combined
    pub fn is_bold(self) -> bool {
        matches!(
            self,
            Self::Plaid
                | Self::Floral
                | Self::Graphic
                | Self::AnimalPrint
                | Self::PolkaDot
                | Self::Camo
                | Self::Abstract
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Texture {
    Cotton,
    Linen,
    Silk,
    Satin,
    Wool,
    Cashmere,
    Denim,
    Leather,
    Suede,
    Knit,
    Fleece,
    Corduroy,
    Velvet,
    Synthetic,
    Down,
    Mesh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fit {
    Loose,
    Regular,
    Fitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Silhouette {
    Straight,
    ALine,
    Bodycon,
    Oversized,
    Slim,
    Wide,
    Tapered,
    Wrap,
    Boxy,
    Structured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    AllSeason,
}

/// Descriptive metadata attached to every item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemMetadata {
    pub layer: Option<Layer>,
    pub sleeve_length: Option<SleeveLength>,
    pub pattern: Option<Pattern>,
    pub texture: Option<Texture>,
    pub fit: Option<Fit>,
    pub silhouette: Option<Silhouette>,
    /// Dressiness, 1 (very casual) to 5 (black tie)
    pub formality: u8,
    pub seasons: Vec<Season>,
    pub style_tags: Vec<String>,
    pub occasion_tags: Vec<String>,
}

impl Default for ItemMetadata {
    fn default() -> Self {
        Self {
            layer: None,
            sleeve_length: None,
            pattern: None,
            texture: None,
            fit: None,
            silhouette: None,
            formality: 3,
            seasons: Vec::new(),
            style_tags: Vec::new(),
            occasion_tags: Vec::new(),
        }
    }
}

/// A single wardrobe item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: String,
    pub category: Category,
    /// Free-text garment type, e.g. "dress-shirt"
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub dominant_colors: Vec<String>,
    #[serde(default)]
    pub matching_colors: Vec<String>,
    #[serde(default)]
    pub metadata: ItemMetadata,
    /// Timestamps at which the item was worn
    #[serde(default)]
    pub wear_history: Vec<DateTime<Utc>>,
    /// User-assigned favorite score (0.0-1.0)
    #[serde(default)]
    pub favorite_score: f64,
}

impl ClothingItem {
    /// Create an item with default metadata
    pub fn new(id: impl Into<String>, category: Category, item_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category,
            item_type: item_type.into(),
            dominant_colors: Vec::new(),
            matching_colors: Vec::new(),
            metadata: ItemMetadata::default(),
            wear_history: Vec::new(),
            favorite_score: 0.0,
        }
    }

    pub fn with_colors(mut self, dominant: &[&str], matching: &[&str]) -> Self {
        self.dominant_colors = dominant.iter().map(|c| c.to_string()).collect();
        self.matching_colors = matching.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.metadata.layer = Some(layer);
        self
    }

    pub fn with_sleeve(mut self, sleeve: SleeveLength) -> Self {
        self.metadata.sleeve_length = Some(sleeve);
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.metadata.pattern = Some(pattern);
        self
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.metadata.texture = Some(texture);
        self
    }

    pub fn with_fit(mut self, fit: Fit) -> Self {
        self.metadata.fit = Some(fit);
        self
    }

    pub fn with_silhouette(mut self, silhouette: Silhouette) -> Self {
        self.metadata.silhouette = Some(silhouette);
        self
    }

    pub fn with_formality(mut self, formality: u8) -> Self {
        self.metadata.formality = formality;
        self
    }

    pub fn with_seasons(mut self, seasons: &[Season]) -> Self {
        self.metadata.seasons = seasons.to_vec();
        self
    }

    pub fn with_style_tags(mut self, tags: &[&str]) -> Self {
        self.metadata.style_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_favorite(mut self, score: f64) -> Self {
        self.favorite_score = score;
        self
    }

    pub fn worn_at(mut self, at: DateTime<Utc>) -> Self {
        self.wear_history.push(at);
        self
    }

    /// Garment type in canonical form: lowercase, words joined by '-'
    pub fn normalized_type(&self) -> String {
        normalize_tag(&self.item_type)
    }

    /// Most recent wear, if any
    pub fn last_worn(&self) -> Option<DateTime<Utc>> {
        self.wear_history.iter().max().copied()
    }

    pub fn is_bold_pattern(&self) -> bool {
        self.metadata.pattern.is_some_and(Pattern::is_bold)
    }

    /// Check field ranges that the tagging collaborator must respect
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidInput("item id must not be empty".to_string()));
        }
        if !(1..=5).contains(&self.metadata.formality) {
            return Err(Error::InvalidInput(format!(
                "item '{}' has formality {} (expected 1-5)",
                self.id, self.metadata.formality
            )));
        }
        if !self.favorite_score.is_finite() || !(0.0..=1.0).contains(&self.favorite_score) {
            return Err(Error::InvalidInput(format!(
                "item '{}' has favorite score {} (expected 0.0-1.0)",
                self.id, self.favorite_score
            )));
        }
        Ok(())
    }
}

/// Decode an inventory payload: a JSON array of items
pub fn inventory_from_json(json: &str) -> Result<Vec<ClothingItem>> {
    Ok(serde_json::from_str(json)?)
}

/// Canonical form for free-text tags: trimmed, lowercase, '-' separated
pub fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
