//! Temperature bands and garment warmth
//!
//! Each band lists the garment warmth range it tolerates, the seasons it
//! corresponds to and how many optional layers (mid/outer) the composer may
//! add.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use wardrobe_common::models::{Category, ClothingItem, Layer, Season, Texture};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    Freezing,
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
}

#[derive(Debug)]
pub struct BandRule {
    pub band: TemperatureBand,
    /// Exclusive upper temperature bound (°C)
    pub upper_c: f64,
    pub min_warmth: u8,
    pub max_warmth: u8,
    pub seasons: &'static [Season],
    /// Optional mid/outer layers the composer may add
    pub optional_layers: usize,
}

impl BandRule {
    /// Distance of a warmth level from the acceptable range (0 = inside)
    pub fn warmth_distance(&self, warmth: u8) -> u8 {
        if warmth < self.min_warmth {
            self.min_warmth - warmth
        } else if warmth > self.max_warmth {
            warmth - self.max_warmth
        } else {
            0
        }
    }

    pub fn matches_season(&self, seasons: &[Season]) -> bool {
        seasons
            .iter()
            .any(|s| *s == Season::AllSeason || self.seasons.contains(s))
    }
}

static BAND_TABLE: Lazy<Vec<BandRule>> = Lazy::new(|| {
    use Season::*;
    vec![
        BandRule {
            band: TemperatureBand::Freezing,
            upper_c: 0.0,
            min_warmth: 3,
            max_warmth: 5,
            seasons: &[Winter],
            optional_layers: 2,
        },
        BandRule {
            band: TemperatureBand::Cold,
            upper_c: 10.0,
            min_warmth: 3,
            max_warmth: 5,
            seasons: &[Winter, Autumn],
            optional_layers: 2,
        },
        BandRule {
            band: TemperatureBand::Cool,
            upper_c: 16.0,
            min_warmth: 2,
            max_warmth: 4,
            seasons: &[Autumn, Spring],
            optional_layers: 1,
        },
        BandRule {
            band: TemperatureBand::Mild,
            upper_c: 22.0,
            min_warmth: 1,
            max_warmth: 3,
            seasons: &[Spring, Autumn],
            optional_layers: 1,
        },
        BandRule {
            band: TemperatureBand::Warm,
            upper_c: 28.0,
            min_warmth: 1,
            max_warmth: 2,
            seasons: &[Summer, Spring],
            optional_layers: 0,
        },
        BandRule {
            band: TemperatureBand::Hot,
            upper_c: f64::INFINITY,
            min_warmth: 1,
            max_warmth: 2,
            seasons: &[Summer],
            optional_layers: 0,
        },
    ]
});

/// Band rule for a temperature in °C
pub fn band_for(temperature_c: f64) -> &'static BandRule {
    BAND_TABLE
        .iter()
        .find(|rule| temperature_c < rule.upper_c)
        .unwrap_or_else(|| &BAND_TABLE[BAND_TABLE.len() - 1])
}

/// Intrinsic warmth of a fabric, 1 (airy) to 5 (insulating)
pub fn texture_warmth(texture: Texture) -> u8 {
    match texture {
        Texture::Linen | Texture::Silk | Texture::Satin | Texture::Mesh => 1,
        Texture::Cotton | Texture::Synthetic => 2,
        Texture::Denim
        | Texture::Knit
        | Texture::Corduroy
        | Texture::Velvet
        | Texture::Suede => 3,
        Texture::Wool | Texture::Cashmere | Texture::Fleece | Texture::Leather => 4,
        Texture::Down => 5,
    }
}

/// Fabrics that suffer in rain or snow
pub fn is_delicate(texture: Texture) -> bool {
    matches!(
        texture,
        Texture::Silk | Texture::Satin | Texture::Suede | Texture::Velvet
    )
}

/// Fabrics that feel oppressive in warm, humid air
pub fn is_heavy(texture: Texture) -> bool {
    matches!(
        texture,
        Texture::Wool
            | Texture::Cashmere
            | Texture::Fleece
            | Texture::Leather
            | Texture::Down
            | Texture::Corduroy
    )
}

/// Warmth of a garment: fabric warmth plus one for outer layers
pub fn item_warmth(item: &ClothingItem) -> u8 {
    let base = item.metadata.texture.map(texture_warmth).unwrap_or(2);
    let outer = item.category == Category::Outerwear || item.metadata.layer == Some(Layer::Outer);
    let warmth = if outer { base + 1 } else { base };
    warmth.clamp(1, 5)
}
