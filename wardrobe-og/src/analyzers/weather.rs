//! Weather appropriateness
//!
//! Garment warmth against the temperature band's acceptable range, season
//! tags against the band's seasons, and condition adjustments for rain, wind
//! and humidity.

use super::{ScoringAnalyzer, ScoringScope};
use crate::rules::weather::{is_delicate, is_heavy, item_warmth, TemperatureBand};
use crate::types::{Dimension, DimensionScore};
use wardrobe_common::models::{normalize_tag, Category, ClothingItem, Layer, SleeveLength};

const SEASON_ADJUST: f64 = 0.15;
const WINDY_KPH: f64 = 30.0;
const HUMID: f64 = 0.75;

pub struct WeatherAnalyzer;

impl ScoringAnalyzer for WeatherAnalyzer {
    fn dimension(&self) -> Dimension {
        Dimension::Weather
    }

    fn score(&self, item: &ClothingItem, scope: &ScoringScope<'_>) -> DimensionScore {
        let band = scope.band;
        let weather = &scope.context.weather;
        let mut notes = Vec::new();

        let mut value = if item.category.is_garment() {
            let warmth = item_warmth(item);
            let base = match band.warmth_distance(warmth) {
                0 => 0.8,
                1 => 0.5,
                _ => 0.2,
            };
            notes.push(format!(
                "warmth {} vs {:?} range {}-{}",
                warmth, band.band, band.min_warmth, band.max_warmth
            ));
            base
        } else {
            0.6
        };

        if !item.metadata.seasons.is_empty() {
            if band.matches_season(&item.metadata.seasons) {
                value += SEASON_ADJUST;
                notes.push("in season".to_string());
            } else {
                value -= SEASON_ADJUST;
                notes.push("out of season".to_string());
            }
        }

        if weather.condition.is_wet() {
            if item.metadata.texture.is_some_and(is_delicate) {
                value -= 0.2;
                notes.push(format!("delicate fabric in {:?}", weather.condition));
            }
            let waterproof = item
                .metadata
                .style_tags
                .iter()
                .any(|t| matches!(normalize_tag(t).as_str(), "waterproof" | "water-resistant"));
            if waterproof {
                value += 0.15;
                notes.push("waterproof".to_string());
            }
        }

        let is_outer = item.category == Category::Outerwear || item.metadata.layer == Some(Layer::Outer);
        if weather.wind_kph > WINDY_KPH && band.band <= TemperatureBand::Cool && is_outer {
            value += 0.1;
            notes.push(format!("wind protection at {:.0} km/h", weather.wind_kph));
        }

        if weather.humidity > HUMID
            && band.band >= TemperatureBand::Warm
            && item.metadata.texture.is_some_and(is_heavy)
        {
            value -= 0.1;
            notes.push("heavy fabric in humid heat".to_string());
        }

        match item.metadata.sleeve_length {
            Some(SleeveLength::Long) if band.band >= TemperatureBand::Warm => {
                value -= 0.1;
                notes.push("long sleeves in heat".to_string());
            }
            Some(SleeveLength::Sleeveless | SleeveLength::Short) if band.band <= TemperatureBand::Cold => {
                value -= 0.1;
                notes.push("short sleeves in cold".to_string());
            }
            _ => {}
        }

        DimensionScore::new(value, notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::occasion::{rules_for, OccasionClass};
    use chrono::{TimeZone, Utc};
    use wardrobe_common::models::{
        GenerationContext, Season, Texture, WeatherCondition, WeatherSnapshot,
    };
    use wardrobe_common::EngineConfig;

    fn score_in(item: &ClothingItem, weather: WeatherSnapshot) -> f64 {
        let context = GenerationContext::new(
            "casual",
            weather,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let config = EngineConfig::default();
        let candidates = vec![item.clone()];
        let scope = ScoringScope::new(&context, &config, &candidates, rules_for(OccasionClass::Casual));
        WeatherAnalyzer.score(item, &scope).value
    }

    #[test]
    fn test_parka_beats_linen_in_freezing() {
        let parka = ClothingItem::new("p", Category::Outerwear, "parka")
            .with_texture(Texture::Down)
            .with_seasons(&[Season::Winter]);
        let linen = ClothingItem::new("l", Category::Top, "shirt")
            .with_texture(Texture::Linen)
            .with_seasons(&[Season::Summer]);
        let cold = WeatherSnapshot::new(-5.0, WeatherCondition::Clear);
        assert!(score_in(&parka, cold.clone()) > score_in(&linen, cold));
    }

    #[test]
    fn test_linen_beats_wool_in_heat() {
        let linen = ClothingItem::new("l", Category::Top, "shirt").with_texture(Texture::Linen);
        let wool = ClothingItem::new("w", Category::Top, "sweater").with_texture(Texture::Wool);
        let hot = WeatherSnapshot::new(32.0, WeatherCondition::Clear);
        assert!(score_in(&linen, hot.clone()) > score_in(&wool, hot));
    }

    #[test]
    fn test_rain_penalizes_suede() {
        let suede = ClothingItem::new("s", Category::Shoes, "boots").with_texture(Texture::Suede);
        let dry = score_in(&suede, WeatherSnapshot::new(12.0, WeatherCondition::Clear));
        let wet = score_in(&suede, WeatherSnapshot::new(12.0, WeatherCondition::Rain));
        assert!((dry - wet - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_wind_rewards_outer_layer() {
        let coat = ClothingItem::new("c", Category::Outerwear, "coat").with_texture(Texture::Wool);
        let mut windy = WeatherSnapshot::new(8.0, WeatherCondition::Wind);
        windy.wind_kph = 45.0;
        let calm = WeatherSnapshot::new(8.0, WeatherCondition::Clear);
        assert!(score_in(&coat, windy) > score_in(&coat, calm));
    }

    #[test]
    fn test_humid_heat_penalizes_heavy_fabric() {
        let fleece = ClothingItem::new("f", Category::MidLayer, "fleece").with_texture(Texture::Fleece);
        let mut humid = WeatherSnapshot::new(29.0, WeatherCondition::Clear);
        humid.humidity = 0.9;
        let dry = WeatherSnapshot::new(29.0, WeatherCondition::Clear);
        assert!(score_in(&fleece, humid) < score_in(&fleece, dry));
    }
}
