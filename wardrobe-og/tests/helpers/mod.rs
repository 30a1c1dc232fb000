//! Shared fixtures for the wardrobe-og integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use wardrobe_common::models::{
    Category, ClothingItem, Fit, GenerationContext, Pattern, Season, SleeveLength, Texture,
    WeatherCondition, WeatherSnapshot,
};

/// Fixed reference time so recency scoring is reproducible
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 15, 8, 0, 0).unwrap()
}

pub fn context(occasion: &str, temperature_c: f64) -> GenerationContext {
    let condition = if temperature_c <= 0.0 {
        WeatherCondition::Snow
    } else {
        WeatherCondition::Clear
    };
    GenerationContext::new(occasion, WeatherSnapshot::new(temperature_c, condition), now())
}

pub fn item(id: &str, category: Category, item_type: &str, formality: u8) -> ClothingItem {
    ClothingItem::new(id, category, item_type).with_formality(formality)
}

/// Mixed wardrobe with a complete core set at every formality tier
pub fn wardrobe() -> Vec<ClothingItem> {
    vec![
        // Casual tier
        item("tee", Category::Top, "t-shirt", 2)
            .with_sleeve(SleeveLength::Short)
            .with_texture(Texture::Cotton)
            .with_colors(&["white"], &["navy", "denim"])
            .with_seasons(&[Season::Summer, Season::Spring]),
        item("graphic-tee", Category::Top, "graphic-tee", 1)
            .with_sleeve(SleeveLength::Short)
            .with_pattern(Pattern::Graphic)
            .with_colors(&["black"], &[]),
        item("jeans", Category::Bottom, "jeans", 2)
            .with_texture(Texture::Denim)
            .with_fit(Fit::Regular)
            .with_colors(&["denim"], &["white"])
            .with_seasons(&[Season::AllSeason]),
        item("sneakers", Category::Shoes, "sneakers", 2).with_colors(&["white"], &[]),
        // Smart casual tier
        item("polo", Category::Top, "polo", 3)
            .with_sleeve(SleeveLength::Short)
            .with_colors(&["navy"], &["beige"]),
        item("chinos", Category::Bottom, "chinos", 3)
            .with_fit(Fit::Fitted)
            .with_colors(&["beige"], &["navy"]),
        item("loafers", Category::Shoes, "loafers", 3).with_colors(&["brown"], &[]),
        // Business tier
        item("dress-shirt", Category::Top, "dress-shirt", 4)
            .with_sleeve(SleeveLength::Long)
            .with_texture(Texture::Cotton)
            .with_colors(&["light-blue"], &["grey"]),
        item("dress-pants", Category::Bottom, "dress-pants", 4)
            .with_texture(Texture::Wool)
            .with_colors(&["grey"], &["light-blue"]),
        item("oxfords", Category::Shoes, "oxfords", 4)
            .with_texture(Texture::Leather)
            .with_colors(&["black"], &[]),
        // One-piece
        item("wrap-dress", Category::Dress, "wrap-dress", 3)
            .with_sleeve(SleeveLength::ThreeQuarter)
            .with_pattern(Pattern::Floral)
            .with_colors(&["red"], &["black"]),
        // Layers
        item("sweater", Category::MidLayer, "sweater", 3)
            .with_sleeve(SleeveLength::Long)
            .with_texture(Texture::Wool)
            .with_fit(Fit::Loose)
            .with_colors(&["grey"], &["navy"])
            .with_seasons(&[Season::Winter, Season::Autumn]),
        item("coat", Category::Outerwear, "coat", 3)
            .with_sleeve(SleeveLength::Long)
            .with_texture(Texture::Wool)
            .with_colors(&["camel"], &["grey"])
            .with_seasons(&[Season::Winter]),
        item("denim-jacket", Category::Outerwear, "denim-jacket", 2)
            .with_sleeve(SleeveLength::Long)
            .with_texture(Texture::Denim)
            .with_colors(&["denim"], &["white"])
            .with_seasons(&[Season::Spring, Season::Autumn]),
        // Accessories
        item("scarf", Category::Accessory, "scarf", 3)
            .with_texture(Texture::Cashmere)
            .with_colors(&["navy"], &["grey"])
            .with_seasons(&[Season::Winter]),
        item("belt", Category::Accessory, "belt", 3).with_colors(&["brown"], &[]),
    ]
}

/// Wardrobes whose highest-ranked core pick clashes with every candidate of
/// a later slot; only a lower-ranked pick completes the outfit
pub fn dead_end_wardrobes() -> Vec<(&'static str, Vec<ClothingItem>)> {
    vec![
        (
            "formal top over casual core",
            vec![
                item("blouse", Category::Top, "blouse", 5).with_favorite(1.0),
                item("tee", Category::Top, "t-shirt", 2),
                item("jeans", Category::Bottom, "jeans", 2),
                item("sneakers", Category::Shoes, "sneakers", 2),
            ],
        ),
        (
            "gown over beach shoes",
            vec![
                item("gown", Category::Dress, "gown", 5).with_favorite(1.0),
                item("tee", Category::Top, "t-shirt", 1),
                item("shorts", Category::Bottom, "shorts", 1),
                item("sandals", Category::Shoes, "sandals", 1),
            ],
        ),
        (
            "bold top over bold bottom and shoes",
            vec![
                item("graphic-tee", Category::Top, "graphic-tee", 2)
                    .with_pattern(Pattern::Graphic)
                    .with_favorite(1.0),
                item("tee", Category::Top, "t-shirt", 2),
                item("plaid-pants", Category::Bottom, "trousers", 2).with_pattern(Pattern::Plaid),
                item("camo-sneakers", Category::Shoes, "sneakers", 2).with_pattern(Pattern::Camo),
            ],
        ),
    ]
}
