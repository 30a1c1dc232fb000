//! Color and texture compatibility tables

use once_cell::sync::Lazy;
use std::collections::HashSet;
use wardrobe_common::models::{normalize_tag, ClothingItem, Texture};

static NEUTRAL_COLORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "black", "white", "grey", "gray", "charcoal", "navy", "beige", "cream", "ivory", "tan",
        "khaki", "brown", "camel", "denim",
    ]
    .into_iter()
    .collect()
});

/// Texture pairs that look wrong together; stored with the smaller texture first
static INCOMPATIBLE_TEXTURES: Lazy<HashSet<(Texture, Texture)>> = Lazy::new(|| {
    use Texture::*;
    [
        (Silk, Fleece),
        (Satin, Fleece),
        (Linen, Fleece),
        (Linen, Down),
        (Silk, Corduroy),
        (Satin, Denim),
        (Velvet, Mesh),
        (Satin, Mesh),
        (Leather, Suede),
        (Velvet, Fleece),
    ]
    .into_iter()
    .map(|(a, b)| ordered(a, b))
    .collect()
});

fn ordered(a: Texture, b: Texture) -> (Texture, Texture) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

pub fn is_neutral(color: &str) -> bool {
    NEUTRAL_COLORS.contains(normalize_tag(color).as_str())
}

pub fn textures_clash(a: Texture, b: Texture) -> bool {
    INCOMPATIBLE_TEXTURES.contains(&ordered(a, b))
}

/// True if a dominant color of one item is listed as a match by the other
pub fn colors_harmonize(a: &ClothingItem, b: &ClothingItem) -> bool {
    lists_match(&a.dominant_colors, &b.matching_colors)
        || lists_match(&b.dominant_colors, &a.matching_colors)
}

/// True if both items are built from neutral colors only
pub fn both_neutral(a: &ClothingItem, b: &ClothingItem) -> bool {
    let all_neutral =
        |item: &ClothingItem| !item.dominant_colors.is_empty() && item.dominant_colors.iter().all(|c| is_neutral(c));
    all_neutral(a) && all_neutral(b)
}

fn lists_match(dominant: &[String], matching: &[String]) -> bool {
    let matching: HashSet<String> = matching.iter().map(|c| normalize_tag(c)).collect();
    dominant.iter().any(|c| matching.contains(&normalize_tag(c)))
}
