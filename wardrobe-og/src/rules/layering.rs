//! Garment type → allowed layer positions
//!
//! Some garments can be worn at more than one depth (a cardigan is a mid
//! layer under a coat or the outer layer on its own). Positions are listed
//! in order of preference.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use wardrobe_common::models::{Category, ClothingItem, Layer};

static TYPE_POSITIONS: Lazy<HashMap<&'static str, &'static [Layer]>> = Lazy::new(|| {
    use Layer::*;
    let entries: &[(&str, &'static [Layer])] = &[
        // Next to skin
        ("undershirt", &[Base]),
        ("camisole", &[Base, Inner]),
        ("tank-top", &[Base, Inner]),
        ("thermal", &[Base]),
        // Primary tops
        ("t-shirt", &[Inner, Base]),
        ("tee", &[Inner, Base]),
        ("graphic-tee", &[Inner]),
        ("athletic-shirt", &[Inner, Base]),
        ("shirt", &[Inner]),
        ("dress-shirt", &[Inner]),
        ("blouse", &[Inner]),
        ("polo", &[Inner]),
        ("turtleneck", &[Inner, Mid]),
        ("flannel-shirt", &[Inner, Mid]),
        // Mid layers
        ("sweater", &[Mid, Outer]),
        ("cardigan", &[Mid, Outer]),
        ("hoodie", &[Mid, Outer]),
        ("sweatshirt", &[Mid, Outer]),
        ("vest", &[Mid]),
        ("sweater-vest", &[Mid]),
        ("fleece", &[Mid, Outer]),
        ("overshirt", &[Mid, Outer]),
        // Outer layers
        ("blazer", &[Outer]),
        ("suit-jacket", &[Outer]),
        ("denim-jacket", &[Outer, Mid]),
        ("jacket", &[Outer]),
        ("track-jacket", &[Outer, Mid]),
        ("leather-jacket", &[Outer]),
        ("coat", &[Outer]),
        ("trench-coat", &[Outer]),
        ("peacoat", &[Outer]),
        ("parka", &[Outer]),
        ("raincoat", &[Outer]),
    ];
    entries.iter().copied().collect()
});

/// Fallback position for upper-body categories without a type entry
fn category_default(category: Category) -> Option<Layer> {
    match category {
        Category::Top | Category::Dress => Some(Layer::Inner),
        Category::MidLayer => Some(Layer::Mid),
        Category::Outerwear => Some(Layer::Outer),
        _ => None,
    }
}

/// Layer positions an item may occupy, in preference order
///
/// A layer declared in the item's metadata comes first. Items that are not
/// worn on the upper body have no layer positions.
pub fn allowed_positions(item: &ClothingItem) -> Vec<Layer> {
    if !item.category.is_upper_body() {
        return Vec::new();
    }

    let mut positions: Vec<Layer> = Vec::with_capacity(3);
    if let Some(layer) = item.metadata.layer {
        positions.push(layer);
    }

    match TYPE_POSITIONS.get(item.normalized_type().as_str()) {
        Some(from_type) => {
            for layer in from_type.iter() {
                if !positions.contains(layer) {
                    positions.push(*layer);
                }
            }
        }
        None => {
            if let Some(layer) = category_default(item.category) {
                if !positions.contains(&layer) {
                    positions.push(layer);
                }
            }
        }
    }

    positions
}

/// Position used when an item is scored outside a concrete outfit
pub fn preferred_position(item: &ClothingItem) -> Option<Layer> {
    allowed_positions(item).first().copied()
}
