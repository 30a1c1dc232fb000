//! Data model shared between the catalog, the request layer and the engine

pub mod context;
pub mod item;

pub use context::{
    BodyType, FeedbackEvent, FeedbackSignal, GenerationContext, LikedOutfit, StylePreference,
    UserProfile, WeatherCondition, WeatherSnapshot,
};
pub use item::{
    inventory_from_json, normalize_tag, Category, ClothingItem, Fit, ItemMetadata, Layer, Pattern,
    Season, Silhouette, SleeveLength, Slot, Texture,
};
