//! Candidate Filter
//!
//! Removes items that are categorically wrong for the occasion before any
//! scoring happens. Output keeps inventory order so identical input always
//! yields the identical candidate list.

use crate::rules::occasion::{self, OccasionClass, OccasionRules};
use crate::types::Exclusion;
use tracing::{debug, warn};
use wardrobe_common::models::{normalize_tag, ClothingItem};

/// Result of filtering an inventory
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub candidates: Vec<ClothingItem>,
    pub excluded: Vec<Exclusion>,
}

/// Applies the exclusion table of one occasion class
pub struct CandidateFilter {
    rules: &'static OccasionRules,
}

impl CandidateFilter {
    pub fn for_occasion(occasion: &str) -> Self {
        Self::for_class(occasion::classify(occasion))
    }

    pub fn for_class(class: OccasionClass) -> Self {
        Self {
            rules: occasion::rules_for(class),
        }
    }

    pub fn class(&self) -> OccasionClass {
        self.rules.class
    }

    pub fn rules(&self) -> &'static OccasionRules {
        self.rules
    }

    /// Why the occasion rules exclude `item`, if they do
    pub fn exclusion_reason(&self, item: &ClothingItem) -> Option<String> {
        let item_type = item.normalized_type();
        if self.rules.blocks_type(&item_type) {
            return Some(format!("type '{}' not allowed for {:?}", item_type, self.rules.class));
        }

        if let Some(tag) = item
            .metadata
            .style_tags
            .iter()
            .map(|t| normalize_tag(t))
            .find(|t| self.rules.blocks_style_tag(t))
        {
            return Some(format!("style '{}' not allowed for {:?}", tag, self.rules.class));
        }

        if let Some(color) = self.rules.blocked_color(item.category, &item.dominant_colors) {
            return Some(format!(
                "color '{}' not allowed on {} for {:?}",
                color,
                item.category.as_str(),
                self.rules.class
            ));
        }

        None
    }

    /// Split an inventory into candidates and exclusions
    ///
    /// The base item is always kept; the caller pinned it.
    pub fn apply(&self, inventory: &[ClothingItem], base_item_id: Option<&str>) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        for item in inventory {
            let reason = self.exclusion_reason(item);
            let is_base = base_item_id == Some(item.id.as_str());

            match reason {
                Some(reason) if is_base => {
                    warn!("Base item '{}' kept despite occasion rule: {}", item.id, reason);
                    outcome.candidates.push(item.clone());
                }
                Some(reason) => {
                    debug!("Excluded '{}': {}", item.id, reason);
                    outcome.excluded.push(Exclusion {
                        item_id: item.id.clone(),
                        reason,
                    });
                }
                None => outcome.candidates.push(item.clone()),
            }
        }

        debug!(
            "Filter ({:?}) kept {} of {} items",
            self.rules.class,
            outcome.candidates.len(),
            inventory.len()
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardrobe_common::models::Category;

    fn business_pool() -> Vec<ClothingItem> {
        vec![
            ClothingItem::new("tee", Category::Top, "t-shirt"),
            ClothingItem::new("shirt", Category::Top, "dress-shirt"),
            ClothingItem::new("pants", Category::Bottom, "dress-pants"),
            ClothingItem::new("sneakers", Category::Shoes, "sneakers"),
            ClothingItem::new("oxfords", Category::Shoes, "oxfords"),
        ]
    }

    #[test]
    fn test_business_excludes_athletic_wear() {
        let outcome = CandidateFilter::for_occasion("business").apply(&business_pool(), None);
        let kept: Vec<&str> = outcome.candidates.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(kept, vec!["shirt", "pants", "oxfords"]);
        let excluded: Vec<&str> = outcome.excluded.iter().map(|e| e.item_id.as_str()).collect();
        assert_eq!(excluded, vec!["tee", "sneakers"]);
    }

    #[test]
    fn test_base_item_bypasses_filter() {
        let outcome = CandidateFilter::for_occasion("interview").apply(&business_pool(), Some("tee"));
        assert!(outcome.candidates.iter().any(|i| i.id == "tee"));
        assert!(outcome.excluded.iter().all(|e| e.item_id != "tee"));
    }

    #[test]
    fn test_blocked_style_tag_and_color() {
        let filter = CandidateFilter::for_occasion("wedding");
        let hoodie_like = ClothingItem::new("x", Category::MidLayer, "pullover")
            .with_style_tags(&["Athleisure"]);
        assert!(filter.exclusion_reason(&hoodie_like).is_some());

        let neon = ClothingItem::new("n", Category::Shoes, "loafers").with_colors(&["neon green"], &[]);
        let reason = filter.exclusion_reason(&neon).unwrap();
        assert!(reason.contains("neon green"));
    }

    #[test]
    fn test_casual_keeps_everything() {
        let filter = CandidateFilter::for_occasion("picnic");
        assert_eq!(filter.class(), OccasionClass::Casual);
        let outcome = filter.apply(&business_pool(), None);
        assert_eq!(outcome.candidates.len(), 5);
        assert!(outcome.excluded.is_empty());
    }
}
