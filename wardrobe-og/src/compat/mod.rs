//! Hard compatibility constraints
//!
//! A [`Conflict`] removes a combination from consideration outright. Scored
//! preferences live in [`scoring`] and only ever affect ranking. The composer
//! checks each candidate with [`check_addition`]; the validator re-checks the
//! whole outfit with [`find_conflicts`].
//!
//! Constraints:
//! - one item per exclusive slot (a dress holds two)
//! - an outer garment's sleeve is never shorter than one beneath it
//! - no two upper-body items share a layer position
//! - formality spread across the outfit is at most [`MAX_FORMALITY_SPREAD`]
//! - fewer than [`MAX_BOLD_PATTERNS`] bold patterns

pub mod scoring;

use serde::{Deserialize, Serialize};
use std::fmt;
use wardrobe_common::models::{ClothingItem, Layer, Slot};

/// Largest allowed gap between the most and least formal item
pub const MAX_FORMALITY_SPREAD: u8 = 2;

/// Bold pattern count at which an outfit becomes incoherent
pub const MAX_BOLD_PATTERNS: usize = 3;

/// An item together with the layer position it occupies (if upper body)
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub item: &'a ClothingItem,
    pub position: Option<Layer>,
}

impl<'a> Placement<'a> {
    pub fn new(item: &'a ClothingItem, position: Option<Layer>) -> Self {
        Self { item, position }
    }
}

/// Violated hard constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "constraint", rename_all = "snake_case")]
pub enum Conflict {
    SlotTaken { slot: Slot, holder: String },
    /// `outer` sits over `inner` with a shorter sleeve
    SleeveUnderLayer { outer: String, inner: String },
    PositionTaken { layer: Layer, holder: String },
    FormalitySpread { spread: u8 },
    BoldPatternOverload { count: usize },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlotTaken { slot, holder } => {
                write!(f, "{} slot already holds '{}'", slot, holder)
            }
            Self::SleeveUnderLayer { outer, inner } => write!(
                f,
                "'{}' would sit over '{}' with a shorter sleeve",
                outer, inner
            ),
            Self::PositionTaken { layer, holder } => {
                write!(f, "{} layer already holds '{}'", layer.as_str(), holder)
            }
            Self::FormalitySpread { spread } => write!(
                f,
                "formality spread {} exceeds {}",
                spread, MAX_FORMALITY_SPREAD
            ),
            Self::BoldPatternOverload { count } => {
                write!(f, "{} bold patterns in one outfit", count)
            }
        }
    }
}

/// First hard constraint broken by adding `candidate` to `selected`
pub fn check_addition<'a>(selected: &[Placement<'a>], candidate: Placement<'a>) -> Option<Conflict> {
    if let Some(conflict) = selected
        .iter()
        .find_map(|existing| pair_conflict(*existing, candidate))
    {
        return Some(conflict);
    }

    let items = selected
        .iter()
        .map(|p| p.item)
        .chain(std::iter::once(candidate.item));
    group_conflict(items)
}

/// Every hard constraint broken by a complete set of placements
pub fn find_conflicts(placements: &[Placement<'_>]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for (i, later) in placements.iter().enumerate() {
        for earlier in &placements[..i] {
            if let Some(conflict) = pair_conflict(*earlier, *later) {
                conflicts.push(conflict);
            }
        }
    }

    let items = || placements.iter().map(|p| p.item);
    let spread = formality_spread(items());
    if spread > MAX_FORMALITY_SPREAD {
        conflicts.push(Conflict::FormalitySpread { spread });
    }
    let bold = bold_count(items());
    if bold >= MAX_BOLD_PATTERNS {
        conflicts.push(Conflict::BoldPatternOverload { count: bold });
    }
    conflicts
}

/// Difference between the most and least formal item
pub fn formality_spread<'a>(items: impl Iterator<Item = &'a ClothingItem>) -> u8 {
    let (min, max) = items.fold((u8::MAX, u8::MIN), |(lo, hi), item| {
        let level = item.metadata.formality;
        (lo.min(level), hi.max(level))
    });
    max.saturating_sub(min)
}

pub fn bold_count<'a>(items: impl Iterator<Item = &'a ClothingItem>) -> usize {
    items.filter(|item| item.is_bold_pattern()).count()
}

/// True if `outer` sits above `inner` and has the shorter sleeve
///
/// Items without a declared sleeve length never conflict.
pub fn sleeve_conflict(outer: Placement<'_>, inner: Placement<'_>) -> bool {
    match (outer.position, inner.position) {
        (Some(outer_layer), Some(inner_layer)) if outer_layer > inner_layer => {
            match (
                outer.item.metadata.sleeve_length,
                inner.item.metadata.sleeve_length,
            ) {
                (Some(outer_sleeve), Some(inner_sleeve)) => outer_sleeve < inner_sleeve,
                _ => false,
            }
        }
        _ => false,
    }
}

fn pair_conflict(existing: Placement<'_>, candidate: Placement<'_>) -> Option<Conflict> {
    let existing_slots = existing.item.category.slots();
    if let Some(slot) = candidate
        .item
        .category
        .slots()
        .iter()
        .find(|slot| existing_slots.contains(slot))
    {
        return Some(Conflict::SlotTaken {
            slot: *slot,
            holder: existing.item.id.clone(),
        });
    }

    if let (Some(a), Some(b)) = (existing.position, candidate.position) {
        if a == b {
            return Some(Conflict::PositionTaken {
                layer: a,
                holder: existing.item.id.clone(),
            });
        }
    }

    if sleeve_conflict(candidate, existing) {
        return Some(Conflict::SleeveUnderLayer {
            outer: candidate.item.id.clone(),
            inner: existing.item.id.clone(),
        });
    }
    if sleeve_conflict(existing, candidate) {
        return Some(Conflict::SleeveUnderLayer {
            outer: existing.item.id.clone(),
            inner: candidate.item.id.clone(),
        });
    }

    None
}

fn group_conflict<'a>(items: impl Iterator<Item = &'a ClothingItem> + Clone) -> Option<Conflict> {
    let spread = formality_spread(items.clone());
    if spread > MAX_FORMALITY_SPREAD {
        return Some(Conflict::FormalitySpread { spread });
    }
    let bold = bold_count(items);
    if bold >= MAX_BOLD_PATTERNS {
        return Some(Conflict::BoldPatternOverload { count: bold });
    }
    None
}
