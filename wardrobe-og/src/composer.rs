//! Outfit Composer
//!
//! Deterministic, phased, greedy selection over aggregated candidates:
//!
//! 1. **Seed** - place and pin the base item, if any
//! 2. **CoreFill** - fill each mandatory slot with the best candidate that
//!    breaks no hard constraint against the current selection, withdrawing
//!    an earlier pick when a later slot has no compatible candidate
//! 3. **Layering** - add mid-layers, outerwear and accessories up to the
//!    target count, trying each candidate's allowed layer positions in order
//! 4. **Done**
//!
//! Candidates are ranked by composite (desc), then last worn (never-worn and
//! oldest first), then id. Every candidate that is not selected is recorded
//! with its rejection reason.

use crate::compat::{check_addition, Conflict, Placement};
use crate::rules::layering::allowed_positions;
use crate::rules::weather::BandRule;
use crate::types::{
    GenerationError, GenerationResult, OutfitItem, RejectionReason, ScoredItem, SkippedItem,
};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use wardrobe_common::models::{Category, Layer, Slot};
use wardrobe_common::EngineConfig;

/// Placements the core search may try before giving up
const CORE_SEARCH_BUDGET: usize = 256;

/// Composer state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Seed,
    CoreFill,
    Layering,
    Done,
}

/// Selected items in presentation order plus the candidates passed over
#[derive(Debug, Clone)]
pub struct Composition {
    pub items: Vec<OutfitItem>,
    pub skipped: Vec<SkippedItem>,
    /// Item count the layering pass aimed for
    pub target: usize,
}

/// Ranking order: composite desc, least recently worn, id
pub fn rank_order(a: &ScoredItem, b: &ScoredItem) -> Ordering {
    b.composite
        .total_cmp(&a.composite)
        .then_with(|| a.item.last_worn().cmp(&b.item.last_worn()))
        .then_with(|| a.item.id.cmp(&b.item.id))
}

fn is_layer_category(category: Category) -> bool {
    matches!(category, Category::MidLayer | Category::Outerwear)
}

/// Candidate positions to try: allowed layers for upper-body items, none otherwise
fn positions_for(scored: &ScoredItem) -> Vec<Option<Layer>> {
    let allowed = allowed_positions(&scored.item);
    if allowed.is_empty() {
        vec![None]
    } else {
        allowed.into_iter().map(Some).collect()
    }
}

struct ComposerState<'s> {
    phase: Phase,
    selected: Vec<(&'s ScoredItem, Option<Layer>, bool)>,
    skipped: Vec<SkippedItem>,
    decided: HashSet<&'s str>,
}

impl<'s> ComposerState<'s> {
    fn new() -> Self {
        Self {
            phase: Phase::Seed,
            selected: Vec::new(),
            skipped: Vec::new(),
            decided: HashSet::new(),
        }
    }

    fn advance(&mut self, next: Phase) {
        debug!("Composer phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    fn placements(&self) -> Vec<Placement<'s>> {
        self.selected
            .iter()
            .map(|(scored, position, _)| Placement::new(&scored.item, *position))
            .collect()
    }

    fn covers(&self, slot: Slot) -> bool {
        self.selected
            .iter()
            .any(|(scored, _, _)| scored.item.category.slots().contains(&slot))
    }

    fn count(&self, pred: impl Fn(Category) -> bool) -> usize {
        self.selected
            .iter()
            .filter(|(scored, _, _)| pred(scored.item.category))
            .count()
    }

    fn place(&mut self, scored: &'s ScoredItem, position: Option<Layer>, pinned: bool) {
        debug!(
            "Placed '{}' at {}",
            scored.item.id,
            position.map_or("-", Layer::as_str)
        );
        self.decided.insert(scored.item.id.as_str());
        self.selected.push((scored, position, pinned));
    }

    /// Undo the most recent placement
    fn unplace(&mut self) {
        if let Some((scored, _, _)) = self.selected.pop() {
            debug!("Removed '{}'", scored.item.id);
            self.decided.remove(scored.item.id.as_str());
        }
    }

    fn skip(&mut self, scored: &'s ScoredItem, reason: RejectionReason) {
        if self.decided.insert(scored.item.id.as_str()) {
            debug!("Skipped '{}': {}", scored.item.id, reason);
            self.skipped.push(SkippedItem {
                item_id: scored.item.id.clone(),
                composite: scored.composite,
                reason,
            });
        }
    }

    fn is_decided(&self, scored: &ScoredItem) -> bool {
        self.decided.contains(scored.item.id.as_str())
    }

    /// First position at which `scored` fits, or the conflict at its preferred position
    fn try_fit(&self, scored: &'s ScoredItem) -> Result<Option<Layer>, Conflict> {
        let current = self.placements();
        let attempt = |position: Option<Layer>| {
            match check_addition(&current, Placement::new(&scored.item, position)) {
                None => Ok(position),
                Some(conflict) => Err(conflict),
            }
        };

        let mut positions = positions_for(scored).into_iter();
        let preferred = attempt(positions.next().flatten());
        positions.fold(preferred, |result, position| {
            result.or_else(|conflict| attempt(position).map_err(|_| conflict))
        })
    }
}

/// Greedy phased composer
pub struct OutfitComposer<'c> {
    config: &'c EngineConfig,
    band: &'static BandRule,
}

impl<'c> OutfitComposer<'c> {
    pub fn new(config: &'c EngineConfig, band: &'static BandRule) -> Self {
        Self { config, band }
    }

    /// Compose an outfit from aggregated candidates
    pub fn compose(
        &self,
        scored: &[ScoredItem],
        base_item_id: Option<&str>,
    ) -> GenerationResult<Composition> {
        let mut ranked: Vec<&ScoredItem> = scored.iter().collect();
        ranked.sort_by(|a, b| rank_order(a, b));

        let mut state = ComposerState::new();

        // Seed
        if let Some(base_id) = base_item_id {
            let base = ranked
                .iter()
                .copied()
                .find(|s| s.item.id == base_id)
                .ok_or_else(|| {
                    GenerationError::Input(format!("base item '{}' is not a candidate", base_id))
                })?;
            let position = positions_for(base).into_iter().next().flatten();
            state.place(base, position, true);
            info!("Seeded outfit with base item '{}'", base_id);
        }
        state.advance(Phase::CoreFill);

        // Core fill
        let mut budget = CORE_SEARCH_BUDGET;
        if let Err(dead_end) = fill_core(&mut state, &ranked, &mut budget) {
            warn!(
                "Core fill failed for {} slot after {} placement(s)",
                dead_end.slot,
                CORE_SEARCH_BUDGET - budget
            );
            return Err(GenerationError::CompositionFailure {
                slot: dead_end.slot,
                best_attempt: dead_end.best_attempt,
                reason: dead_end.reason,
            });
        }
        info!("Core fill complete with {} items", state.selected.len());
        state.advance(Phase::Layering);

        // Layering
        let target = self.target_count(&state);
        self.layer(&mut state, &ranked, target);
        info!(
            "Layering complete: {} of target {} items",
            state.selected.len(),
            target
        );
        state.advance(Phase::Done);

        // Losing core candidates
        for scored in ranked.iter().copied() {
            if !state.is_decided(scored) {
                let reason = match scored.item.category.slots().first() {
                    Some(slot) => RejectionReason::SlotFilled { slot: *slot },
                    None => RejectionReason::TargetReached,
                };
                state.skip(scored, reason);
            }
        }

        Ok(Composition {
            items: presentation_order(&state.selected),
            skipped: state.skipped,
            target,
        })
    }

    /// Core items plus the band's layer allowance plus accessories, capped
    fn target_count(&self, state: &ComposerState<'_>) -> usize {
        let core = state.count(|c| !is_layer_category(c) && c != Category::Accessory);
        let wanted = core + self.band.optional_layers + self.config.max_accessories;
        wanted.min(self.config.max_items).max(state.selected.len())
    }

    fn layer<'s>(&self, state: &mut ComposerState<'s>, ranked: &[&'s ScoredItem], target: usize) {
        let optional = ranked.iter().copied().filter(|s| {
            is_layer_category(s.item.category) || s.item.category == Category::Accessory
        });

        for scored in optional {
            if state.is_decided(scored) {
                continue;
            }
            if state.selected.len() >= target {
                state.skip(scored, RejectionReason::TargetReached);
                continue;
            }
            if scored.composite < self.config.optional_score_floor {
                state.skip(
                    scored,
                    RejectionReason::BelowScoreFloor {
                        composite: scored.composite,
                        floor: self.config.optional_score_floor,
                    },
                );
                continue;
            }

            let exhausted = if scored.item.category == Category::Accessory {
                state.count(|c| c == Category::Accessory) >= self.config.max_accessories
            } else {
                state.count(is_layer_category) >= self.band.optional_layers
            };
            if exhausted {
                state.skip(scored, RejectionReason::AllowanceExhausted);
                continue;
            }

            match state.try_fit(scored) {
                Ok(position) => state.place(scored, position, false),
                Err(conflict) => state.skip(scored, RejectionReason::Conflict { conflict }),
            }
        }
    }
}

/// Why a mandatory slot could not be filled
struct DeadEnd {
    slot: Slot,
    best_attempt: Option<String>,
    reason: RejectionReason,
}

/// Fill the uncovered mandatory slots by depth-first search over ranked candidates
///
/// The first complete combination in rank order wins, so a feasible outfit
/// matches plain greedy selection whenever greedy would succeed. A pick
/// whose later slots cannot be completed is withdrawn and recorded with
/// the reason the later slot failed. `budget` caps the total number of
/// placements tried.
fn fill_core<'s>(
    state: &mut ComposerState<'s>,
    ranked: &[&'s ScoredItem],
    budget: &mut usize,
) -> Result<(), DeadEnd> {
    let Some(slot) = Slot::MANDATORY.into_iter().find(|s| !state.covers(*s)) else {
        return Ok(());
    };

    let mut dead_end: Option<DeadEnd> = None;
    let mut rejected: Vec<(&'s ScoredItem, RejectionReason)> = Vec::new();

    for scored in ranked
        .iter()
        .copied()
        .filter(|s| s.item.category.slots().contains(&slot))
    {
        if state.is_decided(scored) {
            continue;
        }
        match state.try_fit(scored) {
            Err(conflict) => {
                debug!("'{}' does not fit {} slot: {}", scored.item.id, slot, conflict);
                let reason = RejectionReason::Conflict { conflict };
                if dead_end.is_none() {
                    dead_end = Some(DeadEnd {
                        slot,
                        best_attempt: Some(scored.item.id.clone()),
                        reason: reason.clone(),
                    });
                }
                rejected.push((scored, reason));
            }
            Ok(position) => {
                if *budget == 0 {
                    warn!("Core search budget exhausted at {} slot", slot);
                    break;
                }
                *budget -= 1;
                state.place(scored, position, false);
                match fill_core(state, ranked, budget) {
                    Ok(()) => {
                        for (item, reason) in rejected {
                            state.skip(item, reason);
                        }
                        return Ok(());
                    }
                    Err(deeper) => {
                        state.unplace();
                        warn!(
                            "Withdrew '{}' from {} slot: {} slot cannot be completed ({})",
                            scored.item.id, slot, deeper.slot, deeper.reason
                        );
                        rejected.push((scored, deeper.reason.clone()));
                        if dead_end.is_none() {
                            dead_end = Some(deeper);
                        }
                    }
                }
            }
        }
    }

    Err(dead_end.unwrap_or(DeadEnd {
        slot,
        best_attempt: None,
        reason: RejectionReason::NoCandidates,
    }))
}

/// Upper-body items innermost first, then bottoms, shoes, accessories
fn presentation_order(selected: &[(&ScoredItem, Option<Layer>, bool)]) -> Vec<OutfitItem> {
    let mut items: Vec<OutfitItem> = selected
        .iter()
        .map(|(scored, position, pinned)| OutfitItem {
            scored: (*scored).clone(),
            position: *position,
            pinned: *pinned,
        })
        .collect();

    items.sort_by_key(|item| {
        let group = match item.item().category {
            c if c.is_upper_body() => 0,
            Category::Bottom => 1,
            Category::Shoes => 2,
            _ => 3,
        };
        (group, item.position)
    });
    items
}
