//! Occasion classification and per-class exclusion tables
//!
//! Occasions sharing a dress code share one rule table. Unknown occasions
//! fall back to `Casual`, which blocks nothing.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use wardrobe_common::models::{normalize_tag, Category};

/// Minimum normalized Levenshtein similarity for a fuzzy occasion match
const FUZZY_MATCH_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccasionClass {
    Formal,
    Athletic,
    Evening,
    Casual,
}

/// Hard exclusion rules for one occasion class
#[derive(Debug)]
pub struct OccasionRules {
    pub class: OccasionClass,
    /// Formality level an outfit for this class ideally sits at
    pub target_formality: u8,
    pub blocked_types: HashSet<&'static str>,
    pub blocked_style_tags: HashSet<&'static str>,
    pub blocked_colors: HashMap<Category, HashSet<&'static str>>,
}

impl OccasionRules {
    pub fn blocks_type(&self, normalized_type: &str) -> bool {
        self.blocked_types.contains(normalized_type)
    }

    pub fn blocks_style_tag(&self, normalized_tag: &str) -> bool {
        self.blocked_style_tags.contains(normalized_tag)
    }

    /// First color of `colors` that is banned for `category`, if any
    pub fn blocked_color<'c>(&self, category: Category, colors: &'c [String]) -> Option<&'c String> {
        let banned = self.blocked_colors.get(&category)?;
        colors
            .iter()
            .find(|c| banned.contains(normalize_tag(c).as_str()))
    }
}

/// Occasion aliases in a fixed order so fuzzy matching is deterministic
const OCCASION_ALIASES: &[(&str, OccasionClass)] = &[
    ("business", OccasionClass::Formal),
    ("formal", OccasionClass::Formal),
    ("interview", OccasionClass::Formal),
    ("wedding", OccasionClass::Formal),
    ("conference", OccasionClass::Formal),
    ("office", OccasionClass::Formal),
    ("funeral", OccasionClass::Formal),
    ("athletic", OccasionClass::Athletic),
    ("gym", OccasionClass::Athletic),
    ("workout", OccasionClass::Athletic),
    ("sport", OccasionClass::Athletic),
    ("running", OccasionClass::Athletic),
    ("training", OccasionClass::Athletic),
    ("hiking", OccasionClass::Athletic),
    ("yoga", OccasionClass::Athletic),
    ("party", OccasionClass::Evening),
    ("date", OccasionClass::Evening),
    ("dinner", OccasionClass::Evening),
    ("evening", OccasionClass::Evening),
    ("cocktail", OccasionClass::Evening),
    ("gala", OccasionClass::Evening),
];

const NEON_COLORS: &[&str] = &[
    "neon-green",
    "neon-yellow",
    "neon-pink",
    "neon-orange",
    "neon-blue",
    "fluorescent-yellow",
    "fluorescent-green",
    "lime",
    "hot-pink",
];

const ATHLETIC_TYPES: &[&str] = &[
    "t-shirt",
    "tee",
    "graphic-tee",
    "tank-top",
    "athletic-shirt",
    "hoodie",
    "sweatshirt",
    "sweatpants",
    "joggers",
    "shorts",
    "athletic-shorts",
    "leggings",
    "track-jacket",
    "sneakers",
    "running-shoes",
    "trainers",
    "flip-flops",
    "slides",
    "sandals",
];

static OCCASION_RULES: Lazy<HashMap<OccasionClass, OccasionRules>> = Lazy::new(|| {
    let mut map = HashMap::new();

    let mut formal_colors = HashMap::new();
    formal_colors.insert(Category::Shoes, NEON_COLORS.iter().copied().collect());
    formal_colors.insert(Category::Bottom, NEON_COLORS.iter().copied().collect());
    map.insert(
        OccasionClass::Formal,
        OccasionRules {
            class: OccasionClass::Formal,
            target_formality: 4,
            blocked_types: ATHLETIC_TYPES.iter().copied().collect(),
            blocked_style_tags: ["athleisure", "sportswear", "gym"].into_iter().collect(),
            blocked_colors: formal_colors,
        },
    );

    map.insert(
        OccasionClass::Athletic,
        OccasionRules {
            class: OccasionClass::Athletic,
            target_formality: 1,
            blocked_types: [
                "blazer",
                "suit-jacket",
                "suit-pants",
                "dress-pants",
                "dress-shirt",
                "tie",
                "oxfords",
                "loafers",
                "heels",
                "dress-shoes",
                "cocktail-dress",
                "gown",
                "trench-coat",
                "peacoat",
            ]
            .into_iter()
            .collect(),
            blocked_style_tags: ["black-tie", "evening-wear"].into_iter().collect(),
            blocked_colors: HashMap::new(),
        },
    );

    map.insert(
        OccasionClass::Evening,
        OccasionRules {
            class: OccasionClass::Evening,
            target_formality: 3,
            blocked_types: [
                "athletic-shirt",
                "athletic-shorts",
                "sweatpants",
                "joggers",
                "running-shoes",
                "flip-flops",
                "slides",
                "track-jacket",
            ]
            .into_iter()
            .collect(),
            blocked_style_tags: ["sportswear", "gym"].into_iter().collect(),
            blocked_colors: HashMap::new(),
        },
    );

    map.insert(
        OccasionClass::Casual,
        OccasionRules {
            class: OccasionClass::Casual,
            target_formality: 2,
            blocked_types: HashSet::new(),
            blocked_style_tags: HashSet::new(),
            blocked_colors: HashMap::new(),
        },
    );

    map
});

/// Map a free-text occasion to its class
///
/// Exact alias match first, then the most similar alias above the fuzzy
/// threshold (ties resolved by alias order), else `Casual`.
pub fn classify(occasion: &str) -> OccasionClass {
    let normalized = normalize_tag(occasion);

    if let Some((_, class)) = OCCASION_ALIASES.iter().find(|(alias, _)| *alias == normalized) {
        return *class;
    }

    let mut best: Option<(f64, OccasionClass, &str)> = None;
    for (alias, class) in OCCASION_ALIASES {
        let similarity = strsim::normalized_levenshtein(&normalized, alias);
        if similarity >= FUZZY_MATCH_THRESHOLD && best.map_or(true, |(s, _, _)| similarity > s) {
            best = Some((similarity, *class, *alias));
        }
    }

    match best {
        Some((similarity, class, alias)) => {
            tracing::debug!(
                "Fuzzy matched occasion '{}' to '{}' (similarity {:.2})",
                occasion,
                alias,
                similarity
            );
            class
        }
        None => OccasionClass::Casual,
    }
}

/// Rule table for an occasion class
pub fn rules_for(class: OccasionClass) -> &'static OccasionRules {
    &OCCASION_RULES[&class]
}
