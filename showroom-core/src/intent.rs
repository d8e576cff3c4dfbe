//! Intent classification: weighted keyword tables with contextual boosts.
//!
//! Deterministic by construction. Same utterance + same context always
//! produces the same scores, and exact ties keep the first profile in
//! declaration order.

use serde::{Deserialize, Serialize};

use crate::snapshot::AppSnapshot;

/// The classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    #[serde(rename = "help")]
    Help,
    #[serde(rename = "vehicle")]
    Vehicle,
    #[serde(rename = "loan")]
    Loan,
    #[serde(rename = "dealership")]
    Dealership,
    #[serde(rename = "comparison")]
    Comparison,
    #[serde(rename = "pricing")]
    Pricing,
    #[serde(rename = "cart")]
    Cart,
    #[serde(rename = "personal")]
    Personal,
    #[serde(rename = "recommendation")]
    Recommendation,
    /// Fallback when no category clears the confidence floor.
    #[serde(rename = "general")]
    General,
}

impl Intent {
    /// Short stable tag for logs and summaries.
    pub fn tag(&self) -> &'static str {
        match self {
            Intent::Help => "help",
            Intent::Vehicle => "vehicle",
            Intent::Loan => "loan",
            Intent::Dealership => "dealership",
            Intent::Comparison => "comparison",
            Intent::Pricing => "pricing",
            Intent::Cart => "cart",
            Intent::Personal => "personal",
            Intent::Recommendation => "recommendation",
            Intent::General => "general",
        }
    }
}

/// Minimum winning score. At or below this the utterance falls to `General`.
const CONFIDENCE_FLOOR: f64 = 0.3;

/// Live app-state signals that nudge scoring toward the matching category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreContext {
    pub cart_filled: bool,
    pub compare_filled: bool,
    pub logged_in: bool,
}

impl ScoreContext {
    pub fn from_snapshot(snapshot: &AppSnapshot) -> Self {
        Self {
            cart_filled: !snapshot.cart_items.is_empty(),
            compare_filled: !snapshot.compare_items.is_empty(),
            logged_in: snapshot.is_logged_in(),
        }
    }
}

/// Keyword list for one scored intent, weights per phrase.
struct IntentProfile {
    intent: Intent,
    keywords: &'static [(&'static str, f64)],
}

// Weight tiers: primary phrases 0.6-0.8, secondary 0.3-0.5.
// Declaration order is the tie-break order; `General` is never scored.
const PROFILES: &[IntentProfile] = &[
    IntentProfile {
        intent: Intent::Help,
        keywords: &[
            ("help", 0.8),
            ("how to", 0.8),
            ("how do i", 0.8),
            ("what can you", 0.8),
            ("guide", 0.8),
            ("assist", 0.8),
            ("show me", 0.4),
            ("explain", 0.4),
            ("tutorial", 0.4),
            ("instructions", 0.4),
            ("support", 0.4),
        ],
    },
    IntentProfile {
        intent: Intent::Vehicle,
        keywords: &[
            ("car", 0.7),
            ("vehicle", 0.7),
            ("truck", 0.7),
            ("suv", 0.7),
            ("sedan", 0.7),
            ("hatchback", 0.7),
            ("coupe", 0.7),
            ("convertible", 0.7),
            ("minivan", 0.7),
            ("toyota", 0.6),
            ("honda", 0.6),
            ("ford", 0.6),
            ("chevrolet", 0.6),
            ("nissan", 0.6),
            ("bmw", 0.6),
            ("mercedes", 0.6),
            ("audi", 0.6),
            ("tesla", 0.6),
            ("hyundai", 0.6),
            ("engine", 0.4),
            ("transmission", 0.4),
            ("mileage", 0.4),
            ("year", 0.4),
            ("model", 0.4),
            ("make", 0.4),
            ("new", 0.3),
            ("used", 0.3),
            ("certified", 0.3),
            ("electric", 0.3),
            ("hybrid", 0.3),
            ("gas", 0.3),
            ("diesel", 0.3),
        ],
    },
    IntentProfile {
        intent: Intent::Loan,
        keywords: &[
            ("loan", 0.8),
            ("finance", 0.8),
            ("financing", 0.8),
            ("payment", 0.8),
            ("monthly", 0.8),
            ("interest", 0.8),
            ("apr", 0.8),
            ("monthly payment", 0.7),
            ("installment", 0.7),
            ("lease", 0.7),
            ("credit", 0.6),
            ("score", 0.6),
            ("down payment", 0.6),
            ("trade-in", 0.6),
        ],
    },
    IntentProfile {
        intent: Intent::Dealership,
        keywords: &[
            ("hours", 0.8),
            ("contact", 0.8),
            ("phone", 0.8),
            ("email", 0.8),
            ("address", 0.8),
            ("location", 0.8),
            ("warranty", 0.7),
            ("service", 0.7),
            ("maintenance", 0.7),
            ("repair", 0.7),
            ("test drive", 0.7),
        ],
    },
    IntentProfile {
        intent: Intent::Comparison,
        keywords: &[
            ("compare", 0.8),
            ("comparison", 0.8),
            ("vs", 0.8),
            ("versus", 0.8),
            ("difference", 0.8),
            ("better", 0.8),
            ("which", 0.8),
            ("than", 0.4),
            ("against", 0.4),
            ("or", 0.4),
            ("between", 0.4),
        ],
    },
    IntentProfile {
        intent: Intent::Pricing,
        keywords: &[
            ("price", 0.8),
            ("cost", 0.8),
            ("how much", 0.8),
            ("expensive", 0.8),
            ("cheap", 0.8),
            ("budget", 0.8),
            ("afford", 0.8),
            ("$", 0.5),
            ("dollar", 0.5),
            ("thousand", 0.5),
            ("payment", 0.5),
        ],
    },
    IntentProfile {
        intent: Intent::Cart,
        keywords: &[
            ("cart", 0.8),
            ("shopping", 0.8),
            ("checkout", 0.8),
            ("purchase", 0.8),
            ("buy", 0.8),
            ("selected", 0.8),
        ],
    },
    IntentProfile {
        intent: Intent::Personal,
        keywords: &[
            ("my", 0.7),
            ("account", 0.7),
            ("profile", 0.7),
            ("history", 0.7),
            ("purchase", 0.7),
        ],
    },
    IntentProfile {
        intent: Intent::Recommendation,
        keywords: &[
            ("recommend", 0.8),
            ("suggestion", 0.8),
            ("best", 0.8),
            ("top", 0.8),
            ("popular", 0.8),
            ("should i", 0.8),
            ("need", 0.5),
            ("looking for", 0.5),
            ("want", 0.5),
            ("family", 0.5),
            ("commute", 0.5),
        ],
    },
];

/// Raw keyword score before boosts, uncapped.
fn keyword_score(message: &str, keywords: &[(&str, f64)]) -> f64 {
    keywords
        .iter()
        .filter(|(phrase, _)| message.contains(phrase))
        .map(|(_, weight)| weight)
        .sum()
}

/// Boosts from live app state, applied before the saturation cap.
fn context_boost(intent: Intent, ctx: &ScoreContext) -> f64 {
    match intent {
        Intent::Comparison if ctx.compare_filled => 0.3,
        Intent::Cart if ctx.cart_filled => 0.4,
        Intent::Personal if ctx.logged_in => 0.3,
        _ => 0.0,
    }
}

/// Question phrasing nudges the help category, once per cue kind.
fn question_cues(message: &str) -> f64 {
    let mut bonus = 0.0;
    if message.contains('?') {
        bonus += 0.2;
    }
    if message.contains("what") || message.contains("how") {
        bonus += 0.3;
    }
    bonus
}

/// Classify a lowercased utterance against every scored category.
///
/// Each score is the sum of matched keyword weights plus any contextual
/// boost, saturated at 1.0. The winner must strictly exceed the confidence
/// floor; otherwise the utterance is `General`.
pub fn classify(message: &str, ctx: &ScoreContext) -> Intent {
    let mut best = Intent::General;
    let mut best_score = CONFIDENCE_FLOOR;

    for profile in PROFILES {
        let mut raw = keyword_score(message, profile.keywords) + context_boost(profile.intent, ctx);
        if profile.intent == Intent::Help {
            raw += question_cues(message);
        }
        let score = raw.min(1.0);
        if score > best_score {
            best = profile.intent;
            best_score = score;
        }
    }

    best
}
