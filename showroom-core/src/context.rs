//! Conversational state: history, learned preferences, derived inventory facts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::snapshot::{AppSnapshot, BodyShape, BudgetBand, FuelKind, Vehicle};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

impl Role {
    pub fn tag(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

/// A single utterance or reply. Appended once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Preferences inferred from conversation. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub preferred_shape: Option<BodyShape>,
    pub preferred_fuel: Option<FuelKind>,
    pub budget_range: Option<BudgetBand>,
    /// Most-recent-first, capped at [`RECENT_TOPIC_CAP`].
    pub recent_topics: Vec<Intent>,
}

/// How many classified topics are retained for context.
pub const RECENT_TOPIC_CAP: usize = 5;

/// How many trailing turns the rolling summary reads.
const SUMMARY_WINDOW: usize = 6;

/// Price aggregates over the current inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: u32,
    pub max: u32,
    pub average: u32,
}

/// Aggregates recomputed from the inventory snapshot whenever it changes.
/// Pure function of the vehicle list; never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryFacts {
    /// Brand names in first-seen order, deduplicated.
    pub brands: Vec<String>,
    pub price_stats: Option<PriceStats>,
    /// The five lowest-priced vehicles, used as default suggestions.
    pub popular: Vec<Vehicle>,
}

impl InventoryFacts {
    pub fn compute(vehicles: &[Vehicle]) -> Self {
        let mut brands: Vec<String> = Vec::new();
        for v in vehicles {
            if !brands.iter().any(|b| b == &v.brand) {
                brands.push(v.brand.clone());
            }
        }

        let price_stats = if vehicles.is_empty() {
            None
        } else {
            let min = vehicles.iter().map(|v| v.price).min().unwrap_or(0);
            let max = vehicles.iter().map(|v| v.price).max().unwrap_or(0);
            let sum: u64 = vehicles.iter().map(|v| u64::from(v.price)).sum();
            let average = (sum as f64 / vehicles.len() as f64).round() as u32;
            Some(PriceStats { min, max, average })
        };

        let mut popular = vehicles.to_vec();
        popular.sort_by_key(|v| v.price);
        popular.truncate(5);

        Self {
            brands,
            price_stats,
            popular,
        }
    }
}

/// Single source of truth for one chat session's conversational state.
///
/// The stored topic is one turn behind on purpose: continuity for turn `n`
/// must see the topic as it stood before turn `n` was classified. Callers
/// read the topic first, generate the reply, then call `set_topic` and
/// `update_preferences`.
#[derive(Debug, Clone, Default)]
pub struct ContextStore {
    history: Vec<ConversationTurn>,
    preferences: UserPreferences,
    topic: Option<Intent>,
    last_interaction: Option<DateTime<Utc>>,
    snapshot: AppSnapshot,
    facts: InventoryFacts,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn with the current wall-clock timestamp.
    pub fn record_turn(&mut self, role: Role, text: impl Into<String>) {
        self.history.push(ConversationTurn {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    /// Replace the mirrored app state wholesale.
    ///
    /// Facts are recomputed only when the incoming inventory is non-empty:
    /// a temporarily missing vehicle list upstream keeps the previous
    /// aggregates instead of blanking them.
    pub fn ingest_snapshot(&mut self, snapshot: &AppSnapshot) {
        self.snapshot = snapshot.clone();
        if !snapshot.vehicles.is_empty() {
            self.facts = InventoryFacts::compute(&snapshot.vehicles);
        }
    }

    /// Record the just-classified intent. Called after continuity ran.
    pub fn set_topic(&mut self, intent: Intent) {
        self.topic = Some(intent);
        self.last_interaction = Some(Utc::now());
    }

    /// Learn preference signals from a classified turn.
    pub fn update_preferences(&mut self, intent: Intent, message: &str) {
        if intent == Intent::Vehicle {
            for word in ["suv", "sedan", "truck"] {
                if message.contains(word) {
                    self.preferences.preferred_shape = BodyShape::from_keyword(word);
                }
            }
            if message.contains("electric") || message.split_whitespace().any(|w| w == "ev") {
                self.preferences.preferred_fuel = Some(FuelKind::Electric);
            }
            if message.contains("hybrid") {
                self.preferences.preferred_fuel = Some(FuelKind::Hybrid);
            }
        }

        if intent == Intent::Pricing {
            if message.contains("budget") || message.contains("affordable") {
                self.preferences.budget_range = Some(BudgetBand::Affordable);
            } else if message.contains("luxury") || message.contains("premium") {
                self.preferences.budget_range = Some(BudgetBand::Luxury);
            }
        }

        self.preferences.recent_topics.insert(0, intent);
        self.preferences.recent_topics.truncate(RECENT_TOPIC_CAP);
    }

    pub fn snapshot(&self) -> &AppSnapshot {
        &self.snapshot
    }

    pub fn facts(&self) -> &InventoryFacts {
        &self.facts
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// The previous turn's classified intent (one turn behind during a turn).
    pub fn topic(&self) -> Option<Intent> {
        self.topic
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn last_interaction(&self) -> Option<DateTime<Utc>> {
        self.last_interaction
    }

    /// Rolling "role: text" view of the last few turns.
    pub fn conversation_summary(&self) -> String {
        let start = self.history.len().saturating_sub(SUMMARY_WINDOW);
        self.history[start..]
            .iter()
            .map(|turn| format!("{}: {}", turn.role.tag(), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Comma-joined description of what the assistant has learned so far.
    pub fn preferences_summary(&self) -> String {
        let prefs = &self.preferences;
        let mut parts = Vec::new();

        if let Some(shape) = prefs.preferred_shape {
            parts.push(format!("Preferred vehicle type: {}", shape.label()));
        }
        if let Some(fuel) = prefs.preferred_fuel {
            parts.push(format!("Preferred fuel type: {}", fuel.label()));
        }
        if let Some(band) = prefs.budget_range {
            parts.push(format!("Budget preference: {}", band.label()));
        }
        if !prefs.recent_topics.is_empty() {
            let topics: Vec<&str> = prefs.recent_topics.iter().take(3).map(Intent::tag).collect();
            parts.push(format!("Recent interests: {}", topics.join(", ")));
        }

        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot() -> Vec<Vehicle> {
        vec![
            Vehicle::new("Toyota", "RAV4", BodyShape::Suv, 32500),
            Vehicle::new("Toyota", "Camry", BodyShape::Sedan, 28400),
            Vehicle::new("Ford", "F-150", BodyShape::Truck, 41900),
        ]
    }

    #[test]
    fn test_facts_recompute() {
        let facts = InventoryFacts::compute(&lot());
        assert_eq!(facts.brands, vec!["Toyota".to_string(), "Ford".to_string()]);
        let stats = facts.price_stats.unwrap();
        assert_eq!(stats.min, 28400);
        assert_eq!(stats.max, 41900);
        assert_eq!(stats.average, 34267);
        assert_eq!(facts.popular[0].model, "Camry");
    }

    #[test]
    fn test_stale_facts_survive_empty_ingest() {
        let mut store = ContextStore::new();
        store.ingest_snapshot(&AppSnapshot {
            vehicles: lot(),
            ..Default::default()
        });
        assert_eq!(store.facts().brands.len(), 2);

        // Inventory fetch failed upstream: snapshot arrives with no vehicles.
        store.ingest_snapshot(&AppSnapshot::default());
        assert_eq!(store.facts().brands.len(), 2);
        assert!(store.snapshot().vehicles.is_empty());
    }

    #[test]
    fn test_recent_topics_capped() {
        let mut store = ContextStore::new();
        for i in 0..8 {
            let intent = if i % 2 == 0 { Intent::Vehicle } else { Intent::Loan };
            store.update_preferences(intent, "nothing to learn");
            assert_eq!(store.preferences().recent_topics.len(), (i + 1).min(RECENT_TOPIC_CAP));
        }
        // Most recent first.
        assert_eq!(store.preferences().recent_topics[0], Intent::Loan);
    }

    #[test]
    fn test_shape_preference_last_write_wins() {
        let mut store = ContextStore::new();
        store.update_preferences(Intent::Vehicle, "show me suvs");
        assert_eq!(store.preferences().preferred_shape, Some(BodyShape::Suv));
        store.update_preferences(Intent::Vehicle, "actually a truck");
        assert_eq!(store.preferences().preferred_shape, Some(BodyShape::Truck));
        // Non-vehicle turns leave the shape alone.
        store.update_preferences(Intent::Pricing, "sedan budget");
        assert_eq!(store.preferences().preferred_shape, Some(BodyShape::Truck));
        assert_eq!(store.preferences().budget_range, Some(BudgetBand::Affordable));
    }

    #[test]
    fn test_conversation_summary_window() {
        let mut store = ContextStore::new();
        for i in 0..10 {
            store.record_turn(Role::User, format!("q{i}"));
        }
        let summary = store.conversation_summary();
        assert_eq!(summary.lines().count(), 6);
        assert!(summary.starts_with("user: q4"));
        assert!(summary.ends_with("user: q9"));
    }

    #[test]
    fn test_preferences_summary() {
        let mut store = ContextStore::new();
        assert!(store.preferences_summary().is_empty());
        store.update_preferences(Intent::Vehicle, "a hybrid suv");
        let summary = store.preferences_summary();
        assert!(summary.contains("Preferred vehicle type: SUV"));
        assert!(summary.contains("Preferred fuel type: Hybrid"));
        assert!(summary.contains("Recent interests: vehicle"));
    }
}
