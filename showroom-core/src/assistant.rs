//! Session orchestrator: one `Assistant` per chat session.
//!
//! Callers construct their own instance (no shared global), feed it a fresh
//! snapshot with every utterance, and read back the reply plus the derived
//! quick actions. Sessions must not share an instance; there is no locking.

use serde::Serialize;

use crate::context::{ContextStore, Role};
use crate::continuity;
use crate::intent::{self, Intent, ScoreContext};
use crate::loan;
use crate::recommend;
use crate::responses;
use crate::snapshot::AppSnapshot;
use crate::vehicle;

/// Navigation target behind a quick-action chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionTag {
    #[serde(rename = "catalog")]
    Catalog,
    #[serde(rename = "loan")]
    Loan,
    #[serde(rename = "compare")]
    Compare,
    #[serde(rename = "contact")]
    Contact,
    #[serde(rename = "cart")]
    Cart,
}

/// A suggested shortcut shown next to the chat input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub action: ActionTag,
}

/// The assistant facade: owns one session's `ContextStore` and wires the
/// classifier, generators, and continuity layer together.
#[derive(Debug, Clone, Default)]
pub struct Assistant {
    store: ContextStore,
}

impl Assistant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the session state, mainly for hosts and tests.
    pub fn context(&self) -> &ContextStore {
        &self.store
    }

    /// Mirror the host's current app state. Idempotent; called implicitly
    /// by `generate_response` as well.
    pub fn update_app_context(&mut self, snapshot: &AppSnapshot) {
        self.store.ingest_snapshot(snapshot);
    }

    /// Produce the reply for one user utterance.
    ///
    /// Continuity must see the topic as it stood before this turn, so the
    /// order is: generate, augment with the previous topic, then overwrite
    /// topic and preferences.
    pub fn generate_response(&mut self, message: &str, snapshot: &AppSnapshot) -> String {
        let lowered = message.to_lowercase();

        self.store.ingest_snapshot(snapshot);
        self.store.record_turn(Role::User, message);

        let follow_up = continuity::is_follow_up(&lowered);
        let intent = intent::classify(&lowered, &ScoreContext::from_snapshot(snapshot));
        let mut reply = self.dispatch(intent, &lowered, snapshot);

        if follow_up {
            if let Some(previous) = self.store.topic() {
                continuity::augment(&mut reply, previous, intent, snapshot, self.store.preferences());
            }
        }

        self.store.record_turn(Role::Bot, reply.clone());
        self.store.set_topic(intent);
        self.store.update_preferences(intent, &lowered);

        reply
    }

    fn dispatch(&self, intent: Intent, message: &str, snapshot: &AppSnapshot) -> String {
        match intent {
            Intent::Help => responses::help_reply(snapshot),
            Intent::Vehicle => {
                vehicle::vehicle_reply(message, snapshot, self.store.preferences(), self.store.facts())
            }
            Intent::Loan => loan::loan_reply(message, snapshot),
            Intent::Dealership => responses::dealership_reply(message),
            Intent::Comparison => responses::comparison_reply(snapshot),
            Intent::Pricing => responses::pricing_reply(message, snapshot),
            Intent::Cart => responses::cart_reply(message, snapshot),
            Intent::Personal => responses::personal_reply(message, snapshot),
            Intent::Recommendation => {
                recommend::recommendation_reply(message, snapshot, self.store.preferences())
            }
            Intent::General => responses::default_reply(message, snapshot),
        }
    }

    /// Context-aware shortcuts, most specific first: live cart/compare
    /// entries ahead of the four fixed base actions.
    pub fn quick_actions(&self) -> Vec<QuickAction> {
        let mut actions = vec![
            QuickAction { label: "Browse Vehicles", action: ActionTag::Catalog },
            QuickAction { label: "Calculate Loan", action: ActionTag::Loan },
            QuickAction { label: "Compare Cars", action: ActionTag::Compare },
            QuickAction { label: "Contact Us", action: ActionTag::Contact },
        ];

        if !self.store.snapshot().cart_items.is_empty() {
            actions.insert(0, QuickAction { label: "View Cart", action: ActionTag::Cart });
        }
        if !self.store.snapshot().compare_items.is_empty() {
            actions.insert(0, QuickAction { label: "View Comparison", action: ActionTag::Compare });
        }

        actions
    }

    /// Rolling "role: text" view of the recent turns.
    pub fn conversation_summary(&self) -> String {
        self.store.conversation_summary()
    }

    /// Description of the preferences learned so far.
    pub fn preferences_summary(&self) -> String {
        self.store.preferences_summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{BodyShape, CartItem, Vehicle};

    #[test]
    fn test_quick_actions_base_set() {
        let assistant = Assistant::new();
        let actions = assistant.quick_actions();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0].label, "Browse Vehicles");
        assert_eq!(actions[3].action, ActionTag::Contact);
    }

    #[test]
    fn test_quick_actions_prepend_live_state() {
        let mut assistant = Assistant::new();
        assistant.update_app_context(&AppSnapshot {
            cart_items: vec![CartItem::new("Ford", "F-150", 41900, 1, BodyShape::Truck)],
            compare_items: vec![Vehicle::new("Toyota", "RAV4", BodyShape::Suv, 32500)],
            ..Default::default()
        });

        let actions = assistant.quick_actions();
        assert_eq!(actions.len(), 6);
        assert_eq!(actions[0].label, "View Comparison");
        assert_eq!(actions[1].label, "View Cart");
        assert_eq!(actions[2].label, "Browse Vehicles");
    }

    #[test]
    fn test_turns_are_recorded_in_order() {
        let mut assistant = Assistant::new();
        let snapshot = AppSnapshot::default();
        assistant.generate_response("hello", &snapshot);

        let history = assistant.context().history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].text, "hello");
        assert_eq!(history[1].role, Role::Bot);
        assert!(!history[1].text.is_empty());
    }

    #[test]
    fn test_general_turn_still_updates_topic() {
        let mut assistant = Assistant::new();
        assistant.generate_response("mumble", &AppSnapshot::default());
        assert_eq!(assistant.context().topic(), Some(Intent::General));
        assert_eq!(assistant.context().preferences().recent_topics, vec![Intent::General]);
    }
}
