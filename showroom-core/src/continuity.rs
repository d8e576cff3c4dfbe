//! Follow-up detection and topic-linked reply augmentation.
//!
//! Augmentation keys off the topic stored for the *previous* turn: the
//! orchestrator reads it before overwriting it with the current intent,
//! so a follow-up like "what about trucks" still links back to the SUV
//! conversation that preceded it.

use crate::context::UserPreferences;
use crate::intent::Intent;
use crate::snapshot::AppSnapshot;

const FOLLOW_UP_MARKERS: &[&str] = &[
    "what about",
    "how about",
    "and",
    "also",
    "too",
    "as well",
    "what else",
    "any other",
    "more",
    "different",
    "similar",
    "compare",
    "versus",
    "vs",
    "difference",
    "better",
    "worse",
];

/// True when the utterance reads as a continuation of the previous turn.
pub fn is_follow_up(message: &str) -> bool {
    FOLLOW_UP_MARKERS.iter().any(|marker| message.contains(marker))
}

/// Append continuity clauses for recognized topic pairs.
///
/// vehicle -> vehicle: reference the learned shape preference and suggest
/// the next step by precedence (non-empty cart, then non-empty compare
/// list, then neither). loan -> pricing: point at the loan calculator.
/// Every other pair is a no-op.
pub fn augment(
    reply: &mut String,
    previous: Intent,
    current: Intent,
    snapshot: &AppSnapshot,
    prefs: &UserPreferences,
) {
    if previous == Intent::Vehicle && current == Intent::Vehicle {
        if let Some(shape) = prefs.preferred_shape {
            reply.push_str(&format!(" Since you're interested in {}s, ", shape.label()));
            if !snapshot.cart_items.is_empty() {
                reply.push_str(
                    "you might want to check out our comparison tool to see how your cart \
                     items stack up against other options. ",
                );
            } else if !snapshot.compare_items.is_empty() {
                reply.push_str(
                    "you can add more vehicles to your comparison list to get a better \
                     view of your options. ",
                );
            } else {
                reply.push_str(
                    "you can add vehicles to your comparison list or cart to keep track \
                     of your favorites. ",
                );
            }
        }
    }

    if previous == Intent::Loan && current == Intent::Pricing {
        reply.push_str(
            " You can use our loan calculator to see how different down payments and \
             terms affect your monthly payments. ",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{BodyShape, CartItem, Vehicle};

    #[test]
    fn test_follow_up_markers() {
        assert!(is_follow_up("what about trucks"));
        assert!(is_follow_up("is the second one better"));
        assert!(is_follow_up("any other options"));
        assert!(!is_follow_up("show me suvs"));
    }

    #[test]
    fn test_vehicle_chain_references_preference() {
        let prefs = UserPreferences {
            preferred_shape: Some(BodyShape::Suv),
            ..Default::default()
        };
        let mut reply = String::from("Base.");
        augment(&mut reply, Intent::Vehicle, Intent::Vehicle, &AppSnapshot::default(), &prefs);
        assert!(reply.contains("Since you're interested in SUVs"));
        assert!(reply.contains("comparison list or cart"));
    }

    #[test]
    fn test_suggestion_precedence_cart_first() {
        let prefs = UserPreferences {
            preferred_shape: Some(BodyShape::Sedan),
            ..Default::default()
        };
        let snapshot = AppSnapshot {
            cart_items: vec![CartItem::new("Honda", "Civic", 24900, 1, BodyShape::Sedan)],
            compare_items: vec![Vehicle::new("Toyota", "Camry", BodyShape::Sedan, 28400)],
            ..Default::default()
        };
        let mut reply = String::new();
        augment(&mut reply, Intent::Vehicle, Intent::Vehicle, &snapshot, &prefs);
        // Cart wins over the non-empty compare list.
        assert!(reply.contains("cart items stack up"));
        assert!(!reply.contains("add more vehicles"));
    }

    #[test]
    fn test_loan_to_pricing_nudges_calculator() {
        let mut reply = String::from("Prices vary.");
        augment(
            &mut reply,
            Intent::Loan,
            Intent::Pricing,
            &AppSnapshot::default(),
            &UserPreferences::default(),
        );
        assert!(reply.contains("loan calculator"));
    }

    #[test]
    fn test_other_pairs_untouched() {
        let mut reply = String::from("Base.");
        augment(
            &mut reply,
            Intent::Cart,
            Intent::Vehicle,
            &AppSnapshot::default(),
            &UserPreferences::default(),
        );
        assert_eq!(reply, "Base.");

        // vehicle -> vehicle without a learned shape stays untouched too.
        augment(
            &mut reply,
            Intent::Vehicle,
            Intent::Vehicle,
            &AppSnapshot::default(),
            &UserPreferences::default(),
        );
        assert_eq!(reply, "Base.");
    }
}
