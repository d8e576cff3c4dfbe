//! Recommendation responses: preference-weighted picks with price backfill.

use crate::budget::parse_budget;
use crate::context::UserPreferences;
use crate::money::format_usd;
use crate::snapshot::{AppSnapshot, BodyShape, Vehicle};

/// How many picks a recommendation aims for.
const TARGET_PICKS: usize = 3;

/// Recommendation-intent responses.
///
/// Picks up to two vehicles matching the learned shape preference, then
/// backfills to three with the lowest-priced remaining candidates. A budget
/// in the utterance filters first; an impossible budget gets the cheapest
/// available option instead of an empty answer.
pub fn recommendation_reply(
    message: &str,
    snapshot: &AppSnapshot,
    prefs: &UserPreferences,
) -> String {
    let vehicles = &snapshot.vehicles;

    if message.contains("recommend") || message.contains("suggestion") || message.contains("best") {
        if vehicles.is_empty() {
            return "I'd love to recommend vehicles, but our inventory data isn't available \
                    right now. Please check back soon or browse our catalog directly!"
                .to_string();
        }

        let budget = parse_budget(message);
        let candidates: Vec<&Vehicle> = match budget {
            Some(limit) => vehicles.iter().filter(|v| v.price <= limit).collect(),
            None => vehicles.iter().collect(),
        };

        if candidates.is_empty() {
            let cheapest = vehicles.iter().map(|v| v.price).min().unwrap_or(0);
            let limit = budget.unwrap_or(0);
            return format!(
                "No vehicles available under {}. Our most affordable option starts at {}. \
                 Would you like to see vehicles in a higher price range?",
                format_usd(u64::from(limit)),
                format_usd(u64::from(cheapest))
            );
        }

        let mut picks: Vec<&Vehicle> = Vec::new();
        if let Some(shape) = prefs.preferred_shape {
            picks.extend(candidates.iter().copied().filter(|v| v.shape == shape).take(2));
        }

        if picks.len() < TARGET_PICKS {
            let mut backfill: Vec<&Vehicle> = candidates
                .iter()
                .copied()
                .filter(|v| !picks.iter().any(|p| p == v))
                .collect();
            backfill.sort_by_key(|v| v.price);
            backfill.truncate(TARGET_PICKS - picks.len());
            picks.extend(backfill);
        }

        let mut reply = format!("Here are my top {} recommendation", picks.len());
        reply.push_str(if picks.len() == 1 { "" } else { "s" });
        if let Some(limit) = budget {
            reply.push_str(&format!(" under {}", format_usd(u64::from(limit))));
        }
        reply.push_str(": ");

        let details: Vec<String> = picks
            .iter()
            .map(|v| {
                let mut line = v.listing_label();
                if v.new_vehicle {
                    line.push_str(" - New");
                }
                line
            })
            .collect();
        reply.push_str(&details.join(", "));
        reply.push_str(". ");

        if let Some(shape) = prefs.preferred_shape {
            if picks.iter().any(|v| v.shape == shape) {
                reply.push_str(&format!(
                    "I included {}s since you've shown interest in them. ",
                    shape.label().to_lowercase()
                ));
            }
        }

        if !snapshot.cart_items.is_empty() {
            reply.push_str("Want to compare these with items in your cart? ");
        } else if !snapshot.compare_items.is_empty() {
            reply.push_str("Add any to your comparison list? ");
        } else {
            reply.push_str("Would you like detailed specs on any of these? ");
        }

        return reply;
    }

    if message.contains("family") || message.contains("kids") {
        let family: Vec<&Vehicle> = vehicles
            .iter()
            .filter(|v| v.shape == BodyShape::Suv || v.shape == BodyShape::Minivan)
            .take(3)
            .collect();
        if !family.is_empty() {
            let suggestions: Vec<String> = family.iter().map(|v| v.listing_label()).collect();
            return format!(
                "For family vehicles, I'd recommend: {}. These offer great space, safety \
                 features, and comfort for family trips. Would you like to learn more \
                 about any of these?",
                suggestions.join(", ")
            );
        }
    }

    if message.contains("commute") || message.contains("work") || message.contains("daily") {
        let commuters: Vec<&Vehicle> = vehicles
            .iter()
            .filter(|v| v.shape == BodyShape::Sedan || v.shape == BodyShape::Hatchback)
            .take(3)
            .collect();
        if !commuters.is_empty() {
            let suggestions: Vec<String> = commuters.iter().map(|v| v.listing_label()).collect();
            return format!(
                "For daily commuting, I'd recommend: {}. These offer great fuel efficiency \
                 and comfort for daily driving. Would you like to learn more about any of \
                 these?",
                suggestions.join(", ")
            );
        }
    }

    "I can help you find the perfect vehicle! What are you looking for in a car?".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot() -> Vec<Vehicle> {
        vec![
            Vehicle::new("BMW", "X5", BodyShape::Suv, 65200),
            Vehicle::new("Hyundai", "Elantra", BodyShape::Sedan, 21600),
            Vehicle::new("Toyota", "RAV4", BodyShape::Suv, 32500).with_new_vehicle(true),
            Vehicle::new("Honda", "Civic", BodyShape::Sedan, 24900),
            Vehicle::new("Ford", "F-150", BodyShape::Truck, 41900),
        ]
    }

    fn snapshot() -> AppSnapshot {
        AppSnapshot {
            vehicles: lot(),
            ..Default::default()
        }
    }

    #[test]
    fn test_preferred_shape_leads_then_price_backfills() {
        let prefs = UserPreferences {
            preferred_shape: Some(BodyShape::Suv),
            ..Default::default()
        };
        let out = recommendation_reply("what do you recommend", &snapshot(), &prefs);
        // Two SUVs in inventory order, then the cheapest remaining vehicle.
        assert!(out.contains("BMW X5"));
        assert!(out.contains("Toyota RAV4 ($32,500) - New"));
        assert!(out.contains("Hyundai Elantra"));
        assert!(out.contains("I included suvs"));
    }

    #[test]
    fn test_budget_filters_candidates() {
        let out = recommendation_reply(
            "recommend something under 30k",
            &snapshot(),
            &UserPreferences::default(),
        );
        assert!(out.contains("under $30,000"));
        assert!(out.contains("Hyundai Elantra"));
        assert!(out.contains("Honda Civic"));
        assert!(!out.contains("BMW X5"));
    }

    #[test]
    fn test_impossible_budget_offers_cheapest() {
        let out = recommendation_reply(
            "best deal under 5k",
            &snapshot(),
            &UserPreferences::default(),
        );
        assert!(out.contains("No vehicles available under $5,000"));
        assert!(out.contains("$21,600"));
    }

    #[test]
    fn test_empty_inventory_apologizes() {
        let out = recommendation_reply(
            "any recommendations",
            &AppSnapshot::default(),
            &UserPreferences::default(),
        );
        assert!(out.contains("inventory data isn't available"));
    }

    #[test]
    fn test_family_branch() {
        let out = recommendation_reply(
            "i need something for the kids",
            &snapshot(),
            &UserPreferences::default(),
        );
        assert!(out.contains("family vehicles"));
        assert!(out.contains("BMW X5"));
    }

    #[test]
    fn test_commuter_branch() {
        let out = recommendation_reply(
            "something for my daily commute",
            &snapshot(),
            &UserPreferences::default(),
        );
        assert!(out.contains("daily commuting"));
        assert!(out.contains("Hyundai Elantra"));
    }
}
