//! Vehicle-inventory responses: shape, eco, brand, and compound queries.
//!
//! Branch order matters and mirrors how shoppers actually phrase things:
//! explicit shape words first, then electric/hybrid, then multi-criteria
//! searches, then single-brand questions, then the budget/luxury catch-alls.

use crate::budget::parse_budget;
use crate::context::{InventoryFacts, UserPreferences};
use crate::money::format_usd;
use crate::plural;
use crate::snapshot::{AppSnapshot, BodyShape, Vehicle};

/// Top-level generator for vehicle-intent utterances.
pub fn vehicle_reply(
    message: &str,
    snapshot: &AppSnapshot,
    prefs: &UserPreferences,
    facts: &InventoryFacts,
) -> String {
    if message.contains("suv") || message.contains("sport utility") {
        return shape_reply(message, snapshot, prefs, BodyShape::Suv);
    }
    if message.contains("sedan") || message.contains("car") {
        return shape_reply(message, snapshot, prefs, BodyShape::Sedan);
    }
    if message.contains("truck") || message.contains("pickup") {
        return shape_reply(message, snapshot, prefs, BodyShape::Truck);
    }
    if message.contains("electric")
        || message.contains("hybrid")
        || message.split_whitespace().any(|w| w == "ev")
    {
        return eco_reply(message, snapshot);
    }

    if let Some(reply) = compound_reply(message, &snapshot.vehicles, facts) {
        return reply;
    }
    if let Some(reply) = brand_reply(message, snapshot, facts) {
        return reply;
    }

    if message.contains("budget") || message.contains("affordable") || message.contains("cheap") {
        if let Some(reply) = value_picks_reply(&snapshot.vehicles) {
            return reply;
        }
    }
    if message.contains("luxury") || message.contains("premium") || message.contains("expensive") {
        if let Some(reply) = luxury_picks_reply(&snapshot.vehicles) {
            return reply;
        }
    }

    "We have a diverse inventory of vehicles. You can browse our catalog to see all \
     available makes and models, or let me know what specific features you're looking \
     for and I can help narrow down your options."
        .to_string()
}

fn price_range(vehicles: &[&Vehicle]) -> Option<(u32, u32)> {
    let min = vehicles.iter().map(|v| v.price).min()?;
    let max = vehicles.iter().map(|v| v.price).max()?;
    Some((min, max))
}

fn listing_lines(vehicles: &[&Vehicle], limit: usize) -> Vec<String> {
    vehicles.iter().take(limit).map(|v| v.listing_label()).collect()
}

/// Inventory report for one body shape, with budget narrowing and
/// preference/cart nods. Zero matches get an apology plus a redirect.
fn shape_reply(
    message: &str,
    snapshot: &AppSnapshot,
    prefs: &UserPreferences,
    shape: BodyShape,
) -> String {
    let matches: Vec<&Vehicle> = snapshot.vehicles.iter().filter(|v| v.shape == shape).collect();

    if matches.is_empty() {
        return match shape {
            BodyShape::Suv => {
                "We currently don't have SUVs in stock, but new inventory arrives weekly. \
                 Would you like me to help you find similar crossover vehicles or notify \
                 you when SUVs become available?"
                    .to_string()
            }
            BodyShape::Sedan => {
                "We're currently out of sedans, but we expect new arrivals soon. Can I \
                 interest you in similar hatchbacks or compact cars?"
                    .to_string()
            }
            BodyShape::Truck => {
                "No trucks currently in stock, but we can order one or help you find a \
                 suitable SUV with similar hauling capacity."
                    .to_string()
            }
            other => format!(
                "We don't have any {}s on the lot right now, but inventory turns over \
                 weekly. Want me to suggest something close?",
                other.label().to_lowercase()
            ),
        };
    }

    let mut reply = match shape {
        BodyShape::Suv => format!("We have {} SUVs available! ", matches.len()),
        BodyShape::Sedan => format!("{} sedans in stock! ", matches.len()),
        BodyShape::Truck => format!("{} trucks available! ", matches.len()),
        other => format!("{} {}s in stock! ", matches.len(), other.label()),
    };

    if let Some((min, max)) = price_range(&matches) {
        if shape == BodyShape::Truck {
            reply.push_str(&format!("Starting from {}. ", format_usd(u64::from(min))));
        } else {
            reply.push_str(&format!(
                "Pricing: {} - {}. ",
                format_usd(u64::from(min)),
                format_usd(u64::from(max))
            ));
        }
    }

    let top = listing_lines(&matches, 3);
    if !top.is_empty() {
        reply.push_str(&format!("Top options: {}. ", top.join(", ")));
    }

    if shape == BodyShape::Sedan
        && (message.contains("efficient") || message.contains("mpg") || message.contains("gas"))
    {
        reply.push_str("Our sedans offer excellent fuel economy for daily commuting. ");
    }

    if shape == BodyShape::Truck {
        if message.contains("work") || message.contains("haul") || message.contains("tow") {
            reply.push_str("Built for work and heavy-duty loads. ");
        } else if message.contains("family") || message.contains("daily") {
            reply.push_str("Works for family duty and utility alike. ");
        }
    }

    if let Some(budget) = parse_budget(message) {
        let within = matches.iter().filter(|v| v.price <= budget).count();
        if within > 0 {
            reply.push_str(&format!(
                "{} {}{} fit your budget under {}. ",
                within,
                shape.label(),
                plural(within),
                format_usd(u64::from(budget))
            ));
        } else if let Some((min, _)) = price_range(&matches) {
            reply.push_str(&format!(
                "None under {}, but our most affordable {} starts at {}. ",
                format_usd(u64::from(budget)),
                shape.label(),
                format_usd(u64::from(min))
            ));
        }
    }

    if prefs.preferred_shape == Some(shape) {
        reply.push_str(match shape {
            BodyShape::Suv => "Perfect choice, you've looked at SUVs before! ",
            BodyShape::Sedan => "Great, sedans are your preferred type! ",
            BodyShape::Truck => "Trucks are a smart choice! ",
            _ => "Right in line with what you've been browsing! ",
        });
    }

    if shape == BodyShape::Suv && snapshot.cart_items.iter().any(|item| item.shape == BodyShape::Suv)
    {
        reply.push_str("I see you have an SUV in your cart. Want to compare options? ");
    }

    reply.push_str(match shape {
        BodyShape::Suv => "Would you like specific recommendations based on your needs?",
        BodyShape::Sedan => "What features matter most: fuel efficiency, luxury, or value?",
        BodyShape::Truck => "Need help choosing between cab sizes or bed lengths?",
        _ => "Want details on any of these?",
    });

    reply
}

/// Electric and hybrid inventory. Teslas count as electric even when the
/// description doesn't say so.
fn eco_reply(message: &str, snapshot: &AppSnapshot) -> String {
    let electric: Vec<&Vehicle> = snapshot
        .vehicles
        .iter()
        .filter(|v| v.brand == "Tesla" || v.description.to_lowercase().contains("electric"))
        .collect();
    let hybrids: Vec<&Vehicle> = snapshot
        .vehicles
        .iter()
        .filter(|v| {
            v.description.to_lowercase().contains("hybrid")
                && !electric.iter().any(|e| *e == *v)
        })
        .collect();

    let total = electric.len() + hybrids.len();
    if total == 0 {
        return "We don't currently have electric or hybrid vehicles in stock, but we can \
                order them! New EV models arrive monthly."
            .to_string();
    }

    let mut reply = format!("{} eco-friendly vehicle{} available! ", total, plural(total));

    if !electric.is_empty() {
        reply.push_str(&format!("Electric: {}. ", listing_lines(&electric, 2).join(", ")));
    }
    if !hybrids.is_empty() {
        reply.push_str(&format!("Plus {} hybrid option{}. ", hybrids.len(), plural(hybrids.len())));
    }

    reply.push_str("Benefits: lower fuel costs, smaller environmental impact, and often tax incentives. ");

    if snapshot.is_logged_in() {
        reply.push_str("As a registered customer, you may qualify for federal EV tax credits up to $7,500! ");
    }

    if message.contains("range") || message.contains("charge") {
        reply.push_str("Our EVs offer 250+ mile range with fast charging capability. ");
    }

    reply.push_str("Want details on charging options or specific models?");
    reply
}

/// Single-brand report with optional exact-model narrowing and cart/compare
/// nods. `None` when no known brand appears in the utterance.
fn brand_reply(message: &str, snapshot: &AppSnapshot, facts: &InventoryFacts) -> Option<String> {
    let brand = facts
        .brands
        .iter()
        .find(|b| message.contains(&b.to_lowercase()))?;

    let stocked: Vec<&Vehicle> = snapshot.vehicles.iter().filter(|v| &v.brand == brand).collect();

    if stocked.is_empty() {
        return Some(format!(
            "We don't currently have {brand} vehicles in stock, but we can help you find \
             similar alternatives or check when new {brand} inventory arrives."
        ));
    }

    let mut reply = format!("{} {brand} vehicle{} in stock! ", stocked.len(), plural(stocked.len()));

    if let Some((min, max)) = price_range(&stocked) {
        reply.push_str(&format!(
            "From {} to {}. ",
            format_usd(u64::from(min)),
            format_usd(u64::from(max))
        ));
    }

    let models: Vec<String> = stocked
        .iter()
        .take(3)
        .map(|v| format!("{} ({})", v.model, format_usd(u64::from(v.price))))
        .collect();
    if !models.is_empty() {
        reply.push_str(&format!("Models: {}. ", models.join(", ")));
    }

    if let Some(exact) = stocked
        .iter()
        .find(|v| message.contains(&v.model.to_lowercase()))
    {
        reply.push_str(&format!(
            "The {} is available for {}! ",
            exact.model,
            format_usd(u64::from(exact.price))
        ));
    }

    let in_cart = snapshot.cart_items.iter().any(|item| &item.brand == brand);
    let in_compare = snapshot.compare_items.iter().any(|v| &v.brand == brand);
    if in_cart {
        reply.push_str(&format!("You have a {brand} in your cart. Compare with others? "));
    } else if in_compare {
        reply.push_str(&format!("You're comparing {brand} vehicles. Good choice! "));
    }

    reply.push_str("Need specific model details or want to see alternatives?");
    Some(reply)
}

/// Multi-criteria search over the inventory.
///
/// Answers only when at least two independent criteria are present; with
/// fewer, the caller falls through to the simpler single-criterion branches.
pub(crate) fn compound_reply(
    message: &str,
    vehicles: &[Vehicle],
    facts: &InventoryFacts,
) -> Option<String> {
    if vehicles.is_empty() {
        return None;
    }

    let mut filtered: Vec<&Vehicle> = vehicles.iter().collect();
    let mut criteria: Vec<String> = Vec::new();

    if let Some(budget) = parse_budget(message) {
        filtered.retain(|v| v.price <= budget);
        criteria.push(format!("under {}", format_usd(u64::from(budget))));
    }

    let shape = ["suv", "sedan", "truck", "hatchback", "coupe"]
        .iter()
        .find(|word| message.contains(*word))
        .and_then(|word| BodyShape::from_keyword(word));
    if let Some(shape) = shape {
        filtered.retain(|v| v.shape == shape);
        criteria.push(shape.label().to_lowercase());
    }

    if let Some(brand) = facts
        .brands
        .iter()
        .find(|b| message.contains(&b.to_lowercase()))
    {
        filtered.retain(|v| &v.brand == brand);
        criteria.push(brand.clone());
    }

    if message.contains("efficient") || message.contains("mpg") || message.contains("gas mileage") {
        // Sedans and hybrid-badged vehicles stand in for efficiency data.
        filtered.retain(|v| {
            v.shape == BodyShape::Sedan || v.description.to_lowercase().contains("hybrid")
        });
        criteria.push("fuel efficient".to_string());
    }

    if message.contains("new") {
        filtered.retain(|v| v.new_vehicle);
        criteria.push("new".to_string());
    } else if message.contains("used") {
        filtered.retain(|v| !v.new_vehicle);
        criteria.push("used".to_string());
    }

    if criteria.len() < 2 {
        return None;
    }

    let joined = criteria.join(", ");
    if filtered.is_empty() {
        return Some(format!(
            "No vehicles match your criteria ({joined}). Would you like to adjust your \
             requirements or see similar options?"
        ));
    }

    let mut reply = format!(
        "Found {} vehicle{} matching \"{joined}\"! ",
        filtered.len(),
        plural(filtered.len())
    );

    let top = listing_lines(&filtered, 3);
    if !top.is_empty() {
        reply.push_str(&format!("Top matches: {}. ", top.join(", ")));
    }
    if filtered.len() > 3 {
        reply.push_str(&format!("Plus {} more option{}. ", filtered.len() - 3, plural(filtered.len() - 3)));
    }

    reply.push_str("Want detailed specs on any of these?");
    Some(reply)
}

/// Three picks under $30,000, in inventory order.
fn value_picks_reply(vehicles: &[Vehicle]) -> Option<String> {
    let picks: Vec<&Vehicle> = vehicles.iter().filter(|v| v.price < 30000).take(3).collect();
    if picks.is_empty() {
        return None;
    }
    Some(format!(
        "For budget-friendly options, I'd recommend: {}. These are great value vehicles \
         under $30,000. Would you like to learn more about any of these?",
        listing_lines(&picks, 3).join(", ")
    ))
}

/// Three picks over $50,000, in inventory order.
fn luxury_picks_reply(vehicles: &[Vehicle]) -> Option<String> {
    let picks: Vec<&Vehicle> = vehicles.iter().filter(|v| v.price > 50000).take(3).collect();
    if picks.is_empty() {
        return None;
    }
    Some(format!(
        "For luxury options, I'd recommend: {}. These premium vehicles offer exceptional \
         features and performance. Would you like to learn more about any of these?",
        listing_lines(&picks, 3).join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::InventoryFacts;

    fn lot() -> Vec<Vehicle> {
        vec![
            Vehicle::new("Toyota", "RAV4", BodyShape::Suv, 32500).with_new_vehicle(true),
            Vehicle::new("Toyota", "Corolla", BodyShape::Hatchback, 23800).with_new_vehicle(true),
            Vehicle::new("Honda", "Civic", BodyShape::Sedan, 24900)
                .with_description("Reliable commuter, hybrid drivetrain available"),
            Vehicle::new("Ford", "F-150", BodyShape::Truck, 41900).with_new_vehicle(true),
            Vehicle::new("Tesla", "Model 3", BodyShape::Sedan, 42990)
                .with_description("Fully electric, long range battery")
                .with_new_vehicle(true),
            Vehicle::new("BMW", "X5", BodyShape::Suv, 65200).with_description("Luxury midsize SUV"),
        ]
    }

    fn snapshot() -> AppSnapshot {
        AppSnapshot {
            vehicles: lot(),
            ..Default::default()
        }
    }

    fn reply(message: &str) -> String {
        let snap = snapshot();
        let facts = InventoryFacts::compute(&snap.vehicles);
        vehicle_reply(message, &snap, &UserPreferences::default(), &facts)
    }

    #[test]
    fn test_suv_branch_reports_range_and_examples() {
        let out = reply("show me suvs");
        assert!(out.contains("2 SUVs available"));
        assert!(out.contains("$32,500"));
        assert!(out.contains("$65,200"));
        assert!(out.contains("Toyota RAV4"));
    }

    #[test]
    fn test_zero_match_shape_apologizes() {
        let empty = AppSnapshot::default();
        let facts = InventoryFacts::default();
        let out = vehicle_reply("show me suvs", &empty, &UserPreferences::default(), &facts);
        assert!(out.contains("don't have SUVs in stock"));
        assert!(!out.is_empty());
    }

    #[test]
    fn test_budget_narrowing_within_shape() {
        let out = reply("suvs under 40k");
        assert!(out.contains("fit your budget under $40,000"));

        let out = reply("suvs under 10k");
        assert!(out.contains("most affordable SUV starts at $32,500"));
    }

    #[test]
    fn test_brand_branch_with_model_narrowing() {
        let out = reply("do you stock the toyota rav4");
        // "car"/"suv" keywords are absent, so the brand branch answers.
        assert!(out.contains("2 Toyota vehicles in stock"));
        assert!(out.contains("The RAV4 is available for $32,500!"));
    }

    #[test]
    fn test_eco_branch_counts_electric_and_hybrid() {
        let out = reply("any electric models");
        assert!(out.contains("2 eco-friendly vehicles available"));
        assert!(out.contains("Tesla Model 3"));
        assert!(out.contains("1 hybrid option"));
    }

    #[test]
    fn test_compound_requires_two_criteria() {
        let snap = snapshot();
        let facts = InventoryFacts::compute(&snap.vehicles);

        // One criterion (brand only): the compound path declines.
        assert!(compound_reply("toyota", &snap.vehicles, &facts).is_none());

        // Brand + shape + new: conjunctive filtering.
        let out = compound_reply("a new toyota hatchback", &snap.vehicles, &facts).unwrap();
        assert!(out.contains("Found 1 vehicle"));
        assert!(out.contains("Toyota Corolla"));
        assert!(out.contains("hatchback, Toyota, new"));
    }

    #[test]
    fn test_compound_zero_matches_offers_adjustment() {
        let snap = snapshot();
        let facts = InventoryFacts::compute(&snap.vehicles);
        let out = compound_reply("a used bmw hatchback", &snap.vehicles, &facts).unwrap();
        assert!(out.contains("No vehicles match your criteria"));
    }

    #[test]
    fn test_preference_nod() {
        let snap = snapshot();
        let facts = InventoryFacts::compute(&snap.vehicles);
        let prefs = UserPreferences {
            preferred_shape: Some(BodyShape::Suv),
            ..Default::default()
        };
        let out = vehicle_reply("more suvs please", &snap, &prefs, &facts);
        assert!(out.contains("you've looked at SUVs before"));
    }

    #[test]
    fn test_luxury_catchall() {
        let out = reply("something premium and high end");
        assert!(out.contains("BMW X5"));
        assert!(out.contains("luxury options"));
    }
}
