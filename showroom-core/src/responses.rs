//! Fixed-copy generators: help, dealership, comparison, pricing, cart,
//! personal, and the greeting/farewell default.
//!
//! These branch on lowercased substrings and the live snapshot; none of
//! them can fail, and none of them inspect the inventory except pricing.

use crate::money::format_usd;
use crate::plural;
use crate::snapshot::AppSnapshot;

const GREETINGS: &[&str] = &["hello", "hi", "hey", "good morning", "good afternoon", "good evening"];
const FAREWELLS: &[&str] = &["bye", "goodbye", "see you", "thanks", "thank you"];

/// Full capability summary, personalized with login/cart/compare facts.
/// Never inspects inventory.
pub fn help_reply(snapshot: &AppSnapshot) -> String {
    let mut reply = String::from(
        "I'm here to help you navigate our dealership! Here's what I can assist you with:\n\n",
    );

    reply.push_str(
        "Vehicle information: ask about specific vehicles, brands, types (SUV, sedan, \
         truck, electric), or get recommendations\n",
    );
    reply.push_str(
        "Pricing and financing: pricing, loans, monthly payments, down payments, and \
         credit options\n",
    );
    reply.push_str("Dealership services: hours, contact info, warranties, and test drives\n");
    reply.push_str("Vehicle comparison: compare vehicles side by side\n");
    reply.push_str("Shopping cart: review your cart and proceed to checkout\n");

    if let Some(user) = &snapshot.user {
        reply.push_str(&format!(
            "\nYour account: welcome back, {}! I can help with your account, preferences, \
             and purchase history.\n",
            user.display_name()
        ));
    }

    let cart_count = snapshot.cart_items.len();
    if cart_count > 0 {
        reply.push_str(&format!(
            "\nYour cart: you have {cart_count} item{} in your cart. I can help you review \
             it or proceed to checkout.\n",
            plural(cart_count)
        ));
    }

    let compare_count = snapshot.compare_items.len();
    if compare_count > 0 {
        reply.push_str(&format!(
            "\nYour comparison: you have {compare_count} vehicle{} in your comparison list.\n",
            plural(compare_count)
        ));
    }

    reply.push_str("\nExample questions:\n");
    reply.push_str("- \"Show me SUVs\" or \"What sedans do you have?\"\n");
    reply.push_str("- \"How much are monthly payments?\" or \"What's the down payment?\"\n");
    reply.push_str("- \"What are your hours?\" or \"How do I schedule a test drive?\"\n");
    reply.push_str("- \"What's in my cart?\" or \"Help me find a family car\"\n");
    reply.push_str("\nJust type your question naturally and I'll help you find what you're looking for!");

    reply
}

/// Hours, contact, warranty/service, and test-drive copy.
pub fn dealership_reply(message: &str) -> String {
    if message.contains("hours") || message.contains("open") {
        return "We're open Monday-Friday 9AM-8PM, Saturday 9AM-6PM, and Sunday 12PM-5PM. \
                We're here to help you find your perfect vehicle!"
            .to_string();
    }

    if message.contains("contact") || message.contains("phone") || message.contains("call") {
        return "You can reach us at (555) 123-4567 during business hours, or email us at \
                info@dealership.example. We're happy to answer any questions!"
            .to_string();
    }

    if message.contains("warranty") || message.contains("service") {
        return "All our vehicles come with comprehensive warranties. New vehicles include \
                the manufacturer warranty, and used vehicles come with our certified \
                pre-owned warranty. Our service department handles maintenance and repairs."
            .to_string();
    }

    if message.contains("test drive") || message.contains("drive") {
        return "Absolutely! We encourage test drives. You can schedule one by calling us or \
                visiting the dealership. What vehicle are you interested in? We'll make \
                sure it's ready for you."
            .to_string();
    }

    "I'm here to help with any questions about our dealership, vehicles, financing, or \
     services. What would you like to know more about?"
        .to_string()
}

/// Reports the live compare list or explains the comparison tool.
pub fn comparison_reply(snapshot: &AppSnapshot) -> String {
    let count = snapshot.compare_items.len();
    if count > 0 {
        let names: Vec<String> = snapshot.compare_items.iter().map(|v| v.full_name()).collect();
        return format!(
            "You currently have {count} vehicle{} in your comparison list: {}. You can view \
             the detailed comparison on our compare page, or add more vehicles (up to 4 \
             total) to compare side by side!",
            plural(count),
            names.join(", ")
        );
    }

    "You can compare vehicles side by side using our comparison tool! Add vehicles to \
     your compare list from the catalog, then visit the compare page to see detailed \
     differences in features, pricing, and specifications."
        .to_string()
}

/// Budget and price-point copy, quoting the inventory range when present.
pub fn pricing_reply(message: &str, snapshot: &AppSnapshot) -> String {
    if message.contains("budget") || message.contains("afford") {
        if let (Some(min), Some(max)) = (
            snapshot.vehicles.iter().map(|v| v.price).min(),
            snapshot.vehicles.iter().map(|v| v.price).max(),
        ) {
            return format!(
                "We have vehicles at various price points to fit different budgets, ranging \
                 from {} to {}. Our finance team can help you find the right vehicle and \
                 payment plan. What's your target monthly payment or total budget?",
                format_usd(u64::from(min)),
                format_usd(u64::from(max))
            );
        }

        return "We have vehicles at various price points to fit different budgets. Our \
                finance team can help you find the right vehicle and payment plan. What's \
                your target monthly payment or total budget?"
            .to_string();
    }

    if message.contains("expensive") || message.contains("cheap") {
        return "We offer vehicles across all price ranges, from affordable options to \
                luxury models. Our goal is to find the vehicle that fits both your needs \
                and your budget. What features are most important to you?"
            .to_string();
    }

    "Our pricing is competitive and transparent. You can view detailed pricing in our \
     catalog, and we're happy to discuss financing options. Is there a specific vehicle \
     you're interested in?"
        .to_string()
}

/// Itemized cart report or empty-cart nudge.
pub fn cart_reply(message: &str, snapshot: &AppSnapshot) -> String {
    if message.contains("cart") || message.contains("shopping") {
        if !snapshot.cart_items.is_empty() {
            let total_items = snapshot.cart_quantity() as usize;
            let names: Vec<String> = snapshot.cart_items.iter().map(|item| item.full_name()).collect();
            return format!(
                "You have {total_items} item{} in your cart: {}. Total value: {}. Would you \
                 like to proceed to checkout or continue shopping?",
                plural(total_items),
                names.join(", "),
                format_usd(snapshot.cart_total())
            );
        }

        return "Your cart is currently empty. Browse our catalog to find the perfect \
                vehicle and add it to your cart!"
            .to_string();
    }

    "I can help you with your shopping cart! You can view your cart, proceed to \
     checkout, or continue shopping. What would you like to do?"
        .to_string()
}

/// Account copy: greeting for logged-in customers, login prompt otherwise.
pub fn personal_reply(message: &str, snapshot: &AppSnapshot) -> String {
    if message.contains("my") || message.contains("account") || message.contains("profile") {
        if let Some(user) = &snapshot.user {
            return format!(
                "Welcome back, {}! I can help you with your account, recent vehicles, or \
                 any questions about your purchases. What would you like to know?",
                user.display_name()
            );
        }

        return "I'd be happy to help you with your account! Please log in first so I can \
                provide personalized assistance with your vehicle preferences and purchase \
                history."
            .to_string();
    }

    "I'm here to provide personalized assistance! If you log in, I can help you with \
     your account, preferences, and purchase history."
        .to_string()
}

/// Fallback generator: greetings, farewells, or the capability list.
pub fn default_reply(message: &str, snapshot: &AppSnapshot) -> String {
    if GREETINGS.iter().any(|g| message.contains(g)) {
        let mut reply = String::from("Hello! I'm your dealership assistant. ");

        if let Some(user) = &snapshot.user {
            reply.push_str(&format!("Welcome back, {}! ", user.display_name()));
        }

        let cart_count = snapshot.cart_items.len();
        if cart_count > 0 {
            reply.push_str(&format!(
                "I see you have {cart_count} item{} in your cart. ",
                plural(cart_count)
            ));
        }

        let compare_count = snapshot.compare_items.len();
        if compare_count > 0 {
            reply.push_str(&format!(
                "You also have {compare_count} vehicle{} in your comparison list. ",
                plural(compare_count)
            ));
        }

        reply.push_str(
            "I can help you with vehicle information, financing options, pricing, and \
             general questions. What would you like to know?",
        );
        return reply;
    }

    if FAREWELLS.iter().any(|f| message.contains(f)) {
        return "You're welcome! Feel free to reach out if you have more questions. I'm \
                here to help you find your perfect vehicle!"
            .to_string();
    }

    "I'm not sure I understand. I can help you with: vehicle information, financing \
     options, pricing, comparing vehicles, dealership services, and general questions. \
     Could you please rephrase your question?"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{BodyShape, CartItem, UserProfile, Vehicle};

    fn stocked_snapshot() -> AppSnapshot {
        AppSnapshot {
            user: Some(UserProfile::new("sam@example.com").with_name("Sam")),
            cart_items: vec![CartItem::new("BMW", "X7", 87000, 1, BodyShape::Suv)],
            compare_items: vec![
                Vehicle::new("Toyota", "RAV4", BodyShape::Suv, 32500),
                Vehicle::new("Honda", "CR-V", BodyShape::Suv, 29800),
            ],
            vehicles: vec![
                Vehicle::new("Hyundai", "Elantra", BodyShape::Sedan, 21600),
                Vehicle::new("BMW", "X7", BodyShape::Suv, 87000),
            ],
        }
    }

    #[test]
    fn test_help_personalization() {
        let out = help_reply(&stocked_snapshot());
        assert!(out.contains("welcome back, Sam"));
        assert!(out.contains("1 item in your cart"));
        assert!(out.contains("2 vehicles in your comparison list"));

        let bare = help_reply(&AppSnapshot::default());
        assert!(!bare.contains("welcome back"));
        assert!(bare.contains("Example questions"));
    }

    #[test]
    fn test_cart_report() {
        let out = cart_reply("what's in my cart?", &stocked_snapshot());
        assert!(out.contains("1 item in your cart: BMW X7"));
        assert!(out.contains("Total value: $87,000"));
        assert!(out.contains("checkout or continue shopping"));
    }

    #[test]
    fn test_cart_empty() {
        let out = cart_reply("show my cart", &AppSnapshot::default());
        assert!(out.contains("cart is currently empty"));
    }

    #[test]
    fn test_comparison_reports_names() {
        let out = comparison_reply(&stocked_snapshot());
        assert!(out.contains("2 vehicles in your comparison list"));
        assert!(out.contains("Toyota RAV4, Honda CR-V"));
        assert!(out.contains("up to 4 total"));
    }

    #[test]
    fn test_pricing_quotes_range() {
        let out = pricing_reply("what fits my budget", &stocked_snapshot());
        assert!(out.contains("$21,600"));
        assert!(out.contains("$87,000"));

        let bare = pricing_reply("what can i afford", &AppSnapshot::default());
        assert!(bare.contains("various price points"));
        assert!(!bare.contains('$'));
    }

    #[test]
    fn test_personal_prompts_login_when_anonymous() {
        let out = personal_reply("my account", &AppSnapshot::default());
        assert!(out.contains("log in first"));

        let named = personal_reply("my account", &stocked_snapshot());
        assert!(named.contains("Welcome back, Sam"));
    }

    #[test]
    fn test_dealership_branches() {
        assert!(dealership_reply("what are your hours").contains("Monday-Friday"));
        assert!(dealership_reply("can i book a test drive").contains("test drives"));
        assert!(dealership_reply("warranty details").contains("warranties"));
    }

    #[test]
    fn test_default_greeting_and_farewell() {
        let out = default_reply("hello", &stocked_snapshot());
        assert!(out.contains("Welcome back, Sam"));
        assert!(out.contains("1 item in your cart"));

        let bye = default_reply("thanks, goodbye", &AppSnapshot::default());
        assert!(bye.contains("You're welcome"));

        let unknown = default_reply("zzz", &AppSnapshot::default());
        assert!(unknown.contains("rephrase"));
    }
}
