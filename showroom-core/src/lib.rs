//! showroom-core: deterministic chat assistant for a vehicle storefront.
//!
//! The host UI owns the real application state (user, cart, comparison list,
//! inventory) and hands the assistant a read-only snapshot each turn. The
//! assistant classifies the utterance against weighted keyword tables, routes
//! it to a response generator, and maintains its own conversational state
//! (history, learned preferences, one-turn-lagged topic) across the session.

pub mod assistant;
pub mod budget;
pub mod context;
pub mod continuity;
pub mod intent;
pub mod loan;
pub mod recommend;
pub mod responses;
pub mod snapshot;
pub mod vehicle;

pub use assistant::{ActionTag, Assistant, QuickAction};
pub use budget::parse_budget;
pub use context::{
    ContextStore, ConversationTurn, InventoryFacts, PriceStats, Role, UserPreferences,
};
pub use intent::{Intent, ScoreContext, classify};
pub use loan::monthly_payment;
pub use snapshot::{AppSnapshot, BodyShape, BudgetBand, CartItem, FuelKind, UserProfile, Vehicle};

/// Dollar formatting shared by every reply that quotes a price.
pub mod money {
    /// Format a whole-dollar amount with thousands separators, e.g. `$87,000`.
    pub fn format_usd(amount: u64) -> String {
        let digits = amount.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        format!("${grouped}")
    }

}

pub use money::format_usd;

/// "s" when a count reads as plural.
pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
