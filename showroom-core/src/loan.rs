//! Financing math and loan responses.

use crate::money::format_usd;
use crate::snapshot::AppSnapshot;

/// Illustrative APR used for cart payment estimates, in percent.
const ESTIMATE_APR: f64 = 5.5;
/// Assumed down payment fraction for cart estimates.
const ESTIMATE_DOWN: f64 = 0.15;

/// Standard amortized monthly payment.
///
/// `annual_rate` is a percentage (5.5 means 5.5% APR), `months` the term
/// length (at least 1). A zero rate is the interest-free edge: the
/// principal divides evenly across the term.
pub fn monthly_payment(principal: f64, annual_rate: f64, months: u32) -> f64 {
    let n = months as f64;
    let monthly_rate = annual_rate / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

fn rounded_usd(amount: f64) -> String {
    format_usd(amount.round().max(0.0) as u64)
}

/// Financing-intent responses: payment estimates from the cart, down
/// payments, credit tiers, and rate copy.
pub fn loan_reply(message: &str, snapshot: &AppSnapshot) -> String {
    if message.contains("down payment") || message.contains("down") {
        if !snapshot.cart_items.is_empty() {
            let total = snapshot.cart_total() as f64;
            return format!(
                "For your cart ({}): minimum down payment could be as low as {} (10%), \
                 recommended {} (20%) for better rates. Lower down means higher monthly \
                 payments.",
                rounded_usd(total),
                rounded_usd(total * 0.10),
                rounded_usd(total * 0.20)
            );
        }
        return "Down payments typically range from 10-20%. A higher down payment means \
                lower monthly payments and better interest rates. We're flexible with \
                down payment amounts!"
            .to_string();
    }

    if message.contains("monthly payment") || message.contains("payment") {
        if !snapshot.cart_items.is_empty() {
            let total = snapshot.cart_total() as f64;
            let down = total * ESTIMATE_DOWN;
            let principal = total - down;
            let at_60 = monthly_payment(principal, ESTIMATE_APR, 60);
            let at_72 = monthly_payment(principal, ESTIMATE_APR, 72);

            let mut reply = format!("For your cart total of {}: ", rounded_usd(total));
            reply.push_str(&format!(
                "estimated payments (with {} down, {ESTIMATE_APR}% APR): ",
                rounded_usd(down)
            ));
            reply.push_str(&format!("60 months = {}/month, ", rounded_usd(at_60)));
            reply.push_str(&format!("72 months = {}/month. ", rounded_usd(at_72)));
            reply.push_str("Rates starting from 3.9% APR with good credit!");
            return reply;
        }

        return "I can calculate exact payments for any vehicle! Our rates start at 3.9% \
                APR. Typical payment for a $25,000 car (15% down, 60 months): ~$406/month. \
                Add vehicles to your cart for personalized estimates!"
            .to_string();
    }

    if message.contains("credit") || message.contains("score") {
        return "We work with all credit types! Excellent credit (720+): 3.9% APR. Good \
                credit (650+): 5.9% APR. Fair credit (580+): 8.9% APR. Poor credit: we \
                have special programs! Our finance team will find you the best rate."
            .to_string();
    }

    if message.contains("rate") || message.contains("interest") || message.contains("apr") {
        return "Current rates: 3.9% APR (excellent credit), 5.9% APR (good credit), up to \
                12.9% APR (all credit types accepted). Your rate depends on credit score, \
                loan term, and down payment. Pre-approval available!"
            .to_string();
    }

    "We offer competitive financing: 3.9%-12.9% APR, 36-84 month terms, flexible down \
     payments. We work with all credit types and offer pre-approval! Want a payment \
     estimate?"
        .to_string()
}
