//! Budget extraction from free text.
//!
//! Kept separate from the generators so the ambiguous forms ("$30" vs
//! "30k") stay unit-testable on their own. No match means the caller
//! simply skips budget filtering.

use once_cell::sync::Lazy;
use regex::Regex;

static BUDGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        (?: under | below ) \s+ \$? (?P<capped>\d+) \s* (?P<cap_unit>k\b|thousand\b)?
        | \$ (?P<exact>\d+)
        | (?P<plain>\d+) \s* (?P<plain_unit>k\b|thousand\b)
        ",
    )
    .expect("budget pattern is valid")
});

/// Parse an upper price bound from an utterance, in whole dollars.
///
/// A `k` or `thousand` suffix multiplies by 1000; `$`-prefixed or bare
/// numbers are taken literally. The first matching form wins.
pub fn parse_budget(message: &str) -> Option<u32> {
    let caps = BUDGET_RE.captures(message)?;

    if let Some(n) = caps.name("capped") {
        let value: u32 = n.as_str().parse().ok()?;
        let mult = if caps.name("cap_unit").is_some() { 1000 } else { 1 };
        return Some(value.saturating_mul(mult));
    }
    if let Some(n) = caps.name("exact") {
        return n.as_str().parse().ok();
    }

    let value: u32 = caps.name("plain")?.as_str().parse().ok()?;
    Some(value.saturating_mul(1000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_suffix_multiplies() {
        assert_eq!(parse_budget("suvs under 30k"), Some(30000));
        assert_eq!(parse_budget("below 25k please"), Some(25000));
        assert_eq!(parse_budget("i can spend 40k"), Some(40000));
    }

    #[test]
    fn test_thousand_suffix_multiplies() {
        assert_eq!(parse_budget("around 30 thousand"), Some(30000));
        assert_eq!(parse_budget("under 35 thousand"), Some(35000));
    }

    #[test]
    fn test_dollar_amounts_are_literal() {
        assert_eq!(parse_budget("under $28000"), Some(28000));
        assert_eq!(parse_budget("something near $45000"), Some(45000));
    }

    #[test]
    fn test_bare_under_is_literal() {
        // No suffix, no multiplier; documented rather than guessed.
        assert_eq!(parse_budget("under 27500"), Some(27500));
    }

    #[test]
    fn test_no_budget_forms() {
        assert_eq!(parse_budget("what about trucks"), None);
        assert_eq!(parse_budget("a 2024 model"), None);
        assert_eq!(parse_budget(""), None);
    }
}
