//! Budget amount parsing
//!
//! Patterns are tried in a fixed priority order and the first match wins:
//! lakh amounts, then "Nk" shorthand, then explicit rupee amounts, then
//! bare comma-grouped numbers. The rupee and bare-number forms are bounded
//! to reject unrelated large numbers (phone numbers, years, pincodes).
//! A trailing "per person" qualifier is tolerated but the value is stored
//! as-is, never multiplied by group size.

use regex::Regex;
use trip_planner_core::checklist::MAX_BUDGET;

/// Scale applied to the captured number.
#[derive(Debug, Clone, Copy)]
enum AmountScale {
    /// "N lakh" / "N lac"
    Lakh,
    /// "Nk"
    Thousand,
    /// "N rs" / "rs N" / "N rupees", bounded
    Rupees,
    /// Bare comma-grouped number, bounded
    Plain,
}

impl AmountScale {
    fn multiplier(&self) -> f64 {
        match self {
            AmountScale::Lakh => 100_000.0,
            AmountScale::Thousand => 1_000.0,
            AmountScale::Rupees | AmountScale::Plain => 1.0,
        }
    }

    fn bounded(&self) -> bool {
        matches!(self, AmountScale::Rupees | AmountScale::Plain)
    }
}

/// Budget parser with patterns compiled once at construction.
pub struct BudgetParser {
    patterns: Vec<(Regex, AmountScale)>,
}

impl BudgetParser {
    pub fn new() -> Self {
        Self {
            patterns: vec![
                (
                    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:lakh|lac)s?\b").unwrap(),
                    AmountScale::Lakh,
                ),
                (
                    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*k\b").unwrap(),
                    AmountScale::Thousand,
                ),
                (
                    Regex::new(r"(?i)(?:₹|\brs\.?|\brupees?)\s*(\d[\d,]*)|\b(\d[\d,]*)\s*(?:rs\.?|rupees?)\b")
                        .unwrap(),
                    AmountScale::Rupees,
                ),
                // Comma-grouped numbers only (western or Indian grouping); the
                // guards reject fragments of longer digit runs like phone
                // numbers. "per person" amounts are stored as-is.
                (
                    Regex::new(r"(?:^|[^\d,])(\d{1,3}(?:,\d{2,3})+)(?:\s*(?:per\s+person|per\s+head|each|pp))?(?:[^\d,]|$)")
                        .unwrap(),
                    AmountScale::Plain,
                ),
            ],
        }
    }

    /// Extract a budget amount in rupees, or nothing.
    pub fn parse(&self, message: &str) -> Option<u64> {
        for (pattern, scale) in &self.patterns {
            let Some(caps) = pattern.captures(message) else {
                continue;
            };
            // The rupee pattern has two alternative capture slots.
            let raw = caps.get(1).or_else(|| caps.get(2))?.as_str().replace(',', "");
            let Ok(number) = raw.parse::<f64>() else {
                continue;
            };
            let amount = (number * scale.multiplier()).round() as u64;
            if amount == 0 {
                continue;
            }
            if scale.bounded() && amount >= MAX_BUDGET {
                continue;
            }
            return Some(amount);
        }
        None
    }
}

impl Default for BudgetParser {
    fn default() -> Self {
        Self::new()
    }
}
