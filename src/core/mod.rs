//! Odds arithmetic: conversions, expected value, margins and bet sizing

pub mod ev;
pub mod kelly;
pub mod margin;
pub mod odds;

// Re-export commonly used types
pub use ev::{evaluate, expected_value, EvInputs, EvResult, QuoteAnalysis};
pub use kelly::{kelly_fraction, BetSizing, KellyCalculator};
pub use margin::{fair_probabilities, house_edge, overround, overround_from_decimals, MarginQuote};
pub use odds::{
    american_to_decimal, decimal_to_american, decimal_to_fractional, fractional_to_decimal,
    implied_probability, Fraction, Odds, OddsFormat,
};
