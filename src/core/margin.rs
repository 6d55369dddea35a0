//! Bookmaker margin (overround / vig)
//!
//! A fair book's implied probabilities sum to exactly 1. Anything above that is the bookmaker's
//! structural advantage.

use crate::core::odds::implied_probability;
use crate::error::{validate_implied_probability, validate_probability, OddsError};
use serde::{Deserialize, Serialize};

/// Stake used when quoting the expectation of a margin-adjusted price
pub const QUOTE_STAKE: f64 = 100.0;

/// Sum of a market's implied probabilities minus one
///
/// # Examples
/// ```
/// use betaware::core::margin::overround;
/// let margin = overround(&[0.524, 0.524]).unwrap();
/// assert!((margin - 0.048).abs() < 1e-9);
/// ```
pub fn overround(implied_probabilities: &[f64]) -> Result<f64, OddsError> {
    if implied_probabilities.is_empty() {
        return Err(OddsError::EmptyMarket);
    }

    let mut total = 0.0;
    for &p in implied_probabilities {
        if !(p > 0.0 && p <= 1.0) {
            return Err(OddsError::InvalidProbability {
                value: p,
                min: 0.0,
                max: 1.0,
            });
        }
        total += p;
    }

    Ok(total - 1.0)
}

/// Overround of a market quoted in decimal odds
pub fn overround_from_decimals(decimals: &[f64]) -> Result<f64, OddsError> {
    let implied = decimals
        .iter()
        .map(|&d| implied_probability(d))
        .collect::<Result<Vec<_>, _>>()?;
    overround(&implied)
}

/// Share of all money staked on a balanced book that the bookmaker keeps
pub fn house_edge(implied_probabilities: &[f64]) -> Result<f64, OddsError> {
    let margin = overround(implied_probabilities)?;
    Ok(margin / (1.0 + margin))
}

/// Strip the margin from a book so its probabilities sum to one
pub fn fair_probabilities(implied_probabilities: &[f64]) -> Result<Vec<f64>, OddsError> {
    let total = overround(implied_probabilities)? + 1.0;
    Ok(implied_probabilities.iter().map(|p| p / total).collect())
}

/// A true probability priced with a bookmaker margin applied
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarginQuote {
    pub true_probability: f64,
    pub margin: f64,
    /// `true_probability * (1 + margin)`
    pub implied_probability: f64,
    pub fair_odds: f64,
    pub bookmaker_odds: f64,
    /// Expectation of a [`QUOTE_STAKE`] bet at the bookmaker's price
    pub expected_value: f64,
}

impl MarginQuote {
    /// Price an outcome with the given margin
    ///
    /// # Arguments
    /// * `true_probability` - Real chance of the outcome, in (0, 1)
    /// * `margin` - Bookmaker margin as a fraction (0.05 = 5%)
    pub fn new(true_probability: f64, margin: f64) -> Result<Self, OddsError> {
        let p = validate_implied_probability(true_probability)?;
        let margin = validate_probability(margin)?;

        let implied = validate_implied_probability(p * (1.0 + margin))?;
        let fair_odds = 1.0 / p;
        let bookmaker_odds = 1.0 / implied;
        let expected_value = p * QUOTE_STAKE * (bookmaker_odds - 1.0) - (1.0 - p) * QUOTE_STAKE;

        Ok(Self {
            true_probability: p,
            margin,
            implied_probability: implied,
            fair_odds,
            bookmaker_odds,
            expected_value,
        })
    }

    pub fn roi(&self) -> f64 {
        self.expected_value / QUOTE_STAKE
    }

    /// Probability points the bookmaker adds on top of the true chance
    pub fn margin_points(&self) -> f64 {
        self.implied_probability - self.true_probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overround_two_way_market() {
        // Two -110 sides: 52.4% each, 104.8% book
        let margin = overround(&[0.524, 0.524]).unwrap();
        assert!((margin * 100.0 - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_overround_fair_book() {
        let margin = overround(&[0.5, 0.3, 0.2]).unwrap();
        assert!(margin.abs() < 1e-9);
    }

    #[test]
    fn test_overround_invalid() {
        assert_eq!(overround(&[]), Err(OddsError::EmptyMarket));
        assert!(overround(&[0.5, 0.0]).is_err());
        assert!(overround(&[1.2]).is_err());
    }

    #[test]
    fn test_overround_from_decimals() {
        let margin = overround_from_decimals(&[1.909, 1.909]).unwrap();
        assert!((margin - 0.0477).abs() < 0.001);
        assert!(overround_from_decimals(&[1.9, 0.9]).is_err());
    }

    #[test]
    fn test_house_edge() {
        let edge = house_edge(&[0.524, 0.524]).unwrap();
        assert!((edge - 0.048 / 1.048).abs() < 1e-9);
    }

    #[test]
    fn test_fair_probabilities_sum_to_one() {
        let fair = fair_probabilities(&[0.55, 0.30, 0.22]).unwrap();
        let total: f64 = fair.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(fair[0] < 0.55);
    }

    #[test]
    fn test_margin_quote() {
        let quote = MarginQuote::new(0.5, 0.05).unwrap();
        assert!((quote.implied_probability - 0.525).abs() < 1e-9);
        assert!((quote.fair_odds - 2.0).abs() < 1e-9);
        assert!((quote.bookmaker_odds - 1.0 / 0.525).abs() < 1e-9);
        assert!(quote.expected_value < 0.0);
        assert!((quote.margin_points() - 0.025).abs() < 1e-9);
    }

    #[test]
    fn test_margin_quote_zero_margin_is_fair() {
        let quote = MarginQuote::new(0.3, 0.0).unwrap();
        assert!(quote.expected_value.abs() < 1e-9);
        assert!(quote.roi().abs() < 1e-9);
    }

    #[test]
    fn test_margin_quote_rejects_implied_certainty() {
        assert!(MarginQuote::new(0.99, 0.05).is_err());
        assert!(MarginQuote::new(0.0, 0.05).is_err());
    }
}
