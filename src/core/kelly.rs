//! Kelly Criterion Bet Sizing
//!
//! Bankroll fraction that maximises long-run growth for a bet with a known edge.
//!
//! The Kelly criterion formula:
//!     f* = (b*p - q) / b
//!
//! Where:
//!     f* = fraction of bankroll to bet
//!     b = odds - 1 (net odds)
//!     p = probability of winning
//!     q = 1 - p (probability of losing)
//!
//! A negative f* means the bet has no edge. The raw value is returned uncapped so callers can
//! tell "no edge" apart from "tiny edge"; sizing clamps it to zero.

use crate::error::{validate_decimal_odds, validate_probability, OddsError};
use serde::{Deserialize, Serialize};

/// Bet sizing recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetSizing {
    pub probability: f64,
    pub odds: f64,
    pub expected_value: f64,       // per unit staked
    pub kelly_fraction: f64,       // Full Kelly, uncapped
    pub recommended_fraction: f64, // After multiplier and cap, never negative
    pub stake: f64,
}

impl BetSizing {
    pub fn has_edge(&self) -> bool {
        self.kelly_fraction > 0.0
    }
}

/// Calculate the Kelly fraction for a single bet
///
/// # Arguments
/// * `decimal` - Decimal odds (e.g., 2.5)
/// * `probability` - Estimated probability of winning (0-1)
///
/// # Returns
/// Kelly fraction (negative when the bet has no edge)
///
/// # Examples
/// ```
/// use betaware::core::kelly::kelly_fraction;
/// let kelly = kelly_fraction(5.0, 0.25).unwrap(); // EV = 1.25 per unit
/// assert!((kelly - 0.0625).abs() < 0.0001);
/// ```
pub fn kelly_fraction(decimal: f64, probability: f64) -> Result<f64, OddsError> {
    let decimal = validate_decimal_odds(decimal)?;
    let p = validate_probability(probability)?;

    let b = decimal - 1.0;
    let q = 1.0 - p;
    Ok((b * p - q) / b)
}

/// Kelly criterion calculator for bet sizing
///
/// Supports full Kelly (multiplier 1.0) and fractional Kelly (default 1/4), with a cap on any
/// single stake as a share of the bankroll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KellyCalculator {
    pub bankroll: f64,
    pub kelly_multiplier: f64,
    pub max_stake_pct: f64,
}

impl KellyCalculator {
    /// Create a new Kelly calculator
    ///
    /// # Arguments
    /// * `bankroll` - Current bankroll
    /// * `kelly_multiplier` - Fraction of Kelly to use (0.25 = quarter Kelly)
    /// * `max_stake_pct` - Maximum single bet as a fraction of bankroll
    pub fn new(bankroll: f64, kelly_multiplier: f64, max_stake_pct: f64) -> Self {
        Self {
            bankroll,
            kelly_multiplier,
            max_stake_pct,
        }
    }

    /// Quarter Kelly, capped at 10% of the bankroll
    pub fn with_defaults(bankroll: f64) -> Self {
        Self::new(bankroll, 0.25, 0.10)
    }

    /// Calculate bet sizing for a single bet
    pub fn calculate_single(&self, decimal: f64, probability: f64) -> Result<BetSizing, OddsError> {
        let kelly = kelly_fraction(decimal, probability)?;
        let recommended = (kelly * self.kelly_multiplier)
            .max(0.0)
            .min(self.max_stake_pct);
        let stake = (self.bankroll.max(0.0) * recommended * 100.0).round() / 100.0;

        Ok(BetSizing {
            probability,
            odds: decimal,
            expected_value: probability * decimal - 1.0,
            kelly_fraction: kelly,
            recommended_fraction: recommended,
            stake,
        })
    }

    /// Update bankroll after bet result
    pub fn update_bankroll(&mut self, profit: f64) {
        self.bankroll += profit;
    }
}

impl Default for KellyCalculator {
    fn default() -> Self {
        Self::with_defaults(1_000.0)
    }
}
