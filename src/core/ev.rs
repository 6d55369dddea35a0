//! Expected Value
//!
//! Probability-weighted profit of a single bet:
//!     EV = p * stake * (odds - 1) - (1 - p) * stake
//!
//! Where:
//!     p = estimated probability of winning
//!     odds = decimal odds
//!
//! A bet has positive expectation only when `p` exceeds the implied probability `1 / odds`.

use crate::core::odds::implied_probability;
use crate::error::{validate_decimal_odds, validate_probability, validate_stake, OddsError};
use serde::{Deserialize, Serialize};

/// Share of the implied probability assumed to be the bettor's true chance when no estimate is given
pub const DEFAULT_TRUE_PROBABILITY_FACTOR: f64 = 0.95;

/// Calculator inputs
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvInputs {
    pub stake: f64,
    pub decimal_odds: f64,
    pub win_probability: f64,
}

/// Derived quantities for one bet
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvResult {
    pub expected_value: f64,
    pub roi: f64,
    /// Estimated probability minus implied probability
    pub edge: f64,
    pub break_even_probability: f64,
    pub potential_profit: f64,
}

impl EvResult {
    pub fn is_positive(&self) -> bool {
        self.expected_value > 0.0
    }
}

/// Expected profit of a bet
///
/// # Examples
/// ```
/// use betaware::core::ev::expected_value;
/// // -110 American is roughly 1.91 decimal; a coin flip at that price loses money
/// let ev = expected_value(110.0, 1.91, 0.5).unwrap();
/// assert!((ev + 4.95).abs() < 0.01);
/// ```
pub fn expected_value(stake: f64, decimal: f64, true_probability: f64) -> Result<f64, OddsError> {
    let stake = validate_stake(stake)?;
    let decimal = validate_decimal_odds(decimal)?;
    let p = validate_probability(true_probability)?;

    Ok(p * stake * (decimal - 1.0) - (1.0 - p) * stake)
}

/// Return on investment as a fraction of the stake
pub fn roi(stake: f64, decimal: f64, true_probability: f64) -> Result<f64, OddsError> {
    Ok(expected_value(stake, decimal, true_probability)? / stake)
}

/// Evaluate every derived quantity at once
pub fn evaluate(inputs: EvInputs) -> Result<EvResult, OddsError> {
    let expected_value = expected_value(inputs.stake, inputs.decimal_odds, inputs.win_probability)?;
    let implied = implied_probability(inputs.decimal_odds)?;

    Ok(EvResult {
        expected_value,
        roi: expected_value / inputs.stake,
        edge: inputs.win_probability - implied,
        break_even_probability: implied,
        potential_profit: inputs.stake * (inputs.decimal_odds - 1.0),
    })
}

/// Quick read of a quoted price when the bettor has no probability estimate of their own
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuoteAnalysis {
    pub stake: f64,
    pub potential_win: f64,
    pub implied_probability: f64,
    /// Implied probability scaled down by the bookmaker's assumed edge
    pub estimated_true_probability: f64,
    pub expected_value: f64,
}

impl QuoteAnalysis {
    /// Analyse a stake at the given decimal odds
    ///
    /// # Arguments
    /// * `stake` - Amount wagered
    /// * `decimal` - Decimal odds
    /// * `true_probability_factor` - Multiplier applied to the implied probability (0.95 by default)
    pub fn new(stake: f64, decimal: f64, true_probability_factor: f64) -> Result<Self, OddsError> {
        let stake = validate_stake(stake)?;
        let implied = implied_probability(decimal)?;
        let factor = validate_probability(true_probability_factor)?;

        let estimated_true_probability = implied * factor;
        let potential_win = stake * (decimal - 1.0);
        let expected_value =
            potential_win * estimated_true_probability - stake * (1.0 - estimated_true_probability);

        Ok(Self {
            stake,
            potential_win,
            implied_probability: implied,
            estimated_true_probability,
            expected_value,
        })
    }

    pub fn is_positive(&self) -> bool {
        self.expected_value > 0.0
    }
}
