//! Error types and boundary validation

use thiserror::Error;

/// Odds and calculator input errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OddsError {
    #[error("Malformed input: {0:?}")]
    Malformed(String),

    #[error("Decimal odds must be greater than 1.0, got {0}")]
    InvalidDecimal(f64),

    #[error("American odds must be +100 or longer, or -100 or shorter, got {0}")]
    InvalidAmerican(i64),

    #[error("Fractional odds need a non-zero numerator and denominator, got {numerator}/{denominator}")]
    InvalidFraction { numerator: u32, denominator: u32 },

    #[error("Decimal odds {0} are too short to express as fractional odds")]
    UnrepresentableFraction(f64),

    #[error("Probability must be between {min} and {max}, got {value}")]
    InvalidProbability { value: f64, min: f64, max: f64 },

    #[error("Stake must be positive, got {0}")]
    InvalidStake(f64),

    #[error("Market has no outcomes")]
    EmptyMarket,
}

/// Question set construction errors
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Question set {0:?} has no questions")]
    EmptyQuestionSet(String),

    #[error("Duplicate question id {0}")]
    DuplicateQuestion(u32),

    #[error("Question {question} has duplicate option id {option:?}")]
    DuplicateOption { question: u32, option: String },

    #[error("Question {question} needs at least two options, got {count}")]
    TooFewOptions { question: u32, count: usize },

    #[error("Question {question} must have exactly one correct option, got {count}")]
    CorrectOptionCount { question: u32, count: usize },

    #[error("Question {question} option scores {points}, above the maximum of {max}")]
    PointsOutOfRange { question: u32, points: u8, max: u8 },

    #[error("Failed to parse question data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Simulator errors
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Bet amount must be positive, got {0}")]
    InvalidAmount(f64),

    #[error("Bet amount {amount:.2} exceeds balance {balance:.2}")]
    InsufficientBalance { amount: f64, balance: f64 },

    #[error("Invalid simulation input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Odds(#[from] OddsError),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn validate_decimal_odds(decimal: f64) -> Result<f64, OddsError> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(OddsError::InvalidDecimal(decimal));
    }
    Ok(decimal)
}

/// Probability in the closed interval [0, 1]
pub fn validate_probability(prob: f64) -> Result<f64, OddsError> {
    if !(0.0..=1.0).contains(&prob) {
        return Err(OddsError::InvalidProbability {
            value: prob,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(prob)
}

/// Probability in the open interval (0, 1), as encoded by a price
pub fn validate_implied_probability(prob: f64) -> Result<f64, OddsError> {
    if !(prob > 0.0 && prob < 1.0) {
        return Err(OddsError::InvalidProbability {
            value: prob,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(prob)
}

pub fn validate_stake(stake: f64) -> Result<f64, OddsError> {
    if !stake.is_finite() || stake <= 0.0 {
        return Err(OddsError::InvalidStake(stake));
    }
    Ok(stake)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_decimal_odds_valid() {
        assert!(validate_decimal_odds(1.01).is_ok());
        assert!(validate_decimal_odds(2.0).is_ok());
        assert!(validate_decimal_odds(150.0).is_ok());
    }

    #[test]
    fn test_validate_decimal_odds_invalid() {
        assert!(validate_decimal_odds(1.0).is_err());
        assert!(validate_decimal_odds(0.5).is_err());
        assert!(validate_decimal_odds(f64::NAN).is_err());
        assert!(validate_decimal_odds(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_probability_valid() {
        assert!(validate_probability(0.0).is_ok());
        assert!(validate_probability(0.5).is_ok());
        assert!(validate_probability(1.0).is_ok());
    }

    #[test]
    fn test_validate_probability_invalid() {
        assert!(validate_probability(-0.1).is_err());
        assert!(validate_probability(1.1).is_err());
        assert!(validate_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_implied_probability_excludes_bounds() {
        assert!(validate_implied_probability(0.0).is_err());
        assert!(validate_implied_probability(1.0).is_err());
        assert!(validate_implied_probability(0.524).is_ok());
    }

    #[test]
    fn test_validate_stake() {
        assert!(validate_stake(110.0).is_ok());
        assert!(validate_stake(0.0).is_err());
        assert!(validate_stake(-5.0).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = OddsError::InvalidDecimal(0.9);
        assert!(err.to_string().contains("greater than 1.0"));

        let err = SimulationError::InsufficientBalance {
            amount: 1500.0,
            balance: 1000.0,
        };
        assert_eq!(err.to_string(), "Bet amount 1500.00 exceeds balance 1000.00");
    }

    #[test]
    fn test_simulation_error_wraps_odds_error() {
        let err: SimulationError = OddsError::InvalidDecimal(1.0).into();
        assert!(matches!(err, SimulationError::Odds(OddsError::InvalidDecimal(_))));
    }
}
