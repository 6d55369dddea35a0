//! Odds Conversion
//!
//! Conversions between the three common price formats and the implied probability they encode.
//!
//! ```text
//!     implied probability  p = 1 / decimal
//!     American (d >= 2)    +round((d - 1) * 100)
//!     American (d <  2)    round(-100 / (d - 1))
//!     fractional           (d - 1) expressed in hundredths, reduced
//! ```
//!
//! [`Odds`] keeps the implied probability as its single source of truth and derives every other
//! format from it, so the four representations can never drift apart.

use crate::error::{validate_decimal_odds, validate_implied_probability, OddsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fractional odds are quoted in hundredths before reduction
const FRACTION_DENOMINATOR: u32 = 100;

/// Convert decimal odds to American odds
///
/// # Examples
/// ```
/// use betaware::core::odds::decimal_to_american;
/// assert_eq!(decimal_to_american(2.5).unwrap(), 150);
/// assert_eq!(decimal_to_american(1.5).unwrap(), -200);
/// ```
pub fn decimal_to_american(decimal: f64) -> Result<i64, OddsError> {
    let decimal = validate_decimal_odds(decimal)?;

    let american = if decimal >= 2.0 {
        ((decimal - 1.0) * 100.0).round()
    } else {
        (-100.0 / (decimal - 1.0)).round()
    };

    Ok(american as i64)
}

/// Convert American odds to decimal odds
pub fn american_to_decimal(american: i64) -> Result<f64, OddsError> {
    if american.unsigned_abs() < 100 {
        return Err(OddsError::InvalidAmerican(american));
    }

    if american > 0 {
        Ok(american as f64 / 100.0 + 1.0)
    } else {
        Ok(100.0 / american.unsigned_abs() as f64 + 1.0)
    }
}

/// Convert decimal odds to reduced fractional odds
///
/// The fraction quotes the net return `d - 1`, so 2.00 is 1/1 and 2.50 is 3/2.
/// Prices shorter than 1.005 round to a zero numerator and are rejected.
pub fn decimal_to_fractional(decimal: f64) -> Result<Fraction, OddsError> {
    let decimal = validate_decimal_odds(decimal)?;

    let numerator = ((decimal - 1.0) * FRACTION_DENOMINATOR as f64).round();
    if numerator < 1.0 || numerator > u32::MAX as f64 {
        return Err(OddsError::UnrepresentableFraction(decimal));
    }

    Fraction::new(numerator as u32, FRACTION_DENOMINATOR)
}

/// Convert fractional odds to decimal odds
pub fn fractional_to_decimal(numerator: u32, denominator: u32) -> Result<f64, OddsError> {
    if numerator == 0 || denominator == 0 {
        return Err(OddsError::InvalidFraction {
            numerator,
            denominator,
        });
    }

    Ok(numerator as f64 / denominator as f64 + 1.0)
}

/// Implied probability of decimal odds, strictly inside (0, 1)
pub fn implied_probability(decimal: f64) -> Result<f64, OddsError> {
    let decimal = validate_decimal_odds(decimal)?;
    Ok(1.0 / decimal)
}

/// Greatest common divisor
pub fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Fractional odds in lowest terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    numerator: u32,
    denominator: u32,
}

impl Fraction {
    /// Create a fraction, reducing it to lowest terms
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, OddsError> {
        if numerator == 0 || denominator == 0 {
            return Err(OddsError::InvalidFraction {
                numerator,
                denominator,
            });
        }

        let divisor = gcd(numerator, denominator);
        Ok(Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    pub fn to_decimal(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64 + 1.0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Fraction {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || OddsError::Malformed(s.to_string());

        let (num, den) = s.trim().split_once('/').ok_or_else(malformed)?;
        let numerator: u32 = num.trim().parse().map_err(|_| malformed())?;
        let denominator: u32 = den.trim().parse().map_err(|_| malformed())?;

        Fraction::new(numerator, denominator)
    }
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddsFormat {
    Decimal,
    American,
    Fractional,
    /// Implied probability in percent
    Probability,
}

impl fmt::Display for OddsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OddsFormat::Decimal => "decimal",
            OddsFormat::American => "american",
            OddsFormat::Fractional => "fractional",
            OddsFormat::Probability => "probability",
        };
        f.write_str(name)
    }
}

impl FromStr for OddsFormat {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decimal" | "d" => Ok(OddsFormat::Decimal),
            "american" | "us" | "moneyline" => Ok(OddsFormat::American),
            "fractional" | "uk" | "f" => Ok(OddsFormat::Fractional),
            "probability" | "implied" | "p" => Ok(OddsFormat::Probability),
            _ => Err(OddsError::Malformed(s.to_string())),
        }
    }
}

/// A price, stored as the implied probability it encodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    implied_probability: f64,
}

impl Odds {
    /// Rejects probabilities whose reciprocal is not a finite decimal price
    pub fn from_probability(probability: f64) -> Result<Self, OddsError> {
        let implied_probability = validate_implied_probability(probability)?;
        validate_decimal_odds(1.0 / implied_probability)
            .map_err(|_| OddsError::InvalidProbability {
                value: probability,
                min: 0.0,
                max: 1.0,
            })?;
        Ok(Self {
            implied_probability,
        })
    }

    pub fn from_decimal(decimal: f64) -> Result<Self, OddsError> {
        Self::from_probability(implied_probability(decimal)?)
    }

    pub fn from_american(american: i64) -> Result<Self, OddsError> {
        Self::from_decimal(american_to_decimal(american)?)
    }

    pub fn from_fractional(fraction: Fraction) -> Result<Self, OddsError> {
        Self::from_decimal(fraction.to_decimal())
    }

    /// Parse user input in the given format
    ///
    /// American odds accept an optional leading `+`; probability is given in percent.
    ///
    /// # Examples
    /// ```
    /// use betaware::core::odds::{Odds, OddsFormat};
    /// let odds = Odds::parse(OddsFormat::American, "+150").unwrap();
    /// assert!((odds.decimal() - 2.5).abs() < 1e-9);
    /// assert!((odds.implied_probability() - 0.4).abs() < 1e-9);
    /// ```
    pub fn parse(format: OddsFormat, input: &str) -> Result<Self, OddsError> {
        let text = input.trim();
        let malformed = || OddsError::Malformed(input.to_string());

        match format {
            OddsFormat::Decimal => {
                let decimal: f64 = text.parse().map_err(|_| malformed())?;
                Self::from_decimal(decimal)
            }
            OddsFormat::American => {
                let american: i64 = text
                    .strip_prefix('+')
                    .unwrap_or(text)
                    .parse()
                    .map_err(|_| malformed())?;
                Self::from_american(american)
            }
            OddsFormat::Fractional => Self::from_fractional(text.parse()?),
            OddsFormat::Probability => {
                let percent: f64 = text
                    .strip_suffix('%')
                    .unwrap_or(text)
                    .trim()
                    .parse()
                    .map_err(|_| malformed())?;
                Self::from_probability(percent / 100.0)
            }
        }
    }

    pub fn implied_probability(&self) -> f64 {
        self.implied_probability
    }

    pub fn decimal(&self) -> f64 {
        1.0 / self.implied_probability
    }

    pub fn american(&self) -> i64 {
        let decimal = self.decimal();
        if decimal >= 2.0 {
            ((decimal - 1.0) * 100.0).round() as i64
        } else {
            (-100.0 / (decimal - 1.0)).round() as i64
        }
    }

    /// Fractional odds, or `None` for prices too short to express in hundredths
    pub fn fractional(&self) -> Option<Fraction> {
        decimal_to_fractional(self.decimal()).ok()
    }

    /// American odds with the `+` sign convention for underdogs and evens
    pub fn american_display(&self) -> String {
        format_american(self.american())
    }
}

/// Format American odds with an explicit `+` for positive prices
pub fn format_american(american: i64) -> String {
    if american > 0 {
        format!("+{}", american)
    } else {
        american.to_string()
    }
}
