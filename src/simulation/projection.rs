//! Long-term projection of a betting habit against saving or investing the same money
//!
//! Each month the bettor places `bets_per_month` bets. The same outlay is paid into a savings
//! account and an investment, both compounded monthly at their annual rate divided by twelve.

use super::trial::{expected_payout, run_trial};
use crate::error::{validate_probability, SimulationError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn bets_per_month(&self) -> u32 {
        match self {
            Frequency::Daily => 30,
            Frequency::Weekly => 4,
            Frequency::Monthly => 1,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInputs {
    pub bet_amount: f64,
    pub frequency: Frequency,
    pub months: u32,
    pub win_probability: f64,
    pub odds: f64,
    /// Annual savings interest as a fraction (0.02 = 2%)
    pub savings_rate: f64,
    /// Annual investment return as a fraction
    pub investment_rate: f64,
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        Self {
            bet_amount: 20.0,
            frequency: Frequency::Weekly,
            months: 3,
            win_probability: 0.45,
            odds: 2.0,
            savings_rate: 0.02,
            investment_rate: 0.07,
        }
    }
}

/// Longest projection accepted, in months
pub const MAX_MONTHS: u32 = 600;

impl ProjectionInputs {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.bet_amount.is_finite() || self.bet_amount <= 0.0 {
            return Err(SimulationError::InvalidAmount(self.bet_amount));
        }
        if self.months == 0 || self.months > MAX_MONTHS {
            return Err(SimulationError::InvalidInput(format!(
                "projection must cover 1 to {} months, got {}",
                MAX_MONTHS, self.months
            )));
        }
        validate_probability(self.win_probability)?;
        if !self.odds.is_finite() || self.odds < 1.0 {
            return Err(SimulationError::InvalidInput(format!(
                "average odds must be at least 1.0, got {}",
                self.odds
            )));
        }
        for (name, rate) in [
            ("savings", self.savings_rate),
            ("investment", self.investment_rate),
        ] {
            if !rate.is_finite() || rate <= -1.0 {
                return Err(SimulationError::InvalidInput(format!(
                    "{} rate must be above -100%, got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }

    pub fn total_bets(&self) -> u32 {
        self.frequency.bets_per_month().saturating_mul(self.months)
    }

    /// Money put into betting (and into each alternative) per month
    pub fn monthly_outlay(&self) -> f64 {
        self.bet_amount * self.frequency.bets_per_month() as f64
    }
}

/// Balances at the end of a month; month 0 is the start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    pub month: u32,
    /// Cumulative net betting result
    pub betting: f64,
    pub saving: f64,
    pub investing: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub points: Vec<MonthPoint>,
    pub total_bets: u32,
    pub total_spent: f64,
    pub final_betting: f64,
    pub final_saving: f64,
    pub final_investing: f64,
    /// Mean betting result over the same number of bets
    pub expected_betting: f64,
}

impl Projection {
    /// What betting cost compared with investing the money
    pub fn opportunity_cost(&self) -> f64 {
        self.final_investing - self.final_betting
    }
}

/// Simulate the betting habit month by month
pub fn project<R: Rng + ?Sized>(
    rng: &mut R,
    inputs: &ProjectionInputs,
) -> Result<Projection, SimulationError> {
    inputs.validate()?;

    let bets_per_month = inputs.frequency.bets_per_month();
    let monthly_outlay = inputs.monthly_outlay();
    let savings_factor = 1.0 + inputs.savings_rate / 12.0;
    let investing_factor = 1.0 + inputs.investment_rate / 12.0;

    let mut betting = 0.0;
    let mut saving = 0.0;
    let mut investing = 0.0;

    let mut points = Vec::with_capacity(inputs.months as usize + 1);
    points.push(MonthPoint {
        month: 0,
        betting,
        saving,
        investing,
    });

    for month in 1..=inputs.months {
        for _ in 0..bets_per_month {
            betting += run_trial(rng, inputs.bet_amount, inputs.odds, inputs.win_probability).payout;
        }

        saving = (saving + monthly_outlay) * savings_factor;
        investing = (investing + monthly_outlay) * investing_factor;

        points.push(MonthPoint {
            month,
            betting,
            saving,
            investing,
        });
    }

    let total_bets = inputs.total_bets();
    let expected_betting =
        total_bets as f64 * expected_payout(inputs.bet_amount, inputs.odds, inputs.win_probability);

    debug!(
        "Projected {} bets over {} months: betting {:.2}, investing {:.2}",
        total_bets, inputs.months, betting, investing
    );

    Ok(Projection {
        points,
        total_bets,
        total_spent: inputs.bet_amount * total_bets as f64,
        final_betting: betting,
        final_saving: saving,
        final_investing: investing,
        expected_betting,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_frequency() {
        assert_eq!(Frequency::Daily.bets_per_month(), 30);
        assert_eq!(Frequency::Weekly.bets_per_month(), 4);
        assert_eq!(Frequency::Monthly.bets_per_month(), 1);
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!("hourly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_projection_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let inputs = ProjectionInputs::default();
        let projection = project(&mut rng, &inputs).unwrap();

        assert_eq!(projection.points.len(), 4);
        assert_eq!(projection.points[0].month, 0);
        assert_eq!(projection.points[0].betting, 0.0);
        assert_eq!(projection.total_bets, 12);
        assert!((projection.total_spent - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_compounding() {
        let mut rng = StdRng::seed_from_u64(3);
        let inputs = ProjectionInputs {
            bet_amount: 100.0,
            frequency: Frequency::Monthly,
            months: 2,
            savings_rate: 0.12,
            investment_rate: 0.0,
            ..ProjectionInputs::default()
        };
        let projection = project(&mut rng, &inputs).unwrap();

        // Month 1: 100 * 1.01 = 101, month 2: (101 + 100) * 1.01 = 203.01
        assert!((projection.points[1].saving - 101.0).abs() < 1e-9);
        assert!((projection.final_saving - 203.01).abs() < 1e-9);
        assert!((projection.final_investing - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_certain_loss() {
        let mut rng = StdRng::seed_from_u64(5);
        let inputs = ProjectionInputs {
            win_probability: 0.0,
            ..ProjectionInputs::default()
        };
        let projection = project(&mut rng, &inputs).unwrap();

        assert!((projection.final_betting + 240.0).abs() < 1e-9);
        assert!((projection.expected_betting + 240.0).abs() < 1e-9);
        assert!(projection.opportunity_cost() > 240.0);
    }

    #[test]
    fn test_expected_betting() {
        let mut rng = StdRng::seed_from_u64(5);
        let projection = project(&mut rng, &ProjectionInputs::default()).unwrap();
        // 12 bets of 20 at evens with 45%: -2 each
        assert!((projection.expected_betting + 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_projection_reproducible() {
        let inputs = ProjectionInputs {
            frequency: Frequency::Daily,
            months: 12,
            ..ProjectionInputs::default()
        };
        let a = project(&mut StdRng::seed_from_u64(11), &inputs).unwrap();
        let b = project(&mut StdRng::seed_from_u64(11), &inputs).unwrap();
        assert_eq!(a.points, b.points);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        let cases = [
            ProjectionInputs {
                bet_amount: 0.0,
                ..ProjectionInputs::default()
            },
            ProjectionInputs {
                months: 0,
                ..ProjectionInputs::default()
            },
            ProjectionInputs {
                frequency: Frequency::Daily,
                months: u32::MAX,
                ..ProjectionInputs::default()
            },
            ProjectionInputs {
                win_probability: 1.5,
                ..ProjectionInputs::default()
            },
            ProjectionInputs {
                odds: 0.5,
                ..ProjectionInputs::default()
            },
            ProjectionInputs {
                savings_rate: f64::NAN,
                ..ProjectionInputs::default()
            },
        ];

        for inputs in &cases {
            assert!(project(&mut rng, inputs).is_err(), "{:?}", inputs);
        }
    }
}
