//! House-edge simulator
//!
//! A run is a sequence of even-money bets of a fixed amount. The edge is taken out of the win
//! probability, `(1 - edge) / 2`, so each bet loses `edge * amount` on average.

use super::trial::run_trial;
use crate::error::SimulationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

const EVEN_MONEY: f64 = 2.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HouseEdgeParams {
    /// House edge as a fraction (0.05 = 5%)
    pub edge: f64,
    pub bets: usize,
    pub bet_amount: f64,
}

impl HouseEdgeParams {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.edge.is_finite() || !(0.0..1.0).contains(&self.edge) {
            return Err(SimulationError::InvalidInput(format!(
                "house edge must be in [0, 1), got {}",
                self.edge
            )));
        }
        if self.bets == 0 {
            return Err(SimulationError::InvalidInput(
                "at least one bet is required".to_string(),
            ));
        }
        if !self.bet_amount.is_finite() || self.bet_amount <= 0.0 {
            return Err(SimulationError::InvalidAmount(self.bet_amount));
        }
        Ok(())
    }

    pub fn win_probability(&self) -> f64 {
        win_probability(self.edge)
    }

    pub fn theoretical_loss(&self) -> f64 {
        theoretical_loss(self.bets, self.bet_amount, self.edge)
    }
}

pub fn win_probability(edge: f64) -> f64 {
    (1.0 - edge) / 2.0
}

/// Mean result of one bet
pub fn expected_value_per_bet(bet_amount: f64, edge: f64) -> f64 {
    -edge * bet_amount
}

/// Mean total loss over a run
pub fn theoretical_loss(bets: usize, bet_amount: f64, edge: f64) -> f64 {
    bets as f64 * bet_amount * edge
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// 1-based bet number
    pub bet: usize,
    pub result: f64,
    /// Cumulative balance after this bet
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseEdgeRun {
    pub points: Vec<BalancePoint>,
}

impl HouseEdgeRun {
    pub fn final_balance(&self) -> f64 {
        self.points.last().map(|p| p.balance).unwrap_or(0.0)
    }

    pub fn peak(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.balance)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn trough(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.balance)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn wins(&self) -> usize {
        self.points.iter().filter(|p| p.result > 0.0).count()
    }
}

/// Simulate one run
pub fn simulate<R: Rng + ?Sized>(
    rng: &mut R,
    params: &HouseEdgeParams,
) -> Result<HouseEdgeRun, SimulationError> {
    params.validate()?;
    Ok(simulate_unchecked(rng, params))
}

fn simulate_unchecked<R: Rng + ?Sized>(rng: &mut R, params: &HouseEdgeParams) -> HouseEdgeRun {
    let p = params.win_probability();
    let mut balance = 0.0;

    let points = (1..=params.bets)
        .map(|bet| {
            let result = run_trial(rng, params.bet_amount, EVEN_MONEY, p).payout;
            balance += result;
            BalancePoint {
                bet,
                result,
                balance,
            }
        })
        .collect();

    HouseEdgeRun { points }
}

/// Histogram bucket of final balances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Inclusive lower bound
    pub lower: f64,
    pub count: usize,
}

/// Final balances of `runs` independent runs
pub fn final_balances<R: Rng + ?Sized>(
    rng: &mut R,
    params: &HouseEdgeParams,
    runs: usize,
) -> Result<Vec<f64>, SimulationError> {
    params.validate()?;
    Ok((0..runs)
        .map(|_| simulate_unchecked(rng, params).final_balance())
        .collect())
}

/// Group balances into buckets of `bucket_size`, ordered by lower bound
pub fn histogram(balances: &[f64], bucket_size: f64) -> Result<Vec<Bucket>, SimulationError> {
    if !bucket_size.is_finite() || bucket_size <= 0.0 {
        return Err(SimulationError::InvalidInput(format!(
            "bucket size must be positive, got {}",
            bucket_size
        )));
    }

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for balance in balances {
        let index = (balance / bucket_size).floor() as i64;
        *counts.entry(index).or_default() += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(index, count)| Bucket {
            lower: index as f64 * bucket_size,
            count,
        })
        .collect())
}

/// Histogram of final balances over many runs
pub fn distribution<R: Rng + ?Sized>(
    rng: &mut R,
    params: &HouseEdgeParams,
    runs: usize,
    bucket_size: f64,
) -> Result<Vec<Bucket>, SimulationError> {
    let balances = final_balances(rng, params, runs)?;
    let buckets = histogram(&balances, bucket_size)?;
    debug!(
        "Distribution of {} runs of {} bets: {} buckets",
        runs,
        params.bets,
        buckets.len()
    );
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(edge: f64, bets: usize) -> HouseEdgeParams {
        HouseEdgeParams {
            edge,
            bets,
            bet_amount: 100.0,
        }
    }

    #[test]
    fn test_expectation_per_bet() {
        for edge in [0.0, 0.01, 0.05, 0.2] {
            let p = win_probability(edge);
            let ev = p * 100.0 - (1.0 - p) * 100.0;
            assert!((ev - expected_value_per_bet(100.0, edge)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_theoretical_loss() {
        assert!((theoretical_loss(100, 100.0, 0.05) - 500.0).abs() < 1e-9);
        assert!((params(0.05, 100).theoretical_loss() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_series() {
        let mut rng = StdRng::seed_from_u64(21);
        let run = simulate(&mut rng, &params(0.05, 50)).unwrap();

        assert_eq!(run.points.len(), 50);
        assert_eq!(run.points[0].bet, 1);
        let mut balance = 0.0;
        for point in &run.points {
            assert!((point.result.abs() - 100.0).abs() < 1e-9);
            balance += point.result;
            assert!((point.balance - balance).abs() < 1e-9);
        }
        assert!(run.peak() >= run.final_balance());
        assert!(run.trough() <= run.final_balance());
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let a = simulate(&mut StdRng::seed_from_u64(8), &params(0.05, 200)).unwrap();
        let b = simulate(&mut StdRng::seed_from_u64(8), &params(0.05, 200)).unwrap();
        assert_eq!(a.points, b.points);
    }

    #[test]
    fn test_mean_loss_tracks_edge() {
        let mut rng = StdRng::seed_from_u64(2024);
        let p = params(0.10, 100);
        let balances = final_balances(&mut rng, &p, 2000).unwrap();
        let mean = balances.iter().sum::<f64>() / balances.len() as f64;

        // Theoretical mean is -1000; standard error is about 22
        assert!((mean + p.theoretical_loss()).abs() < 100.0);
    }

    #[test]
    fn test_histogram_buckets() {
        let buckets = histogram(&[-600.0, -100.0, 0.0, 250.0, 499.0, 500.0], 500.0).unwrap();
        assert_eq!(
            buckets,
            vec![
                Bucket {
                    lower: -1000.0,
                    count: 1
                },
                Bucket {
                    lower: -500.0,
                    count: 1
                },
                Bucket {
                    lower: 0.0,
                    count: 3
                },
                Bucket {
                    lower: 500.0,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_distribution_counts_all_runs() {
        let mut rng = StdRng::seed_from_u64(4);
        let buckets = distribution(&mut rng, &params(0.05, 100), 100, 500.0).unwrap();
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 100);
        assert!(buckets.windows(2).all(|w| w[0].lower < w[1].lower));
    }

    #[test]
    fn test_invalid_params() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(simulate(&mut rng, &params(1.0, 10)).is_err());
        assert!(simulate(&mut rng, &params(-0.1, 10)).is_err());
        assert!(simulate(&mut rng, &params(0.05, 0)).is_err());
        assert!(histogram(&[1.0], 0.0).is_err());
    }
}
