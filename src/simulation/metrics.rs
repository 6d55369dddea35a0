//! Simulation Metrics
//!
//! Hit rate, ROI, profit factor, drawdown and losing streaks over a bet history.

use super::trial::Trial;
use serde::{Deserialize, Serialize};

/// A bet whose outcome is known
pub trait SettledBet {
    fn stake(&self) -> f64;
    fn payout(&self) -> f64;
    fn won(&self) -> bool;
}

impl SettledBet for Trial {
    fn stake(&self) -> f64 {
        self.stake
    }

    fn payout(&self) -> f64 {
        self.payout
    }

    fn won(&self) -> bool {
        self.won
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationMetrics {
    pub total_bets: usize,
    pub winning_bets: usize,
    pub hit_rate: f64,
    pub total_staked: f64,

    pub gross_profit: f64,
    pub gross_loss: f64,
    pub net_profit: f64,
    /// Net profit over total staked
    pub roi: f64,

    pub profit_factor: f64,
    pub max_drawdown: f64,
    pub longest_losing_streak: usize,
}

/// Calculate metrics from a chronological bet history
pub fn calculate_metrics<B: SettledBet>(bets: &[B]) -> SimulationMetrics {
    if bets.is_empty() {
        return SimulationMetrics::default();
    }

    let total_bets = bets.len();
    let winning_bets = bets.iter().filter(|b| b.won()).count();
    let hit_rate = winning_bets as f64 / total_bets as f64;
    let total_staked: f64 = bets.iter().map(|b| b.stake()).sum();

    // Profit/Loss
    let gross_profit: f64 = bets.iter().map(|b| b.payout()).filter(|&p| p > 0.0).sum();
    let gross_loss: f64 = bets
        .iter()
        .map(|b| b.payout())
        .filter(|&p| p < 0.0)
        .map(f64::abs)
        .sum();
    let net_profit = gross_profit - gross_loss;

    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    // Drawdown of the running profit, which starts at zero
    let mut running = 0.0;
    let mut peak = 0.0_f64;
    let mut max_drawdown = 0.0_f64;
    for bet in bets {
        running += bet.payout();
        peak = peak.max(running);
        max_drawdown = max_drawdown.max(peak - running);
    }

    let roi = if total_staked > 0.0 {
        net_profit / total_staked
    } else {
        0.0
    };

    SimulationMetrics {
        total_bets,
        winning_bets,
        hit_rate,
        total_staked,
        gross_profit,
        gross_loss,
        net_profit,
        roi,
        profit_factor,
        max_drawdown,
        longest_losing_streak: longest_losing_streak(bets),
    }
}

pub fn longest_losing_streak<B: SettledBet>(bets: &[B]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for bet in bets {
        if bet.won() {
            current = 0;
        } else {
            current += 1;
            longest = longest.max(current);
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::trial::settle;

    fn bet(stake: f64, odds: f64, won: bool) -> Trial {
        Trial {
            stake,
            odds,
            won,
            payout: settle(stake, odds, won),
        }
    }

    fn create_test_bets() -> Vec<Trial> {
        vec![
            bet(100.0, 8.0, true),   // +700
            bet(100.0, 15.0, false), // -100
            bet(100.0, 10.0, true),  // +900
        ]
    }

    #[test]
    fn test_calculate_metrics() {
        let metrics = calculate_metrics(&create_test_bets());

        assert_eq!(metrics.total_bets, 3);
        assert_eq!(metrics.winning_bets, 2);
        assert!((metrics.hit_rate - 0.6667).abs() < 0.01);
        assert!((metrics.total_staked - 300.0).abs() < 1e-9);
        assert!((metrics.gross_profit - 1600.0).abs() < 1e-9);
        assert!((metrics.gross_loss - 100.0).abs() < 1e-9);
        assert!((metrics.net_profit - 1500.0).abs() < 1e-9);
        assert!((metrics.roi - 5.0).abs() < 1e-9);
        assert!((metrics.profit_factor - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_metrics_empty() {
        let bets: Vec<Trial> = Vec::new();
        let metrics = calculate_metrics(&bets);

        assert_eq!(metrics.total_bets, 0);
        assert_eq!(metrics.winning_bets, 0);
        assert_eq!(metrics.hit_rate, 0.0);
        assert_eq!(metrics.roi, 0.0);
    }

    #[test]
    fn test_profit_factor_without_losses() {
        let metrics = calculate_metrics(&[bet(10.0, 2.0, true)]);
        assert!(metrics.profit_factor.is_infinite());
    }

    #[test]
    fn test_max_drawdown() {
        let bets = vec![
            bet(100.0, 10.0, true),
            bet(100.0, 10.0, false),
            bet(100.0, 10.0, false),
        ];
        let metrics = calculate_metrics(&bets);

        // Cumulative: 900, 800, 700
        assert!((metrics.max_drawdown - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_drawdown_from_start() {
        let bets = vec![bet(50.0, 2.0, false), bet(50.0, 2.0, false)];
        let metrics = calculate_metrics(&bets);
        assert!((metrics.max_drawdown - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_longest_losing_streak() {
        let bets = vec![
            bet(10.0, 2.0, false),
            bet(10.0, 2.0, true),
            bet(10.0, 2.0, false),
            bet(10.0, 2.0, false),
            bet(10.0, 2.0, false),
            bet(10.0, 2.0, true),
        ];
        assert_eq!(longest_losing_streak(&bets), 3);
        assert_eq!(calculate_metrics(&bets).longest_losing_streak, 3);
    }
}
