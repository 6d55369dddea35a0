//! Virtual-currency betting simulator
//!
//! The user stakes play money on a sport at one of the offered odds. Each sport has a fixed true
//! win probability below 50%, so at evens or shorter every bet loses money on average. The longer
//! prices can favour the bettor for some sports.

use super::metrics::{calculate_metrics, SettledBet, SimulationMetrics};
use super::trial::run_trial;
use crate::config::SimulatorConfig;
use crate::error::{validate_decimal_odds, SimulationError};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Decimal odds offered by the simulator
pub const ODDS_CHOICES: [f64; 5] = [1.5, 1.8, 2.0, 2.5, 3.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Football,
    Basketball,
    Baseball,
    Hockey,
    Soccer,
}

impl Sport {
    pub const ALL: [Sport; 5] = [
        Sport::Football,
        Sport::Basketball,
        Sport::Baseball,
        Sport::Hockey,
        Sport::Soccer,
    ];

    /// True chance that a bet on this sport wins
    pub fn win_probability(&self) -> f64 {
        match self {
            Sport::Football => 0.48,
            Sport::Basketball => 0.46,
            Sport::Baseball => 0.42,
            Sport::Hockey => 0.45,
            Sport::Soccer => 0.40,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sport::Football => "Football",
            Sport::Basketball => "Basketball",
            Sport::Baseball => "Baseball",
            Sport::Hockey => "Hockey",
            Sport::Soccer => "Soccer",
        };
        f.write_str(name)
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::ALL
            .into_iter()
            .find(|sport| sport.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown sport: {}", s))
    }
}

/// One placed bet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetSimRecord {
    pub id: u64,
    pub sport: Sport,
    pub amount: f64,
    pub odds: f64,
    pub win_probability: f64,
    pub won: bool,
    /// Net change to the balance
    pub payout: f64,
    pub balance_after: f64,
    pub placed_at: DateTime<Utc>,
}

impl SettledBet for BetSimRecord {
    fn stake(&self) -> f64 {
        self.amount
    }

    fn payout(&self) -> f64 {
        self.payout
    }

    fn won(&self) -> bool {
        self.won
    }
}

/// Observation about the user's betting so far
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Insight {
    /// Observed win rate against the odds' implied chance, both in percent
    WinRate { win_rate: f64, implied: f64 },
    RunningLoss { amount: f64, roi: f64 },
    RunningProfit { amount: f64, roi: f64 },
    ChasingLosses { consecutive: usize },
    /// Stake as percent of the balance
    OversizedStake { percent: f64 },
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insight::WinRate { win_rate, implied } => write!(
                f,
                "Your current win rate is {:.1}%, while the odds imply a {:.1}% chance of winning.",
                win_rate, implied
            ),
            Insight::RunningLoss { amount, roi } => write!(
                f,
                "You're down {:.2} virtual dollars ({:.1}% ROI). This is typical for most recreational bettors.",
                amount, roi
            ),
            Insight::RunningProfit { amount, roi } => write!(
                f,
                "You're up {:.2} virtual dollars ({:.1}% ROI). This is unusually lucky - most bettors have a negative ROI long-term.",
                amount, roi
            ),
            Insight::ChasingLosses { consecutive } => write!(
                f,
                "You've had {} consecutive losses. Be careful not to increase your bet size to chase losses.",
                consecutive
            ),
            Insight::OversizedStake { percent } => write!(
                f,
                "Your current bet ({:.1}% of your bankroll) is larger than recommended. Professional bettors typically bet 1-5% of their bankroll.",
                percent
            ),
        }
    }
}

/// Play-money bankroll with a bet history
#[derive(Debug, Clone)]
pub struct VirtualSimulator {
    config: SimulatorConfig,
    balance: f64,
    history: Vec<BetSimRecord>,
    next_id: u64,
}

impl VirtualSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            balance: config.initial_balance,
            config,
            history: Vec::new(),
            next_id: 1,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn initial_balance(&self) -> f64 {
        self.config.initial_balance
    }

    /// Placed bets, oldest first
    pub fn history(&self) -> &[BetSimRecord] {
        &self.history
    }

    pub fn last_bet(&self) -> Option<&BetSimRecord> {
        self.history.last()
    }

    pub fn total_profit(&self) -> f64 {
        self.history.iter().map(|b| b.payout).sum()
    }

    /// Place a bet and settle it immediately
    pub fn place_bet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        amount: f64,
        odds: f64,
        sport: Sport,
    ) -> Result<&BetSimRecord, SimulationError> {
        if !amount.is_finite() || amount <= 0.0 {
            warn!("Rejected bet with amount {}", amount);
            return Err(SimulationError::InvalidAmount(amount));
        }
        if amount > self.balance {
            warn!("Rejected bet of {:.2} with balance {:.2}", amount, self.balance);
            return Err(SimulationError::InsufficientBalance {
                amount,
                balance: self.balance,
            });
        }
        let odds = validate_decimal_odds(odds)?;

        let win_probability = sport.win_probability();
        let trial = run_trial(rng, amount, odds, win_probability);
        self.balance += trial.payout;

        let record = BetSimRecord {
            id: self.next_id,
            sport,
            amount,
            odds,
            win_probability,
            won: trial.won,
            payout: trial.payout,
            balance_after: self.balance,
            placed_at: Utc::now(),
        };
        self.next_id += 1;

        debug!(
            "Bet #{} on {} at {:.2}: {} {:+.2}, balance {:.2}",
            record.id,
            sport,
            odds,
            if record.won { "won" } else { "lost" },
            record.payout,
            self.balance
        );

        self.history.push(record);
        Ok(&self.history[self.history.len() - 1])
    }

    /// Restore the starting balance and forget all bets
    pub fn reset(&mut self) {
        self.balance = self.config.initial_balance;
        self.history.clear();
        self.next_id = 1;
        debug!("Simulator reset to {:.2}", self.balance);
    }

    /// Losses in a row ending at the most recent bet, looking back over the streak window
    pub fn recent_consecutive_losses(&self) -> usize {
        self.history
            .iter()
            .rev()
            .take(self.config.streak_window)
            .take_while(|b| !b.won)
            .count()
    }

    /// Observations for the history so far and the stake the user is considering
    pub fn insights(&self, stake: f64, odds: f64) -> Vec<Insight> {
        let cfg = &self.config;
        let metrics = self.metrics();
        let mut insights = Vec::new();

        if metrics.total_bets >= cfg.min_bets_for_win_rate && odds > 1.0 {
            insights.push(Insight::WinRate {
                win_rate: metrics.hit_rate * 100.0,
                implied: 100.0 / odds,
            });
        }

        if metrics.total_bets >= cfg.min_bets_for_roi {
            let roi = metrics.roi * 100.0;
            if roi < -cfg.roi_alert_pct {
                insights.push(Insight::RunningLoss {
                    amount: metrics.net_profit.abs(),
                    roi,
                });
            } else if roi > cfg.roi_alert_pct {
                insights.push(Insight::RunningProfit {
                    amount: metrics.net_profit,
                    roi,
                });
            }
        }

        let consecutive = self.recent_consecutive_losses();
        if consecutive >= cfg.consecutive_loss_threshold {
            insights.push(Insight::ChasingLosses { consecutive });
        }

        if self.balance > 0.0 {
            let percent = stake * 100.0 / self.balance;
            if percent > cfg.max_stake_pct {
                insights.push(Insight::OversizedStake { percent });
            }
        }

        insights
    }

    pub fn metrics(&self) -> SimulationMetrics {
        calculate_metrics(&self.history)
    }
}

impl Default for VirtualSimulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}
