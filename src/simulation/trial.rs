//! Single-bet Bernoulli trial
//!
//! Every simulator draws its outcomes through here so that a seeded RNG reproduces a run exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome of one settled bet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub stake: f64,
    pub odds: f64,
    pub won: bool,
    /// Net change to the bettor's balance
    pub payout: f64,
}

/// Draw a win with the given probability
pub fn bernoulli<R: Rng + ?Sized>(rng: &mut R, win_probability: f64) -> bool {
    rng.gen::<f64>() < win_probability
}

/// Net payout of a settled bet at decimal odds
pub fn settle(stake: f64, odds: f64, won: bool) -> f64 {
    if won {
        stake * (odds - 1.0)
    } else {
        -stake
    }
}

/// Draw and settle one bet
pub fn run_trial<R: Rng + ?Sized>(rng: &mut R, stake: f64, odds: f64, win_probability: f64) -> Trial {
    let won = bernoulli(rng, win_probability);
    Trial {
        stake,
        odds,
        won,
        payout: settle(stake, odds, won),
    }
}

/// Mean payout of one bet
pub fn expected_payout(stake: f64, odds: f64, win_probability: f64) -> f64 {
    win_probability * stake * (odds - 1.0) - (1.0 - win_probability) * stake
}
