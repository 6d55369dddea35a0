//! Application settings
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```toml
//! [simulator]
//! initial_balance = 500.0
//! consecutive_loss_threshold = 4
//!
//! [logging]
//! level = "debug"
//! ```

use crate::core::ev::DEFAULT_TRUE_PROBABILITY_FACTOR;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "BETAWARE_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simulator: SimulatorConfig,
    pub quote: QuoteConfig,
    pub house_edge: HouseEdgeConfig,
    pub kelly: KellyConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_toml(&content)?;
        debug!("Loaded settings from {:?}", path.as_ref());
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from an explicit path, else from `BETAWARE_CONFIG`, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match std::env::var(CONFIG_ENV_VAR) {
            Ok(env_path) if !env_path.is_empty() => Self::load(env_path),
            _ => Ok(Self::default()),
        }
    }
}

/// Virtual-currency simulator and insight thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub initial_balance: f64,
    /// Bets needed before comparing win rate with implied probability
    pub min_bets_for_win_rate: usize,
    /// Bets needed before commenting on running profit or loss
    pub min_bets_for_roi: usize,
    /// ROI (percent, absolute) above which running profit or loss is reported
    pub roi_alert_pct: f64,
    /// Most recent bets inspected for a losing streak
    pub streak_window: usize,
    pub consecutive_loss_threshold: usize,
    /// Stake as percent of balance above which the stake is flagged
    pub max_stake_pct: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            initial_balance: 1000.0,
            min_bets_for_win_rate: 5,
            min_bets_for_roi: 10,
            roi_alert_pct: 5.0,
            streak_window: 5,
            consecutive_loss_threshold: 3,
            max_stake_pct: 10.0,
        }
    }
}

/// Quote analysis without a user probability estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub true_probability_factor: f64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            true_probability_factor: DEFAULT_TRUE_PROBABILITY_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseEdgeConfig {
    pub bet_amount: f64,
    /// Runs used for the final-balance distribution
    pub distribution_runs: usize,
    pub bucket_size: f64,
}

impl Default for HouseEdgeConfig {
    fn default() -> Self {
        Self {
            bet_amount: 100.0,
            distribution_runs: 100,
            bucket_size: 500.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KellyConfig {
    pub multiplier: f64,
    pub max_stake_pct: f64,
}

impl Default for KellyConfig {
    fn default() -> Self {
        Self {
            multiplier: 0.25,
            max_stake_pct: 0.10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
