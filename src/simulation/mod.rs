//! Simulators
//!
//! Bernoulli bet simulation for the play-money bankroll, long-term projections and house-edge runs.

pub mod house_edge;
pub mod metrics;
pub mod projection;
pub mod trial;
pub mod virtual_bets;

pub use house_edge::{Bucket, HouseEdgeParams, HouseEdgeRun};
pub use metrics::{calculate_metrics, SettledBet, SimulationMetrics};
pub use projection::{Frequency, Projection, ProjectionInputs};
pub use trial::Trial;
pub use virtual_bets::{BetSimRecord, Insight, Sport, VirtualSimulator, ODDS_CHOICES};
