//! BetAware - gambling math education
//!
//! This library provides:
//! - Odds conversion between decimal, American, fractional and implied probability
//! - Expected value, bookmaker margin and Kelly criterion bet sizing
//! - Betting-myths quizzes with a pure display projection
//! - Risk-profile self-assessment
//! - Play-money, long-term and house-edge simulators
//!
//! # Example
//!
//! ```
//! use betaware::core::odds::Odds;
//! use betaware::core::kelly::KellyCalculator;
//!
//! let odds = Odds::from_american(150).unwrap();
//! assert!((odds.decimal() - 2.5).abs() < 1e-9);
//! assert!((odds.implied_probability() - 0.4).abs() < 1e-9);
//!
//! let calc = KellyCalculator::with_defaults(1000.0);
//! let sizing = calc.calculate_single(2.5, 0.45).unwrap();
//! println!("Recommended stake: {:.2}", sizing.stake);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod quiz;
pub mod simulation;

// Re-export commonly used types
pub use config::Settings;
pub use error::{ConfigError, OddsError, QuizError, SimulationError};
pub use quiz::{Difficulty, QuestionSet, QuizSession, RiskAssessment};
pub use simulation::{Sport, VirtualSimulator};
