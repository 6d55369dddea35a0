//! Multiple-choice quizzes and the risk-profile questionnaire

pub mod catalog;
pub mod display;
pub mod question;
pub mod risk;
pub mod session;

// Re-export commonly used types
pub use catalog::{builtin, Difficulty};
pub use display::{render, DisplayModel, FinalReport, OptionState, QuizAction, ScoreBand};
pub use question::{QuestionSet, QuizOption, QuizQuestion};
pub use risk::{RiskAssessment, RiskLevel, RiskProfile};
pub use session::{Progress, QuizSession, Submission};
