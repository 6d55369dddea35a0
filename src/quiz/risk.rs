//! Betting risk-profile self-assessment
//!
//! Five questions about betting habits, each answer worth 1 (risky) to 4 (healthy) points.
//! The total as a share of the maximum places the user in one of four risk levels.

use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

const RISK_PROFILE_JSON: &str = include_str!("../../data/risk_profile.json");

/// Highest score a single answer can carry
pub const MAX_POINTS: u8 = 4;

/// Below this percentage the assessment suggests professional help
pub const SPECIALIST_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskOption {
    pub points: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<RiskOption>,
}

#[derive(Debug, Deserialize)]
struct RiskProfileFile {
    questions: Vec<RiskQuestion>,
}

/// Load the built-in assessment questions
pub fn builtin_questions() -> Result<Vec<RiskQuestion>, QuizError> {
    let file: RiskProfileFile = serde_json::from_str(RISK_PROFILE_JSON)?;
    if file.questions.is_empty() {
        return Err(QuizError::EmptyQuestionSet("risk profile".to_string()));
    }
    Ok(file.questions)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    MediumHigh,
    High,
}

impl RiskLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            RiskLevel::Low
        } else if percentage >= 60.0 {
            RiskLevel::Moderate
        } else if percentage >= 40.0 {
            RiskLevel::MediumHigh
        } else {
            RiskLevel::High
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Your betting habits appear to be healthy and controlled. You're likely betting for entertainment and within your means.",
            RiskLevel::Moderate => "Your betting is generally controlled, but there may be some areas where you could improve your habits.",
            RiskLevel::MediumHigh => "Your betting habits show some concerning patterns that could lead to problems if not addressed.",
            RiskLevel::High => "Your betting patterns suggest you may be developing or already have a gambling problem.",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Continue to bet responsibly and maintain your disciplined approach. Consider setting aside your winnings in a separate account.",
            RiskLevel::Moderate => "Consider setting stricter limits on your betting frequency or amounts. Track your betting more carefully to maintain awareness.",
            RiskLevel::MediumHigh => "Take a break from betting to reassess your habits. Set up strict deposit limits and consider talking to someone about your betting.",
            RiskLevel::High => "We strongly recommend seeking help from a gambling addiction specialist. Consider self-exclusion from betting platforms.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::MediumHigh => "Medium-High Risk",
            RiskLevel::High => "High Risk",
        };
        f.write_str(label)
    }
}

/// Scored assessment
#[derive(Debug, Clone, Serialize)]
pub struct RiskProfile {
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub level: RiskLevel,
}

impl RiskProfile {
    pub fn suggests_specialist(&self) -> bool {
        self.percentage < SPECIALIST_THRESHOLD
    }
}

/// One pass through the questionnaire
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    questions: Vec<RiskQuestion>,
    current: usize,
    /// Points chosen per question index
    answers: BTreeMap<usize, u8>,
    show_results: bool,
}

impl RiskAssessment {
    /// Create an assessment, rejecting questions whose options score outside 1..=MAX_POINTS
    pub fn new(questions: Vec<RiskQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet("risk profile".to_string()));
        }
        for question in &questions {
            if let Some(option) = question
                .options
                .iter()
                .find(|o| o.points == 0 || o.points > MAX_POINTS)
            {
                return Err(QuizError::PointsOutOfRange {
                    question: question.id,
                    points: option.points,
                    max: MAX_POINTS,
                });
            }
        }

        Ok(Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
            show_results: false,
        })
    }

    pub fn builtin() -> Result<Self, QuizError> {
        Self::new(builtin_questions()?)
    }

    /// Record the points for the current question; changing an answer is allowed
    ///
    /// Returns false when the value is not one of the question's options.
    pub fn answer(&mut self, points: u8) -> bool {
        if self.show_results {
            return false;
        }
        let valid = self
            .current_question()
            .is_some_and(|q| q.options.iter().any(|o| o.points == points));
        if valid {
            self.answers.insert(self.current, points);
        }
        valid
    }

    /// Move on once the current question has an answer
    pub fn next(&mut self) {
        if self.show_results || !self.answers.contains_key(&self.current) {
            return;
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            self.show_results = true;
            debug!("Risk assessment finished with score {}", self.score());
        }
    }

    pub fn back(&mut self) {
        if !self.show_results && self.current > 0 {
            self.current -= 1;
        }
    }

    pub fn retake(&mut self) {
        self.current = 0;
        self.answers.clear();
        self.show_results = false;
    }

    pub fn current_question(&self) -> Option<&RiskQuestion> {
        if self.show_results {
            return None;
        }
        self.questions.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_answer(&self) -> Option<u8> {
        self.answers.get(&self.current).copied()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.show_results
    }

    pub fn score(&self) -> u32 {
        self.answers.values().map(|&p| p as u32).sum()
    }

    /// Scored result, available once every question has been answered
    pub fn result(&self) -> Option<RiskProfile> {
        if !self.show_results || self.questions.is_empty() {
            return None;
        }

        let score = self.score();
        let max_score = self.questions.len() as u32 * MAX_POINTS as u32;
        let percentage = score as f64 / max_score as f64 * 100.0;

        Some(RiskProfile {
            score,
            max_score,
            percentage,
            level: RiskLevel::from_percentage(percentage),
        })
    }
}
