//! Built-in betting-myths question sets

use super::question::QuestionSet;
use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BASIC_JSON: &str = include_str!("../../data/quizzes/basic.json");
const ADVANCED_JSON: &str = include_str!("../../data/quizzes/advanced.json");
const EXPERT_JSON: &str = include_str!("../../data/quizzes/expert.json");

/// Quiz difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Advanced,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Basic, Difficulty::Advanced, Difficulty::Expert];

    fn source(&self) -> &'static str {
        match self {
            Difficulty::Basic => BASIC_JSON,
            Difficulty::Advanced => ADVANCED_JSON,
            Difficulty::Expert => EXPERT_JSON,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Basic => "basic",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Difficulty::Basic),
            "advanced" => Ok(Difficulty::Advanced),
            "expert" => Ok(Difficulty::Expert),
            other => Err(format!(
                "Unknown difficulty: {}. Use 'basic', 'advanced', or 'expert'",
                other
            )),
        }
    }
}

/// Load the built-in question set for a difficulty
pub fn builtin(difficulty: Difficulty) -> Result<QuestionSet, QuizError> {
    QuestionSet::from_json(difficulty.source())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sets_are_valid() {
        let expected = [(Difficulty::Basic, 5), (Difficulty::Advanced, 7), (Difficulty::Expert, 6)];
        for (difficulty, count) in expected {
            let set = builtin(difficulty).unwrap();
            assert_eq!(set.len(), count, "{} set", difficulty);
            for question in set.questions() {
                assert_eq!(question.options.len(), 4);
                assert!(question.correct_option().is_some());
            }
        }
    }

    #[test]
    fn test_builtin_titles() {
        assert_eq!(
            builtin(Difficulty::Basic).unwrap().title(),
            "Basic Betting Myths Quiz"
        );
        assert_eq!(
            builtin(Difficulty::Expert).unwrap().title(),
            "Expert Betting Myths Quiz"
        );
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_display_round_trip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>().unwrap(), difficulty);
        }
    }
}
