//! Question records and question-set validation

use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One answer choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    /// The single correct option
    ///
    /// Validated question sets always have one.
    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.is_correct)
    }

    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn is_correct(&self, option_id: &str) -> bool {
        self.option(option_id).is_some_and(|o| o.is_correct)
    }

    fn validate(&self) -> Result<(), QuizError> {
        if self.options.len() < 2 {
            return Err(QuizError::TooFewOptions {
                question: self.id,
                count: self.options.len(),
            });
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id.as_str()) {
                return Err(QuizError::DuplicateOption {
                    question: self.id,
                    option: option.id.clone(),
                });
            }
        }

        let correct = self.options.iter().filter(|o| o.is_correct).count();
        if correct != 1 {
            return Err(QuizError::CorrectOptionCount {
                question: self.id,
                count: correct,
            });
        }

        Ok(())
    }
}

/// Raw question-set layout as stored on disk
#[derive(Debug, Deserialize)]
struct QuestionSetFile {
    title: String,
    #[serde(default)]
    description: String,
    questions: Vec<QuizQuestion>,
}

/// An ordered, validated, immutable list of questions
#[derive(Debug, Clone, Serialize)]
pub struct QuestionSet {
    title: String,
    description: String,
    questions: Vec<QuizQuestion>,
}

impl QuestionSet {
    /// Validate and build a question set
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<QuizQuestion>,
    ) -> Result<Self, QuizError> {
        let title = title.into();
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet(title));
        }

        let mut ids = HashSet::new();
        for question in &questions {
            if !ids.insert(question.id) {
                return Err(QuizError::DuplicateQuestion(question.id));
            }
            question.validate()?;
        }

        Ok(Self {
            title,
            description: description.into(),
            questions,
        })
    }

    /// Parse and validate a question set from JSON
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        let file: QuestionSetFile = serde_json::from_str(json)?;
        Self::new(file.title, file.description, file.questions)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a validated set
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }
}
