//! Quiz session state machine
//!
//! ```text
//!   Unanswered --submit--> Answered --advance--> Unanswered (next question)
//!                                   \-advance--> Completed (after the last question)
//!   any state  --retake--> Unanswered at question 0
//! ```
//!
//! Every transition is guarded: calling one from the wrong state is a no-op, so the session can
//! never reach an invalid combination of index, answered flag and completion.

use super::question::{QuestionSet, QuizQuestion};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub question_id: u32,
    pub is_correct: bool,
}

/// Progress through the quiz
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// 1-based number of the question on screen
    pub question_number: usize,
    pub total: usize,
    /// Questions answered so far
    pub answered: usize,
    pub percent: f64,
}

/// One user's pass through a question set
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Arc<QuestionSet>,
    current_index: usize,
    selected_option: Option<String>,
    has_answered: bool,
    score: usize,
    answers: BTreeMap<u32, String>,
    completed: bool,
}

impl QuizSession {
    /// Start a session at the first question
    pub fn new(questions: impl Into<Arc<QuestionSet>>) -> Self {
        let questions = questions.into();
        debug!("Starting quiz {:?} ({} questions)", questions.title(), questions.len());

        Self {
            questions,
            current_index: 0,
            selected_option: None,
            has_answered: false,
            score: 0,
            answers: BTreeMap::new(),
            completed: false,
        }
    }

    /// Store a tentative selection for the current question
    ///
    /// Returns false (and changes nothing) when the option does not exist or the question is
    /// already answered.
    pub fn select_option(&mut self, option_id: &str) -> bool {
        if self.completed || self.has_answered {
            return false;
        }

        let exists = self
            .current_question()
            .is_some_and(|q| q.option(option_id).is_some());
        if !exists {
            return false;
        }

        self.selected_option = Some(option_id.to_string());
        true
    }

    /// Lock in the selected option and score it
    ///
    /// Returns `None` when there is nothing to submit: no selection, already answered, or
    /// completed.
    pub fn submit_answer(&mut self) -> Option<Submission> {
        if self.completed || self.has_answered {
            return None;
        }

        let selected = self.selected_option.clone()?;
        let question = self.questions.get(self.current_index)?;
        let is_correct = question.is_correct(&selected);
        let question_id = question.id;

        if is_correct {
            self.score += 1;
        }
        self.answers.insert(question_id, selected);
        self.has_answered = true;

        debug!(
            "Question {} answered ({}), score {}",
            question_id,
            if is_correct { "correct" } else { "incorrect" },
            self.score
        );

        Some(Submission {
            question_id,
            is_correct,
        })
    }

    /// Move past an answered question
    ///
    /// Completes the quiz when called on the last question.
    pub fn advance(&mut self) {
        if self.completed || !self.has_answered {
            return;
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.selected_option = None;
            self.has_answered = false;
        } else {
            self.completed = true;
            info!(
                "Quiz {:?} completed: {}/{}",
                self.questions.title(),
                self.score,
                self.questions.len()
            );
        }
    }

    /// Discard all answers and start again from the first question
    pub fn retake(&mut self) {
        self.current_index = 0;
        self.selected_option = None;
        self.has_answered = false;
        self.score = 0;
        self.answers.clear();
        self.completed = false;
    }

    pub fn question_set(&self) -> &QuestionSet {
        &self.questions
    }

    /// The question on screen, or `None` once completed
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.completed {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.has_answered
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Submitted option per question id
    pub fn answers(&self) -> &BTreeMap<u32, String> {
        &self.answers
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn progress(&self) -> Progress {
        let total = self.questions.len();
        let answered = self.answers.len();

        Progress {
            question_number: (self.current_index + 1).min(total),
            total,
            answered,
            percent: answered as f64 / total as f64 * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::question::tests::sample_set;

    /// Sample questions all have "c" as the correct option
    fn answer(session: &mut QuizSession, option: &str) {
        assert!(session.select_option(option));
        session.submit_answer().unwrap();
        session.advance();
    }

    #[test]
    fn test_new_session() {
        let session = QuizSession::new(sample_set(5));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.answers().is_empty());
        assert!(!session.is_answered());
        assert!(!session.is_completed());
        assert_eq!(session.current_question().unwrap().id, 1);
    }

    #[test]
    fn test_select_overwrites_tentative_selection() {
        let mut session = QuizSession::new(sample_set(3));
        assert!(session.select_option("a"));
        assert!(session.select_option("b"));
        assert_eq!(session.selected_option(), Some("b"));
        assert_eq!(session.score(), 0);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_select_unknown_option_ignored() {
        let mut session = QuizSession::new(sample_set(3));
        assert!(!session.select_option("z"));
        assert_eq!(session.selected_option(), None);
    }

    #[test]
    fn test_submit_without_selection_is_noop() {
        let mut session = QuizSession::new(sample_set(3));
        assert_eq!(session.submit_answer(), None);
        assert!(!session.is_answered());
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_submit_is_idempotent() {
        let mut session = QuizSession::new(sample_set(3));
        session.select_option("c");

        let first = session.submit_answer();
        assert_eq!(
            first,
            Some(Submission {
                question_id: 1,
                is_correct: true
            })
        );
        assert_eq!(session.submit_answer(), None);
        assert_eq!(session.score(), 1);
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn test_selection_locked_after_submit() {
        let mut session = QuizSession::new(sample_set(3));
        session.select_option("a");
        session.submit_answer();

        assert!(!session.select_option("c"));
        assert_eq!(session.selected_option(), Some("a"));
        assert_eq!(session.answers().get(&1).map(String::as_str), Some("a"));
    }

    #[test]
    fn test_advance_requires_answer() {
        let mut session = QuizSession::new(sample_set(3));
        session.advance();
        assert_eq!(session.current_index(), 0);

        session.select_option("b");
        session.advance();
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_advance_clears_selection() {
        let mut session = QuizSession::new(sample_set(3));
        answer(&mut session, "a");

        assert_eq!(session.current_index(), 1);
        assert_eq!(session.selected_option(), None);
        assert!(!session.is_answered());
    }

    #[test]
    fn test_completion_exactness() {
        let mut session = QuizSession::new(sample_set(5));
        let picks = ["c", "a", "c", "c", "d"];

        for (i, pick) in picks.iter().enumerate() {
            assert!(!session.is_completed(), "completed early at {}", i);
            answer(&mut session, pick);
        }

        assert!(session.is_completed());
        assert_eq!(session.score(), 3);
        assert_eq!(session.answers().len(), 5);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_completed_session_ignores_input() {
        let mut session = QuizSession::new(sample_set(1));
        answer(&mut session, "c");
        assert!(session.is_completed());

        assert!(!session.select_option("a"));
        assert_eq!(session.submit_answer(), None);
        session.advance();

        assert!(session.is_completed());
        assert_eq!(session.score(), 1);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_retake_resets_everything() {
        let mut session = QuizSession::new(sample_set(3));
        answer(&mut session, "c");
        answer(&mut session, "c");
        session.select_option("a");
        session.submit_answer();

        session.retake();

        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 0);
        assert!(session.answers().is_empty());
        assert!(!session.is_completed());
        assert!(!session.is_answered());
        assert_eq!(session.selected_option(), None);
    }

    #[test]
    fn test_retake_after_completion() {
        let mut session = QuizSession::new(sample_set(2));
        answer(&mut session, "c");
        answer(&mut session, "c");
        assert!(session.is_completed());

        session.retake();
        assert!(!session.is_completed());
        assert_eq!(session.current_question().unwrap().id, 1);
    }

    #[test]
    fn test_progress() {
        let mut session = QuizSession::new(sample_set(4));
        assert_eq!(session.progress().question_number, 1);
        assert_eq!(session.progress().answered, 0);

        session.select_option("c");
        session.submit_answer();
        let progress = session.progress();
        assert_eq!(progress.question_number, 1);
        assert_eq!(progress.answered, 1);
        assert!((progress.percent - 25.0).abs() < 1e-9);

        session.advance();
        assert_eq!(session.progress().question_number, 2);
    }

    #[test]
    fn test_is_last_question() {
        let mut session = QuizSession::new(sample_set(2));
        assert!(!session.is_last_question());
        answer(&mut session, "c");
        assert!(session.is_last_question());
    }
}
