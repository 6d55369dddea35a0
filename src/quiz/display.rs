//! Display projection for quiz sessions
//!
//! [`render`] derives everything a front-end needs from the session state alone. Nothing here
//! mutates the session, so reveal rules live in exactly one place.

use super::question::QuizQuestion;
use super::session::QuizSession;
use serde::Serialize;
use std::fmt;

/// Qualitative score band of a finished quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    /// 90% and above
    Excellent,
    /// 70% and above
    Good,
    /// 50% and above
    Basic,
    NeedsReview,
}

impl ScoreBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            ScoreBand::Excellent
        } else if percentage >= 70.0 {
            ScoreBand::Good
        } else if percentage >= 50.0 {
            ScoreBand::Basic
        } else {
            ScoreBand::NeedsReview
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => {
                "Excellent! You have a strong understanding of betting myths."
            }
            ScoreBand::Good => {
                "Good job! You understand most betting myths, but there's still room to learn."
            }
            ScoreBand::Basic => {
                "You have a basic understanding of betting myths, but should review the material."
            }
            ScoreBand::NeedsReview => {
                "You might want to review the betting myths section to improve your understanding."
            }
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// How an option should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionState {
    Neutral,
    /// Tentatively selected, not yet submitted
    Selected,
    /// Revealed as the correct answer
    Correct,
    /// Submitted and wrong
    Incorrect,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub id: String,
    pub text: String,
    pub state: OptionState,
    /// Shown for the correct option and a wrong submission once answered
    pub explanation: Option<String>,
}

/// Button available to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuizAction {
    /// Submit (enabled only with a selection)
    Submit { enabled: bool },
    NextQuestion,
    SeeResults,
    Retake,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub score: usize,
    /// Questions attempted, including the current one once answered
    pub attempted: usize,
    pub progress_percent: f64,
    pub options: Vec<OptionView>,
    pub action: QuizAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResult {
    pub number: usize,
    pub question_id: u32,
    pub question: String,
    pub your_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Summary of a completed quiz
#[derive(Debug, Clone, Serialize)]
pub struct FinalReport {
    pub score: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent
    pub percentage: u32,
    pub band: ScoreBand,
    pub results: Vec<QuestionResult>,
}

impl FinalReport {
    /// Build the report from a session's answers
    ///
    /// Correctness is re-derived from the stored answers rather than trusted from the score.
    pub fn from_session(session: &QuizSession) -> Self {
        let set = session.question_set();
        let total = set.len();
        let score = session.score();
        let exact = score as f64 / total as f64 * 100.0;

        let results = set
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| question_result(index, question, session))
            .collect();

        Self {
            score,
            total,
            percentage: exact.round() as u32,
            band: ScoreBand::from_percentage(exact),
            results,
        }
    }

    pub fn message(&self) -> &'static str {
        self.band.message()
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }
}

fn question_result(index: usize, question: &QuizQuestion, session: &QuizSession) -> QuestionResult {
    let answer = session.answers().get(&question.id);
    let your_answer = answer
        .and_then(|id| question.option(id))
        .map(|o| o.text.clone());
    let correct_answer = question
        .correct_option()
        .map(|o| o.text.clone())
        .unwrap_or_default();

    QuestionResult {
        number: index + 1,
        question_id: question.id,
        question: question.question.clone(),
        your_answer,
        correct_answer,
        is_correct: answer.is_some_and(|id| question.is_correct(id)),
    }
}

/// Everything a front-end draws for a session
#[derive(Debug, Clone, Serialize)]
pub enum DisplayModel {
    Question(QuestionView),
    Completed(FinalReport),
}

/// Project a session into its display model
pub fn render(session: &QuizSession) -> DisplayModel {
    match session.current_question() {
        None => DisplayModel::Completed(FinalReport::from_session(session)),
        Some(question) => DisplayModel::Question(question_view(session, question)),
    }
}

fn question_view(session: &QuizSession, question: &QuizQuestion) -> QuestionView {
    let answered = session.is_answered();
    let selected = session.selected_option();
    let progress = session.progress();

    let options = question
        .options
        .iter()
        .map(|option| {
            let is_selected = selected == Some(option.id.as_str());
            let state = match (answered, option.is_correct, is_selected) {
                (true, true, _) => OptionState::Correct,
                (true, false, true) => OptionState::Incorrect,
                (false, _, true) => OptionState::Selected,
                _ => OptionState::Neutral,
            };
            let explanation = match state {
                OptionState::Correct | OptionState::Incorrect => Some(option.explanation.clone()),
                _ => None,
            };

            OptionView {
                id: option.id.clone(),
                text: option.text.clone(),
                state,
                explanation,
            }
        })
        .collect();

    let action = if !answered {
        QuizAction::Submit {
            enabled: selected.is_some(),
        }
    } else if session.is_last_question() {
        QuizAction::SeeResults
    } else {
        QuizAction::NextQuestion
    };

    QuestionView {
        number: progress.question_number,
        total: progress.total,
        prompt: question.question.clone(),
        score: session.score(),
        attempted: session.current_index() + usize::from(answered),
        progress_percent: progress.percent,
        options,
        action,
    }
}

impl QuizSession {
    /// Final report, available once the quiz is completed
    pub fn final_report(&self) -> Option<FinalReport> {
        self.is_completed().then(|| FinalReport::from_session(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::question::tests::sample_set;

    fn view(session: &QuizSession) -> QuestionView {
        match render(session) {
            DisplayModel::Question(view) => view,
            DisplayModel::Completed(_) => panic!("expected a question view"),
        }
    }

    fn play(session: &mut QuizSession, picks: &[&str]) {
        for pick in picks {
            session.select_option(pick);
            session.submit_answer();
            session.advance();
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_percentage(100.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_percentage(90.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_percentage(89.9), ScoreBand::Good);
        assert_eq!(ScoreBand::from_percentage(70.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_percentage(50.0), ScoreBand::Basic);
        assert_eq!(ScoreBand::from_percentage(49.0), ScoreBand::NeedsReview);
        assert_eq!(ScoreBand::from_percentage(0.0), ScoreBand::NeedsReview);
    }

    #[test]
    fn test_unanswered_view() {
        let session = QuizSession::new(sample_set(3));
        let view = view(&session);

        assert_eq!(view.number, 1);
        assert_eq!(view.total, 3);
        assert_eq!(view.attempted, 0);
        assert_eq!(view.action, QuizAction::Submit { enabled: false });
        assert!(view
            .options
            .iter()
            .all(|o| o.state == OptionState::Neutral && o.explanation.is_none()));
    }

    #[test]
    fn test_selected_view() {
        let mut session = QuizSession::new(sample_set(3));
        session.select_option("b");
        let view = view(&session);

        assert_eq!(view.action, QuizAction::Submit { enabled: true });
        assert_eq!(view.options[1].state, OptionState::Selected);
        assert!(view.options[1].explanation.is_none());
    }

    #[test]
    fn test_wrong_answer_reveals_both_explanations() {
        let mut session = QuizSession::new(sample_set(3));
        session.select_option("a");
        session.submit_answer();
        let view = view(&session);

        assert_eq!(view.options[0].state, OptionState::Incorrect);
        assert_eq!(view.options[0].explanation.as_deref(), Some("Explanation a"));
        assert_eq!(view.options[2].state, OptionState::Correct);
        assert_eq!(view.options[2].explanation.as_deref(), Some("Explanation c"));
        assert_eq!(view.options[1].state, OptionState::Neutral);
        assert!(view.options[1].explanation.is_none());
        assert_eq!(view.action, QuizAction::NextQuestion);
        assert_eq!(view.attempted, 1);
        assert_eq!(view.score, 0);
    }

    #[test]
    fn test_right_answer_reveals_only_correct() {
        let mut session = QuizSession::new(sample_set(3));
        session.select_option("c");
        session.submit_answer();
        let view = view(&session);

        let revealed: Vec<_> = view.options.iter().filter(|o| o.explanation.is_some()).collect();
        assert_eq!(revealed.len(), 1);
        assert_eq!(revealed[0].state, OptionState::Correct);
        assert_eq!(view.score, 1);
    }

    #[test]
    fn test_last_question_offers_results() {
        let mut session = QuizSession::new(sample_set(2));
        play(&mut session, &["c"]);
        session.select_option("c");
        session.submit_answer();

        assert_eq!(view(&session).action, QuizAction::SeeResults);
    }

    #[test]
    fn test_completed_render() {
        let mut session = QuizSession::new(sample_set(5));
        play(&mut session, &["c", "c", "a", "c", "b"]);

        match render(&session) {
            DisplayModel::Completed(report) => {
                assert_eq!(report.score, 3);
                assert_eq!(report.total, 5);
                assert_eq!(report.percentage, 60);
                assert_eq!(report.band, ScoreBand::Basic);
                assert_eq!(report.correct_count(), 3);
                assert!(!report.results[2].is_correct);
                assert_eq!(report.results[2].your_answer.as_deref(), Some("Option a"));
                assert_eq!(report.results[2].correct_answer, "Option c");
            }
            DisplayModel::Question(_) => panic!("expected completion"),
        }
    }

    #[test]
    fn test_final_report_only_when_completed() {
        let mut session = QuizSession::new(sample_set(2));
        assert!(session.final_report().is_none());

        play(&mut session, &["c", "c"]);
        let report = session.final_report().unwrap();
        assert_eq!(report.band, ScoreBand::Excellent);
        assert_eq!(report.message(), ScoreBand::Excellent.message());
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut session = QuizSession::new(sample_set(3));
        session.select_option("a");
        let _ = render(&session);
        let _ = render(&session);

        assert_eq!(session.selected_option(), Some("a"));
        assert!(!session.is_answered());
    }
}
