//! Quiz session state machine.
//!
//! A session runs over a fixed deck: it tracks the current position, the
//! answer recorded for each question, and the running score. Each question
//! is scored at most once; its first recorded answer is final.

use tracing::debug;

use crate::error::SessionError;
use crate::models::{Deck, OptionLabel, Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// Read-only view of the session for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot<'a> {
    pub state: SessionState,
    pub position: usize,
    pub current_question: Option<&'a Question>,
    pub selected_answer: Option<OptionLabel>,
    pub score: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    state: SessionState,
    deck: Deck,
    position: usize,
    answers: Vec<Option<OptionLabel>>,
    score: usize,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn answers(&self) -> &[Option<OptionLabel>] {
        &self.answers
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.deck.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::NotStarted => None,
            _ => self.deck.get(self.position),
        }
    }

    pub fn selected_answer(&self) -> Option<OptionLabel> {
        self.answers.get(self.position).copied().flatten()
    }

    /// Whether the question at the current position already has an answer.
    pub fn is_answered(&self) -> bool {
        self.selected_answer().is_some()
    }

    pub fn is_last_question(&self) -> bool {
        self.position + 1 >= self.deck.len()
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            state: self.state,
            position: self.position,
            current_question: self.current_question(),
            selected_answer: self.selected_answer(),
            score: self.score,
            total: self.total(),
        }
    }

    /// Begins a run over `deck`.
    pub fn start(&mut self, deck: Deck) -> Result<(), SessionError> {
        if self.state == SessionState::InProgress {
            return Err(self.invalid("start"));
        }
        if deck.is_empty() {
            return Err(SessionError::EmptyDeck);
        }

        self.answers = vec![None; deck.len()];
        self.deck = deck;
        self.position = 0;
        self.score = 0;
        self.state = SessionState::InProgress;
        debug!(total = self.deck.len(), "session started");
        Ok(())
    }

    /// Records `label` for the current question.
    ///
    /// Returns `Ok(false)` without touching the score when the question
    /// was already answered.
    pub fn select_answer(&mut self, label: OptionLabel) -> Result<bool, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(self.invalid("select an answer"));
        }

        let slot = &mut self.answers[self.position];
        if slot.is_some() {
            return Ok(false);
        }
        *slot = Some(label);

        if self.deck[self.position].is_correct(label) {
            self.score += 1;
        }
        debug!(position = self.position, %label, score = self.score, "answer recorded");
        Ok(true)
    }

    /// Moves to the next question, or completes the session on the last one.
    ///
    /// Callers are expected to advance only once the current question is
    /// answered; this is not enforced.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::InProgress {
            return Err(self.invalid("advance"));
        }
        if !self.is_answered() {
            debug!(position = self.position, "advancing past an unanswered question");
        }

        if self.is_last_question() {
            self.state = SessionState::Completed;
            debug!(score = self.score, total = self.deck.len(), "session completed");
        } else {
            self.position += 1;
        }
        Ok(())
    }

    /// Discards the run and returns to the pre-start shape.
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            operation,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, correct: &str) -> Question {
        Question {
            question: text.to_string(),
            option_a: "a".to_string(),
            option_b: "b".to_string(),
            option_c: "c".to_string(),
            option_d: "d".to_string(),
            correct_answer: correct.to_string(),
        }
    }

    fn deck(answers: &[&str]) -> Deck {
        answers
            .iter()
            .enumerate()
            .map(|(i, correct)| question(&format!("Q{}", i + 1), correct))
            .collect::<Vec<_>>()
            .into()
    }

    fn recount(session: &QuizSession) -> usize {
        session
            .answers()
            .iter()
            .zip(session.deck().iter())
            .filter(|(answer, question)| answer.is_some_and(|label| question.is_correct(label)))
            .count()
    }

    #[test]
    fn test_new_session_is_not_started() {
        let session = QuizSession::new();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SessionState::NotStarted);
        assert_eq!(snapshot.current_question, None);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.total, 0);
    }

    #[test]
    fn test_start_initializes_run() {
        let mut session = QuizSession::new();
        session.start(deck(&["A", "B", "C"])).unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SessionState::InProgress);
        assert_eq!(snapshot.position, 0);
        assert_eq!(snapshot.current_question.unwrap().question, "Q1");
        assert_eq!(snapshot.selected_answer, None);
        assert_eq!(snapshot.total, 3);
        assert_eq!(session.answers(), &[None, None, None]);
    }

    #[test]
    fn test_start_rejects_empty_deck() {
        let mut session = QuizSession::new();
        assert_eq!(session.start(Deck::default()), Err(SessionError::EmptyDeck));
        assert_eq!(session, QuizSession::new());
    }

    #[test]
    fn test_start_rejected_while_in_progress() {
        let mut session = QuizSession::new();
        session.start(deck(&["A", "B"])).unwrap();
        session.select_answer(OptionLabel::A).unwrap();
        let before = session.clone();

        assert!(matches!(
            session.start(deck(&["C"])),
            Err(SessionError::InvalidTransition { operation: "start", .. })
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn test_first_answer_is_final() {
        let mut session = QuizSession::new();
        session.start(deck(&["B"])).unwrap();

        assert_eq!(session.select_answer(OptionLabel::A), Ok(true));
        assert_eq!(session.score(), 0);

        // Later answers, even correct ones, are ignored
        assert_eq!(session.select_answer(OptionLabel::B), Ok(false));
        assert_eq!(session.select_answer(OptionLabel::B), Ok(false));
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected_answer(), Some(OptionLabel::A));
    }

    #[test]
    fn test_correct_answer_scores_once() {
        let mut session = QuizSession::new();
        session.start(deck(&["C", "A"])).unwrap();

        session.select_answer(OptionLabel::C).unwrap();
        session.select_answer(OptionLabel::C).unwrap();
        assert_eq!(session.score(), 1);
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn test_worked_example() {
        let mut session = QuizSession::new();
        session.start(deck(&["B", "D"])).unwrap();

        session.select_answer(OptionLabel::B).unwrap();
        session.advance().unwrap();
        session.select_answer(OptionLabel::A).unwrap();
        session.advance().unwrap();

        assert_eq!(session.score(), 1);
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn test_progression_reaches_completed() {
        let answers = ["A", "B", "C", "D", "A"];
        let mut session = QuizSession::new();
        session.start(deck(&answers)).unwrap();

        for expected in 1..answers.len() {
            session.select_answer(OptionLabel::A).unwrap();
            session.advance().unwrap();
            assert_eq!(session.state(), SessionState::InProgress);
            assert_eq!(session.position(), expected);
        }

        session.select_answer(OptionLabel::A).unwrap();
        session.advance().unwrap();
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.score(), 2);

        let done = session.clone();
        assert!(session.advance().is_err());
        assert_eq!(session, done);
    }

    #[test]
    fn test_transitions_outside_progress_are_rejected() {
        let mut session = QuizSession::new();
        assert!(session.select_answer(OptionLabel::A).is_err());
        assert!(session.advance().is_err());
        assert_eq!(session, QuizSession::new());

        session.start(deck(&["A"])).unwrap();
        session.select_answer(OptionLabel::A).unwrap();
        session.advance().unwrap();

        let done = session.clone();
        assert!(matches!(
            session.select_answer(OptionLabel::B),
            Err(SessionError::InvalidTransition {
                state: SessionState::Completed,
                ..
            })
        ));
        assert_eq!(session, done);
    }

    #[test]
    fn test_advance_without_answer_is_allowed() {
        let mut session = QuizSession::new();
        session.start(deck(&["A", "B"])).unwrap();
        session.advance().unwrap();
        assert_eq!(session.position(), 1);
        assert_eq!(session.answers()[0], None);
    }

    #[test]
    fn test_score_matches_recount() {
        let mut session = QuizSession::new();
        session.start(deck(&["A", "B", "C", "D"])).unwrap();

        let picks = [OptionLabel::A, OptionLabel::C, OptionLabel::C, OptionLabel::A];
        for pick in picks {
            session.select_answer(pick).unwrap();
            session.select_answer(OptionLabel::D).unwrap();
            assert_eq!(session.score(), recount(&session));
            assert!(session.score() <= session.total());
            session.advance().unwrap();
        }
        assert_eq!(session.score(), 2);
        assert_eq!(session.score(), recount(&session));
    }

    #[test]
    fn test_literal_answer_text_scores() {
        let mut q = question("Q", "c");
        q.option_c = "c".to_string();
        let mut session = QuizSession::new();
        // "c" parses as a letter label first
        session.start(vec![q].into()).unwrap();
        session.select_answer(OptionLabel::C).unwrap();
        assert_eq!(session.score(), 1);

        let mut session = QuizSession::new();
        let mut q = question("Q", "Mars");
        q.option_b = "Mars".to_string();
        session.start(vec![q].into()).unwrap();
        session.select_answer(OptionLabel::B).unwrap();
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_restart_resets_fully() {
        let mut session = QuizSession::new();
        session.start(deck(&["A", "B"])).unwrap();
        session.select_answer(OptionLabel::A).unwrap();
        session.advance().unwrap();
        session.restart();
        assert_eq!(session, QuizSession::new());

        session.start(deck(&["A"])).unwrap();
        session.select_answer(OptionLabel::A).unwrap();
        session.advance().unwrap();
        session.restart();
        assert_eq!(session, QuizSession::new());

        // Restart when not started is harmless
        session.restart();
        assert_eq!(session.state(), SessionState::NotStarted);
    }

    #[test]
    fn test_start_again_after_completion() {
        let mut session = QuizSession::new();
        session.start(deck(&["A"])).unwrap();
        session.select_answer(OptionLabel::A).unwrap();
        session.advance().unwrap();

        session.start(deck(&["B", "C"])).unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.score(), 0);
        assert_eq!(session.answers(), &[None, None]);
    }
}
