use tracing::{debug, warn};

use crate::data::{Advisory, DeckLoad};
use crate::error::SessionError;
use crate::form::ConfigForm;
use crate::models::OptionLabel;
use crate::session::{QuizSession, SessionState};
use crate::source::Credentials;

const NUM_OPTIONS: usize = OptionLabel::ALL.len();

/// Which screen the presentation layer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Config,
    Quiz,
    Result,
}

/// Presentation-facing controller: owns the session and the loaded deck.
pub struct App {
    session: QuizSession,
    deck_load: DeckLoad,
    loading: bool,
    cursor: usize,
    result_scroll: usize,
    config_form: Option<ConfigForm>,
    save_pending: bool,
    config_saved: bool,
}

impl App {
    pub fn new() -> Self {
        Self::with_deck_load(DeckLoad::default())
    }

    pub fn with_deck_load(deck_load: DeckLoad) -> Self {
        Self {
            session: QuizSession::new(),
            deck_load,
            loading: false,
            cursor: 0,
            result_scroll: 0,
            config_form: None,
            save_pending: false,
            config_saved: false,
        }
    }

    pub fn screen(&self) -> Screen {
        match self.session.state() {
            SessionState::InProgress => Screen::Quiz,
            SessionState::Completed => Screen::Result,
            SessionState::NotStarted if self.config_form.is_some() => Screen::Config,
            SessionState::NotStarted => Screen::Home,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn deck_load(&self) -> &DeckLoad {
        &self.deck_load
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Marks a load as outstanding. Returns `false` if one already is, in
    /// which case the caller must not start another.
    pub fn begin_loading(&mut self) -> bool {
        if self.loading {
            debug!("load already in flight; ignoring request");
            return false;
        }
        self.loading = true;
        true
    }

    /// Stores a finished load. The saved-configuration notice only survives
    /// the load that carried the submitted credentials.
    pub fn finish_loading(&mut self, deck_load: DeckLoad) {
        self.loading = false;
        self.config_saved = std::mem::take(&mut self.save_pending)
            && deck_load.advisory != Some(Advisory::SaveFailed);
        self.deck_load = deck_load;
    }

    pub fn start_quiz(&mut self) {
        if self.loading {
            return;
        }
        let deck = self.deck_load.deck.clone();
        if let Err(error) = self.session.start(deck) {
            log_rejected(error);
            return;
        }
        self.cursor = 0;
        self.result_scroll = 0;
    }

    pub fn cursor(&self) -> OptionLabel {
        OptionLabel::from_index(self.cursor).unwrap_or(OptionLabel::A)
    }

    pub fn select_next_option(&mut self) {
        self.cursor = (self.cursor + 1) % NUM_OPTIONS;
    }

    pub fn select_previous_option(&mut self) {
        self.cursor = (self.cursor + NUM_OPTIONS - 1) % NUM_OPTIONS;
    }

    /// Records `label` as the answer to the current question.
    pub fn choose(&mut self, label: OptionLabel) {
        if self.session.is_answered() {
            return;
        }
        self.cursor = label.index();
        if let Err(error) = self.session.select_answer(label) {
            log_rejected(error);
        }
    }

    /// Answers with the option under the cursor, or moves on once answered.
    pub fn confirm(&mut self) {
        if self.session.is_answered() {
            self.next_question();
        } else {
            self.choose(self.cursor());
        }
    }

    pub fn next_question(&mut self) {
        if !self.session.is_answered() {
            return;
        }
        match self.session.advance() {
            Ok(()) => self.cursor = 0,
            Err(error) => log_rejected(error),
        }
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.cursor = 0;
        self.result_scroll = 0;
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session.total().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn open_config(&mut self) {
        if self.session.state() == SessionState::NotStarted && self.config_form.is_none() {
            self.config_form = Some(ConfigForm::new());
        }
    }

    pub fn close_config(&mut self) {
        self.config_form = None;
    }

    pub fn config_form(&self) -> Option<&ConfigForm> {
        self.config_form.as_ref()
    }

    pub fn config_form_mut(&mut self) -> Option<&mut ConfigForm> {
        self.config_form.as_mut()
    }

    /// Takes the form's credentials for saving and clears the token from the
    /// form. Returns `None` if a field is blank or a load is in flight.
    pub fn submit_config(&mut self) -> Option<Credentials> {
        if self.loading {
            return None;
        }
        let form = self.config_form.as_mut()?;
        let credentials = form.credentials()?;
        form.clear_token();
        self.config_form = None;
        self.save_pending = true;
        self.config_saved = false;
        Some(credentials)
    }

    pub fn config_saved(&self) -> bool {
        self.config_saved
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn log_rejected(error: SessionError) {
    warn!(%error, "quiz action rejected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse, resolve_deck};

    fn two_question_load() -> DeckLoad {
        let raw = r#"{"records":[
            {"id":"1","fields":{"Question":"Q1","OptionA":"a","OptionB":"b","OptionC":"c","OptionD":"d","CorrectAnswer":"B"}},
            {"id":"2","fields":{"Question":"Q2","OptionA":"a","OptionB":"b","OptionC":"c","OptionD":"d","CorrectAnswer":"D"}}
        ]}"#;
        resolve_deck(parse(raw))
    }

    #[test]
    fn test_full_run_through_controller() {
        let mut app = App::with_deck_load(two_question_load());
        assert_eq!(app.screen(), Screen::Home);

        app.start_quiz();
        assert_eq!(app.screen(), Screen::Quiz);

        // Cursor on B, confirm answers, confirm again advances
        app.select_next_option();
        app.confirm();
        assert_eq!(app.session().score(), 1);
        app.confirm();
        assert_eq!(app.session().position(), 1);
        assert_eq!(app.cursor(), OptionLabel::A);

        app.choose(OptionLabel::A);
        app.choose(OptionLabel::D);
        assert_eq!(app.session().selected_answer(), Some(OptionLabel::A));
        app.next_question();

        assert_eq!(app.screen(), Screen::Result);
        assert_eq!(app.session().score(), 1);

        app.restart();
        assert_eq!(app.screen(), Screen::Home);
        assert_eq!(app.session().total(), 0);
    }

    #[test]
    fn test_next_requires_an_answer() {
        let mut app = App::with_deck_load(two_question_load());
        app.start_quiz();
        app.next_question();
        assert_eq!(app.session().position(), 0);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = App::new();
        app.select_previous_option();
        assert_eq!(app.cursor(), OptionLabel::D);
        app.select_next_option();
        assert_eq!(app.cursor(), OptionLabel::A);
    }

    #[test]
    fn test_loading_blocks_start_and_second_load() {
        let mut app = App::new();
        assert!(app.begin_loading());
        assert!(!app.begin_loading());

        app.start_quiz();
        assert_eq!(app.screen(), Screen::Home);

        app.finish_loading(DeckLoad::fallback(Some(Advisory::LoadFailed)));
        assert!(!app.is_loading());
        assert_eq!(app.deck_load().advisory, Some(Advisory::LoadFailed));

        app.start_quiz();
        assert_eq!(app.screen(), Screen::Quiz);
    }

    #[test]
    fn test_config_submit_requires_all_fields() {
        let mut app = App::new();
        app.open_config();
        assert_eq!(app.screen(), Screen::Config);
        assert!(app.submit_config().is_none());

        let form = app.config_form_mut().unwrap();
        for (i, value) in ["app1", "Questions", "pat"].iter().enumerate() {
            if i > 0 {
                form.focus_next();
            }
            value.chars().for_each(|c| form.push(c));
        }

        let credentials = app.submit_config().unwrap();
        assert_eq!(credentials.token, "pat");
        assert_eq!(app.screen(), Screen::Home);
        assert!(!app.config_saved());

        assert!(app.begin_loading());
        app.finish_loading(two_question_load());
        assert!(app.config_saved());
    }

    fn submit_filled_config(app: &mut App) {
        app.open_config();
        let form = app.config_form_mut().unwrap();
        for (i, value) in ["app1", "Questions", "pat"].iter().enumerate() {
            if i > 0 {
                form.focus_next();
            }
            value.chars().for_each(|c| form.push(c));
        }
        assert!(app.submit_config().is_some());
    }

    #[test]
    fn test_saved_notice_cleared_by_later_reload() {
        let mut app = App::new();
        submit_filled_config(&mut app);
        app.begin_loading();
        app.finish_loading(two_question_load());
        assert!(app.config_saved());

        app.begin_loading();
        app.finish_loading(two_question_load());
        assert!(!app.config_saved());
    }

    #[test]
    fn test_saved_notice_not_shown_when_save_failed() {
        let mut app = App::new();
        submit_filled_config(&mut app);
        app.begin_loading();
        app.finish_loading(DeckLoad::fallback(Some(Advisory::SaveFailed)));
        assert!(!app.config_saved());
    }

    #[test]
    fn test_results_scroll_is_bounded() {
        let mut app = App::with_deck_load(two_question_load());
        app.start_quiz();
        for _ in 0..2 {
            app.choose(OptionLabel::A);
            app.next_question();
        }
        app.scroll_results_down();
        app.scroll_results_down();
        app.scroll_results_down();
        assert_eq!(app.result_scroll(), 1);
        app.scroll_results_up();
        app.scroll_results_up();
        assert_eq!(app.result_scroll(), 0);
    }
}
