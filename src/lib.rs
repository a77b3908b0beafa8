//! # quiz-deck
//!
//! A terminal multiple-choice quiz fed by an external table of question
//! records, with a bundled fallback deck.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_deck::{AirtableSource, Quiz, QuizError, DEFAULT_API_URL};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Questions come from Airtable once credentials are saved;
//!     // until then the bundled deck is used.
//!     let source = AirtableSource::new(DEFAULT_API_URL);
//!
//!     // Run the quiz in the terminal
//!     Quiz::new(source).run().await
//! }
//! ```

mod app;
mod data;
mod error;
mod form;
mod loader;
mod models;
mod session;
mod source;
pub mod terminal;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

pub use app::{App, Screen};
pub use data::{fallback_deck, parse, resolve_deck, Advisory, DeckLoad, FALLBACK_NOTICE};
pub use error::{IngestError, QuizError, SessionError, SourceError};
pub use form::{ConfigField, ConfigForm};
pub use loader::DeckLoader;
pub use models::{Deck, OptionLabel, Question, RawFields, RawRecord, RecordsPayload};
pub use session::{QuizSession, SessionSnapshot, SessionState};
pub use source::{
    AirtableSource, CredentialStore, Credentials, FileSource, RecordSource, DEFAULT_API_URL,
};

const TICK: Duration = Duration::from_millis(50);

/// A quiz instance that can be run in the terminal.
pub struct Quiz<S> {
    loader: Arc<DeckLoader<S>>,
    app: App,
}

impl<S: RecordSource + 'static> Quiz<S> {
    /// Create a quiz drawing its questions from `source`.
    pub fn new(source: S) -> Self {
        Self {
            loader: Arc::new(DeckLoader::new(source)),
            app: App::new(),
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits. Deck loads run in the background while the UI
    /// shows a loading state.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut terminal = terminal::TerminalGuard::enter()?;
        let (tx, mut rx) = mpsc::unbounded_channel();

        self.request_load(LoadRequest::Initial, &tx);

        loop {
            while let Ok(deck_load) = rx.try_recv() {
                self.app.finish_loading(deck_load);
            }

            terminal.draw(|frame| ui::render(frame, &self.app))?;

            if !event::poll(TICK)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_key(&mut self.app, key) {
                Action::None => {}
                Action::Quit => break,
                Action::Load(request) => self.request_load(request, &tx),
            }
        }

        Ok(())
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    fn request_load(&mut self, request: LoadRequest, tx: &mpsc::UnboundedSender<DeckLoad>) {
        if !self.app.begin_loading() {
            return;
        }

        let loader = Arc::clone(&self.loader);
        let tx = tx.clone();
        tokio::spawn(async move {
            let deck_load = match request {
                LoadRequest::Initial => loader.initial().await,
                LoadRequest::Reload => loader.reload().await,
                LoadRequest::Save(credentials) => loader.save_config(credentials).await,
            };
            // The receiver only goes away when the UI has quit.
            let _ = tx.send(deck_load);
        });
    }
}

#[derive(Debug)]
enum LoadRequest {
    Initial,
    Reload,
    Save(Credentials),
}

#[derive(Debug)]
enum Action {
    None,
    Quit,
    Load(LoadRequest),
}

fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    handle_input(app, key.code)
}

fn handle_input(app: &mut App, key: KeyCode) -> Action {
    match app.screen() {
        Screen::Home => handle_home_input(app, key),
        Screen::Config => handle_config_input(app, key),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Result => handle_result_input(app, key),
    }
}

fn handle_home_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            Action::None
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.open_config();
            Action::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Load(LoadRequest::Reload),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

fn handle_config_input(app: &mut App, key: KeyCode) -> Action {
    if key == KeyCode::Enter {
        return match app.submit_config() {
            Some(credentials) => Action::Load(LoadRequest::Save(credentials)),
            None => Action::None,
        };
    }
    if key == KeyCode::Esc {
        app.close_config();
        return Action::None;
    }

    let Some(form) = app.config_form_mut() else {
        return Action::None;
    };
    match key {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Backspace => form.pop(),
        KeyCode::Char(c) => form.push(c),
        _ => {}
    }
    Action::None
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm(),
        KeyCode::Right | KeyCode::Char('n') => app.next_question(),
        KeyCode::Char(c @ ('a'..='d' | 'A'..='D')) => {
            if let Some(label) = OptionLabel::parse(&c.to_string()) {
                app.choose(label);
            }
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        _ => {}
    }
    Action::None
}

fn handle_result_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
        _ => {}
    }
    Action::None
}
