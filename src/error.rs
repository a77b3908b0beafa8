//! Error types shared across the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::session::SessionState;

/// Errors raised by a record source collaborator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("record source is not configured")]
    NotConfigured,
    #[error("token, base id and table must all be non-empty")]
    IncompleteCredentials,
    #[error("record source does not accept credentials")]
    ReadOnly,
    #[error("record source request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid record source url: {0}")]
    InvalidUrl(String),
    #[error("failed to access {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed records page: {0}")]
    Page(#[source] serde_json::Error),
    #[error("malformed credentials file: {0}")]
    CredentialsFormat(#[from] serde_json::Error),
}

/// Errors raised while turning external records into a deck.
///
/// None of these are fatal: every variant resolves to the fallback deck.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    #[error("records payload is malformed: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("no record passed field validation")]
    NoValidQuestions,
    #[error("record source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}

/// Caller contract violations on the quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot start a session with an empty deck")]
    EmptyDeck,
    #[error("cannot {operation} while the session is {state:?}")]
    InvalidTransition {
        operation: &'static str,
        state: SessionState,
    },
}

/// Top-level error for running the quiz application.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Source(#[from] SourceError),
}
