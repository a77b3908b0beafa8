//! Fetch, parse and resolve a deck against a record source.

use tracing::{error, info};

use crate::data::{parse, resolve_deck, Advisory, DeckLoad};
use crate::error::IngestError;
use crate::source::{Credentials, RecordSource};

pub struct DeckLoader<S> {
    source: S,
}

impl<S: RecordSource> DeckLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// First load of a run: fetch only when the source is configured.
    pub async fn initial(&self) -> DeckLoad {
        if self.source.is_configured().await {
            self.reload().await
        } else {
            info!("record source not configured; using bundled questions");
            DeckLoad::fallback(None)
        }
    }

    /// Fetches and resolves a fresh deck. Source failures are handled like
    /// malformed payloads.
    pub async fn reload(&self) -> DeckLoad {
        let result = match self.source.load_questions().await {
            Ok(raw) => parse(&raw),
            Err(source_error) => {
                error!(error = %source_error, "failed to load question records");
                Err(IngestError::SourceUnavailable(source_error))
            }
        };
        resolve_deck(result)
    }

    /// Stores `credentials`, then reloads from the newly configured source.
    pub async fn save_config(&self, credentials: Credentials) -> DeckLoad {
        if let Err(source_error) = self.source.set_credentials(credentials).await {
            error!(error = %source_error, "failed to save record source configuration");
            return DeckLoad::fallback(Some(Advisory::SaveFailed));
        }
        self.reload().await
    }
}
