use std::fmt;

use tracing::{info, warn};

use crate::error::IngestError;
use crate::models::Deck;

use super::fallback::fallback_deck;

/// Shown alongside any advisory: the user is looking at the bundled deck.
pub const FALLBACK_NOTICE: &str = "Using fallback questions instead.";

/// Short, user-facing reason for using the fallback deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    NoValidQuestions,
    LoadFailed,
    SaveFailed,
}

impl Advisory {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoValidQuestions => "No valid questions found in the record source.",
            Self::LoadFailed => "Failed to load questions from the record source.",
            Self::SaveFailed => "Failed to save configuration.",
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&IngestError> for Advisory {
    fn from(error: &IngestError) -> Self {
        match error {
            IngestError::NoValidQuestions => Self::NoValidQuestions,
            IngestError::Parse(_) | IngestError::SourceUnavailable(_) => Self::LoadFailed,
        }
    }
}

/// Outcome of one deck load, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckLoad {
    pub deck: Deck,
    pub used_fallback: bool,
    pub advisory: Option<Advisory>,
}

impl DeckLoad {
    pub fn external(deck: Deck) -> Self {
        Self {
            deck,
            used_fallback: false,
            advisory: None,
        }
    }

    pub fn fallback(advisory: Option<Advisory>) -> Self {
        Self {
            deck: fallback_deck(),
            used_fallback: true,
            advisory,
        }
    }
}

impl Default for DeckLoad {
    fn default() -> Self {
        Self::fallback(None)
    }
}

/// Applies the fallback policy to a parse outcome.
///
/// Accepted questions are used as-is; they are never padded with fallback
/// content. Any failure, or an empty accepted set, yields the fallback deck.
pub fn resolve_deck(result: Result<Deck, IngestError>) -> DeckLoad {
    let error = match result {
        Ok(deck) if !deck.is_empty() => {
            info!(questions = deck.len(), "using questions from record source");
            return DeckLoad::external(deck);
        }
        Ok(_) => IngestError::NoValidQuestions,
        Err(error) => error,
    };

    warn!(%error, "falling back to bundled questions");
    DeckLoad::fallback(Some(Advisory::from(&error)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse;
    use crate::error::SourceError;

    #[test]
    fn test_valid_questions_are_used_exclusively() {
        let raw = r#"{"records":[
            {"id":"1","fields":{"Question":"Q1","OptionA":"a","OptionB":"b","OptionC":"c","OptionD":"d","CorrectAnswer":"A"}},
            {"id":"2","fields":{"Question":"Q2"}}
        ]}"#;

        let load = resolve_deck(parse(raw));
        assert!(!load.used_fallback);
        assert_eq!(load.advisory, None);
        assert_eq!(load.deck.len(), 1);
        assert_eq!(load.deck[0].question, "Q1");
    }

    #[test]
    fn test_missing_correct_answer_resolves_to_fallback() {
        let raw = r#"{"records":[{"id":"1","fields":{"Question":"Q1","OptionA":"a","OptionB":"b","OptionC":"c","OptionD":"d"}}]}"#;

        let parsed = parse(raw).unwrap();
        assert!(parsed.is_empty());

        let load = resolve_deck(Ok(parsed));
        assert!(load.used_fallback);
        assert_eq!(load.deck, fallback_deck());
        assert_eq!(load.advisory, Some(Advisory::NoValidQuestions));
    }

    #[test]
    fn test_parse_failure_resolves_to_fallback() {
        let load = resolve_deck(parse("<html>502 Bad Gateway</html>"));
        assert!(load.used_fallback);
        assert_eq!(load.deck, fallback_deck());
        assert_eq!(load.advisory, Some(Advisory::LoadFailed));
    }

    #[test]
    fn test_source_failure_resolves_to_fallback() {
        let load = resolve_deck(Err(SourceError::NotConfigured.into()));
        assert_eq!(load.advisory, Some(Advisory::LoadFailed));
        assert_eq!(load.deck, fallback_deck());
    }

    #[test]
    fn test_advisories_are_distinct() {
        let messages = [
            Advisory::NoValidQuestions.message(),
            Advisory::LoadFailed.message(),
            Advisory::SaveFailed.message(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }
}
