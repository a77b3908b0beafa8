use tracing::{debug, warn};

use crate::error::IngestError;
use crate::models::{Deck, Question, RawRecord, RecordsPayload};

/// Decodes a serialized records payload into a deck.
///
/// Records missing any of the six fields (or carrying an empty one) are
/// dropped without individual diagnostics. The accepted questions keep
/// their input order and exact field values.
pub fn parse(raw: &str) -> Result<Deck, IngestError> {
    let payload: RecordsPayload = serde_json::from_str(raw).map_err(IngestError::Parse)?;
    let total = payload.records.len();

    let questions: Vec<Question> = payload
        .records
        .into_iter()
        .filter_map(validate_record)
        .collect();

    let unscorable = questions
        .iter()
        .filter(|question| question.correct_label().is_none())
        .count();
    if unscorable > 0 {
        warn!(
            unscorable,
            "CorrectAnswer matches neither a label A-D nor any option text; those questions cannot be scored"
        );
    }

    debug!(total, accepted = questions.len(), "parsed records payload");
    Ok(Deck::new(questions))
}

fn validate_record(record: RawRecord) -> Option<Question> {
    let fields = record.fields?;

    Some(Question {
        question: non_empty(fields.question)?,
        option_a: non_empty(fields.option_a)?,
        option_b: non_empty(fields.option_b)?,
        option_c: non_empty(fields.option_c)?,
        option_d: non_empty(fields.option_d)?,
        correct_answer: non_empty(fields.correct_answer)?,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
