//! Wire shape of the external record feed.
//!
//! The shape mirrors an Airtable list-records response and must stay
//! interoperable with it: unknown keys are ignored, every field is optional.
//! A field holding anything but a JSON string (a number column, a list)
//! decodes as absent, so only that record fails validation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level payload: `{"records": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsPayload {
    pub records: Vec<RawRecord>,
}

/// One untrusted record prior to validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fields: Option<RawFields>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFields {
    #[serde(rename = "Question", default, deserialize_with = "text_only")]
    pub question: Option<String>,
    #[serde(rename = "OptionA", default, deserialize_with = "text_only")]
    pub option_a: Option<String>,
    #[serde(rename = "OptionB", default, deserialize_with = "text_only")]
    pub option_b: Option<String>,
    #[serde(rename = "OptionC", default, deserialize_with = "text_only")]
    pub option_c: Option<String>,
    #[serde(rename = "OptionD", default, deserialize_with = "text_only")]
    pub option_d: Option<String>,
    #[serde(rename = "CorrectAnswer", default, deserialize_with = "text_only")]
    pub correct_answer: Option<String>,
}

fn text_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}
