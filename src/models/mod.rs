mod question;
mod record;

pub use question::{Deck, OptionLabel, Question};
pub use record::{RawFields, RawRecord, RecordsPayload};
