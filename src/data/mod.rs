//! Question ingestion: decoding, validation and the fallback policy.

mod fallback;
mod parse;
mod resolve;

pub use fallback::fallback_deck;
pub use parse::parse;
pub use resolve::{resolve_deck, Advisory, DeckLoad, FALLBACK_NOTICE};
