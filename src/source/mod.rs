//! External record sources.
//!
//! A record source hands back the raw serialized `records` payload; decoding
//! and validation stay in [`crate::data`].

mod airtable;
mod file;
mod store;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

pub use airtable::{AirtableSource, DEFAULT_API_URL};
pub use file::FileSource;
pub use store::CredentialStore;

/// Collaborator that supplies serialized question records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Whether credentials (or an equivalent location) are available.
    async fn is_configured(&self) -> bool;

    /// Stores new credentials for subsequent loads.
    async fn set_credentials(&self, credentials: Credentials) -> Result<(), SourceError>;

    /// Fetches the raw records payload.
    async fn load_questions(&self) -> Result<String, SourceError>;
}

/// Access details for a remote table of question records.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub base_id: String,
    pub table_id: String,
}

impl Credentials {
    pub fn new(
        token: impl Into<String>,
        base_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let credentials = Self {
            token: token.into().trim().to_string(),
            base_id: base_id.into().trim().to_string(),
            table_id: table_id.into().trim().to_string(),
        };
        if credentials.is_complete() {
            Ok(credentials)
        } else {
            Err(SourceError::IncompleteCredentials)
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.token.trim().is_empty()
            && !self.base_id.trim().is_empty()
            && !self.table_id.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("table_id", &self.table_id)
            .finish()
    }
}
