use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::SourceError;

use super::{CredentialStore, Credentials, RecordSource};

pub const DEFAULT_API_URL: &str = "https://api.airtable.com";

/// Upper bound on pages followed in one load (100 records per page).
const MAX_PAGES: usize = 100;

/// Just enough of a list-records page to follow `offset`.
#[derive(Deserialize)]
struct Page {
    records: Vec<Value>,
    #[serde(default)]
    offset: Option<String>,
}

/// Record source backed by the Airtable REST API.
///
/// `load_questions` issues `GET {api_url}/v0/{base_id}/{table_id}` with the
/// token as bearer auth. A single-page response is returned untouched; when
/// the response carries an `offset`, the following pages are fetched and
/// their records merged into one `{"records": [...]}` payload.
pub struct AirtableSource {
    client: Client,
    api_url: String,
    credentials: RwLock<Option<Credentials>>,
    store: Option<CredentialStore>,
}

impl AirtableSource {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            credentials: RwLock::new(None),
            store: None,
        }
    }

    /// Persists credentials to `store` and picks up any already saved there.
    ///
    /// An unreadable store is logged and otherwise ignored.
    #[must_use]
    pub fn with_store(mut self, store: CredentialStore) -> Self {
        match store.load() {
            Ok(Some(saved)) => {
                info!(path = %store.path().display(), "using saved record source credentials");
                *self.credentials.get_mut() = Some(saved);
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "ignoring unreadable credentials file"),
        }
        self.store = Some(store);
        self
    }

    /// Seeds credentials without persisting them.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        *self.credentials.get_mut() = Some(credentials);
        self
    }

    fn records_url(&self, credentials: &Credentials) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|err| SourceError::InvalidUrl(format!("{}: {err}", self.api_url)))?;

        url.path_segments_mut()
            .map_err(|()| SourceError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .push("v0")
            .push(&credentials.base_id)
            .push(&credentials.table_id);

        Ok(url)
    }

    async fn fetch_page(
        &self,
        url: &Url,
        credentials: &Credentials,
        offset: Option<&str>,
    ) -> Result<String, SourceError> {
        let mut url = url.clone();
        if let Some(offset) = offset {
            url.query_pairs_mut().append_pair("offset", offset);
        }

        debug!(%url, "fetching question records");
        let response = self
            .client
            .get(url)
            .bearer_auth(&credentials.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl RecordSource for AirtableSource {
    async fn is_configured(&self) -> bool {
        self.credentials.read().await.is_some()
    }

    async fn set_credentials(&self, credentials: Credentials) -> Result<(), SourceError> {
        if !credentials.is_complete() {
            return Err(SourceError::IncompleteCredentials);
        }
        if let Some(store) = &self.store {
            store.save(&credentials)?;
        }

        info!(base_id = %credentials.base_id, table = %credentials.table_id, "record source configured");
        *self.credentials.write().await = Some(credentials);
        Ok(())
    }

    async fn load_questions(&self) -> Result<String, SourceError> {
        let credentials = self
            .credentials
            .read()
            .await
            .clone()
            .ok_or(SourceError::NotConfigured)?;
        let url = self.records_url(&credentials)?;

        let first = self.fetch_page(&url, &credentials, None).await?;
        // Anything that is not a paged list goes to the parser as-is.
        let mut page = match serde_json::from_str::<Page>(&first) {
            Ok(page) if page.offset.is_some() => page,
            _ => return Ok(first),
        };

        let mut records = std::mem::take(&mut page.records);
        let mut pages = 1;
        while let Some(offset) = page.offset.take() {
            if pages == MAX_PAGES {
                warn!(pages, "page limit reached; remaining records are skipped");
                break;
            }
            let body = self.fetch_page(&url, &credentials, Some(&offset)).await?;
            page = serde_json::from_str(&body).map_err(SourceError::Page)?;
            records.append(&mut page.records);
            pages += 1;
        }

        debug!(pages, records = records.len(), "merged paginated records");
        Ok(serde_json::json!({ "records": records }).to_string())
    }
}
