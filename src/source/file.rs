use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::SourceError;

use super::{Credentials, RecordSource};

/// Record source reading a records payload from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for FileSource {
    async fn is_configured(&self) -> bool {
        true
    }

    async fn set_credentials(&self, _credentials: Credentials) -> Result<(), SourceError> {
        Err(SourceError::ReadOnly)
    }

    async fn load_questions(&self) -> Result<String, SourceError> {
        debug!(path = %self.path.display(), "reading question records");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })
    }
}
