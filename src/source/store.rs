use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SourceError;

use super::Credentials;

const APP_DIR: &str = "quiz-deck";
const CREDENTIALS_FILE: &str = "credentials.json";

/// JSON file holding the record source credentials between runs.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/quiz-deck/credentials.json`, when the platform has a config dir.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(APP_DIR).join(CREDENTIALS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `Ok(None)` if nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Credentials>, SourceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };

        let credentials: Credentials = serde_json::from_str(&content)?;
        if !credentials.is_complete() {
            return Err(SourceError::IncompleteCredentials);
        }
        debug!(path = %self.path.display(), "loaded stored credentials");
        Ok(Some(credentials))
    }

    pub fn save(&self, credentials: &Credentials) -> Result<(), SourceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let json = serde_json::to_string_pretty(credentials)?;
        fs::write(&self.path, json).map_err(|source| self.io_error(source))?;
        restrict_permissions(&self.path).map_err(|source| self.io_error(source))?;

        debug!(path = %self.path.display(), "saved credentials");
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> SourceError {
        SourceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
