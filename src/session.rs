//! Persistent login session.
//!
//! Holds the bearer token and the profile of the logged-in user in
//! `session.yaml` under the data directory. A stored token means the user is
//! logged in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::User;

const SESSION_FILE: &str = "session.yaml";

/// Errors that can occur reading or writing the session file
#[derive(Debug)]
pub enum SessionError {
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::IoError(path, e) => {
                write!(f, "Session file '{}': {}", path.display(), e)
            }
            SessionError::ParseError(path, e) => {
                write!(f, "Failed to parse session file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Contents of the session file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// File-backed session storage.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store keeping its file in `data_dir`.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the session. A missing file is an empty session.
    pub fn load(&self) -> Result<Session, SessionError> {
        if !self.path.exists() {
            return Ok(Session::default());
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| SessionError::IoError(self.path.clone(), e))?;
        serde_yaml::from_str(&contents).map_err(|e| SessionError::ParseError(self.path.clone(), e))
    }

    /// Returns the stored bearer token, if logged in.
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.token)
    }

    /// Records a successful login.
    pub fn save_login(&self, token: &str, user: &User) -> Result<(), SessionError> {
        let session = Session {
            token: Some(token.to_string()),
            user: Some(user.clone()),
            logged_in_at: Some(Utc::now()),
        };
        self.write(&session)
    }

    /// Removes the stored token and user.
    ///
    /// Returns false if there was nothing to remove.
    pub fn clear(&self) -> Result<bool, SessionError> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)
            .map_err(|e| SessionError::IoError(self.path.clone(), e))?;
        tracing::debug!("Removed session file {}", self.path.display());
        Ok(true)
    }

    fn write(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SessionError::IoError(parent.to_path_buf(), e))?;
        }
        let yaml = serde_yaml::to_string(session)
            .map_err(|e| SessionError::ParseError(self.path.clone(), e))?;
        std::fs::write(&self.path, yaml).map_err(|e| SessionError::IoError(self.path.clone(), e))?;
        restrict_permissions(&self.path);
        tracing::debug!("Wrote session file {}", self.path.display());
        Ok(())
    }
}

/// Keeps the bearer token readable by the owner only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)) {
        tracing::warn!("Could not restrict permissions on {}: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
