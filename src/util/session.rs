// src/util/session.rs
//! Persisted display name. This is a label for the header, not a credential:
//! any name is accepted and nothing is verified against a server.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::log_warn;

pub const SESSION_FILE: &str = "session.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub username: String,
}

/// On-disk layout, keyed the same way the web client keyed local storage.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rag_user: Option<String>,
    #[serde(default)]
    rag_auth: bool,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restores the user only when both keys are present and the auth flag
    /// is set. An unreadable file is treated as signed out.
    pub fn load(&self) -> Option<SessionUser> {
        let yaml = std::fs::read_to_string(&self.path).ok()?;

        let stored: StoredSession = match serde_yaml::from_str(&yaml) {
            Ok(stored) => stored,
            Err(e) => {
                log_warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match stored.rag_user {
            Some(username) if stored.rag_auth && !username.is_empty() => {
                Some(SessionUser { username })
            }
            _ => None,
        }
    }

    pub fn login(&self, username: &str) -> Result<SessionUser> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let stored = StoredSession {
            rag_user: Some(username.to_string()),
            rag_auth: true,
        };
        std::fs::write(&self.path, serde_yaml::to_string(&stored)?)?;

        Ok(SessionUser {
            username: username.to_string(),
        })
    }

    pub fn logout(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
