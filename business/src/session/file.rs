//! JSON-file session store for native front ends.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::debug;

use super::{SessionError, SessionKey, SessionStore};

/// Persists the session as a flat JSON object, rewritten on every change.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    values: BTreeMap<SessionKey, String>,
}

impl FileSessionStore {
    /// `$XDG_CONFIG_HOME/roster/session.json` on Linux, the platform equivalent elsewhere.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "roster", "roster").map(|dirs| dirs.config_dir().join("session.json"))
    }

    /// Opens the store at `path`. A missing file is an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened session file {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn open_default() -> Result<Self, SessionError> {
        let path = Self::default_path().ok_or_else(|| {
            SessionError::Unavailable("could not determine config directory".to_owned())
        })?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), SessionError> {
        if self.values.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        self.values.insert(key, value.to_owned());
        self.persist()
    }

    fn remove(&mut self, key: SessionKey) -> Result<(), SessionError> {
        if self.values.remove(&key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.values.clear();
        self.persist()
    }
}
