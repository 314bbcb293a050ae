//! Browser `localStorage` session store.

use log::warn;
use web_sys::Storage;

use super::{SessionError, SessionKey, SessionStore};

#[derive(Debug, Clone)]
pub struct WebSessionStore {
    storage: Storage,
}

impl WebSessionStore {
    pub fn new() -> Result<Self, SessionError> {
        let window = web_sys::window()
            .ok_or_else(|| SessionError::Unavailable("no window".to_owned()))?;
        let storage = window
            .local_storage()
            .map_err(|e| SessionError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| SessionError::Unavailable("localStorage is disabled".to_owned()))?;
        Ok(Self { storage })
    }
}

impl SessionStore for WebSessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        match self.storage.get_item(key.as_str()) {
            Ok(value) => value,
            Err(e) => {
                warn!("localStorage read of `{key}` failed: {e:?}");
                None
            }
        }
    }

    fn set(&mut self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        self.storage
            .set_item(key.as_str(), value)
            .map_err(|e| SessionError::Write {
                key,
                message: format!("{e:?}"),
            })
    }

    fn remove(&mut self, key: SessionKey) -> Result<(), SessionError> {
        self.storage
            .remove_item(key.as_str())
            .map_err(|e| SessionError::Write {
                key,
                message: format!("{e:?}"),
            })
    }
}
