use std::collections::BTreeMap;

use super::{SessionError, SessionKey, SessionStore};

/// In-process store. Used by tests and by front ends that must not persist anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySessionStore {
    values: BTreeMap<SessionKey, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        self.values.insert(key, value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: SessionKey) -> Result<(), SessionError> {
        self.values.remove(&key);
        Ok(())
    }
}
