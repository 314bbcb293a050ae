//! Session storage.
//!
//! The login flow writes the session, the user list reads it, and a 401 or an explicit
//! logout clears it. Both flows receive a [`SessionStore`] instead of touching storage
//! directly, so the same code runs against browser `localStorage`, a JSON file, or memory.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::MemorySessionStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileSessionStore;
#[cfg(target_arch = "wasm32")]
pub use web::WebSessionStore;

use serde::{Deserialize, Serialize};

/// Every key the console persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKey {
    Token,
    RefreshToken,
    User,
    CompanyId,
    TempUserId,
    UserEmail,
}

impl SessionKey {
    pub const ALL: [Self; 6] = [
        Self::Token,
        Self::RefreshToken,
        Self::User,
        Self::CompanyId,
        Self::TempUserId,
        Self::UserEmail,
    ];

    /// Storage key name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::RefreshToken => "refresh_token",
            Self::User => "user",
            Self::CompanyId => "company_id",
            Self::TempUserId => "temp_user_id",
            Self::UserEmail => "user_email",
        }
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write `{key}`: {message}")]
    Write { key: SessionKey, message: String },
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Key-value session capability.
pub trait SessionStore {
    fn get(&self, key: SessionKey) -> Option<String>;

    fn set(&mut self, key: SessionKey, value: &str) -> Result<(), SessionError>;

    fn remove(&mut self, key: SessionKey) -> Result<(), SessionError>;

    /// Drops every session key.
    fn clear(&mut self) -> Result<(), SessionError> {
        for key in SessionKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// Token and tenant needed by every user-list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub token: String,
    pub company_id: String,
}

impl SessionCredentials {
    /// Returns `None` unless both the token and the company id are stored and non-empty.
    pub fn from_store(store: &dyn SessionStore) -> Option<Self> {
        let token = store.get(SessionKey::Token).filter(|t| !t.is_empty())?;
        let company_id = store.get(SessionKey::CompanyId).filter(|c| !c.is_empty())?;
        Some(Self { token, company_id })
    }
}
