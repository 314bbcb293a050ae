use serde::{Deserialize, Serialize};

use crate::json::{deserialize_flag, deserialize_id, deserialize_nullable_string};

pub type UserId = i64;

const NOT_AVAILABLE: &str = "N/A";
const NO_ROLE: &str = "No Role";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub title: Option<String>,
}

/// A user as returned by `GET /api/user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: UserId,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub email: String,
    #[serde(default)]
    pub initials: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub status: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl UserRecord {
    pub fn new(id: UserId, first_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: None,
            email: email.into(),
            initials: None,
            phone: None,
            role: None,
            status: false,
            title: None,
            profile_image_url: None,
        }
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    /// `"{first} {last}"`, or just the first name.
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref().filter(|l| !l.is_empty()) {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }

    pub fn initials_display(&self) -> &str {
        or_not_available(self.initials.as_deref())
    }

    pub fn phone_display(&self) -> &str {
        or_not_available(self.phone.as_deref())
    }

    pub fn title_display(&self) -> &str {
        or_not_available(self.title.as_deref())
    }

    pub fn role_display(&self) -> &str {
        self.role
            .as_ref()
            .and_then(|r| r.title.as_deref())
            .filter(|t| !t.is_empty())
            .unwrap_or(NO_ROLE)
    }

    pub fn status_label(&self) -> &'static str {
        if self.status { "Active" } else { "Inactive" }
    }
}

fn or_not_available(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

/// Body of `GET /api/user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListUsersResponse {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub status: bool,
    #[serde(default)]
    pub data: Option<Vec<UserRecord>>,
}

/// Body of the status and delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MutationResponse {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationResponse {
    pub fn confirmed() -> Self {
        Self {
            status: true,
            message: None,
        }
    }
}

/// Body of `POST /api/user/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateStatusRequest {
    pub status: u8,
}

impl UpdateStatusRequest {
    pub fn new(active: bool) -> Self {
        Self {
            status: u8::from(active),
        }
    }
}
