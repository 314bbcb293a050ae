use std::collections::BTreeMap;

use serde::Deserialize;

use crate::http::{HttpError, Response};

/// First validation message per field, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Error returned by every API call in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401. For authenticated calls this means the session is gone.
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },

    /// Non-2xx with a field → messages map.
    #[error("validation failed ({} field(s))", .0.len())]
    Validation(FieldErrors),

    /// Any other non-2xx response.
    #[error("server error (status {status})")]
    Server { status: u16, message: Option<String> },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be read.
    #[error("failed to parse response: {0}")]
    Decode(String),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

impl ApiError {
    /// Classifies a non-2xx response.
    pub fn from_response(response: &Response) -> Self {
        let body = response.json::<ErrorBody>().unwrap_or_default();

        let fields: FieldErrors = body
            .errors
            .into_iter()
            .filter_map(|(field, messages)| messages.into_iter().next().map(|m| (field, m)))
            .collect();

        let message = body.message.filter(|m| !m.trim().is_empty());

        if response.status == 401 {
            Self::Unauthorized { message }
        } else if !fields.is_empty() {
            Self::Validation(fields)
        } else {
            Self::Server {
                status: response.status,
                message,
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        Self::Transport(err.message)
    }
}
