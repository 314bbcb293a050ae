//! Branching on the body of a successful login call.

use log::debug;
use serde_json::{Map, Value};

use super::input::LoginErrors;
use crate::error::ApiError;
use crate::json::{field_is_truthy, id_to_string};
use crate::route::Route;
use crate::session::{SessionError, SessionKey, SessionStore};

pub const DEFAULT_LOGIN_ERROR: &str = "Invalid email or password. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected response from server";
pub const WELCOME_MESSAGE: &str = "Welcome to dashboard!";

/// Keys stripped from the body when it doubles as the user payload.
const CREDENTIAL_FIELDS: [&str; 4] = ["access_token", "refresh_token", "token_type", "expires_in"];

/// Session writes and destination decided by a login response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub writes: Vec<(SessionKey, String)>,
    pub route: Route,
}

impl LoginOutcome {
    /// Replaces whatever session was stored with these writes, in order,
    /// stopping at the first failure.
    pub fn apply(&self, store: &mut dyn SessionStore) -> Result<Route, SessionError> {
        store.clear()?;
        for (key, value) in &self.writes {
            store.set(*key, value)?;
        }
        Ok(self.route)
    }

    pub fn value(&self, key: SessionKey) -> Option<&str> {
        self.writes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Decides where a 2xx login body leads.
///
/// 1. `otp` or `expired` set: remember who is verifying and go to OTP verification.
/// 2. An access token: store tokens and user, then pick the company step.
/// 3. Anything else is reported as an unexpected response.
pub fn interpret_login_response(body: &Value) -> Result<LoginOutcome, LoginErrors> {
    if field_is_truthy(body, "otp") || field_is_truthy(body, "expired") {
        let mut writes = Vec::new();
        if let Some(user_id) = body.get("user_id").and_then(id_to_string) {
            writes.push((SessionKey::TempUserId, user_id));
        }
        if let Some(email) = body.get("email").and_then(Value::as_str) {
            writes.push((SessionKey::UserEmail, email.to_owned()));
        }
        debug!("Login requires OTP verification");
        return Ok(LoginOutcome {
            writes,
            route: Route::VerifyOtp,
        });
    }

    let Some(token) = body
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
    else {
        return Err(LoginErrors::general(UNEXPECTED_RESPONSE_MESSAGE));
    };

    let mut writes = vec![(SessionKey::Token, token.to_owned())];
    if let Some(refresh) = body.get("refresh_token").and_then(Value::as_str) {
        writes.push((SessionKey::RefreshToken, refresh.to_owned()));
    }
    writes.push((SessionKey::User, user_payload(body).to_string()));

    let companies = body
        .get("companies")
        .filter(|c| !c.is_null())
        .or_else(|| body.get("user").and_then(|u| u.get("companies")));

    let route = match companies {
        Some(Value::Array(list)) if list.len() > 1 => Route::SelectCompany,
        Some(Value::Array(list)) => {
            if let Some(id) = list.first().and_then(company_id) {
                writes.push((SessionKey::CompanyId, id));
            }
            Route::UserList
        }
        Some(company @ Value::Object(_)) => {
            if let Some(id) = company_id(company) {
                writes.push((SessionKey::CompanyId, id));
            }
            Route::UserList
        }
        _ => Route::UserList,
    };

    Ok(LoginOutcome { writes, route })
}

fn company_id(company: &Value) -> Option<String> {
    company
        .get("id")
        .or_else(|| company.get("company_id"))
        .and_then(id_to_string)
}

fn user_payload(body: &Value) -> Value {
    match body.get("user") {
        Some(user) if !user.is_null() => user.clone(),
        _ => {
            let mut user: Map<String, Value> = body.as_object().cloned().unwrap_or_default();
            for field in CREDENTIAL_FIELDS {
                user.remove(field);
            }
            Value::Object(user)
        }
    }
}

impl From<&ApiError> for LoginErrors {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Validation(fields) => Self::from_fields(fields),
            ApiError::Unauthorized { .. } | ApiError::Server { .. } => {
                Self::general(err.server_message().unwrap_or(DEFAULT_LOGIN_ERROR))
            }
            ApiError::Transport(_) => Self::general(NETWORK_ERROR_MESSAGE),
            ApiError::Decode(_) => Self::general(UNEXPECTED_RESPONSE_MESSAGE),
        }
    }
}
