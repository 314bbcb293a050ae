use log::{error, info, warn};
use serde_json::Value;

use super::api::{LoginRequest, resolve_public_ip, submit_login};
use super::input::{LoginErrors, LoginInput};
use super::outcome::interpret_login_response;
use crate::BusinessConfig;
use crate::error::ApiError;
use crate::route::Route;
use crate::session::{SessionError, SessionStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginPhase {
    #[default]
    Editing,
    Submitting,
}

/// Login screen state shared by every front end.
///
/// The network call itself runs elsewhere: front ends take the input from
/// [`LoginForm::begin_submit`], run [`authenticate`], and hand the result to
/// [`LoginForm::finish_submit`] on the thread that owns the session store.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub input: LoginInput,
    pub errors: LoginErrors,
    phase: LoginPhase,
}

impl LoginForm {
    pub fn phase(&self) -> LoginPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == LoginPhase::Submitting
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.input.is_valid()
    }

    /// Validates and enters `Submitting`. Returns the credentials to send, or `None`
    /// when validation failed or a submit is already running.
    pub fn begin_submit(&mut self) -> Option<LoginInput> {
        if self.is_submitting() {
            return None;
        }

        let errors = self.input.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }

        self.errors.clear();
        self.phase = LoginPhase::Submitting;
        Some(self.input.clone())
    }

    /// Applies the result of [`authenticate`]. Returns the route to navigate to on success.
    pub fn finish_submit(
        &mut self,
        result: Result<Value, ApiError>,
        store: &mut dyn SessionStore,
    ) -> Option<Route> {
        self.phase = LoginPhase::Editing;

        match complete_login(result, store) {
            Ok(route) => {
                self.input.clear();
                self.errors.clear();
                Some(route)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

/// Resolves the caller's IP and posts the credentials.
pub async fn authenticate(config: &BusinessConfig, input: &LoginInput) -> Result<Value, ApiError> {
    let ip_address = resolve_public_ip(config).await;
    let request = LoginRequest {
        email: input.email.trim().to_owned(),
        password: input.password.clone(),
        ip_address: Some(ip_address),
    };

    info!("Signing in as {}", request.email);
    submit_login(config, &request).await
}

/// Validate, authenticate and persist in one call. Used where no form state is kept.
pub async fn login(
    config: &BusinessConfig,
    input: &LoginInput,
    store: &mut dyn SessionStore,
) -> Result<Route, LoginErrors> {
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(errors);
    }

    let result = authenticate(config, input).await;
    complete_login(result, store)
}

/// Clears every persisted session key.
pub fn logout(store: &mut dyn SessionStore) -> Result<(), SessionError> {
    store.clear()?;
    info!("Session cleared");
    Ok(())
}

fn complete_login(
    result: Result<Value, ApiError>,
    store: &mut dyn SessionStore,
) -> Result<Route, LoginErrors> {
    let body = result.map_err(|err| {
        warn!("Login failed: {err}");
        LoginErrors::from(&err)
    })?;

    let outcome = interpret_login_response(&body)?;
    let route = outcome.apply(store).map_err(|e| {
        error!("Failed to persist session: {e}");
        LoginErrors::general(format!("Could not save session: {e}"))
    })?;

    info!("Login succeeded, continuing to {}", route.path());
    Ok(route)
}
