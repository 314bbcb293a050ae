//! Login command implementation.

use anyhow::{Context as _, Result, bail};
use inquire::{Password, Text};
use roster_business::login::{LoginErrors, LoginInput, WELCOME_MESSAGE, login};
use roster_business::{BusinessConfig, Route, SessionKey, SessionStore};
use tracing::{error, info, instrument};

use crate::context::CliContext;
use crate::output::Output;

#[instrument(skip_all, name = "login")]
pub async fn run_login(
    ctx: &mut CliContext,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let out = Output::new();

    out.header("Sign in to your Account");
    out.newline();

    let email = match email {
        Some(email) => email,
        None => Text::new("Email:")
            .with_help_message("The address you sign in with")
            .prompt()
            .context("Failed to read email")?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new("Password:")
            .without_confirmation()
            .prompt()
            .context("Failed to read password")?,
    };

    let input = LoginInput::new(email, password);
    let route = match sign_in(&ctx.config, &input, &mut ctx.session).await {
        Ok(route) => route,
        Err(errors) => {
            out.newline();
            for message in error_lines(&errors) {
                out.error(message);
            }
            bail!("Login failed");
        }
    };

    out.newline();
    match route {
        Route::UserList => {
            out.success(WELCOME_MESSAGE);
            out.dim("Run `roster-cli users list` to see your users.");
        }
        Route::VerifyOtp => {
            let email = ctx.session.get(SessionKey::UserEmail).unwrap_or(input.email);
            out.warning(format!(
                "A one-time code was sent to {email}. Finish verification in the web console."
            ));
        }
        Route::SelectCompany => {
            out.warning("Your account belongs to several companies. Pick one in the web console.");
        }
        other => out.info(format!("Continue at {}", other.path())),
    }
    Ok(())
}

/// Validates, authenticates and persists the session.
pub async fn sign_in(
    config: &BusinessConfig,
    input: &LoginInput,
    store: &mut dyn SessionStore,
) -> Result<Route, LoginErrors> {
    info!(email = %input.email, "Signing in");
    let result = login(config, input, store).await;
    match &result {
        Ok(route) => info!(route = %route.path(), "Signed in"),
        Err(errors) => error!(?errors, "Sign in rejected"),
    }
    result
}

/// Field errors first, then the general message.
fn error_lines(errors: &LoginErrors) -> Vec<String> {
    [
        errors.email.as_ref().map(|m| format!("Email: {m}")),
        errors.password.as_ref().map(|m| format!("Password: {m}")),
        errors.general.clone(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
