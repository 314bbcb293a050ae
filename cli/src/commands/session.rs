//! `logout` and `status`.

use anyhow::{Context as _, Result};
use roster_business::login::logout;
use roster_business::{SessionCredentials, SessionKey, SessionStore};
use serde_json::Value;
use tracing::instrument;

use crate::context::CliContext;
use crate::output::Output;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub signed_in: bool,
    pub company_id: Option<String>,
    /// Email, or first name, from the stored user payload.
    pub user: Option<String>,
    /// Set while a login is waiting for OTP verification.
    pub pending_otp_email: Option<String>,
}

pub fn summarize(store: &dyn SessionStore) -> SessionSummary {
    let user = store
        .get(SessionKey::User)
        .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        .and_then(|user| {
            ["email", "first_name"]
                .into_iter()
                .find_map(|field| user.get(field).and_then(Value::as_str).map(str::to_owned))
        });

    SessionSummary {
        signed_in: SessionCredentials::from_store(store).is_some(),
        company_id: store.get(SessionKey::CompanyId),
        user,
        pending_otp_email: store
            .get(SessionKey::TempUserId)
            .and(store.get(SessionKey::UserEmail)),
    }
}

#[instrument(skip_all, name = "logout")]
pub fn run_logout(ctx: &mut CliContext) -> Result<()> {
    logout(&mut ctx.session).context("Failed to clear the session")?;
    Output::new().success("Signed out");
    Ok(())
}

#[instrument(skip_all, name = "status")]
pub fn run_status(ctx: &CliContext) -> Result<()> {
    let out = Output::new();
    let summary = summarize(&ctx.session);

    if summary.signed_in {
        out.success("Signed in");
    } else {
        out.warning("Not signed in");
    }
    if let Some(user) = &summary.user {
        out.labeled("User", user);
    }
    if let Some(company) = &summary.company_id {
        out.labeled("Company", company);
    }
    if let Some(email) = &summary.pending_otp_email {
        out.labeled("Awaiting OTP for", email);
    }
    out.labeled("Session file", ctx.session.path().display());
    out.labeled("API", ctx.config.api_url());
    Ok(())
}

#[cfg(test)]
mod tests {
    use roster_business::session::MemorySessionStore;

    use super::*;

    #[test]
    fn test_summary_empty_store() {
        let summary = summarize(&MemorySessionStore::default());
        assert!(!summary.signed_in);
        assert_eq!(summary.company_id, None);
        assert_eq!(summary.user, None);
    }

    #[test]
    fn test_summary_signed_in() {
        let mut store = MemorySessionStore::default();
        store.set(SessionKey::Token, "t").expect("memory write");
        store.set(SessionKey::CompanyId, "5").expect("memory write");
        store
            .set(SessionKey::User, r#"{"id":1,"first_name":"Ann"}"#)
            .expect("memory write");

        let summary = summarize(&store);
        assert!(summary.signed_in);
        assert_eq!(summary.company_id.as_deref(), Some("5"));
        assert_eq!(summary.user.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_summary_token_without_company_is_signed_out() {
        let mut store = MemorySessionStore::default();
        store.set(SessionKey::Token, "t").expect("memory write");

        assert!(!summarize(&store).signed_in);
    }

    #[test]
    fn test_summary_pending_otp() {
        let mut store = MemorySessionStore::default();
        store.set(SessionKey::TempUserId, "7").expect("memory write");
        store.set(SessionKey::UserEmail, "a@x.com").expect("memory write");

        let summary = summarize(&store);
        assert!(!summary.signed_in);
        assert_eq!(summary.pending_otp_email.as_deref(), Some("a@x.com"));
    }
}
