use kittest::Queryable;
use roster_business::{Route, SessionKey};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{TestCtx, mount_user_list, step_until, user};

mod common;

/// Tests that the signed-out app opens on the login form.
#[tokio::test]
async fn test_login_form_displayed() {
    let server = MockServer::start().await;
    let mut ctx = TestCtx::new_app(server, |_| {});

    let harness = ctx.harness_mut();
    harness.step();

    assert!(
        harness
            .query_by_label_contains("Sign in to your Account")
            .is_some(),
        "Heading should be displayed"
    );
    assert!(
        harness.query_by_label("Sign In").is_some(),
        "Sign In button should be displayed"
    );
    assert!(
        harness.query_by_label("Logout").is_none(),
        "Logout should only appear on the user list"
    );
    assert_eq!(harness.state().state().route(), Route::Login);
}

/// Tests that a successful login stores the session and opens the user list.
#[tokio::test]
async fn test_login_success_opens_user_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_partial_json(json!({
            "email": "admin@example.com",
            "password": "secret1",
            "ip_address": "127.0.0.1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "refresh_token": "ref",
            "user": { "id": 1, "first_name": "Admin" },
            "companies": [{ "id": 5 }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_user_list(&server, vec![user(1, "Alice", true)]).await;

    let mut ctx = TestCtx::new_app(server, |state| {
        state.login.form.input.email = "admin@example.com".to_owned();
        state.login.form.input.password = "secret1".to_owned();
    });

    let harness = ctx.harness_mut();
    harness.step();
    harness.get_by_label("Sign In").click();

    let shown = step_until(harness, |h| h.query_by_label("Alice").is_some()).await;
    assert!(shown, "User list should load after login");

    let state = harness.state().state();
    assert_eq!(state.route(), Route::UserList);
    assert_eq!(state.session.get(SessionKey::Token).as_deref(), Some("tok"));
    assert_eq!(state.session.get(SessionKey::CompanyId).as_deref(), Some("5"));
    assert!(
        harness.query_by_label("Logout").is_some(),
        "Logout should be offered once signed in"
    );
}

/// Tests that rejected credentials keep the user on the form with the server message.
#[tokio::test]
async fn test_login_rejected_shows_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let mut ctx = TestCtx::new_app(server, |state| {
        state.login.form.input.email = "admin@example.com".to_owned();
        state.login.form.input.password = "wrongpass".to_owned();
    });

    let harness = ctx.harness_mut();
    harness.step();
    harness.get_by_label("Sign In").click();

    let shown = step_until(harness, |h| {
        h.query_by_label_contains("Invalid credentials").is_some()
    })
    .await;
    assert!(shown, "Server message should be displayed");

    let state = harness.state().state();
    assert_eq!(state.route(), Route::Login);
    assert!(!state.login.form.is_submitting());
    assert_eq!(state.session.get(SessionKey::Token), None);
}

/// Tests that an OTP challenge routes away from the login form.
#[tokio::test]
async fn test_login_otp_challenge() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "otp": true,
            "user_id": 9,
            "email": "admin@example.com"
        })))
        .mount(&server)
        .await;

    let mut ctx = TestCtx::new_app(server, |state| {
        state.login.form.input.email = "admin@example.com".to_owned();
        state.login.form.input.password = "secret1".to_owned();
    });

    let harness = ctx.harness_mut();
    harness.step();
    harness.get_by_label("Sign In").click();

    let routed = step_until(harness, |h| h.state().state().route() == Route::VerifyOtp).await;
    assert!(routed, "OTP challenge should open the verification screen");
    assert_eq!(
        harness
            .state()
            .state()
            .session
            .get(SessionKey::TempUserId)
            .as_deref(),
        Some("9")
    );
}

/// Tests that logging out from the user list clears the session.
#[tokio::test]
async fn test_logout_returns_to_login() {
    let server = MockServer::start().await;
    mount_user_list(&server, vec![user(1, "Alice", true)]).await;

    let mut ctx = TestCtx::new_app(server, |state| {
        for (key, value) in [(SessionKey::Token, "t"), (SessionKey::CompanyId, "5")] {
            state.session.set(key, value).expect("memory write");
        }
        state.navigate(Route::UserList);
    });

    let harness = ctx.harness_mut();
    let shown = step_until(harness, |h| h.query_by_label("Alice").is_some()).await;
    assert!(shown, "User list should load for a stored session");

    harness.get_by_label("Logout").click();
    harness.step();
    harness.step();

    let state = harness.state().state();
    assert_eq!(state.route(), Route::Login);
    assert_eq!(state.session.get(SessionKey::Token), None);
    assert!(
        harness.query_by_label("Sign In").is_some(),
        "Login form should be shown after logout"
    );
}
