//! User list flow against a mock API server.

use chrono::Utc;
use roster_business::session::MemorySessionStore;
use roster_business::users::{
    DELETE_FAILED_MESSAGE, StatusFilter, USER_DELETED_MESSAGE, UserListState, UsersClient,
};
use roster_business::{ApiError, BusinessConfig, Route, SessionKey, SessionStore};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signed_in() -> MemorySessionStore {
    let mut store = MemorySessionStore::default();
    store.set(SessionKey::Token, "t").expect("memory write");
    store.set(SessionKey::CompanyId, "5").expect("memory write");
    store.set(SessionKey::User, r#"{"id":1}"#).expect("memory write");
    store
}

fn user(id: i64, first: &str, status: Value) -> Value {
    json!({
        "id": id,
        "first_name": first,
        "last_name": null,
        "email": format!("{}@x.com", first.to_lowercase()),
        "status": status,
        "role": { "title": "Manager" }
    })
}

async fn mount_users(server: &MockServer, users: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .and(header("accept", "application/json"))
        .and(header("authorization", "Bearer t"))
        .and(header("company_id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": users
        })))
        .mount(server)
        .await;
}

async fn mounted(
    server: &MockServer,
    store: &mut MemorySessionStore,
) -> (UserListState, UsersClient) {
    let mut state = UserListState::new();
    let credentials = state.mount(&*store).expect("credentials stored");
    let client = UsersClient::new(&BusinessConfig::new(server.uri()), credentials);

    let result = client.list(state.begin_load()).await;
    let route = state.apply_load(result, store, Utc::now());
    assert_eq!(route, None);
    (state, client)
}

#[tokio::test]
async fn test_load_and_filter() {
    let server = MockServer::start().await;
    mount_users(
        &server,
        vec![user(1, "Ann", json!(true)), user(2, "Bob", json!(0))],
    )
    .await;

    let mut store = signed_in();
    let (mut state, _) = mounted(&server, &mut store).await;

    assert_eq!(state.users().len(), 2);
    assert!(!state.is_loading());

    state.set_search_term("bo");
    let names: Vec<&str> = state
        .derived()
        .items
        .iter()
        .map(|u| u.first_name.as_str())
        .collect();
    assert_eq!(names, vec!["Bob"]);

    state.set_search_term("");
    state.set_status_filter(StatusFilter::Active);
    let names: Vec<&str> = state
        .derived()
        .items
        .iter()
        .map(|u| u.first_name.as_str())
        .collect();
    assert_eq!(names, vec!["Ann"]);
}

#[tokio::test]
async fn test_status_query_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .and(query_param("status", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": [user(2, "Bob", json!(false))]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = signed_in();
    let mut state = UserListState::new();
    let credentials = state.mount(&store).expect("credentials stored");
    let client = UsersClient::new(&BusinessConfig::new(server.uri()), credentials);

    state.set_status_query(Some(false));
    let result = client.list(state.begin_load()).await;
    state.apply_load(result, &mut store, Utc::now());

    assert_eq!(state.users().len(), 1);
}

#[tokio::test]
async fn test_unauthorized_load_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthenticated." })))
        .mount(&server)
        .await;

    let mut store = signed_in();
    let mut state = UserListState::new();
    let credentials = state.mount(&store).expect("credentials stored");
    let client = UsersClient::new(&BusinessConfig::new(server.uri()), credentials);

    let result = client.list(None).await;
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));

    let route = state.apply_load(result, &mut store, Utc::now());
    assert_eq!(route, Some(Route::Login));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_toggle_posts_inverted_status() {
    let server = MockServer::start().await;
    mount_users(
        &server,
        vec![user(1, "Ann", json!(true)), user(2, "Bob", json!(false))],
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/api/user/1/status"))
        .and(header("authorization", "Bearer t"))
        .and(body_json(json!({ "status": 0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = signed_in();
    let (mut state, client) = mounted(&server, &mut store).await;

    let new_status = state.toggle_target(1).expect("user 1 loaded");
    let result = client.update_status(1, new_status).await;
    state.apply_status_toggle(1, new_status, result, &mut store, Utc::now());

    let statuses: Vec<bool> = state.users().iter().map(|u| u.status).collect();
    assert_eq!(statuses, vec![false, false]);
}

#[tokio::test]
async fn test_delete_removes_user() {
    let server = MockServer::start().await;
    mount_users(
        &server,
        vec![user(1, "Ann", json!(true)), user(2, "Bob", json!(false))],
    )
    .await;

    Mock::given(method("DELETE"))
        .and(path("/api/user/2"))
        .and(header("company_id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = signed_in();
    let (mut state, client) = mounted(&server, &mut store).await;

    assert!(state.request_delete(2));
    let id = state.begin_delete().expect("delete pending");
    let result = client.delete(id).await;
    state.apply_delete(id, result, &mut store, Utc::now());

    let ids: Vec<i64> = state.users().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1]);
    assert!(state.pending_delete().is_none());
    assert_eq!(
        state.message().map(|m| m.text.as_str()),
        Some(USER_DELETED_MESSAGE)
    );
}

#[tokio::test]
async fn test_failed_delete_closes_modal() {
    let server = MockServer::start().await;
    mount_users(&server, vec![user(1, "Ann", json!(true))]).await;

    Mock::given(method("DELETE"))
        .and(path("/api/user/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let mut store = signed_in();
    let (mut state, client) = mounted(&server, &mut store).await;

    state.request_delete(1);
    let id = state.begin_delete().expect("delete pending");
    let result = client.delete(id).await;
    let route = state.apply_delete(id, result, &mut store, Utc::now());

    assert_eq!(route, None);
    assert_eq!(state.users().len(), 1);
    assert!(state.pending_delete().is_none());
    assert_eq!(
        state.message().map(|m| m.text.as_str()),
        Some(DELETE_FAILED_MESSAGE)
    );
    assert!(store.get(SessionKey::Token).is_some());
}
