//! User list screen state.
//!
//! Requests run outside this type. Front ends ask it what to send (`mount`,
//! `begin_load`, `toggle_target`, `begin_delete`), run the call through
//! [`UsersClient`](super::UsersClient), and feed the result back through the
//! matching `apply_*` method on the thread that owns the session store.
//!
//! Every `apply_*` returns `Some(Route::Login)` when the server answered 401; the
//! session has already been cleared at that point.

use chrono::{DateTime, Utc};
use log::{error, info, warn};

use super::message::{Message, TransientMessage};
use super::model::{ListUsersResponse, MutationResponse, UserId, UserRecord};
use super::view::{DerivedView, StatusFilter, ViewState, derive_view, filter_users, total_pages};
use crate::error::ApiError;
use crate::route::Route;
use crate::session::{SessionCredentials, SessionStore};

pub const STATUS_UPDATED_MESSAGE: &str = "Status updated successfully";
pub const USER_DELETED_MESSAGE: &str = "User deleted successfully";
pub const STATUS_UPDATE_FAILED_MESSAGE: &str = "Failed to update status";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete user";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load users";

#[derive(Debug, Clone, Default)]
pub struct UserListState {
    users: Vec<UserRecord>,
    view: ViewState,
    loading: bool,
    pending_delete: Option<UserRecord>,
    deleting: bool,
    message: TransientMessage,
    status_query: Option<bool>,
}

impl UserListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the session before the first load. Without a token and company id the
    /// screen must redirect to login.
    pub fn mount(&mut self, store: &dyn SessionStore) -> Result<SessionCredentials, Route> {
        match SessionCredentials::from_store(store) {
            Some(credentials) => {
                self.loading = true;
                Ok(credentials)
            }
            None => {
                warn!("No stored session, redirecting to login");
                self.loading = false;
                Err(Route::Login)
            }
        }
    }

    /// Starts a reload. Returns the server-side status query to send.
    pub fn begin_load(&mut self) -> Option<bool> {
        self.loading = true;
        self.status_query
    }

    /// Narrows the next load to active or inactive users on the server.
    pub fn set_status_query(&mut self, status: Option<bool>) {
        self.status_query = status;
    }

    pub fn apply_load(
        &mut self,
        result: Result<ListUsersResponse, ApiError>,
        store: &mut dyn SessionStore,
        now: DateTime<Utc>,
    ) -> Option<Route> {
        self.loading = false;

        match result {
            Ok(ListUsersResponse {
                status: true,
                data: Some(users),
            }) => {
                info!("Loaded {} users", users.len());
                self.users = users;
                self.clamp_page();
                None
            }
            Ok(_) => {
                warn!("User list response without data");
                None
            }
            Err(err) => self.handle_error(&err, LOAD_FAILED_MESSAGE, store, now),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn derived(&self) -> DerivedView<'_> {
        derive_view(&self.view, &self.users)
    }

    fn total_pages(&self) -> usize {
        total_pages(filter_users(&self.view, &self.users).len(), self.view.per_page())
    }

    fn clamp_page(&mut self) {
        let total = self.total_pages();
        self.view.clamp_to(total);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.set_search_term(term);
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.view.set_status_filter(filter);
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.view.go_to_page(page, total);
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        self.view.next_page(total);
    }

    pub fn prev_page(&mut self) {
        let total = self.total_pages();
        self.view.prev_page(total);
    }

    /// The status to send when toggling `id`: the inverse of its current status.
    pub fn toggle_target(&self, id: UserId) -> Option<bool> {
        self.users.iter().find(|u| u.id == id).map(|u| !u.status)
    }

    pub fn apply_status_toggle(
        &mut self,
        id: UserId,
        new_status: bool,
        result: Result<MutationResponse, ApiError>,
        store: &mut dyn SessionStore,
        now: DateTime<Utc>,
    ) -> Option<Route> {
        match result {
            Ok(response) if response.status => {
                if let Some(user) = self.users.iter_mut().find(|u| u.id == id) {
                    user.status = new_status;
                }
                info!("User {id} status set to {new_status}");
                self.message.success(STATUS_UPDATED_MESSAGE, now);
                self.clamp_page();
                None
            }
            Ok(response) => {
                warn!("Status update for user {id} not confirmed: {:?}", response.message);
                self.message.error(STATUS_UPDATE_FAILED_MESSAGE, now);
                None
            }
            Err(err) => self.handle_error(&err, STATUS_UPDATE_FAILED_MESSAGE, store, now),
        }
    }

    /// Opens the confirmation modal for `id`. Returns false for unknown ids.
    pub fn request_delete(&mut self, id: UserId) -> bool {
        if self.deleting {
            return false;
        }
        self.pending_delete = self.users.iter().find(|u| u.id == id).cloned();
        self.pending_delete.is_some()
    }

    pub fn pending_delete(&self) -> Option<&UserRecord> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        if !self.deleting {
            self.pending_delete = None;
        }
    }

    /// Confirms the modal. Returns the id to delete, or `None` when nothing is pending
    /// or a delete is already in flight.
    pub fn begin_delete(&mut self) -> Option<UserId> {
        if self.deleting {
            return None;
        }
        let id = self.pending_delete.as_ref()?.id;
        self.deleting = true;
        Some(id)
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Applies a delete result. The modal closes whatever the outcome.
    pub fn apply_delete(
        &mut self,
        id: UserId,
        result: Result<MutationResponse, ApiError>,
        store: &mut dyn SessionStore,
        now: DateTime<Utc>,
    ) -> Option<Route> {
        self.deleting = false;
        self.pending_delete = None;

        match result {
            Ok(response) if response.status => {
                self.users.retain(|u| u.id != id);
                info!("User {id} deleted");
                self.message.success(USER_DELETED_MESSAGE, now);
                self.clamp_page();
                None
            }
            Ok(response) => {
                warn!("Delete of user {id} not confirmed: {:?}", response.message);
                self.message.error(DELETE_FAILED_MESSAGE, now);
                None
            }
            Err(err) => self.handle_error(&err, DELETE_FAILED_MESSAGE, store, now),
        }
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.current()
    }

    pub fn message_timer(&self) -> &TransientMessage {
        &self.message
    }

    /// Expires the banner. Returns true when it was cleared.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        self.message.tick(now)
    }

    /// Leaving the screen cancels the banner timer and any open modal.
    pub fn unmount(&mut self) {
        self.message.cancel();
        self.pending_delete = None;
        self.deleting = false;
    }

    fn handle_error(
        &mut self,
        err: &ApiError,
        message: &str,
        store: &mut dyn SessionStore,
        now: DateTime<Utc>,
    ) -> Option<Route> {
        if err.is_unauthorized() {
            warn!("Session rejected by server, signing out");
            if let Err(e) = store.clear() {
                error!("Failed to clear session: {e}");
            }
            self.unmount();
            return Some(Route::Login);
        }

        error!("{message}: {err}");
        self.message.error(message, now);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionKey};
    use crate::users::MessageKind;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    fn signed_in() -> MemorySessionStore {
        let mut store = MemorySessionStore::default();
        store.set(SessionKey::Token, "t").expect("memory write");
        store.set(SessionKey::CompanyId, "5").expect("memory write");
        store
    }

    fn users(count: i64) -> Vec<UserRecord> {
        (1..=count)
            .map(|i| UserRecord::new(i, format!("User{i}"), format!("u{i}@x.com")).with_status(true))
            .collect()
    }

    fn loaded(count: i64) -> (UserListState, MemorySessionStore) {
        let mut store = signed_in();
        let mut state = UserListState::new();
        state.mount(&store).expect("credentials present");
        let route = state.apply_load(
            Ok(ListUsersResponse {
                status: true,
                data: Some(users(count)),
            }),
            &mut store,
            now(),
        );
        assert_eq!(route, None);
        (state, store)
    }

    fn unauthorized() -> ApiError {
        ApiError::Unauthorized { message: None }
    }

    #[test]
    fn test_mount_without_session_redirects() {
        let store = MemorySessionStore::default();
        let mut state = UserListState::new();
        assert_eq!(state.mount(&store), Err(Route::Login));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_load_populates_only_on_status_true() {
        let mut store = signed_in();
        let mut state = UserListState::new();
        state.mount(&store).expect("credentials present");
        assert!(state.is_loading());

        state.apply_load(
            Ok(ListUsersResponse {
                status: false,
                data: Some(users(3)),
            }),
            &mut store,
            now(),
        );
        assert!(!state.is_loading());
        assert!(state.users().is_empty());
    }

    #[test]
    fn test_load_failure_shows_message() {
        let mut store = signed_in();
        let mut state = UserListState::new();
        state.mount(&store).expect("credentials present");

        let route = state.apply_load(Err(ApiError::Transport("down".to_owned())), &mut store, now());

        assert_eq!(route, None);
        assert!(state.users().is_empty());
        let message = state.message().expect("message shown");
        assert_eq!(message.text, LOAD_FAILED_MESSAGE);
        assert_eq!(message.kind, MessageKind::Error);
    }

    #[test]
    fn test_load_401_clears_session() {
        let mut store = signed_in();
        store.set(SessionKey::User, "{}").expect("memory write");
        let mut state = UserListState::new();
        state.mount(&store).expect("credentials present");

        let route = state.apply_load(Err(unauthorized()), &mut store, now());

        assert_eq!(route, Some(Route::Login));
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_updates_only_that_record() {
        let (mut state, mut store) = loaded(3);
        let target = state.toggle_target(2).expect("user exists");
        assert!(!target);

        state.apply_status_toggle(2, target, Ok(MutationResponse::confirmed()), &mut store, now());

        let statuses: Vec<(i64, bool)> = state.users().iter().map(|u| (u.id, u.status)).collect();
        assert_eq!(statuses, vec![(1, true), (2, false), (3, true)]);
        assert_eq!(
            state.message().map(|m| m.text.as_str()),
            Some(STATUS_UPDATED_MESSAGE)
        );
    }

    #[test]
    fn test_toggle_failure_leaves_state() {
        let (mut state, mut store) = loaded(2);
        let before = state.users().to_vec();

        state.apply_status_toggle(
            1,
            false,
            Err(ApiError::Server {
                status: 500,
                message: None,
            }),
            &mut store,
            now(),
        );

        assert_eq!(state.users(), before.as_slice());
        assert_eq!(
            state.message().map(|m| m.text.as_str()),
            Some(STATUS_UPDATE_FAILED_MESSAGE)
        );
    }

    #[test]
    fn test_toggle_under_filter_clamps_page() {
        let (mut state, mut store) = loaded(11);
        state.set_status_filter(StatusFilter::Active);
        state.go_to_page(2);
        assert_eq!(state.view().current_page(), 2);

        state.apply_status_toggle(11, false, Ok(MutationResponse::confirmed()), &mut store, now());

        assert_eq!(state.view().current_page(), 1);
        assert_eq!(state.derived().items.len(), 10);
    }

    #[test]
    fn test_delete_removes_one_record_and_closes_modal() {
        let (mut state, mut store) = loaded(3);
        assert!(state.request_delete(2));
        assert_eq!(state.pending_delete().map(|u| u.id), Some(2));

        let id = state.begin_delete().expect("pending delete");
        assert!(state.is_deleting());
        assert_eq!(state.begin_delete(), None);

        state.apply_delete(id, Ok(MutationResponse::confirmed()), &mut store, now());

        let ids: Vec<i64> = state.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(state.pending_delete().is_none());
        assert!(!state.is_deleting());
        assert_eq!(
            state.message().map(|m| m.text.as_str()),
            Some(USER_DELETED_MESSAGE)
        );
    }

    #[test]
    fn test_failed_delete_still_closes_modal() {
        let (mut state, mut store) = loaded(3);
        state.request_delete(1);
        let id = state.begin_delete().expect("pending delete");

        state.apply_delete(id, Err(ApiError::Transport("down".to_owned())), &mut store, now());

        assert_eq!(state.users().len(), 3);
        assert!(state.pending_delete().is_none());
        assert_eq!(
            state.message().map(|m| m.text.as_str()),
            Some(DELETE_FAILED_MESSAGE)
        );
    }

    #[test]
    fn test_delete_last_row_of_last_page_clamps() {
        let (mut state, mut store) = loaded(11);
        state.go_to_page(2);
        state.request_delete(11);
        let id = state.begin_delete().expect("pending delete");

        state.apply_delete(id, Ok(MutationResponse::confirmed()), &mut store, now());

        assert_eq!(state.view().current_page(), 1);
        assert_eq!(state.derived().items.len(), 10);
    }

    #[test]
    fn test_cancel_delete() {
        let (mut state, _) = loaded(2);
        state.request_delete(1);
        state.cancel_delete();
        assert!(state.pending_delete().is_none());
        assert!(!state.request_delete(99));
    }

    #[test]
    fn test_delete_401_redirects() {
        let (mut state, mut store) = loaded(2);
        state.request_delete(1);
        let id = state.begin_delete().expect("pending delete");

        let route = state.apply_delete(id, Err(unauthorized()), &mut store, now());

        assert_eq!(route, Some(Route::Login));
        assert!(store.get(SessionKey::Token).is_none());
    }

    #[test]
    fn test_unmount_cancels_message() {
        let (mut state, mut store) = loaded(1);
        state.apply_status_toggle(1, false, Ok(MutationResponse::confirmed()), &mut store, now());
        assert!(state.message().is_some());

        state.unmount();
        assert!(state.message().is_none());
    }

    #[test]
    fn test_message_expires_on_tick() {
        let (mut state, mut store) = loaded(1);
        state.apply_status_toggle(1, false, Ok(MutationResponse::confirmed()), &mut store, now());

        assert!(!state.tick(now() + chrono::TimeDelta::seconds(2)));
        assert!(state.tick(now() + chrono::TimeDelta::seconds(3)));
        assert!(state.message().is_none());
    }

    #[test]
    fn test_refresh_uses_status_query() {
        let (mut state, _) = loaded(1);
        assert_eq!(state.begin_load(), None);
        state.set_status_query(Some(false));
        assert_eq!(state.begin_load(), Some(false));
        assert!(state.is_loading());
    }
}
