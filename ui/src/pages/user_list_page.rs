//! User list page.
//!
//! Loads users on the first frame, renders the derived view every frame, and
//! runs status toggles and deletes in the background.

use chrono::{DateTime, Utc};
use egui::{Button, Response, Ui};
use flume::{Receiver, Sender};
use log::warn;
use roster_business::users::{
    ListUsersResponse, MutationResponse, UserId, UserListState, UsersClient,
};
use roster_business::{ApiError, BusinessConfig, Route, SessionStore};

use crate::state::State;
use crate::tasks;
use crate::widgets::{self, DeleteModalAction, PageNav, RowAction};

enum UsersEvent {
    Loaded(Result<ListUsersResponse, ApiError>),
    StatusUpdated {
        id: UserId,
        active: bool,
        result: Result<MutationResponse, ApiError>,
    },
    Deleted {
        id: UserId,
        result: Result<MutationResponse, ApiError>,
    },
}

enum PageAction {
    Navigate(Route),
    Refresh,
    Row(RowAction),
    Modal(DeleteModalAction),
    Page(PageNav),
}

pub struct UserListPage {
    pub list: UserListState,
    client: Option<UsersClient>,
    mounted: bool,
    sender: Sender<UsersEvent>,
    receiver: Receiver<UsersEvent>,
}

impl Default for UserListPage {
    fn default() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            list: UserListState::new(),
            client: None,
            mounted: false,
            sender,
            receiver,
        }
    }
}

fn deliver(sender: &Sender<UsersEvent>, event: UsersEvent, ctx: &egui::Context) {
    if sender.send(event).is_err() {
        warn!("User list closed before the response arrived");
    }
    ctx.request_repaint();
}

impl UserListPage {
    /// Checks the session and starts the first load. Returns a redirect when signed out.
    pub fn mount(
        &mut self,
        config: &BusinessConfig,
        session: &dyn SessionStore,
        ctx: &egui::Context,
    ) -> Option<Route> {
        self.mounted = true;
        match self.list.mount(session) {
            Ok(credentials) => {
                self.client = Some(UsersClient::new(config, credentials));
                self.load(ctx);
                None
            }
            Err(route) => Some(route),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn load(&mut self, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let status = self.list.begin_load();
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        tasks::spawn(async move {
            let result = client.list(status).await;
            deliver(&sender, UsersEvent::Loaded(result), &ctx);
        });
    }

    fn toggle(&mut self, id: UserId, ctx: &egui::Context) {
        let (Some(client), Some(active)) = (self.client.clone(), self.list.toggle_target(id))
        else {
            return;
        };
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        tasks::spawn(async move {
            let result = client.update_status(id, active).await;
            deliver(
                &sender,
                UsersEvent::StatusUpdated { id, active, result },
                &ctx,
            );
        });
    }

    fn confirm_delete(&mut self, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let Some(id) = self.list.begin_delete() else {
            return;
        };
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        tasks::spawn(async move {
            let result = client.delete(id).await;
            deliver(&sender, UsersEvent::Deleted { id, result }, &ctx);
        });
    }

    /// Applies finished requests. Stops at the first redirect.
    pub fn poll(&mut self, session: &mut dyn SessionStore, now: DateTime<Utc>) -> Option<Route> {
        while let Ok(event) = self.receiver.try_recv() {
            let redirect = match event {
                UsersEvent::Loaded(result) => self.list.apply_load(result, session, now),
                UsersEvent::StatusUpdated { id, active, result } => self
                    .list
                    .apply_status_toggle(id, active, result, session, now),
                UsersEvent::Deleted { id, result } => {
                    self.list.apply_delete(id, result, session, now)
                }
            };
            if redirect.is_some() {
                return redirect;
            }
        }
        None
    }

    pub fn unmount(&mut self) {
        self.list.unmount();
    }
}

pub fn user_list_page(state: &mut State, ui: &mut Ui) -> Response {
    let now = Utc::now();

    let Some(page) = state.users.as_mut() else {
        state.navigate(Route::UserList);
        return ui.spinner();
    };

    let mut redirect = None;
    if !page.is_mounted() {
        redirect = page.mount(&state.config, &*state.session, ui.ctx());
    }
    if redirect.is_none() {
        redirect = page.poll(&mut *state.session, now);
    }
    if let Some(route) = redirect {
        state.navigate(route);
        ui.ctx().request_repaint();
        return ui.label("Redirecting...");
    }

    page.list.tick(now);
    if let Some(remaining) = page.list.message_timer().remaining(now) {
        ui.ctx().request_repaint_after(remaining);
    }

    if page.list.is_loading() && page.list.users().is_empty() {
        return ui
            .vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.spinner();
                ui.label("Loading users...");
            })
            .response;
    }

    let mut action = None;

    let response = ui
        .vertical(|ui| {
            ui.horizontal(|ui| {
                ui.heading("Users");
                ui.add_space(16.0);
                if ui.button("+ Add User").clicked() {
                    action = Some(PageAction::Navigate(Route::AddUser));
                }
                if ui
                    .add_enabled(!page.list.is_loading(), Button::new("🔄 Refresh"))
                    .clicked()
                {
                    action = Some(PageAction::Refresh);
                }
                if page.list.is_loading() {
                    ui.spinner();
                }
            });
            ui.add_space(8.0);

            if let Some(message) = page.list.message() {
                widgets::message_banner(ui, message);
                ui.add_space(8.0);
            }

            let mut search = page.list.view().search_term().to_owned();
            let mut filter = page.list.view().status_filter();
            widgets::filters(ui, &mut search, &mut filter);
            if search != page.list.view().search_term() {
                page.list.set_search_term(search);
            }
            if filter != page.list.view().status_filter() {
                page.list.set_status_filter(filter);
            }
            ui.add_space(8.0);

            let view = page.list.derived();
            if let Some(row) = widgets::users_table(ui, &view) {
                action = Some(PageAction::Row(row));
            }
            ui.add_space(8.0);
            if let Some(nav) = widgets::pagination(ui, &view) {
                action = Some(PageAction::Page(nav));
            }
        })
        .response;

    if let Some(user) = page.list.pending_delete()
        && let Some(modal) = widgets::delete_modal(ui.ctx(), user, page.list.is_deleting())
    {
        action = Some(PageAction::Modal(modal));
    }

    match action {
        Some(PageAction::Navigate(route)) => state.navigate(route),
        Some(PageAction::Row(RowAction::Edit(id))) => state.navigate(Route::EditUser(id)),
        Some(PageAction::Refresh) => page.load(ui.ctx()),
        Some(PageAction::Row(RowAction::Toggle(id))) => page.toggle(id, ui.ctx()),
        Some(PageAction::Row(RowAction::Delete(id))) => {
            page.list.request_delete(id);
        }
        Some(PageAction::Modal(DeleteModalAction::Confirm)) => page.confirm_delete(ui.ctx()),
        Some(PageAction::Modal(DeleteModalAction::Cancel)) => page.list.cancel_delete(),
        Some(PageAction::Page(PageNav::Previous)) => page.list.prev_page(),
        Some(PageAction::Page(PageNav::Next)) => page.list.next_page(),
        Some(PageAction::Page(PageNav::Go(n))) => page.list.go_to_page(n),
        None => {}
    }

    response
}
