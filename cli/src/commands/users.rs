//! `users list`, `users toggle` and `users delete`.
//!
//! Each run loads the full list first, the same way the console screen does, so
//! search, status filter and paging behave identically in both front ends.

use anyhow::{Context as _, Result, bail};
use chrono::Utc;
use inquire::Confirm;
use roster_business::users::{
    MessageKind, StatusFilter, UserId, UserListState, UserRecord, UsersClient,
};
use roster_business::{BusinessConfig, SessionStore};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::{info, instrument};

use super::{NOT_SIGNED_IN, SESSION_EXPIRED};
use crate::cli::UsersCommand;
use crate::context::CliContext;
use crate::output::Output;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub search: Option<String>,
    pub status: StatusFilter,
    pub page: usize,
    /// Send the status filter as `?status=` instead of filtering locally.
    pub server_filter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(UserRecord),
    Cancelled,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "S.No")]
    serial: usize,
    #[tabled(rename = "ID")]
    id: UserId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Initials")]
    initials: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Title")]
    title: String,
}

pub async fn run_users(ctx: &mut CliContext, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List {
            search,
            status,
            page,
            server_filter,
        } => {
            let options = ListOptions {
                search,
                status,
                page,
                server_filter,
            };
            run_list(ctx, &options).await
        }
        UsersCommand::Toggle { id } => run_toggle(ctx, id).await,
        UsersCommand::Delete { id, yes } => run_delete(ctx, id, yes).await,
    }
}

#[instrument(skip_all, name = "users_list", fields(page = options.page, status = options.status.as_str()))]
async fn run_list(ctx: &mut CliContext, options: &ListOptions) -> Result<()> {
    let out = Output::new();
    let list = list_users(&ctx.config, &mut ctx.session, options).await?;
    let view = list.derived();

    out.header("Users");
    if view.is_empty() {
        out.dim("No users found");
        return Ok(());
    }

    let rows: Vec<UserRow> = view
        .items
        .iter()
        .enumerate()
        .map(|(offset, user)| UserRow {
            serial: view.first_index + offset + 1,
            id: user.id,
            name: user.full_name(),
            email: user.email.clone(),
            initials: user.initials_display().to_owned(),
            phone: user.phone_display().to_owned(),
            role: user.role_display().to_owned(),
            status: user.status_label(),
            title: user.title_display().to_owned(),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    out.print(table.to_string());
    out.page_summary(view.current_page, view.total_pages, view.filtered_count);
    Ok(())
}

#[instrument(skip_all, name = "users_toggle", fields(id = id))]
async fn run_toggle(ctx: &mut CliContext, id: UserId) -> Result<()> {
    let user = toggle_user(&ctx.config, &mut ctx.session, id).await?;
    Output::new().success(format!(
        "{} is now {}",
        user.full_name(),
        user.status_label()
    ));
    Ok(())
}

#[instrument(skip_all, name = "users_delete", fields(id = id))]
async fn run_delete(ctx: &mut CliContext, id: UserId, yes: bool) -> Result<()> {
    let out = Output::new();
    let outcome = delete_user(&ctx.config, &mut ctx.session, id, |user| {
        if yes {
            return Ok(true);
        }
        Confirm::new(&format!(
            "Are you sure you want to delete user {}? This action cannot be undone.",
            user.full_name()
        ))
        .with_default(false)
        .prompt()
        .context("Failed to read confirmation")
    })
    .await?;

    match outcome {
        DeleteOutcome::Deleted(user) => out.success(format!("Deleted {}", user.full_name())),
        DeleteOutcome::Cancelled => out.dim("Cancelled"),
    }
    Ok(())
}

/// Loads every user with the stored credentials.
async fn load(
    config: &BusinessConfig,
    store: &mut dyn SessionStore,
    status_query: Option<bool>,
) -> Result<(UserListState, UsersClient)> {
    let mut list = UserListState::new();
    let Ok(credentials) = list.mount(&*store) else {
        bail!(NOT_SIGNED_IN);
    };
    let client = UsersClient::new(config, credentials);

    list.set_status_query(status_query);
    let result = client.list(list.begin_load()).await;
    if list.apply_load(result, store, Utc::now()).is_some() {
        bail!(SESSION_EXPIRED);
    }
    fail_on_error(&list)?;

    info!(count = list.users().len(), "Users loaded");
    Ok((list, client))
}

fn fail_on_error(list: &UserListState) -> Result<()> {
    match list.message() {
        Some(message) if message.kind == MessageKind::Error => bail!("{}", message.text),
        _ => Ok(()),
    }
}

/// Loads the list and applies search, status filter and page.
pub async fn list_users(
    config: &BusinessConfig,
    store: &mut dyn SessionStore,
    options: &ListOptions,
) -> Result<UserListState> {
    let status_query = options.server_filter.then(|| options.status.as_query()).flatten();
    let (mut list, _) = load(config, store, status_query).await?;

    if let Some(search) = &options.search {
        list.set_search_term(search.as_str());
    }
    list.set_status_filter(options.status);
    list.go_to_page(options.page);
    Ok(list)
}

/// Flips the status of `id`. Returns the record as it is now.
pub async fn toggle_user(
    config: &BusinessConfig,
    store: &mut dyn SessionStore,
    id: UserId,
) -> Result<UserRecord> {
    let (mut list, client) = load(config, store, None).await?;
    let active = list
        .toggle_target(id)
        .with_context(|| format!("No user with id {id}"))?;

    let result = client.update_status(id, active).await;
    if list.apply_status_toggle(id, active, result, store, Utc::now()).is_some() {
        bail!(SESSION_EXPIRED);
    }
    fail_on_error(&list)?;

    list.users()
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .with_context(|| format!("User {id} disappeared from the list"))
}

/// Deletes `id` once `confirm` agrees.
pub async fn delete_user(
    config: &BusinessConfig,
    store: &mut dyn SessionStore,
    id: UserId,
    confirm: impl FnOnce(&UserRecord) -> Result<bool>,
) -> Result<DeleteOutcome> {
    let (mut list, client) = load(config, store, None).await?;
    if !list.request_delete(id) {
        bail!("No user with id {id}");
    }
    let user = list
        .pending_delete()
        .cloned()
        .with_context(|| format!("No user with id {id}"))?;

    if !confirm(&user)? {
        list.cancel_delete();
        return Ok(DeleteOutcome::Cancelled);
    }

    let Some(id) = list.begin_delete() else {
        bail!("Delete of user {id} is already in progress");
    };
    let result = client.delete(id).await;
    if list.apply_delete(id, result, store, Utc::now()).is_some() {
        bail!(SESSION_EXPIRED);
    }
    fail_on_error(&list)?;
    Ok(DeleteOutcome::Deleted(user))
}
