//! User listing: records, derived view, list state and API calls.

mod api;
mod message;
mod model;
mod state;
mod view;

pub use api::UsersClient;
pub use message::{MESSAGE_TTL_SECS, Message, MessageKind, TransientMessage};
pub use model::{
    ListUsersResponse, MutationResponse, Role, UpdateStatusRequest, UserId, UserRecord,
};
pub use state::{
    DELETE_FAILED_MESSAGE, LOAD_FAILED_MESSAGE, STATUS_UPDATE_FAILED_MESSAGE,
    STATUS_UPDATED_MESSAGE, USER_DELETED_MESSAGE, UserListState,
};
pub use view::{
    DerivedView, ParseStatusFilterError, StatusFilter, USERS_PER_PAGE, ViewState, derive_view,
    filter_users, matches_search, total_pages,
};
