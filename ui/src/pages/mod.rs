//! Pages module for the application.
//!
//! One page per route:
//! - `login_page`: sign-in form
//! - `user_list_page`: user management table
//! - `placeholder_page`: routes handled outside this console

mod login_page;
mod placeholder_page;
mod user_list_page;

pub use login_page::{LoginPageState, login_page};
pub use placeholder_page::placeholder_page;
pub use user_list_page::{UserListPage, user_list_page};

use egui::{Response, Ui};
use roster_business::Route;

use crate::state::State;

/// Renders the page for the current route.
pub fn show_route(state: &mut State, ui: &mut Ui) -> Response {
    match state.route() {
        Route::Login => login_page(state, ui),
        Route::UserList => user_list_page(state, ui),
        Route::VerifyOtp | Route::SelectCompany | Route::EditUser(_) | Route::AddUser => {
            placeholder_page(state, ui)
        }
    }
}
