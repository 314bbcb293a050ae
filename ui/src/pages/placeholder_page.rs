//! Stand-in for screens owned by other modules (OTP, company selection, user editor).

use egui::{Align, Layout, Response, Ui};
use roster_business::Route;

use crate::state::State;

fn title(route: Route) -> String {
    match route {
        Route::VerifyOtp => "Verify OTP".to_owned(),
        Route::SelectCompany => "Select Company".to_owned(),
        Route::EditUser(id) => format!("Edit User #{id}"),
        Route::AddUser => "Add User".to_owned(),
        Route::Login | Route::UserList => route.path(),
    }
}

pub fn placeholder_page(state: &mut State, ui: &mut Ui) -> Response {
    let route = state.route();
    let mut target = None;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(20.0);
            ui.heading(title(route));
            ui.label(route.path());
            ui.add_space(16.0);
            ui.label("This screen is not available in this console.");
            ui.add_space(16.0);

            match route {
                Route::EditUser(_) | Route::AddUser => {
                    if ui.button("Back to users").clicked() {
                        target = Some(Route::UserList);
                    }
                }
                _ => {
                    if ui.button("Back to login").clicked() {
                        target = Some(Route::Login);
                    }
                }
            }
        })
        .response;

    if let Some(route) = target {
        state.navigate(route);
    }
    response
}
