use log::warn;
use roster_business::Route;
use roster_business::login::logout;

use crate::{pages, state::State};

pub struct RosterApp {
    state: State,
}

impl RosterApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for RosterApp {
    fn default() -> Self {
        Self::new(State::default())
    }
}

impl eframe::App for RosterApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.strong("Roster");
                ui.separator();
                ui.label(self.state.route().path());

                if self.state.route() == Route::UserList {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Logout").clicked() {
                            if let Err(e) = logout(&mut *self.state.session) {
                                warn!("Failed to clear session: {e}");
                            }
                            self.state.navigate(Route::Login);
                        }
                    });
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            pages::show_route(&mut self.state, ui);
        });
    }
}
