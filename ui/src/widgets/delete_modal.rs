use egui::{Align2, RichText, Window};
use roster_business::users::UserRecord;

use crate::utils::colors::COLOR_RED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteModalAction {
    Confirm,
    Cancel,
}

/// Confirmation window for deleting `user`.
pub fn delete_modal(
    ctx: &egui::Context,
    user: &UserRecord,
    deleting: bool,
) -> Option<DeleteModalAction> {
    let mut action = None;
    let mut open = true;

    Window::new("Confirm Delete")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "Are you sure you want to delete user {}?",
                user.full_name()
            ));
            ui.label("This action cannot be undone.");
            ui.add_space(16.0);

            if deleting {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Deleting user...");
                });
                return;
            }

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    action = Some(DeleteModalAction::Cancel);
                }
                if ui
                    .button(RichText::new("Delete").color(COLOR_RED))
                    .clicked()
                {
                    action = Some(DeleteModalAction::Confirm);
                }
            });
        });

    if !open {
        action = Some(DeleteModalAction::Cancel);
    }
    action
}
