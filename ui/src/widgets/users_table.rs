//! Users table.
//!
//! Rendered as a striped `egui::Grid` with framed header and data cells.

use egui::{
    Checkbox, Color32, Frame, InnerResponse, Margin, RichText, ScrollArea, Stroke, Ui,
};
use roster_business::users::{DerivedView, UserId, UserRecord};

use crate::utils::colors::{COLOR_GREEN, COLOR_MUTED};

const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
const HEADER_BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);

const HEADERS: [&str; 9] = [
    "S.No", "Name", "Email", "Initials", "Phone", "Role", "Status", "Title", "Actions",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Toggle(UserId),
    Edit(UserId),
    Delete(UserId),
}

fn header_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .fill(HEADER_BG_COLOR)
        .inner_margin(Margin::symmetric(8, 8))
        .show(ui, add_contents)
}

fn data_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, add_contents)
}

fn text_or_muted(ui: &mut Ui, value: &str, placeholder: bool) {
    if placeholder {
        ui.label(RichText::new(value).color(COLOR_MUTED));
    } else {
        ui.label(value);
    }
}

/// Renders the current page. Returns the row action clicked this frame, if any.
pub fn users_table(ui: &mut Ui, view: &DerivedView<'_>) -> Option<RowAction> {
    let mut action = None;

    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("users_table")
                    .num_columns(HEADERS.len())
                    .striped(true)
                    .spacing([8.0, 0.0])
                    .min_col_width(40.0)
                    .show(ui, |ui| {
                        for label in HEADERS {
                            header_cell(ui, |ui| {
                                ui.strong(label);
                            });
                        }
                        ui.end_row();

                        if view.is_empty() {
                            data_cell(ui, |ui| {
                                ui.label("No users found");
                            });
                            ui.end_row();
                            return;
                        }

                        for (offset, user) in view.items.iter().enumerate() {
                            if let Some(clicked) = user_row(ui, view.first_index + offset + 1, user)
                            {
                                action = Some(clicked);
                            }
                            ui.end_row();
                        }
                    });
            });
        });

    action
}

fn user_row(ui: &mut Ui, serial: usize, user: &UserRecord) -> Option<RowAction> {
    let mut action = None;

    data_cell(ui, |ui| {
        ui.label(RichText::new(serial.to_string()).monospace());
    });
    data_cell(ui, |ui| {
        ui.horizontal(|ui| {
            if let Some(url) = user.profile_image_url.as_deref().filter(|u| !u.is_empty()) {
                ui.hyperlink_to("🖼", url).on_hover_text(&user.first_name);
            }
            ui.label(user.full_name());
        });
    });
    data_cell(ui, |ui| {
        ui.label(&user.email);
    });
    data_cell(ui, |ui| {
        text_or_muted(
            ui,
            user.initials_display(),
            user.initials.as_deref().is_none_or(str::is_empty),
        );
    });
    data_cell(ui, |ui| {
        text_or_muted(
            ui,
            user.phone_display(),
            user.phone.as_deref().is_none_or(str::is_empty),
        );
    });
    data_cell(ui, |ui| {
        ui.label(RichText::new(user.role_display()).strong());
    });
    data_cell(ui, |ui| {
        let mut checked = user.status;
        let label = if user.status {
            RichText::new(user.status_label()).color(COLOR_GREEN)
        } else {
            RichText::new(user.status_label())
        };
        if ui.add(Checkbox::new(&mut checked, label)).clicked() {
            action = Some(RowAction::Toggle(user.id));
        }
    });
    data_cell(ui, |ui| {
        text_or_muted(
            ui,
            user.title_display(),
            user.title.as_deref().is_none_or(str::is_empty),
        );
    });
    data_cell(ui, |ui| {
        ui.horizontal(|ui| {
            if ui.button("✏ Edit").on_hover_text("Edit User").clicked() {
                action = Some(RowAction::Edit(user.id));
            }
            if ui.button("🗑 Delete").on_hover_text("Delete User").clicked() {
                action = Some(RowAction::Delete(user.id));
            }
        });
    });

    action
}
