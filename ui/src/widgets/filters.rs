use egui::{ComboBox, Response, TextEdit, Ui};
use roster_business::users::StatusFilter;

/// Search box and status dropdown. Edits are written straight into the arguments.
pub fn filters(ui: &mut Ui, search: &mut String, filter: &mut StatusFilter) -> Response {
    ui.horizontal(|ui| {
        ui.label("🔍");
        ui.add(
            TextEdit::singleline(search)
                .hint_text("Search by name or email...")
                .desired_width(260.0),
        );

        ui.add_space(12.0);

        ComboBox::from_id_salt("status_filter")
            .selected_text(filter.label())
            .show_ui(ui, |ui| {
                for option in StatusFilter::ALL {
                    ui.selectable_value(filter, option, option.label());
                }
            });
    })
    .response
}
