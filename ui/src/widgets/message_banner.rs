use egui::{Color32, Frame, Margin, Response, RichText, Ui};
use roster_business::users::{Message, MessageKind};

use crate::utils::colors::{COLOR_GREEN, COLOR_RED};

/// Colored strip showing the current status message.
pub fn message_banner(ui: &mut Ui, message: &Message) -> Response {
    let fill = match message.kind {
        MessageKind::Success => COLOR_GREEN,
        MessageKind::Error => COLOR_RED,
    };

    Frame::NONE
        .fill(fill)
        .inner_margin(Margin::symmetric(12, 6))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.label(RichText::new(&message.text).color(Color32::WHITE));
        })
        .response
}
