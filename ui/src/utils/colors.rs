//! Shared color constants for the UI.

use egui::Color32;

/// Forest green for success messages and active users.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for errors and destructive actions.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Gray for placeholder cell values.
pub const COLOR_MUTED: Color32 = Color32::from_rgb(130, 130, 130);
