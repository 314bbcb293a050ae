//! Styled terminal output.

use std::fmt::Display;

use console::{Term, style};

/// Writes status lines to stdout. Write failures (closed pipe) are ignored.
pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        drop(self.term.write_line(text));
    }

    /// Green checkmark.
    pub fn success(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("✓").green().bold()));
    }

    /// Red cross.
    pub fn error(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("✗").red().bold()));
    }

    pub fn warning(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("⚠").yellow().bold()));
    }

    pub fn info(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("ℹ").blue().bold()));
    }

    pub fn print(&self, message: impl Display) {
        self.line(&message.to_string());
    }

    pub fn newline(&self) {
        self.line("");
    }

    pub fn header(&self, message: impl Display) {
        self.line(&style(message).bold().cyan().to_string());
    }

    /// `  label: value` with a dimmed label.
    pub fn labeled(&self, label: impl Display, value: impl Display) {
        self.line(&format!("  {}: {value}", style(label).dim()));
    }

    pub fn dim(&self, message: impl Display) {
        self.line(&style(message).dim().to_string());
    }

    /// Footer under the user table.
    pub fn page_summary(&self, page: usize, total_pages: usize, matching: usize) {
        self.line(&format!(
            "\n{} {} of {} ({} matching user(s))",
            style("Page").bold(),
            style(page).cyan(),
            style(total_pages.max(1)).cyan(),
            style(matching).cyan().bold()
        ));
    }
}
