//! Command implementations for the Roster CLI.
//!
//! Each subcommand is implemented in its own module.

pub mod completions;
pub mod login;
pub mod session;
pub mod users;

pub use completions::generate_completions;
pub use login::run_login;
pub use session::{run_logout, run_status};
pub use users::run_users;

/// Shown when a command needs a session and none is stored.
pub const NOT_SIGNED_IN: &str = "Not signed in. Run `roster-cli login` first.";

/// Shown when the server rejected the stored session (it has been cleared).
pub const SESSION_EXPIRED: &str = "Session expired. Run `roster-cli login` again.";
