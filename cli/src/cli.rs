use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use roster_business::users::StatusFilter;

#[derive(Parser)]
#[command(name = "roster-cli")]
#[command(about = "Manage Roster users from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API host, without the trailing `/api`
    #[arg(long, global = true, env = "ROSTER_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Session file to use instead of the one in the config directory
    #[arg(long, global = true, env = "ROSTER_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Send the loopback address instead of looking up the public IP on login
    #[arg(long, global = true)]
    pub no_ip_lookup: bool,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "ROSTER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show whether a usable session is stored
    Status,
    /// Work with the user list
    #[command(subcommand)]
    Users(UsersCommand),
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List users, ten per page
    List {
        /// Case-insensitive match on name or email
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Filter by status: all, active, inactive
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Page to show (clamped to the last page)
        #[arg(long, short = 'p', default_value = "1")]
        page: usize,

        /// Ask the server for this status only instead of filtering locally
        #[arg(long)]
        server_filter: bool,
    },
    /// Flip a user between active and inactive
    Toggle {
        /// User id
        id: i64,
    },
    /// Delete a user after confirmation
    Delete {
        /// User id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
