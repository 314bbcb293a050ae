mod cli;
mod commands;
mod context;
mod output;
mod timing;

use anyhow::Result;
use clap::Parser as _;

use crate::cli::{Cli, Commands};
use crate::commands::{
    generate_completions, run_login, run_logout, run_status, run_users,
};
use crate::context::CliContext;

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        command,
        api_url,
        session_file,
        no_ip_lookup,
        timing,
        verbose,
    } = Cli::parse();

    timing::init_tracing(verbose, timing);

    let open = || CliContext::open(api_url.as_deref(), session_file.as_deref(), no_ip_lookup);

    match command {
        Commands::Login { email, password } => run_login(&mut open()?, email, password).await,
        Commands::Logout => run_logout(&mut open()?),
        Commands::Status => run_status(&open()?),
        Commands::Users(users) => run_users(&mut open()?, users).await,
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}
