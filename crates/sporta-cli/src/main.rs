//! sporta - command-line client for the Sporta venue-booking backend.
//!
//! Each screen of the booking client is a subcommand driving the same list
//! controllers and backend operations.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{Env, admin, auth, profile, support, venues};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let env = Env::new(&cli.api)?;

    match cli.command {
        Commands::Login(args) => auth::login(&env, args).await,
        Commands::Logout => auth::logout(),
        Commands::Whoami => auth::whoami(&env),
        Commands::Refresh => auth::refresh(&env).await,
        Commands::Register(args) => auth::register(&env, args).await,
        Commands::ForgotPassword(args) => support::forgot_password(&env, args).await,
        Commands::ResetPassword(args) => support::reset_password(&env, args).await,
        Commands::Venues(args) => venues::list(&env, args).await,
        Commands::Venue(args) => venues::show(&env, args).await,
        Commands::Book(args) => venues::book(&env, args).await,
        Commands::Profile(cmd) => profile::handle(&env, cmd).await,
        Commands::Contact(args) => support::contact(&env, args).await,
        Commands::Admin(cmd) => admin::handle(&env, cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
