//! Administration screens. Every subcommand runs through the route guard.

mod bookings;
mod usage;
mod users;
mod venues;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use sporta_core::Route;

use super::Env;
use crate::output;

#[derive(Args, Debug)]
pub struct AdminCommand {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminSubcommand {
    /// System-wide counters
    Dashboard {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage accounts
    Users(users::UsersCommand),

    /// Manage venues
    Venues(venues::VenuesCommand),

    /// Review booking requests
    Bookings(bookings::BookingsCommand),

    /// Venue usage report
    UsageStats(usage::UsageArgs),

    /// Number of active accounts
    ActiveUsers {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle(env: &Env, cmd: AdminCommand) -> Result<()> {
    match cmd.command {
        AdminSubcommand::Dashboard { json } => dashboard(env, json).await,
        AdminSubcommand::Users(cmd) => users::handle(env, cmd).await,
        AdminSubcommand::Venues(cmd) => venues::handle(env, cmd).await,
        AdminSubcommand::Bookings(cmd) => bookings::handle(env, cmd).await,
        AdminSubcommand::UsageStats(args) => usage::run(env, args).await,
        AdminSubcommand::ActiveUsers { json } => active_users(env, json).await,
    }
}

async fn dashboard(env: &Env, json: bool) -> Result<()> {
    let backend = env.guarded(Route::AdminDashboard)?;
    let stats = backend
        .system_stats()
        .await
        .context("Failed to load system stats")?;

    if json {
        return output::json(&stats);
    }

    output::field("Users", &stats.total_users.to_string());
    output::field("Venues", &stats.total_halls.to_string());
    output::field("Bookings", &stats.total_bookings.to_string());
    output::field("Confirmed", &stats.confirmed_bookings.to_string());
    output::field("Pending", &stats.pending_bookings.to_string());
    Ok(())
}

async fn active_users(env: &Env, json: bool) -> Result<()> {
    let backend = env.guarded(Route::AdminActiveUsers)?;
    let report = backend
        .active_users()
        .await
        .context("Failed to load active users")?;

    if json {
        return output::json(&report);
    }
    output::field("Active users", &report.count.to_string());
    Ok(())
}
