//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::admin::AdminCommand;
use crate::commands::auth::{LoginArgs, RegisterArgs};
use crate::commands::profile::ProfileCommand;
use crate::commands::support::{ContactArgs, ForgotPasswordArgs, ResetPasswordArgs};
use crate::commands::venues::{BookArgs, VenueArgs, VenuesArgs};

/// Sporta venue-booking client.
#[derive(Parser, Debug)]
#[command(name = "sporta")]
#[command(author, version = env!("SPORTA_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Backend base URL
    #[arg(
        long,
        global = true,
        env = "SPORTA_API_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub api: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and save the session
    Login(LoginArgs),

    /// Forget the saved session
    Logout,

    /// Display the saved session
    Whoami,

    /// Exchange the refresh token for a new access token
    Refresh,

    /// Create an account
    Register(RegisterArgs),

    /// Email a password reset code
    ForgotPassword(ForgotPasswordArgs),

    /// Set a new password with the emailed code
    ResetPassword(ResetPasswordArgs),

    /// Browse venues (infinite carousel)
    Venues(VenuesArgs),

    /// Show one venue
    Venue(VenueArgs),

    /// Book a time slot
    Book(BookArgs),

    /// Profile and booking history
    Profile(ProfileCommand),

    /// Send a message to support
    Contact(ContactArgs),

    /// Administration screens
    Admin(AdminCommand),
}
