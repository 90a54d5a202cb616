//! The signed-in user's profile and booking history.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use sporta_core::models::{Booking, BookingStatus, ProfileUpdate};
use sporta_core::Route;

use super::{Env, ListArgs, load_page};
use crate::output;

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: Option<ProfileSubcommand>,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// Show account details
    Show,

    /// Change account details
    Update(UpdateArgs),

    /// Booking history
    Bookings(BookingsArgs),
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Args, Debug)]
pub struct BookingsArgs {
    /// Only bookings with this status
    #[arg(long)]
    pub status: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

pub async fn handle(env: &Env, cmd: ProfileCommand) -> Result<()> {
    let backend = env.guarded(Route::Profile)?;

    match cmd.command.unwrap_or(ProfileSubcommand::Show) {
        ProfileSubcommand::Show => {
            let profile = backend.profile().await.context("Failed to load profile")?;
            output::field("Username", &profile.username);
            output::field("Email", &profile.email);
            output::field("Role", profile.role.label());
            if let Some(phone) = &profile.phone_number {
                output::field("Phone", phone);
            }
        }
        ProfileSubcommand::Update(args) => {
            let update = ProfileUpdate {
                username: args.username,
                email: args.email,
                phone_number: args.phone,
            };
            let profile = backend
                .update_profile(update)
                .await
                .context("Failed to update profile")?;
            output::success("Profile updated");
            output::field("Username", &profile.username);
            output::field("Email", &profile.email);
        }
        ProfileSubcommand::Bookings(args) => {
            let query = args.list.query(&[("status", args.status.as_ref())]);
            let snapshot = load_page(backend.my_bookings(), &args.list, query).await;
            output::rows(&snapshot, args.list.json, booking_line)?;
        }
    }
    Ok(())
}

pub fn booking_line(booking: &Booking) -> String {
    let status = match booking.status {
        BookingStatus::Pending => booking.status.as_str().yellow(),
        BookingStatus::Confirmed => booking.status.as_str().green(),
        BookingStatus::Cancelled => booking.status.as_str().red(),
    };
    let date = booking
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:>6}  {}  {} {}  {}h  {}  {}",
        booking.id,
        booking.hall_name.bold(),
        date,
        booking.time.as_deref().unwrap_or("-"),
        booking.duration_hours,
        booking.price,
        status
    )
}
