//! Bookings admin screen.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use sporta_core::Route;
use sporta_core::models::StatusUpdate;

use crate::commands::profile::booking_line;
use crate::commands::{Env, ListArgs, load_page};
use crate::output;

#[derive(Args, Debug)]
pub struct BookingsCommand {
    #[command(subcommand)]
    pub command: BookingsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BookingsSubcommand {
    /// List booking requests
    List(ListBookingsArgs),

    /// Confirm a pending booking
    Confirm { id: u64 },

    /// Cancel a booking
    Cancel {
        id: u64,

        /// Reason shown to the customer
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct ListBookingsArgs {
    /// pending, confirmed or cancelled
    #[arg(long)]
    pub status: Option<String>,

    /// Earliest date, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

pub async fn handle(env: &Env, cmd: BookingsCommand) -> Result<()> {
    let backend = env.guarded(Route::AdminBookings)?;

    match cmd.command {
        BookingsSubcommand::List(args) => {
            let query = args.list.query(&[
                ("status", args.status.as_ref()),
                ("from", args.from.as_ref()),
                ("to", args.to.as_ref()),
            ]);
            let snapshot = load_page(backend.admin_bookings(), &args.list, query).await;
            output::rows(&snapshot, args.list.json, booking_line)?;
        }
        BookingsSubcommand::Confirm { id } => {
            backend
                .update_booking_status(id, &StatusUpdate::confirm())
                .await
                .context("Failed to confirm booking")?;
            output::success(&format!("Booking {id} confirmed"));
        }
        BookingsSubcommand::Cancel { id, reason } => {
            backend
                .update_booking_status(id, &StatusUpdate::cancel(reason.as_deref()))
                .await
                .context("Failed to cancel booking")?;
            output::success(&format!("Booking {id} cancelled"));
        }
    }
    Ok(())
}
