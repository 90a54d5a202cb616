//! Public venue screens: the carousel, venue details and booking.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use colored::Colorize;
use tracing::debug;

use sporta_core::models::{BookingRequest, Venue};
use sporta_core::{ControllerOptions, ListController, ListQuery, Route};

use super::Env;
use crate::output;

#[derive(Args, Debug)]
pub struct VenuesArgs {
    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Only venues for this sport
    #[arg(long)]
    pub sport: Option<String>,

    /// Pages to scroll through
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Print venues as JSON lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VenueArgs {
    /// Venue id
    pub id: u64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct BookArgs {
    /// Venue id
    #[arg(long)]
    pub venue: u64,

    /// Date, YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,

    /// Start time, HH:MM
    #[arg(long, value_parser = parse_time)]
    pub start: NaiveTime,

    /// End time, HH:MM
    #[arg(long, value_parser = parse_time)]
    pub end: NaiveTime,
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("expected HH:MM: {e}"))
}

pub fn venue_line(venue: &Venue) -> String {
    format!(
        "{:>5}  {}  {}  {}  {}/h  ★{:.1}",
        venue.id,
        venue.name.bold(),
        venue.city,
        venue.sport.dimmed(),
        venue.price_per_hour,
        venue.rating
    )
}

/// Scroll the carousel, prefetching a page each time the sentinel shows.
pub async fn list(env: &Env, args: VenuesArgs) -> Result<()> {
    let backend = env.current()?;

    let mut query = ListQuery::new(ControllerOptions::carousel().page_size);
    if let Some(search) = &args.search {
        query = query.with_search(search.clone());
    }
    if let Some(sport) = &args.sport {
        query = query.with_filter("sport", sport.as_str());
    }

    let controller =
        ListController::with_query(backend.venue_carousel(), ControllerOptions::carousel(), query);
    controller.mount();
    let mut snapshot = controller.settled().await;

    for _ in 1..args.pages {
        if snapshot.error.is_some() {
            break;
        }
        controller.sentinel_visibility(false);
        if !controller.sentinel_visibility(true) {
            debug!(page = snapshot.page, "no more pages");
            break;
        }
        snapshot = controller.settled().await;
    }

    output::rows(&snapshot, args.json, venue_line)?;
    if snapshot.page < snapshot.total_pages {
        eprintln!(
            "{}",
            format!("Scrolled {} of {} pages.", snapshot.page, snapshot.total_pages).dimmed()
        );
    }
    Ok(())
}

pub async fn show(env: &Env, args: VenueArgs) -> Result<()> {
    let backend = env.guarded(Route::VenueDetails(args.id))?;
    let venue = backend
        .venue(args.id)
        .await
        .context("Failed to load venue")?;

    if args.pretty {
        return output::json_pretty(&venue);
    }

    output::field("Venue", &venue.name);
    output::field("City", &venue.city);
    output::field("Sport", &venue.sport);
    output::field("Price per hour", &venue.price_per_hour.to_string());
    output::field("Rating", &format!("{:.1}", venue.rating));
    if let Some(address) = &venue.address {
        output::field("Address", address);
    }
    if !venue.tags.is_empty() {
        output::field("Facilities", &venue.tags.join(", "));
    }
    Ok(())
}

pub async fn book(env: &Env, args: BookArgs) -> Result<()> {
    let backend = env.guarded(Route::VenueDetails(args.venue))?;
    if !backend.session().is_authenticated() {
        bail!("Please log in first. Run 'sporta login'.");
    }

    let request = BookingRequest::new(args.venue, args.date, args.start, args.end)?;
    let created = backend
        .create_booking(&request)
        .await
        .context("Failed to book")?;

    output::success("Booking requested");
    output::field("Booking", &created.id.to_string());
    output::field("Status", created.status.as_str());
    Ok(())
}
