//! Venues admin screen.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use sporta_core::Route;
use sporta_core::models::VenueForm;

use crate::commands::venues::venue_line;
use crate::commands::{Env, ListArgs, load_page};
use crate::output;

#[derive(Args, Debug)]
pub struct VenuesCommand {
    #[command(subcommand)]
    pub command: VenuesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum VenuesSubcommand {
    /// List venues
    List(ListVenuesArgs),

    /// Create a venue
    Create(VenueFormArgs),

    /// Update a venue
    Update {
        id: u64,

        #[command(flatten)]
        form: VenueFormArgs,
    },

    /// Replace a venue's facilities, or list the known ones
    Facilities {
        /// Venue id; omit to list the available facilities
        id: Option<u64>,

        /// Facility names
        #[arg(long = "set", value_delimiter = ',')]
        facilities: Vec<String>,
    },

    /// Delete a venue
    Delete { id: u64 },
}

#[derive(Args, Debug)]
pub struct ListVenuesArgs {
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub sport: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args, Debug)]
pub struct VenueFormArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub sport: String,

    #[arg(long)]
    pub price_per_hour: u64,

    #[arg(long)]
    pub capacity: Option<u32>,

    #[arg(long)]
    pub description: Option<String>,

    /// Cover image URL
    #[arg(long)]
    pub cover_image: Option<String>,
}

impl VenueFormArgs {
    fn into_form(self) -> VenueForm {
        VenueForm {
            name: self.name,
            address: self.address,
            city: self.city,
            sport: self.sport,
            price_per_hour: self.price_per_hour,
            capacity: self.capacity,
            description: self.description,
            cover_image: self.cover_image,
        }
    }
}

pub async fn handle(env: &Env, cmd: VenuesCommand) -> Result<()> {
    let backend = env.guarded(Route::AdminVenues)?;

    match cmd.command {
        VenuesSubcommand::List(args) => {
            let query = args
                .list
                .query(&[("city", args.city.as_ref()), ("sport", args.sport.as_ref())]);
            let snapshot = load_page(backend.admin_venues(), &args.list, query).await;
            output::rows(&snapshot, args.list.json, venue_line)?;
        }
        VenuesSubcommand::Create(args) => {
            let catalog = backend
                .catalog_config()
                .await
                .context("Failed to load cities and sports")?;
            let venue = backend
                .create_venue(args.into_form(), &catalog)
                .await
                .context("Failed to create venue")?;
            output::success("Venue created");
            println!("{}", venue_line(&venue));
        }
        VenuesSubcommand::Update { id, form } => {
            let catalog = backend
                .catalog_config()
                .await
                .context("Failed to load cities and sports")?;
            let venue = backend
                .update_venue(id, form.into_form(), &catalog)
                .await
                .context("Failed to update venue")?;
            output::success("Venue updated");
            println!("{}", venue_line(&venue));
        }
        VenuesSubcommand::Facilities { id: None, .. } => {
            let facilities = backend
                .facilities()
                .await
                .context("Failed to load facilities")?;
            for facility in facilities {
                println!("{facility}");
            }
        }
        VenuesSubcommand::Facilities {
            id: Some(id),
            facilities,
        } => {
            backend
                .update_facilities(id, &facilities)
                .await
                .context("Failed to update facilities")?;
            output::success(&format!("Facilities of venue {id} updated"));
        }
        VenuesSubcommand::Delete { id } => {
            backend
                .delete_venue(id)
                .await
                .context("Failed to delete venue")?;
            output::success(&format!("Venue {id} deleted"));
        }
    }
    Ok(())
}
