//! Usage stats report.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use sporta_core::Route;
use sporta_core::models::UsageStat;

use crate::commands::{Env, ListArgs, load_page};
use crate::output;

#[derive(Args, Debug)]
pub struct UsageArgs {
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub sport: Option<String>,

    /// First day of the report, YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of the report, YYYY-MM-DD
    #[arg(long)]
    pub end_date: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

fn usage_line(stat: &UsageStat) -> String {
    format!(
        "{:>5}  {}  {}  {}  bookings {} (confirmed {})  {:.1}h  revenue {}",
        stat.id,
        stat.name.bold(),
        stat.city,
        stat.sport.dimmed(),
        stat.total_bookings,
        stat.confirmed_bookings,
        stat.total_hours,
        stat.revenue
    )
}

pub async fn run(env: &Env, args: UsageArgs) -> Result<()> {
    let backend = env.guarded(Route::AdminUsageStats)?;

    let query = args.list.query(&[
        ("city", args.city.as_ref()),
        ("sport", args.sport.as_ref()),
        ("start_date", args.start_date.as_ref()),
        ("end_date", args.end_date.as_ref()),
    ]);
    let snapshot = load_page(backend.usage_stats(), &args.list, query).await;
    output::rows(&snapshot, args.list.json, usage_line)
}
